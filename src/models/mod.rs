//! Read-only views of game state consumed by the renderers

mod graph;
mod item;

pub use graph::{Graph, MapNode, NodeCategory, Route};
pub use item::{
    ArtworkKey, ArtworkKind, ExpProgress, Fleet, MembershipDirectory, OwnerResolver, OwnerSummary,
    RemodelHint, RenderableItem,
};

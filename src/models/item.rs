//! Inventory items and their owners

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::AssetError;

/// Which artwork of an item to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkKind {
    /// Full portrait, used by cards and birthday portraits
    #[default]
    Full,
    /// Small banner, used by inventory cells
    Icon,
}

/// Artwork lookup key: variant plus damaged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArtworkKey {
    pub kind: ArtworkKind,
    pub damaged: bool,
}

impl ArtworkKey {
    pub const FULL: ArtworkKey = ArtworkKey { kind: ArtworkKind::Full, damaged: false };
    pub const ICON: ArtworkKey = ArtworkKey { kind: ArtworkKind::Icon, damaged: false };
}

/// Experience towards the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpProgress {
    pub current: u64,
    pub required: u64,
}

impl ExpProgress {
    /// Progress as a percentage; zero when nothing is required.
    pub fn percent(&self) -> f64 {
        if self.required == 0 {
            return 0.0;
        }
        100.0 * self.current as f64 / self.required as f64
    }
}

/// The form an item upgrades into, and the level it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemodelHint {
    pub name: String,
    pub level: u32,
}

/// What the renderers need to know about one owned item.
///
/// Implementations are read-only projections of game state; rendering never
/// mutates them. Artwork returned from [`RenderableItem::artwork`] may be a
/// shared cache entry and is copied before any pixel edit.
pub trait RenderableItem: Send + Sync {
    /// Rarity tier, 1-based
    fn rarity(&self) -> u32;
    /// Slot number in the owner's inventory
    fn inventory_id(&self) -> u64;
    /// Short type code, e.g. "DD"
    fn type_code(&self) -> &str;
    /// Full type name, e.g. "Destroyer"
    fn type_name(&self) -> &str;
    fn name(&self) -> &str;
    fn class_name(&self) -> &str;
    fn level(&self) -> u32;
    fn experience(&self) -> ExpProgress;
    fn is_remodel_ready(&self) -> bool;
    fn next_remodel(&self) -> Option<RemodelHint>;
    /// Identity of the original form, shared by every upgrade of it
    fn canonical_key(&self) -> u64;
    /// Carries a rare cosmetic variant
    fn has_special_variant(&self) -> bool;
    fn owner_id(&self) -> u64;
    fn artwork(&self, key: ArtworkKey) -> Result<Arc<RgbaImage>, AssetError>;

    /// Short identifier such as `DD-0012`.
    fn label(&self) -> String {
        format!("{}-{:04}", self.type_code(), self.inventory_id())
    }
}

/// An ordered group of inventory ids; the first member is the flagship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub members: Vec<u64>,
}

impl Fleet {
    pub fn new(members: Vec<u64>) -> Self {
        Self { members }
    }

    pub fn contains(&self, inventory_id: u64) -> bool {
        self.members.contains(&inventory_id)
    }

    pub fn is_flagship(&self, inventory_id: u64) -> bool {
        self.members.first() == Some(&inventory_id)
    }
}

/// Owner data shown in the inventory footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerSummary {
    pub display_name: String,
    pub fuel: u64,
    pub ammo: u64,
    pub steel: u64,
    pub bauxite: u64,
    pub ship_slots: u64,
    pub rings: u64,
}

/// Resolves an owner id to a display name.
pub trait OwnerResolver: Send + Sync {
    fn display_name(&self, owner_id: u64) -> Option<String>;
}

impl OwnerResolver for HashMap<u64, String> {
    fn display_name(&self, owner_id: u64) -> Option<String> {
        self.get(&owner_id).cloned()
    }
}

/// Known memberships, scanned in order; the first one listing the owner wins.
#[derive(Debug, Clone, Default)]
pub struct MembershipDirectory {
    pub memberships: Vec<HashMap<u64, String>>,
}

impl OwnerResolver for MembershipDirectory {
    fn display_name(&self, owner_id: u64) -> Option<String> {
        self.memberships.iter().find_map(|m| m.get(&owner_id).cloned())
    }
}

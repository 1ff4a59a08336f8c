//! Scene files: plain game-state snapshots for the command line
//!
//! A scene carries everything the renderers need from the game side: the
//! owner's footer summary, their fleet and their items. Items name their
//! artwork files; binding a scene to an [`AssetSource`] turns them into
//! [`RenderableItem`]s.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::{AssetError, AssetSource};
use crate::models::{
    ArtworkKey, ArtworkKind, ExpProgress, Fleet, OwnerResolver, OwnerSummary, RemodelHint, RenderableItem,
};

/// Artwork file names of one item. Damaged variants fall back to the
/// undamaged ones when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtworkFiles {
    pub full: String,
    pub icon: String,
    #[serde(default)]
    pub full_damaged: Option<String>,
    #[serde(default)]
    pub icon_damaged: Option<String>,
}

impl ArtworkFiles {
    pub fn file(&self, key: ArtworkKey) -> &str {
        match (key.kind, key.damaged) {
            (ArtworkKind::Full, true) => self.full_damaged.as_deref().unwrap_or(&self.full),
            (ArtworkKind::Icon, true) => self.icon_damaged.as_deref().unwrap_or(&self.icon),
            (ArtworkKind::Full, false) => &self.full,
            (ArtworkKind::Icon, false) => &self.icon,
        }
    }
}

/// Upgrade target of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneRemodel {
    pub name: String,
    pub level: u32,
}

/// One owned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneItem {
    pub inventory_id: u64,
    /// Original form, shared across upgrades
    pub base_id: u64,
    pub name: String,
    pub class_name: String,
    pub type_code: String,
    pub type_name: String,
    pub rarity: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub exp: u64,
    #[serde(default)]
    pub exp_required: u64,
    #[serde(default)]
    pub remodel: Option<SceneRemodel>,
    #[serde(default)]
    pub seasonal: bool,
    pub owner: u64,
    pub artwork: ArtworkFiles,
}

fn default_level() -> u32 {
    1
}

/// A snapshot of one owner's game state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub owner: OwnerSummary,
    #[serde(default)]
    pub fleet: Fleet,
    #[serde(default)]
    pub items: Vec<SceneItem>,
    /// Known display names by owner id, for the card's owner line
    #[serde(default)]
    pub members: HashMap<u64, String>,
}

impl Scene {
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Attach an asset source to every item.
    pub fn bind<'a>(&'a self, assets: &'a dyn AssetSource) -> Vec<BoundItem<'a>> {
        self.items.iter().map(|item| BoundItem { item, assets }).collect()
    }

    pub fn find(&self, inventory_id: u64) -> Option<&SceneItem> {
        self.items.iter().find(|i| i.inventory_id == inventory_id)
    }

    pub fn owners(&self) -> &dyn OwnerResolver {
        &self.members
    }
}

/// A scene item whose artwork resolves through an asset source.
#[derive(Clone, Copy)]
pub struct BoundItem<'a> {
    pub item: &'a SceneItem,
    pub assets: &'a dyn AssetSource,
}

impl<'a> BoundItem<'a> {
    pub fn new(item: &'a SceneItem, assets: &'a dyn AssetSource) -> Self {
        Self { item, assets }
    }
}

impl std::fmt::Debug for BoundItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoundItem").field(&self.item.inventory_id).finish()
    }
}

impl RenderableItem for BoundItem<'_> {
    fn rarity(&self) -> u32 {
        self.item.rarity
    }

    fn inventory_id(&self) -> u64 {
        self.item.inventory_id
    }

    fn type_code(&self) -> &str {
        &self.item.type_code
    }

    fn type_name(&self) -> &str {
        &self.item.type_name
    }

    fn name(&self) -> &str {
        &self.item.name
    }

    fn class_name(&self) -> &str {
        &self.item.class_name
    }

    fn level(&self) -> u32 {
        self.item.level
    }

    fn experience(&self) -> ExpProgress {
        ExpProgress { current: self.item.exp, required: self.item.exp_required }
    }

    fn is_remodel_ready(&self) -> bool {
        self.item.remodel.as_ref().is_some_and(|r| self.item.level >= r.level)
    }

    fn next_remodel(&self) -> Option<RemodelHint> {
        self.item.remodel.as_ref().map(|r| RemodelHint { name: r.name.clone(), level: r.level })
    }

    fn canonical_key(&self) -> u64 {
        self.item.base_id
    }

    fn has_special_variant(&self) -> bool {
        self.item.seasonal
    }

    fn owner_id(&self) -> u64 {
        self.item.owner
    }

    fn artwork(&self, key: ArtworkKey) -> Result<Arc<RgbaImage>, AssetError> {
        self.assets.image(self.item.artwork.file(key))
    }
}

//! Layout document and settings schema
//!
//! Defines the strongly-typed structure of a layout document (one section per
//! output type) and of the engine settings file, plus the validation rules
//! that run once at load time.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A single positioned text field.
///
/// `position` is the center of the rendered text. Text wider than `width` is
/// squished horizontally to fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Draw this field at all
    pub enabled: bool,
    /// Center point of the text [x, y]
    pub position: [i32; 2],
    /// Maximum rendered width in pixels
    pub width: u32,
    /// Font reference resolved through the font provider
    pub font: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Fill colour
    pub color: Rgb,
    /// Outline colour, `None` for no outline
    #[serde(default)]
    pub outline: Option<Rgb>,
    /// Center vertically on `position` (otherwise `position.y` is the top)
    #[serde(default = "default_true")]
    pub center_vertically: bool,
    /// Number of stacked passes, for sharper text
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_true() -> bool {
    true
}

fn default_repeat() -> u32 {
    1
}

impl FieldSpec {
    /// A field with the usual defaults, used for the built-in sections.
    pub fn new(position: [i32; 2], width: u32, font: &str, font_size: f32, color: Rgb) -> Self {
        Self {
            enabled: true,
            position,
            width,
            font: font.to_string(),
            font_size,
            color,
            outline: None,
            center_vertically: true,
            repeat: 1,
        }
    }

    pub fn with_outline(mut self, outline: Rgb) -> Self {
        self.outline = Some(outline);
        self
    }
}

/// File names of the shared image assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPaths {
    /// Backdrop per rarity tier; tier 1 uses the first entry
    pub rarity_backdrops: Vec<String>,
    /// Ring badge shown for items past the level cap
    pub ring_icon: String,
    pub birthday_background: String,
    pub map_background: String,
    pub icons: ResourceIcons,
}

/// Footer icons for the inventory resource counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceIcons {
    pub fuel: String,
    pub ammo: String,
    pub steel: String,
    pub bauxite: String,
    pub ships: String,
    pub rings: String,
}

/// Cell shading colours. Paired entries alternate with the shade flag; the
/// first entry is used while the flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadePalette {
    pub empty: [Rgb; 2],
    pub filled: [Rgb; 2],
    pub fleet: [Rgb; 2],
    pub seasonal: [Rgb; 2],
    pub flagship: Rgb,
}

/// Fonts used by the inventory grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryFonts {
    /// Cell identifier, level and resource values
    pub label: String,
    /// Footer title
    pub footer: String,
    /// Footer page indicator
    pub footer_page: String,
}

/// The `inventory` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryLayout {
    /// Size of the grid area [w, h], before supersampling
    pub image_size: [u32; 2],
    /// Cells per row
    pub per_row: u32,
    /// Cells per column
    pub per_column: u32,
    /// Footer band height, before supersampling
    pub lower_padding: u32,
    /// Linear supersampling factor
    #[serde(default = "default_supersample")]
    pub supersample: u32,
    /// Noun shown in the footer title ("<name>'s Ships")
    #[serde(default = "default_item_plural")]
    pub item_plural: String,
    pub shades: ShadePalette,
    pub fonts: InventoryFonts,
    #[serde(default = "default_footer_text")]
    pub footer_text: Rgb,
    #[serde(default = "default_page_text")]
    pub page_text: Rgb,
    #[serde(default = "default_upgrade_ready")]
    pub upgrade_ready: Rgb,
}

fn default_supersample() -> u32 {
    2
}

fn default_item_plural() -> String {
    "Ships".to_string()
}

fn default_footer_text() -> Rgb {
    Rgb::BLACK
}

fn default_page_text() -> Rgb {
    Rgb::new(50, 50, 50)
}

fn default_upgrade_ready() -> Rgb {
    Rgb::new(50, 0, 250)
}

impl InventoryLayout {
    /// Number of cells on one page.
    pub fn capacity(&self) -> usize {
        (self.per_row * self.per_column) as usize
    }
}

/// Placement of the main artwork on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MainImageSpec {
    pub enabled: bool,
    /// Height the artwork is resized to, width follows the aspect ratio
    pub target_height: u32,
    /// Horizontal center of the artwork
    pub x_offset: i32,
    /// Top edge of the artwork
    pub y_offset: i32,
}

/// A square badge at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BadgeSpec {
    pub position: [i32; 2],
    pub size: u32,
}

impl Default for BadgeSpec {
    fn default() -> Self {
        Self { position: [20, 20], size: 60 }
    }
}

/// The `ship_card` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardLayout {
    pub small_identifier: FieldSpec,
    pub name: FieldSpec,
    pub class_name: FieldSpec,
    pub level_indicator: FieldSpec,
    pub level_progress: FieldSpec,
    pub next_remodel: FieldSpec,
    pub owned_by: FieldSpec,
    pub main_image: MainImageSpec,
    #[serde(default)]
    pub ring_badge: BadgeSpec,
    /// Noun used by the owner line ("Part of <name>'s Fleet")
    #[serde(default = "default_fleet_noun")]
    pub fleet_noun: String,
}

fn default_fleet_noun() -> String {
    "Fleet".to_string()
}

/// The `birthday` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BirthdayLayout {
    pub image_size: [u32; 2],
    pub background: Rgb,
    /// Artwork height as a fraction of the canvas height
    pub art_height_ratio: f32,
    pub title_text: String,
    pub title: FieldSpec,
    pub name: FieldSpec,
}

impl Default for BirthdayLayout {
    fn default() -> Self {
        let outline = Rgb::new(125, 125, 125);
        Self {
            image_size: [600, 800],
            background: Rgb::BLACK,
            art_height_ratio: 0.75,
            title_text: "Happy Birthday".to_string(),
            title: FieldSpec::new([300, 620], 580, "impact.ttf", 60.0, Rgb::BLACK).with_outline(outline),
            name: FieldSpec::new([300, 710], 580, "impact.ttf", 80.0, Rgb::BLACK).with_outline(outline),
        }
    }
}

/// The `map` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MapLayout {
    /// Border around the map area, on every side
    pub padding: u32,
    /// Height of one legend line
    pub legend_line_height: u32,
    /// Extra gap after each node's group of legend lines
    pub legend_group_gap: u32,
    pub legend_background: Rgb,
    pub legend_text: Rgb,
    /// Half the base width of a route arrowhead
    pub arrow_half_width: f64,
    pub arrow_fill: Rgb,
    pub arrow_outline: Rgb,
    pub node_radius: u32,
    /// Widest a node symbol may render before it is squished
    pub symbol_width: u32,
    pub symbol_color: Rgb,
    pub font: String,
    pub font_size: f32,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            padding: 20,
            legend_line_height: 22,
            legend_group_gap: 10,
            legend_background: Rgb::new(50, 50, 50),
            legend_text: Rgb::WHITE,
            arrow_half_width: 5.0,
            arrow_fill: Rgb::new(142, 136, 255),
            arrow_outline: Rgb::BLACK,
            node_radius: 12,
            symbol_width: 35,
            symbol_color: Rgb::WHITE,
            font: "framd.ttf".to_string(),
            font_size: 20.0,
        }
    }
}

/// A complete layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    pub assets: AssetPaths,
    pub inventory: InventoryLayout,
    pub ship_card: CardLayout,
    #[serde(default)]
    pub birthday: BirthdayLayout,
    #[serde(default)]
    pub map: MapLayout,
}

/// Validation error for a layout document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutValidationError {
    /// Path to the invalid field (e.g., "inventory.per_row")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LayoutValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layout: '{}' {}", self.field, self.message)
    }
}

impl LayoutDocument {
    /// Validate the document and return every problem found.
    pub fn validate(&self) -> Vec<LayoutValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| {
            errors.push(LayoutValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        if self.assets.rarity_backdrops.is_empty() {
            push("assets.rarity_backdrops", "must list at least one backdrop");
        }

        let inv = &self.inventory;
        if inv.image_size[0] == 0 || inv.image_size[1] == 0 {
            push("inventory.image_size", "dimensions must be positive");
        }
        if inv.per_row == 0 {
            push("inventory.per_row", "must be a positive integer");
        }
        if inv.per_column == 0 {
            push("inventory.per_column", "must be a positive integer");
        }
        if inv.lower_padding == 0 {
            push("inventory.lower_padding", "must be a positive integer");
        }
        if inv.supersample == 0 {
            push("inventory.supersample", "must be a positive integer");
        }

        let card = &self.ship_card;
        if card.main_image.enabled && card.main_image.target_height == 0 {
            push("ship_card.main_image.target_height", "must be positive when enabled");
        }
        let fields = [
            ("ship_card.small_identifier", &card.small_identifier),
            ("ship_card.name", &card.name),
            ("ship_card.class_name", &card.class_name),
            ("ship_card.level_indicator", &card.level_indicator),
            ("ship_card.level_progress", &card.level_progress),
            ("ship_card.next_remodel", &card.next_remodel),
            ("ship_card.owned_by", &card.owned_by),
            ("birthday.title", &self.birthday.title),
            ("birthday.name", &self.birthday.name),
        ];
        for (path, field) in fields {
            if !field.enabled {
                continue;
            }
            if field.width == 0 {
                push(&format!("{path}.width"), "must be positive");
            }
            if field.font_size <= 0.0 {
                push(&format!("{path}.font_size"), "must be positive");
            }
            if field.font.is_empty() {
                push(&format!("{path}.font"), "must name a font");
            }
        }

        if self.birthday.image_size[0] == 0 || self.birthday.image_size[1] == 0 {
            push("birthday.image_size", "dimensions must be positive");
        }
        if !(self.birthday.art_height_ratio > 0.0 && self.birthday.art_height_ratio <= 1.0) {
            push("birthday.art_height_ratio", "must be in (0, 1]");
        }
        if self.map.font_size <= 0.0 {
            push("map.font_size", "must be positive");
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Feature switches consulted before drawing optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FeatureToggles {
    pub levels_enabled: bool,
    pub resources_enabled: bool,
    pub marriage_enabled: bool,
}

/// Level caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LevelSettings {
    /// Highest level reachable without the ring
    pub level_cap: u32,
    /// Highest level reachable after the ring
    pub level_cap_married: u32,
    /// Rings are a counted footer resource
    pub marriage_ring_required: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self { level_cap: 99, level_cap_married: 165, marriage_ring_required: false }
    }
}

/// Engine settings. Every toggle is off unless the settings file turns it on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    pub features: FeatureToggles,
    pub levels: LevelSettings,
}

impl Settings {
    /// Rings are drawn next to the footer counters.
    pub fn shows_ring_counter(&self) -> bool {
        self.features.marriage_enabled && self.levels.marriage_ring_required
    }
}

//! Shared fixtures for unit tests

use image::{Rgba, RgbaImage};
use std::sync::Arc;

use crate::assets::MemoryAssets;
use crate::color::Rgb;
use crate::config::{
    AssetPaths, BadgeSpec, BirthdayLayout, CardLayout, FieldSpec, InventoryFonts, InventoryLayout, LayoutDocument,
    MainImageSpec, MapLayout, ResourceIcons, ShadePalette,
};
use crate::error::RenderError;
use crate::scene::{ArtworkFiles, SceneItem};
use crate::text::{Font, FontProvider, Typeface};

/// A typeface of solid boxes: every character advances `size / 2` pixels and
/// fills its cell inset by one pixel. Whitespace draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BlockFace;

impl Typeface for BlockFace {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let advance = (size / 2.0) as u32;
        (advance * text.chars().count() as u32, size as u32)
    }

    fn rasterize(&self, text: &str, size: f32, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) {
        let advance = (size / 2.0) as i32;
        let height = size as i32;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = origin.0 + i as i32 * advance + 1;
            let x1 = origin.0 + (i as i32 + 1) * advance - 2;
            for y in (origin.1 + 1)..=(origin.1 + height - 2) {
                for x in x0..=x1 {
                    plot(x, y, 1.0);
                }
            }
        }
    }
}

/// Serves [`BlockFace`] for every font name.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BlockFonts;

impl FontProvider for BlockFonts {
    fn face(&self, _name: &str) -> Result<Arc<dyn Typeface>, RenderError> {
        Ok(Arc::new(BlockFace))
    }
}

pub(crate) fn block_font(size: f32) -> Font {
    Font::new(Arc::new(BlockFace), size)
}

pub(crate) const EMPTY_A: Rgb = Rgb::new(240, 240, 240);
pub(crate) const EMPTY_B: Rgb = Rgb::new(220, 220, 220);
pub(crate) const FILLED_A: Rgb = Rgb::new(200, 230, 200);
pub(crate) const FILLED_B: Rgb = Rgb::new(180, 210, 180);
pub(crate) const FLEET_A: Rgb = Rgb::new(200, 200, 250);
pub(crate) const FLEET_B: Rgb = Rgb::new(180, 180, 230);
pub(crate) const SEASONAL_A: Rgb = Rgb::new(250, 200, 200);
pub(crate) const SEASONAL_B: Rgb = Rgb::new(230, 180, 180);
pub(crate) const FLAGSHIP: Rgb = Rgb::new(255, 215, 0);
pub(crate) const BACKDROP: Rgb = Rgb::new(10, 120, 200);

/// A 2x2 grid of 100x50 cells with a 40 pixel footer, rendered without
/// supersampling so pixel positions are exact.
pub(crate) fn sample_layout() -> LayoutDocument {
    let field = |x: i32, y: i32| FieldSpec::new([x, y], 120, "card.ttf", 10.0, Rgb::BLACK);
    LayoutDocument {
        assets: AssetPaths {
            rarity_backdrops: vec!["bg_1.png".into(), "bg_2.png".into(), "bg_3.png".into()],
            ring_icon: "ring.png".into(),
            birthday_background: "bday_bg.png".into(),
            map_background: "map_bg.png".into(),
            icons: ResourceIcons {
                fuel: "fuel.png".into(),
                ammo: "ammo.png".into(),
                steel: "steel.png".into(),
                bauxite: "bauxite.png".into(),
                ships: "ship.png".into(),
                rings: "rings.png".into(),
            },
        },
        inventory: InventoryLayout {
            image_size: [200, 100],
            per_row: 2,
            per_column: 2,
            lower_padding: 40,
            supersample: 1,
            item_plural: "Ships".into(),
            shades: ShadePalette {
                empty: [EMPTY_A, EMPTY_B],
                filled: [FILLED_A, FILLED_B],
                fleet: [FLEET_A, FLEET_B],
                seasonal: [SEASONAL_A, SEASONAL_B],
                flagship: FLAGSHIP,
            },
            fonts: InventoryFonts { label: "label.ttf".into(), footer: "footer.ttf".into(), footer_page: "page.ttf".into() },
            footer_text: Rgb::BLACK,
            page_text: Rgb::new(50, 50, 50),
            upgrade_ready: Rgb::new(50, 0, 250),
        },
        ship_card: CardLayout {
            small_identifier: field(150, 20),
            name: field(100, 150),
            class_name: field(100, 170),
            level_indicator: field(100, 190),
            level_progress: field(100, 210),
            next_remodel: field(100, 230),
            owned_by: field(100, 250),
            main_image: MainImageSpec { enabled: true, target_height: 100, x_offset: 100, y_offset: 10 },
            ring_badge: BadgeSpec::default(),
            fleet_noun: "Fleet".into(),
        },
        birthday: BirthdayLayout::default(),
        map: MapLayout::default(),
    }
}

fn solid(w: u32, h: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(color))
}

/// Every asset [`sample_layout`] names, plus the artwork of [`sample_item`].
pub(crate) fn sample_assets() -> MemoryAssets {
    let [r, g, b] = BACKDROP.0;
    MemoryAssets::new()
        .with("bg_1.png", solid(200, 300, [r, g, b, 255]))
        .with("bg_2.png", solid(200, 300, [r, g, b, 255]))
        .with("bg_3.png", solid(200, 300, [r, g, b, 255]))
        .with("ring.png", solid(8, 8, [255, 255, 0, 255]))
        .with("bday_bg.png", solid(600, 800, [30, 30, 30, 255]))
        .with("map_bg.png", solid(50, 50, [0, 80, 0, 255]))
        .with("fuel.png", solid(4, 4, [0, 150, 0, 255]))
        .with("ammo.png", solid(4, 4, [150, 150, 0, 255]))
        .with("steel.png", solid(4, 4, [150, 150, 150, 255]))
        .with("bauxite.png", solid(4, 4, [200, 100, 0, 255]))
        .with("ship.png", solid(4, 4, [0, 0, 150, 255]))
        .with("rings.png", solid(4, 4, [255, 0, 255, 255]))
        .with("art_full.png", solid(40, 80, [255, 0, 0, 255]))
        .with("art_icon.png", solid(30, 20, [0, 255, 0, 255]))
}

/// A level 1 item whose artwork is in [`sample_assets`].
pub(crate) fn sample_item(inventory_id: u64, base_id: u64) -> SceneItem {
    SceneItem {
        inventory_id,
        base_id,
        name: "Fubuki".into(),
        class_name: "Fubuki-class".into(),
        type_code: "DD".into(),
        type_name: "Destroyer".into(),
        rarity: 1,
        level: 1,
        exp: 0,
        exp_required: 100,
        remodel: None,
        seasonal: false,
        owner: 1,
        artwork: ArtworkFiles {
            full: "art_full.png".into(),
            icon: "art_icon.png".into(),
            full_damaged: None,
            icon_damaged: None,
        },
    }
}

//! Single-item cards and birthday portraits

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::blend::{composite, paste_opaque};
use crate::config::{MainImageSpec, Settings};
use crate::context::RenderContext;
use crate::error::Result;
use crate::models::{ArtworkKey, OwnerResolver, RenderableItem};
use crate::text::draw_field;

/// Shown on the owner line when no membership knows the owner.
pub const UNKNOWN_OWNER: &str = "Unknown User";

/// The experience line, or `None` when it should not be shown.
///
/// Hidden for a fresh item (level 1 without experience) and for items at
/// the ordinary level cap or at or past the married cap.
pub fn progress_text(item: &dyn RenderableItem, settings: &Settings) -> Option<String> {
    let level = item.level();
    let exp = item.experience();
    let caps = &settings.levels;
    if level <= 1 && exp.current == 0 {
        return None;
    }
    if level == caps.level_cap || level >= caps.level_cap_married {
        return None;
    }
    Some(format!("{} / {} EXP ({:.2}%)", exp.current, exp.required, exp.percent()))
}

/// `Part of <owner>'s <noun>`, falling back to [`UNKNOWN_OWNER`].
pub fn owner_line(item: &dyn RenderableItem, owners: &dyn OwnerResolver, noun: &str) -> String {
    let name = owners.display_name(item.owner_id()).unwrap_or_else(|| UNKNOWN_OWNER.to_string());
    format!("Part of {}'s {}", name, noun)
}

/// Resize `art` to `height`, keeping its aspect ratio.
fn scale_to_height(art: &RgbaImage, height: u32) -> RgbaImage {
    let (w, h) = art.dimensions();
    let width = ((height as f64 * w as f64 / h.max(1) as f64) as u32).max(1);
    imageops::resize(art, width, height.max(1), FilterType::CatmullRom)
}

fn draw_main_image(canvas: &mut RgbaImage, art: &RgbaImage, spec: &MainImageSpec) {
    let scaled = scale_to_height(art, spec.target_height);
    let x = (spec.x_offset as f64 - scaled.width() as f64 / 2.0) as i32;
    composite(canvas, &scaled, x, spec.y_offset);
}

/// Render the stat card of one item over its rarity backdrop.
///
/// The card has the backdrop's size. Text fields are drawn only when
/// enabled in the layout; level fields additionally need the levels
/// feature.
pub fn render_card(ctx: &RenderContext<'_>, item: &dyn RenderableItem, owners: &dyn OwnerResolver) -> Result<RgbaImage> {
    let layout = &ctx.layout.ship_card;
    let settings = ctx.settings;
    tracing::debug!(item = item.inventory_id(), "rendering card");

    let mut canvas = ctx.backdrop(item.rarity())?.as_ref().clone();

    if layout.main_image.enabled {
        let art = item.artwork(ArtworkKey::FULL)?;
        draw_main_image(&mut canvas, &art, &layout.main_image);
    }

    if item.level() > settings.levels.level_cap {
        let badge = &layout.ring_badge;
        let ring = ctx.asset(&ctx.layout.assets.ring_icon)?;
        let ring = imageops::resize(ring.as_ref(), badge.size, badge.size, FilterType::Triangle);
        composite(&mut canvas, &ring, badge.position[0], badge.position[1]);
    }

    let fonts = ctx.fonts;
    draw_field(&mut canvas, &layout.name, item.name(), fonts)?;
    draw_field(&mut canvas, &layout.class_name, &format!("{} {}", item.class_name(), item.type_name()), fonts)?;

    if settings.features.levels_enabled {
        draw_field(&mut canvas, &layout.level_indicator, &format!("Level {}", item.level()), fonts)?;
        if let Some(progress) = progress_text(item, settings) {
            draw_field(&mut canvas, &layout.level_progress, &progress, fonts)?;
        }
        if let Some(remodel) = item.next_remodel() {
            let text = format!("Next Remodel: {} (Level {})", remodel.name, remodel.level);
            draw_field(&mut canvas, &layout.next_remodel, &text, fonts)?;
        }
    }

    draw_field(&mut canvas, &layout.small_identifier, &item.label(), fonts)?;
    if layout.owned_by.enabled {
        draw_field(&mut canvas, &layout.owned_by, &owner_line(item, owners, &layout.fleet_noun), fonts)?;
    }

    Ok(canvas)
}

/// Render a birthday portrait: artwork over the birthday background with a
/// greeting and the item's name underneath.
pub fn render_birthday(ctx: &RenderContext<'_>, item: &dyn RenderableItem) -> Result<RgbaImage> {
    let layout = &ctx.layout.birthday;
    let [w, h] = layout.image_size;
    tracing::debug!(item = item.inventory_id(), "rendering birthday portrait");

    let mut canvas = RgbaImage::from_pixel(w, h, layout.background.to_rgba());
    let background = ctx.asset(&ctx.layout.assets.birthday_background)?;
    paste_opaque(&mut canvas, &background, 0, 0);

    let art = item.artwork(ArtworkKey::FULL)?;
    let art_height = (h as f32 * layout.art_height_ratio) as u32;
    let scaled = scale_to_height(&art, art_height);
    let x = (w as f64 / 2.0 - scaled.width() as f64 / 2.0) as i32;
    composite(&mut canvas, &scaled, x, 0);

    draw_field(&mut canvas, &layout.title, &layout.title_text, ctx.fonts)?;
    draw_field(&mut canvas, &layout.name, &format!("{}!", item.name()), ctx.fonts)?;

    Ok(canvas)
}

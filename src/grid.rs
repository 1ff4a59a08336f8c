//! Paginated inventory grid
//!
//! A page is a fixed grid of cells filled in row-major order from the item
//! pool, followed by a footer band with the owner's name, the page indicator
//! and resource counters. The page is drawn at `supersample` times its final
//! size and downsampled at the end.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

use crate::blend::{composite, feather, paste_opaque, FadeAxis, FadeCurve};
use crate::color::Rgb;
use crate::config::{InventoryLayout, ShadePalette};
use crate::context::RenderContext;
use crate::error::Result;
use crate::models::{ArtworkKey, Fleet, OwnerSummary, RenderableItem};
use crate::output::encode_png;
use crate::shapes::{fill_circle, fill_rect, stroke_rect};
use crate::text::{draw_fitted, draw_text, measure, TextStyle};

/// Number of pages needed for `len` items at `capacity` cells per page.
/// Never less than one: an empty pool still has an (empty) first page.
pub fn page_count(len: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 1;
    }
    len.div_ceil(capacity).max(1)
}

/// One page of a pool.
#[derive(Debug)]
pub struct PageSelection<'a, T> {
    /// 1-based page number, after clamping
    pub page: usize,
    pub page_count: usize,
    /// Items shown on this page, at most `capacity`
    pub items: &'a [T],
}

/// Select page `requested` of `pool`, clamping it into `[1, page_count]`.
///
/// Any page number is accepted, including zero and negative ones.
pub fn select_page<T>(pool: &[T], requested: i64, capacity: usize) -> PageSelection<'_, T> {
    let page_count = page_count(pool.len(), capacity);
    let page = requested.clamp(1, page_count as i64) as usize;
    if page as i64 != requested {
        tracing::debug!(requested, page, page_count, "page out of range, clamped");
    }

    let start = ((page - 1) * capacity).min(pool.len());
    let end = (start + capacity).min(pool.len());
    PageSelection { page, page_count, items: &pool[start..end] }
}

/// Keep only items whose canonical key occurs at least twice in `pool`,
/// in their original order.
pub fn retain_duplicates<'a, I: RenderableItem + ?Sized>(pool: &[&'a I]) -> Vec<&'a I> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for item in pool {
        *counts.entry(item.canonical_key()).or_default() += 1;
    }

    let kept: Vec<&'a I> = pool
        .iter()
        .copied()
        .filter(|item| counts.get(&item.canonical_key()).is_some_and(|&n| n >= 2))
        .collect();
    tracing::debug!(before = pool.len(), after = kept.len(), "filtered pool to duplicates");
    kept
}

/// Shade flag of every cell, in row-major order.
///
/// The flag flips after each cell, and once more after each row when the row
/// length is even.
pub fn shade_flags(per_row: u32, per_column: u32) -> Vec<bool> {
    let mut flags = Vec::with_capacity((per_row * per_column) as usize);
    let mut shade = false;
    for _ in 0..per_column {
        for _ in 0..per_row {
            flags.push(shade);
            shade = !shade;
        }
        if per_row % 2 == 0 {
            shade = !shade;
        }
    }
    flags
}

/// Background class of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeClass {
    Empty,
    Filled,
    /// First member of the owner's fleet
    Flagship,
    /// Any other fleet member
    Fleet,
    /// Item with a special cosmetic variant
    Seasonal,
}

impl ShadeClass {
    /// Class of a cell holding `item`. Flagship beats fleet, fleet beats
    /// seasonal, seasonal beats the plain filled shade.
    pub fn of(item: Option<&dyn RenderableItem>, fleet: &Fleet) -> Self {
        let Some(item) = item else {
            return ShadeClass::Empty;
        };
        let id = item.inventory_id();
        if fleet.is_flagship(id) {
            ShadeClass::Flagship
        } else if fleet.contains(id) {
            ShadeClass::Fleet
        } else if item.has_special_variant() {
            ShadeClass::Seasonal
        } else {
            ShadeClass::Filled
        }
    }

    pub fn color(self, palette: &ShadePalette, shade: bool) -> Rgb {
        let pick = |pair: &[Rgb; 2]| if shade { pair[0] } else { pair[1] };
        match self {
            ShadeClass::Empty => pick(&palette.empty),
            ShadeClass::Filled => pick(&palette.filled),
            ShadeClass::Flagship => palette.flagship,
            ShadeClass::Fleet => pick(&palette.fleet),
            ShadeClass::Seasonal => pick(&palette.seasonal),
        }
    }
}

/// One cell of the page being drawn.
#[derive(Clone, Copy)]
pub struct GridCell<'a> {
    pub index: usize,
    pub column: u32,
    pub row: u32,
    pub item: Option<&'a dyn RenderableItem>,
    pub shade: bool,
    pub class: ShadeClass,
}

impl std::fmt::Debug for GridCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCell")
            .field("index", &self.index)
            .field("item", &self.item.map(|i| i.inventory_id()))
            .field("shade", &self.shade)
            .field("class", &self.class)
            .finish()
    }
}

/// Lay out the items of one page over a `per_row` by `per_column` grid.
/// Cells past the last item are empty.
pub fn plan_page<'a>(items: &[&'a dyn RenderableItem], fleet: &Fleet, per_row: u32, per_column: u32) -> Vec<GridCell<'a>> {
    shade_flags(per_row, per_column)
        .into_iter()
        .enumerate()
        .map(|(index, shade)| {
            let item = items.get(index).copied();
            GridCell {
                index,
                column: index as u32 % per_row,
                row: index as u32 / per_row,
                item,
                shade,
                class: ShadeClass::of(item, fleet),
            }
        })
        .collect()
}

/// Strings shown in the footer band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterText {
    pub title: String,
    pub page: String,
    /// Shown items against inventory slots, e.g. `12 / 100`
    pub item_count: String,
    /// Fuel, ammo, steel and bauxite
    pub resources: [String; 4],
    pub rings: String,
}

impl FooterText {
    pub fn new(
        layout: &InventoryLayout,
        owner: &OwnerSummary,
        page: usize,
        page_count: usize,
        item_count: usize,
        duplicates_only: bool,
    ) -> Self {
        let plural = if duplicates_only { "Dupes" } else { layout.item_plural.as_str() };
        Self {
            title: format!("{}'s {}", owner.display_name, plural),
            page: format!("Page {} of {}", page, page_count),
            item_count: format!("{} / {}", item_count, owner.ship_slots),
            resources: [
                format!("{:05}", owner.fuel),
                format!("{:05}", owner.ammo),
                format!("{:05}", owner.steel),
                format!("{:05}", owner.bauxite),
            ],
            rings: owner.rings.to_string(),
        }
    }
}

/// What to put on an inventory page.
#[derive(Clone, Copy)]
pub struct InventoryRequest<'a> {
    pub items: &'a [&'a dyn RenderableItem],
    pub owner: &'a OwnerSummary,
    pub fleet: &'a Fleet,
    /// Requested 1-based page; clamped into range
    pub page: i64,
    /// Show only items owned more than once
    pub duplicates_only: bool,
}

/// A rendered inventory page.
#[derive(Debug, Clone)]
pub struct InventoryPage {
    pub image: RgbaImage,
    pub page: usize,
    pub page_count: usize,
    pub footer: FooterText,
}

impl InventoryPage {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }
}

/// Render one inventory page.
pub fn render_inventory(ctx: &RenderContext<'_>, request: &InventoryRequest<'_>) -> Result<InventoryPage> {
    let layout = &ctx.layout.inventory;
    let ss = layout.supersample.max(1);

    let pool: Vec<&dyn RenderableItem> =
        if request.duplicates_only { retain_duplicates(request.items) } else { request.items.to_vec() };
    let selection = select_page(&pool, request.page, layout.capacity());
    tracing::debug!(
        page = selection.page,
        page_count = selection.page_count,
        pool = pool.len(),
        "rendering inventory page"
    );

    let width = layout.image_size[0] * ss;
    let grid_height = layout.image_size[1] * ss;
    let footer_height = layout.lower_padding * ss;
    let cell_w = width / layout.per_row.max(1);
    let cell_h = grid_height / layout.per_column.max(1);

    let mut canvas = RgbaImage::from_pixel(width, grid_height + footer_height, Rgba([255, 255, 255, 255]));

    for cell in plan_page(selection.items, request.fleet, layout.per_row, layout.per_column) {
        let origin = ((cell.column * cell_w) as i32, (cell.row * cell_h) as i32);
        draw_cell(ctx, &mut canvas, &cell, origin, (cell_w, cell_h))?;
    }

    let footer = FooterText::new(
        layout,
        request.owner,
        selection.page,
        selection.page_count,
        pool.len(),
        request.duplicates_only,
    );
    draw_footer(ctx, &mut canvas, &footer, grid_height, (width, footer_height))?;

    let image = if ss > 1 {
        imageops::resize(&canvas, width / ss, (grid_height + footer_height) / ss, FilterType::Lanczos3)
    } else {
        canvas
    };

    Ok(InventoryPage { image, page: selection.page, page_count: selection.page_count, footer })
}

fn draw_cell(
    ctx: &RenderContext<'_>,
    canvas: &mut RgbaImage,
    cell: &GridCell<'_>,
    (x, y): (i32, i32),
    (cw, ch): (u32, u32),
) -> Result<()> {
    let layout = &ctx.layout.inventory;
    let color = cell.class.color(&layout.shades, cell.shade);
    let (w, h) = (cw as i32, ch as i32);

    fill_rect(canvas, x, y, x + w - 1, y + h - 1, color);
    let Some(item) = cell.item else {
        return Ok(());
    };

    let backdrop = ctx.backdrop(item.rarity())?;
    let backdrop = imageops::resize(backdrop.as_ref(), cw, ch, FilterType::Triangle);
    paste_opaque(canvas, &backdrop, x, y);

    let label_font = ctx.font(&layout.fonts.label, (ch / 2) as f32)?;
    draw_fitted(
        canvas,
        (x + w * 3 / 4, y + h / 4),
        &item.label(),
        &label_font,
        (cw * 7 / 16).saturating_sub(2),
        &TextStyle::plain(Rgb::BLACK),
        true,
    );

    let settings = ctx.settings;
    if settings.features.levels_enabled {
        if settings.features.marriage_enabled && item.level() > settings.levels.level_cap {
            let size = (ch / 3).saturating_sub(4).max(1);
            let ring = ctx.asset(&ctx.layout.assets.ring_icon)?;
            let ring = imageops::resize(ring.as_ref(), size, size, FilterType::Triangle);
            let (rx, ry) = (x + w * 8 / 9 - 2, y + h * 5 / 8 + 2);
            let r = size / 2;
            fill_circle(canvas, rx + r as i32, ry + r as i32, r, Rgb::BLACK);
            composite(canvas, &ring, rx, ry);
        }

        let level_font = ctx.font(&layout.fonts.label, (ch * 3 / 8) as f32)?;
        draw_fitted(
            canvas,
            (x + 2 + w * 11 / 16, y + h * 3 / 4 - 2),
            &format!("Lv. {:02}", item.level()),
            &level_font,
            (cw / 3).saturating_sub(4),
            &TextStyle::plain(Rgb::BLACK),
            true,
        );

        if item.is_remodel_ready() {
            stroke_rect(
                canvas,
                x + w / 2 + 2,
                y + h * 9 / 16,
                x + w * 31 / 32,
                y + h * 15 / 16,
                2,
                layout.upgrade_ready,
            );
        }
    }

    let icon = item.artwork(ArtworkKey::ICON)?;
    let icon_w = ((ch as f32 * 1.5) as u32).saturating_sub(6).max(1);
    let icon_h = ch.saturating_sub(6).max(1);
    let icon = imageops::resize(icon.as_ref(), icon_w, icon_h, FilterType::Triangle);
    let icon = feather(&icon, 0.75, 1.0, FadeAxis::Horizontal, FadeCurve::Quadratic);
    composite(canvas, &icon, x + 3, y + 3);

    stroke_rect(canvas, x, y, x + w - 1, y + h - 1, 3, color);
    Ok(())
}

fn draw_footer(
    ctx: &RenderContext<'_>,
    canvas: &mut RgbaImage,
    text: &FooterText,
    top: u32,
    (fw, fh): (u32, u32),
) -> Result<()> {
    let layout = &ctx.layout.inventory;
    let settings = ctx.settings;
    let top = top as i32;

    let title_font = ctx.font(&layout.fonts.footer, (fh * 3 / 4) as f32)?;
    draw_text(canvas, (10, top + (fh / 8) as i32), &text.title, &title_font, &TextStyle::plain(layout.footer_text));

    let page_font = ctx.font(&layout.fonts.footer_page, (fh / 2) as f32)?;
    let (pw, ph) = measure(&text.page, &page_font);
    draw_text(
        canvas,
        (fw as i32 - pw as i32 - 2, top + fh as i32 - ph as i32 - 2),
        &text.page,
        &page_font,
        &TextStyle::plain(layout.page_text),
    );

    // Counters sit in columns wide enough for an icon and the widest value
    let value_font = ctx.font(&layout.fonts.label, (fh * 3 / 8) as f32)?;
    let (value_w, value_h) = measure(&text.resources[0], &value_font);
    let icon_size = fh * 3 / 8 + 2;
    let (rx, ry) = ((fw * 21 / 32) as i32, top + 1);
    let col = (icon_size + value_w + 6) as i32;
    let row = (icon_size + 2) as i32;
    let text_offset = ((icon_size + 2) as i32, (icon_size as i32 - value_h as i32) / 2);
    let style = TextStyle::plain(layout.footer_text);

    let icons = &ctx.layout.assets.icons;
    let mut counters: Vec<(&str, &str, (i32, i32))> = Vec::new();
    if settings.features.resources_enabled {
        counters.push((icons.fuel.as_str(), text.resources[0].as_str(), (rx, ry)));
        counters.push((icons.ammo.as_str(), text.resources[1].as_str(), (rx, ry + row)));
        counters.push((icons.steel.as_str(), text.resources[2].as_str(), (rx + col, ry)));
        counters.push((icons.bauxite.as_str(), text.resources[3].as_str(), (rx + col, ry + row)));
    }
    counters.push((icons.ships.as_str(), text.item_count.as_str(), (rx + col * 2, ry)));
    if settings.shows_ring_counter() {
        counters.push((icons.rings.as_str(), text.rings.as_str(), (rx + (col as f32 * 3.5) as i32, ry)));
    }

    for (icon, value, (cx, cy)) in counters {
        draw_text(canvas, (cx + text_offset.0, cy + text_offset.1), value, &value_font, &style);
        let icon = ctx.asset(icon)?;
        let icon = imageops::resize(icon.as_ref(), icon_size, icon_size, FilterType::Triangle);
        composite(canvas, &icon, cx, cy);
    }

    Ok(())
}

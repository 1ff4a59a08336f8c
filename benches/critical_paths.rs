//! Criterion benchmarks for fleetdraw critical paths
//!
//! Benchmarks the operations every render leans on:
//! - Feather: alpha fade over an icon
//! - Text: rendering and squishing a label into a fixed width
//! - Color: CSS colour parsing
//! - Inventory: a full page, with and without supersampling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fleetdraw::assets::MemoryAssets;
use fleetdraw::blend::{feather, FadeAxis, FadeCurve};
use fleetdraw::color::{parse_color, Rgb};
use fleetdraw::config::{parse_layout, DocumentFormat, Settings};
use fleetdraw::error::RenderError;
use fleetdraw::grid::{render_inventory, InventoryRequest};
use fleetdraw::models::{Fleet, OwnerSummary, RenderableItem};
use fleetdraw::scene::{ArtworkFiles, BoundItem, SceneItem};
use fleetdraw::text::{fit_to_width, render_text, Font, FontProvider, TextStyle, Typeface};
use fleetdraw::RenderContext;
use image::{Rgba, RgbaImage};
use std::sync::Arc;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Filled boxes in place of glyphs, so benchmarks need no font file.
struct BoxFace;

impl Typeface for BoxFace {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        ((size / 2.0) as u32 * text.chars().count() as u32, size as u32)
    }

    fn rasterize(&self, text: &str, size: f32, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) {
        let advance = (size / 2.0) as i32;
        for i in 0..text.chars().count() as i32 {
            for y in origin.1..origin.1 + size as i32 {
                for x in origin.0 + i * advance..origin.0 + (i + 1) * advance - 1 {
                    plot(x, y, 0.8);
                }
            }
        }
    }
}

struct BoxFonts;

impl FontProvider for BoxFonts {
    fn face(&self, _name: &str) -> Result<Arc<dyn Typeface>, RenderError> {
        Ok(Arc::new(BoxFace))
    }
}

fn make_icon(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]))
}

fn make_layout(supersample: u32) -> fleetdraw::config::LayoutDocument {
    let field = r#"{"enabled": true, "position": [100, 100], "width": 120, "font": "f", "font_size": 10, "color": [0, 0, 0]}"#;
    let json = format!(
        r#"{{
            "assets": {{
                "rarity_backdrops": ["bg.png"], "ring_icon": "icon.png",
                "birthday_background": "bg.png", "map_background": "bg.png",
                "icons": {{"fuel": "icon.png", "ammo": "icon.png", "steel": "icon.png",
                           "bauxite": "icon.png", "ships": "icon.png", "rings": "icon.png"}}
            }},
            "inventory": {{
                "image_size": [1000, 500], "per_row": 5, "per_column": 5, "lower_padding": 60,
                "supersample": {supersample},
                "shades": {{"empty": ["#f0f0f0", "#dcdcdc"], "filled": ["#c8e6c8", "#b4d2b4"],
                            "fleet": ["#c8c8fa", "#b4b4e6"], "seasonal": ["#fac8c8", "#e6b4b4"],
                            "flagship": "gold"}},
                "fonts": {{"label": "f", "footer": "f", "footer_page": "f"}}
            }},
            "ship_card": {{
                "small_identifier": {field}, "name": {field}, "class_name": {field},
                "level_indicator": {field}, "level_progress": {field}, "next_remodel": {field},
                "owned_by": {field},
                "main_image": {{"enabled": true, "target_height": 100, "x_offset": 100, "y_offset": 10}}
            }}
        }}"#
    );
    parse_layout(&json, DocumentFormat::Json).expect("bench layout is valid")
}

fn make_items(n: u64) -> Vec<SceneItem> {
    (1..=n)
        .map(|id| SceneItem {
            inventory_id: id,
            base_id: id % 7,
            name: format!("Ship {}", id),
            class_name: "Bench-class".to_string(),
            type_code: "DD".to_string(),
            type_name: "Destroyer".to_string(),
            rarity: 1,
            level: (id % 120) as u32 + 1,
            exp: id * 10,
            exp_required: 1000,
            remodel: None,
            seasonal: id % 5 == 0,
            owner: 1,
            artwork: ArtworkFiles { full: "art.png".to_string(), icon: "art.png".to_string(), ..Default::default() },
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_feather(c: &mut Criterion) {
    let mut group = c.benchmark_group("feather");

    for size in [64u32, 256, 1024] {
        let icon = make_icon(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("quadratic", size), &icon, |b, icon| {
            b.iter(|| feather(black_box(icon), 0.75, 1.0, FadeAxis::Horizontal, FadeCurve::Quadratic))
        });
    }

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let font = Font::new(Arc::new(BoxFace), 40.0);
    let style = TextStyle::outlined(Rgb::BLACK, Rgb::WHITE);

    group.bench_function("render_label", |b| b.iter(|| render_text(black_box("DD-0042"), &font, &style)));

    let patch = render_text("Next Remodel: Fubuki Kai Ni (Level 70)", &font, &style);
    group.bench_function("squish", |b| b.iter(|| fit_to_width(black_box(patch.clone()), 200)));

    group.finish();
}

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    for input in ["#FFD700", "rgb(50, 0, 250)", "gold"] {
        group.bench_with_input(BenchmarkId::new("parse", input), &input, |b, s| b.iter(|| parse_color(black_box(s))));
    }

    group.finish();
}

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");
    group.sample_size(20);

    let assets = MemoryAssets::new()
        .with("bg.png", make_icon(200, 300))
        .with("icon.png", make_icon(16, 16))
        .with("art.png", make_icon(160, 40));
    let items = make_items(40);
    let bound: Vec<BoundItem<'_>> = items.iter().map(|i| BoundItem::new(i, &assets)).collect();
    let pool: Vec<&dyn RenderableItem> = bound.iter().map(|b| b as &dyn RenderableItem).collect();
    let owner = OwnerSummary { display_name: "bench".to_string(), ship_slots: 100, ..Default::default() };
    let fleet = Fleet::new(vec![1, 2, 3]);
    let settings = Settings::default();

    for supersample in [1u32, 2] {
        let layout = make_layout(supersample);
        let ctx = RenderContext::new(&layout, &settings, &BoxFonts, &assets);
        let request = InventoryRequest { items: &pool, owner: &owner, fleet: &fleet, page: 1, duplicates_only: false };

        group.bench_with_input(BenchmarkId::new("page", supersample), &request, |b, request| {
            b.iter(|| render_inventory(&ctx, black_box(request)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_feather, bench_text, bench_color, bench_inventory);
criterion_main!(benches);

//! Sortie map diagrams
//!
//! The map area is the background resized to the graph's native size plus
//! padding on every side. Below it a legend band lists every route, one line
//! each, grouped by source node.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::f64::consts::FRAC_PI_2;

use crate::blend::paste_opaque;
use crate::config::MapLayout;
use crate::context::RenderContext;
use crate::error::Result;
use crate::models::Graph;
use crate::shapes::{fill_circle, fill_polygon, fill_rect};
use crate::text::{draw_fitted, draw_text, TextStyle};

/// Height of the legend band: the padding plus, for every node with routes,
/// one group gap and one line per route.
pub fn legend_height(graph: &Graph, layout: &MapLayout) -> u32 {
    graph
        .routed_nodes()
        .map(|(_, node)| layout.legend_group_gap + layout.legend_line_height * node.routes.len() as u32)
        .sum::<u32>()
        + layout.padding
}

/// Vertices of the arrowhead for a route from `from` to `to`.
///
/// The base is centred on `from`, `2 * half_width` wide and perpendicular
/// to the route; the tip is `to`.
pub fn arrowhead(from: (i32, i32), to: (i32, i32), half_width: f64) -> [(f64, f64); 3] {
    let (fx, fy) = (from.0 as f64, from.1 as f64);
    let tip = (to.0 as f64, to.1 as f64);

    if from.0 == to.0 {
        [(fx - half_width, fy), (fx + half_width, fy), tip]
    } else if from.1 == to.1 {
        [(fx, fy + half_width), (fx, fy - half_width), tip]
    } else {
        let angle = (fy - tip.1).atan2(fx - tip.0) + FRAC_PI_2;
        let (ox, oy) = (half_width * angle.cos(), half_width * angle.sin());
        [(fx + ox, fy + oy), (fx - ox, fy - oy), tip]
    }
}

/// Legend lines in drawing order: nodes in order, each node's routes
/// newest first.
pub fn legend_lines(graph: &Graph) -> Vec<Vec<String>> {
    graph
        .routed_nodes()
        .map(|(_, node)| {
            node.routes
                .iter()
                .rev()
                .map(|route| {
                    // validated graphs always resolve the target
                    let target = graph.nodes.get(route.target).map_or("?", |n| n.symbol.as_str());
                    format!("{} => {} : {}", node.symbol, target, route.label)
                })
                .collect()
        })
        .collect()
}

/// Render a map with its route legend.
///
/// Fails with [`RenderError::InvalidGraph`](crate::error::RenderError::InvalidGraph)
/// before drawing anything if a route points outside the graph.
pub fn render_map(ctx: &RenderContext<'_>, graph: &Graph) -> Result<RgbaImage> {
    graph.validate()?;
    let layout = &ctx.layout.map;

    let (map_w, map_h) = graph.map_size;
    let pad = layout.padding;
    let (area_w, area_h) = (map_w + pad * 2, map_h + pad * 2);
    let legend = legend_height(graph, layout);
    tracing::debug!(nodes = graph.nodes.len(), routes = graph.route_count(), legend, "rendering map");

    let mut canvas = RgbaImage::from_pixel(area_w, area_h + legend, Rgba([255, 255, 255, 255]));
    let background = ctx.asset(&ctx.layout.assets.map_background)?;
    let background = imageops::resize(background.as_ref(), area_w, area_h, FilterType::Triangle);
    paste_opaque(&mut canvas, &background, 0, 0);

    let font = ctx.font(&layout.font, layout.font_size)?;
    let offset = |p: (i32, i32)| (p.0 + pad as i32, p.1 + pad as i32);

    for node in &graph.nodes {
        let from = offset(node.position);
        for route in &node.routes {
            let to = offset(graph.nodes[route.target].position);
            let triangle = arrowhead(from, to, layout.arrow_half_width);
            fill_polygon(&mut canvas, &triangle, layout.arrow_fill, Some(layout.arrow_outline));
        }
    }

    let symbol_style = TextStyle::plain(layout.symbol_color);
    for node in &graph.nodes {
        let center = offset(node.position);
        fill_circle(&mut canvas, center.0, center.1, layout.node_radius, node.category.color);
        draw_fitted(&mut canvas, center, &node.symbol, &font, layout.symbol_width, &symbol_style, true);
    }

    fill_rect(&mut canvas, 0, area_h as i32, area_w as i32, (area_h + legend) as i32, layout.legend_background);
    let text_style = TextStyle::plain(layout.legend_text);
    let x = pad as i32;
    let mut y = (area_h + layout.legend_group_gap) as i32;
    for group in legend_lines(graph) {
        for line in group {
            draw_text(&mut canvas, (x, y), &line, &font, &text_style);
            y += layout.legend_line_height as i32;
        }
        y += layout.legend_group_gap as i32;
    }

    Ok(canvas)
}

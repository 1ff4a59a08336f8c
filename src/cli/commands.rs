//! Command implementations

use rayon::prelude::*;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use crate::assets::AssetDirectory;
use crate::card::{render_birthday, render_card};
use crate::config::{cached_layout, load_settings, ConfigError, LayoutDocument, Settings};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::grid::{page_count, render_inventory, retain_duplicates, InventoryRequest};
use crate::map::render_map;
use crate::models::{Graph, RenderableItem};
use crate::output::{page_output_path, save_png, write_bytes};
use crate::scene::{BoundItem, Scene};
use crate::text::FontLibrary;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Layout, settings, assets and fonts shared by every command.
#[derive(Debug)]
pub struct Environment {
    pub layout: Arc<LayoutDocument>,
    pub settings: Settings,
    pub assets: AssetDirectory,
    pub fonts: FontLibrary,
}

impl Environment {
    pub fn load(layout: &Path, settings: Option<&Path>, assets: &Path, fonts: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: cached_layout(layout)?,
            settings: load_settings(settings)?,
            assets: AssetDirectory::new(assets),
            fonts: FontLibrary::new(fonts),
        })
    }

    pub fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.layout, &self.settings, &self.fonts, &self.assets)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T, ExitCode> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: Cannot read {} '{}': {}", what, path.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        eprintln!("Error: Invalid {} '{}': {}", what, path.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

fn report(result: Result<(), RenderError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the inventory command
pub fn run_inventory(env: &Environment, scene: &Path, page: i64, dupes: bool, all_pages: bool, output: &Path) -> ExitCode {
    let scene: Scene = match read_json(scene, "scene file") {
        Ok(scene) => scene,
        Err(code) => return code,
    };
    let bound = scene.bind(&env.assets);
    let items: Vec<&dyn RenderableItem> = bound.iter().map(|b| b as &dyn RenderableItem).collect();
    let ctx = env.context();

    let request = |page: i64| InventoryRequest {
        items: &items,
        owner: &scene.owner,
        fleet: &scene.fleet,
        page,
        duplicates_only: dupes,
    };

    if !all_pages {
        return report(
            render_inventory(&ctx, &request(page)).and_then(|rendered| write_bytes(&rendered.to_png()?, output)),
        );
    }

    let pool_len = if dupes { retain_duplicates(&items).len() } else { items.len() };
    let pages = page_count(pool_len, env.layout.inventory.capacity());
    tracing::info!(pages, "rendering all inventory pages");

    let results: Vec<Result<(), RenderError>> = (1..=pages)
        .into_par_iter()
        .map(|p| {
            let rendered = render_inventory(&ctx, &request(p as i64))?;
            save_png(&rendered.image, &page_output_path(output, p))
        })
        .collect();

    let failures: Vec<RenderError> = results.into_iter().filter_map(Result::err).collect();
    for e in &failures {
        eprintln!("Error: {}", e);
    }
    if failures.is_empty() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn with_item(env: &Environment, scene: &Path, id: u64, render: impl FnOnce(&Scene, BoundItem<'_>) -> ExitCode) -> ExitCode {
    let scene: Scene = match read_json(scene, "scene file") {
        Ok(scene) => scene,
        Err(code) => return code,
    };
    let Some(item) = scene.find(id) else {
        eprintln!("Error: No item with inventory id {} in scene", id);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    render(&scene, BoundItem::new(item, &env.assets))
}

/// Execute the card command
pub fn run_card(env: &Environment, scene: &Path, id: u64, output: &Path) -> ExitCode {
    with_item(env, scene, id, |scene, item| {
        report(render_card(&env.context(), &item, scene.owners()).and_then(|img| save_png(&img, output)))
    })
}

/// Execute the birthday command
pub fn run_birthday(env: &Environment, scene: &Path, id: u64, output: &Path) -> ExitCode {
    with_item(env, scene, id, |_, item| {
        report(render_birthday(&env.context(), &item).and_then(|img| save_png(&img, output)))
    })
}

/// Execute the map command
pub fn run_map(env: &Environment, graph: &Path, output: &Path) -> ExitCode {
    let graph: Graph = match read_json(graph, "graph file") {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    match render_map(&env.context(), &graph) {
        Ok(img) => report(save_png(&img, output)),
        Err(e @ RenderError::InvalidGraph { .. }) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        Err(e) => report(Err(e)),
    }
}

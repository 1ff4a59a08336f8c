//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to the command
//! implementations in [`commands`].

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use commands::Environment;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Fleetdraw - render fleet inventories, ship cards and sortie maps to PNG
#[derive(Parser)]
#[command(name = "fleetdraw")]
#[command(about = "Fleetdraw - render fleet inventories, ship cards and sortie maps to PNG")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging. RUST_LOG takes precedence when set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Layout document (.json or .toml)
    #[arg(long, global = true, default_value = "layout.json")]
    pub layout: PathBuf,

    /// Settings file with feature toggles and level caps.
    /// If omitted, every optional feature is off.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory holding backdrops, icons and artwork
    #[arg(long, global = true, default_value = "assets")]
    pub assets: PathBuf,

    /// Directory holding the font files named by the layout
    #[arg(long, global = true, default_value = "fonts")]
    pub fonts: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an inventory page from a scene file
    Inventory {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Page to render; out-of-range pages are clamped
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Only show items owned more than once
        #[arg(long)]
        dupes: bool,

        /// Render every page. Output names get a page suffix:
        /// out.png becomes out_p1.png, out_p2.png, ...
        /// A directory output (ends with /) gets page_1.png, page_2.png, ...
        #[arg(long)]
        all_pages: bool,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the stat card of one item
    Card {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Inventory id of the item
        #[arg(long)]
        item: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the birthday portrait of one item
    Birthday {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Inventory id of the item
        #[arg(long)]
        item: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render a sortie map from a graph file
    Map {
        /// Graph file (JSON)
        graph: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Level used when `RUST_LOG` is unset or unparsable.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "fleetdraw=debug"
    } else {
        "fleetdraw=info"
    }
}

fn init_logging(verbose: bool, no_color: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed when running embedded
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    let env = match Environment::load(&cli.layout, cli.settings.as_deref(), &cli.assets, &cli.fonts) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Inventory { scene, page, dupes, all_pages, output } => {
            commands::run_inventory(&env, &scene, page, dupes, all_pages, &output)
        }
        Commands::Card { scene, item, output } => commands::run_card(&env, &scene, item, &output),
        Commands::Birthday { scene, item, output } => commands::run_birthday(&env, &scene, item, &output),
        Commands::Map { graph, output } => commands::run_map(&env, &graph, &output),
    }
}

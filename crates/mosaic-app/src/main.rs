//! PLAYMOSAIC command-line entry point.
//!
//! Reads a game library (JSON or TOML), sizes every game's tile by playtime,
//! searches for a column count that fills the viewport, and prints the
//! resulting plan as text, JSON or CSS.

mod args;
mod library;
mod render;

use anyhow::{Context, Result};

use args::{CONFIG_ENV, Command, OutputFormat};
use mosaic_layout::MosaicLayout;
use mosaic_types::config::LayoutConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match args::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", args::USAGE);
            return Ok(());
        },
        Command::Run(cli) => cli,
    };

    // Resolve config from --config, MOSAIC_CONFIG, or built-in defaults.
    let config = match args::config_path(cli.config.clone(), std::env::var(CONFIG_ENV).ok()) {
        Some(path) => {
            let config = LayoutConfig::load(&path)?;
            log::info!("Loaded layout config from {}", path.display());
            config
        },
        None => LayoutConfig::default(),
    };

    let games = library::load_library(&cli.library)?;
    let total = games.len();
    let games = library::filter_min_hours(games, cli.min_hours);
    log::info!(
        "Loaded {} games from {} ({} under {}h dropped)",
        games.len(),
        cli.library.display(),
        total - games.len(),
        cli.min_hours,
    );

    let plan = MosaicLayout::new(config).compute(&games, cli.viewport)?;
    log::info!(
        "Layout: {} columns, {} rows, {:.0}px of {:.0}px ({:?} after {} estimates)",
        plan.columns,
        plan.rows,
        plan.estimated_height,
        cli.viewport.height,
        plan.outcome,
        plan.iterations,
    );

    let output = match cli.format {
        OutputFormat::Text => render::render_text(&plan),
        OutputFormat::Json => render::render_json(&plan).context("serializing plan")?,
        OutputFormat::Css => render::render_css(&plan),
    };
    println!("{output}");

    Ok(())
}

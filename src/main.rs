use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use terrain_viewer::config::ViewerConfig;
use terrain_viewer::{export, seeds, viewer};

#[derive(Parser, Debug)]
#[command(name = "terrain_viewer")]
#[command(about = "Random heightmap terrain rendered as a shaded isometric wireframe")]
struct Args {
    /// Random seed (uses the current time if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Read the seed from a file written by "Download Seed"
    #[arg(long, conflicts_with = "seed")]
    seed_file: Option<PathBuf>,

    /// JSON config file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Exclusive upper bound for cell elevations
    #[arg(short = 'z', long)]
    max_elevation: Option<u32>,

    /// Go straight to the terrain view
    #[arg(long)]
    skip_menu: bool,

    /// Render one frame to this PNG and exit without opening a window
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if let Some(max_elevation) = args.max_elevation {
        config.grid.max_elevation = max_elevation;
    }
    config.validate()?;

    let seed = match (args.seed, &args.seed_file) {
        (Some(seed), _) => seed,
        (None, Some(path)) => seeds::load_seed(path)?,
        (None, None) => seeds::clock_seed(),
    };

    tracing::info!("Seed: {}", seed);
    tracing::info!(
        "Grid: {}x{}, max elevation {}",
        config.grid.width,
        config.grid.height,
        config.grid.max_elevation
    );

    if let Some(path) = &args.export {
        export::export_frame_png(&config, seed, path)?;
        return Ok(());
    }

    viewer::run_viewer(&config, seed, args.skip_menu)?;
    Ok(())
}

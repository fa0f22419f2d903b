/// Cadence - terminal music player
use anyhow::{bail, Context};
use cadence_cli::{CliConfig, ResponseFileRecommender, Session, SimulatedOutput};
use cadence_core::Catalog;
use cadence_playback::{resolve_recommendations, PlaybackController};
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence terminal music player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./cadence.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Play {
        /// Song catalog (JSON array); falls back to catalog.path
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Recommendation response used to seed the playlist
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Show which catalog songs a recommendation response resolves to
    Resolve {
        /// Song catalog (JSON array)
        #[arg(long)]
        catalog: PathBuf,
        /// Recommendation response file
        #[arg(long)]
        response: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Play { catalog, seed } => {
            let Some(catalog_path) = catalog.or_else(|| config.catalog.path.clone()) else {
                bail!("No catalog given; pass --catalog or set catalog.path");
            };
            play(&config, &catalog_path, seed.as_deref())?;
        }
        Commands::Resolve { catalog, response } => {
            resolve(&catalog, &response)?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let catalog = Catalog::load(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    tracing::info!("Loaded {} songs from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn play(config: &CliConfig, catalog_path: &Path, seed: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let device = SimulatedOutput::new(&config.device);
    let mut player = PlaybackController::new(device, config.player.clone());

    if let Some(seed) = seed {
        let recommender = ResponseFileRecommender::new(seed);
        let seeded = player
            .recommend_and_seed(&recommender, &catalog)
            .with_context(|| format!("Failed to seed playlist from {}", seed.display()))?;
        tracing::info!("Seeded playlist with {} songs", seeded);
    }

    println!("cadence: {} songs in catalog, type `help` for commands", catalog.len());

    let mut session = Session::new(player, catalog);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn resolve(catalog_path: &Path, response_path: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let response = ResponseFileRecommender::new(response_path)
        .read()
        .with_context(|| format!("Failed to read response {}", response_path.display()))?;

    let songs = resolve_recommendations(&catalog, &response);
    for song in &songs {
        println!("{}\t{}\t{}", song.id, song.title, song.artist);
    }

    let dropped = response.recommended_titles.len() - songs.len();
    if dropped > 0 {
        tracing::info!("{} recommended titles not in catalog", dropped);
    }
    if songs.is_empty() && !catalog.is_empty() {
        tracing::warn!("No recommended title matched the catalog");
    }
    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::config::{self, Backend, Config};
use crate::domain::track::{GoldTrack, TrackSource};
use crate::normalize;
use crate::storage::files;

#[derive(Parser)]
#[command(name = "tunemeld")]
#[command(version = "0.1")]
#[command(about = "Merges ranked playlists from several streaming services into one")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize raw service payloads into silver track lists
    Transform,
    /// Reconcile the silver lists into the gold playlist
    Gold {
        /// Override the backend from the config
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,
    },
    /// Print the gold playlist
    Show,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::Config::load(&cli.config)?;

    match &cli.command {
        Commands::Transform => transform(&cfg),
        Commands::Gold { backend } => gold(&cfg, backend.unwrap_or(cfg.reconcile.backend)),
        Commands::Show => show(&cfg),
    }
}

fn transform(cfg: &Config) -> anyhow::Result<()> {
    for playlist in &cfg.playlists {
        let payload = files::read_bronze(&playlist.bronze_path)?;
        let tracks = normalize::normalize(playlist.source, &payload).with_context(|| {
            format!(
                "Failed to normalize {}",
                playlist.bronze_path.to_string_lossy()
            )
        })?;

        files::write_json(&playlist.silver_path, &tracks)?;
        info!(
            "wrote {} {} tracks to {}",
            tracks.len(),
            playlist.source,
            playlist.silver_path.to_string_lossy()
        );
    }
    Ok(())
}

fn gold(cfg: &Config, backend: Backend) -> anyhow::Result<()> {
    let load = |source: TrackSource| -> anyhow::Result<_> {
        let playlist = cfg.playlist(source)?;
        Ok(files::read_silver(&playlist.silver_path, source)?)
    };

    let sound_cloud = load(TrackSource::SoundCloud)?;
    let spotify = load(TrackSource::Spotify)?;
    let apple_music = load(TrackSource::AppleMusic)?;

    let reconciler = cfg.reconcile.reconciler(backend);
    let gold = reconciler
        .reconcile(&sound_cloud, &spotify, &apple_music)
        .with_context(|| "Failed to reconcile playlists")?;

    files::write_json(&cfg.output.gold_path, &gold)?;
    println!(
        "Gold playlist with {} tracks written to {}",
        gold.len(),
        cfg.output.gold_path.to_string_lossy()
    );
    Ok(())
}

fn format_sources(gold: &GoldTrack) -> String {
    gold.additional_sources
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn show(cfg: &Config) -> anyhow::Result<()> {
    let path = &cfg.output.gold_path;
    let gold = files::read_gold(path)?;

    println!(
        "Gold playlist was updated {} and contains {} tracks",
        files::modified_at(path)?,
        gold.len()
    );

    for track in &gold {
        println!(
            "  {:>3}. {} - {} [{}]",
            track.track.rank,
            track.track.artist,
            track.track.name,
            track.primary_source()
        );
        if !track.additional_sources.is_empty() {
            println!("       also on: {}", format_sources(track));
        }
    }
    Ok(())
}

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    domain::track::TrackSource,
    reconcile::{
        Reconciler,
        matcher::{DEFAULT_MAX_ARTIST_DISTANCE, DEFAULT_MAX_NAME_DISTANCE, FuzzyMatcher},
        pipeline::InMemoryReconciler,
        trigram::DEFAULT_SIMILARITY_THRESHOLD,
    },
    storage::relational::RelationalReconciler,
};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    pub playlists: Vec<PlaylistConfig>,
    pub output: OutputConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// the playlist configured for `source`
    pub fn playlist(&self, source: TrackSource) -> anyhow::Result<&PlaylistConfig> {
        self.playlists
            .iter()
            .find(|p| p.source == source)
            .ok_or_else(|| anyhow!("no playlist configured for {source}"))
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Backend {
    /// pairwise edit-distance passes
    #[default]
    InMemory,
    /// trigram similarity in SQLite
    Relational,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_max_name_distance")]
    pub max_name_distance: usize,
    #[serde(default = "default_max_artist_distance")]
    pub max_artist_distance: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// keeps the relational backend's tables on disk instead of in memory
    pub database_path: Option<PathBuf>,
}

fn default_max_name_distance() -> usize {
    DEFAULT_MAX_NAME_DISTANCE
}

fn default_max_artist_distance() -> usize {
    DEFAULT_MAX_ARTIST_DISTANCE
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            max_name_distance: DEFAULT_MAX_NAME_DISTANCE,
            max_artist_distance: DEFAULT_MAX_ARTIST_DISTANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            database_path: None,
        }
    }
}

impl ReconcileConfig {
    pub fn reconciler(&self, backend: Backend) -> Box<dyn Reconciler> {
        match backend {
            Backend::InMemory => Box::new(InMemoryReconciler::new(FuzzyMatcher::new(
                self.max_name_distance,
                self.max_artist_distance,
            ))),
            Backend::Relational => Box::new(RelationalReconciler::new(
                self.database_path.clone(),
                self.similarity_threshold,
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlaylistConfig {
    pub source: TrackSource,
    pub bronze_path: PathBuf,
    pub silver_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub gold_path: PathBuf,
}

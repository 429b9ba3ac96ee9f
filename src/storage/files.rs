//! Bronze, silver and gold artifacts on disk

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use log::warn;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    domain::track::{GoldTrack, Track, TrackSource},
    storage::error::StorageError,
};

fn read_to_string(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as pretty JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let write_err = |source: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(write_err)
}

/// raw service payload, as fetched
pub fn read_bronze(path: &Path) -> Result<serde_json::Value, StorageError> {
    read_json(path)
}

/// Reads a normalized track list.
///
/// Tracks whose source is missing or unrecognized are stamped with `source`,
/// the service the list was configured for.
pub fn read_silver(path: &Path, source: TrackSource) -> Result<Vec<Track>, StorageError> {
    let mut tracks: Vec<Track> = read_json(path)?;

    for track in tracks.iter_mut().filter(|t| !t.source.is_known()) {
        warn!(
            "track '{}' in {} has no known source, assuming {source}",
            track.name,
            path.to_string_lossy()
        );
        track.source = source;
    }

    Ok(tracks)
}

pub fn read_gold(path: &Path) -> Result<Vec<GoldTrack>, StorageError> {
    read_json(path)
}

/// last modification time of `path`, in local time
pub fn modified_at(path: &Path) -> Result<DateTime<Local>, StorageError> {
    let modified: SystemTime = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| StorageError::Read {
            path: PathBuf::from(path),
            source,
        })?;
    Ok(DateTime::from(modified))
}

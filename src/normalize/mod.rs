//! Turns raw service payloads (bronze) into ranked track lists (silver)

use serde_json::Value;
use thiserror::Error;

use crate::domain::track::{Track, TrackSource};

pub mod apple_music;
pub mod soundcloud;
pub mod spotify;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("missing or invalid '{field}' in item {index}")]
    MissingField { index: usize, field: &'static str },

    #[error("unexpected payload shape: {0}")]
    InvalidShape(&'static str),

    #[error("no normalizer for source {0}")]
    UnsupportedSource(TrackSource),

    #[error("item {0} is past the last representable rank")]
    RankOutOfRange(usize),
}

/// Normalizes a bronze payload of `source` into tracks ranked from 1
pub fn normalize(source: TrackSource, payload: &Value) -> Result<Vec<Track>, NormalizeError> {
    match source {
        TrackSource::SoundCloud => soundcloud::normalize(payload),
        TrackSource::Spotify => spotify::normalize(payload),
        TrackSource::AppleMusic => apple_music::normalize(payload),
        TrackSource::Unknown => Err(NormalizeError::UnsupportedSource(source)),
    }
}

/// one-based rank of a zero-based position, if it fits in a `u32`
pub(crate) fn rank_at(position: usize) -> Option<u32> {
    u32::try_from(position).ok().and_then(|p| p.checked_add(1))
}

/// string at `pointer` (JSON pointer syntax) inside `item`
pub(crate) fn str_at<'a>(
    item: &'a Value,
    pointer: &str,
    index: usize,
    field: &'static str,
) -> Result<&'a str, NormalizeError> {
    item.pointer(pointer)
        .and_then(Value::as_str)
        .ok_or(NormalizeError::MissingField { index, field })
}

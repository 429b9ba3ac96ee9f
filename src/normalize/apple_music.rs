use log::warn;
use serde_json::Value;

use crate::{
    domain::track::{Track, TrackSource},
    normalize::{NormalizeError, rank_at, str_at},
};

/// Expects an `album_details` object keyed by zero-based positions
/// ("0", "1", ...), each with `name`, `artist` and `link`.
///
/// Cover art is not part of the payload and is left empty.
pub fn normalize(payload: &Value) -> Result<Vec<Track>, NormalizeError> {
    let details = payload
        .get("album_details")
        .and_then(Value::as_object)
        .ok_or(NormalizeError::InvalidShape("missing 'album_details' object"))?;

    let mut tracks = Vec::with_capacity(details.len());

    for (key, item) in details {
        let Ok(position) = key.parse::<usize>() else {
            warn!("apple music entry '{key}' is not a position, skipping");
            continue;
        };
        let Some(rank) = rank_at(position) else {
            warn!("apple music entry '{key}' is past the last rank, skipping");
            continue;
        };

        tracks.push(Track {
            name: str_at(item, "/name", position, "name")?.to_string(),
            artist: str_at(item, "/artist", position, "artist")?.to_string(),
            link: str_at(item, "/link", position, "link")?.to_string(),
            rank,
            album_url: String::new(),
            source: TrackSource::AppleMusic,
        });
    }

    tracks.sort_by_key(|t| t.rank);
    Ok(tracks)
}

use log::warn;
use serde_json::Value;

use crate::{
    domain::track::{Track, TrackSource},
    normalize::{NormalizeError, rank_at, str_at},
};

fn join_artists(track: &Value) -> String {
    track
        .get("artists")
        .and_then(Value::as_array)
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| a.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

/// Expects `items[*].track` with `name`, `artists[*].name`,
/// `external_urls.spotify` and `album.images[0].url`.
///
/// Items without a track (removed or local files) are skipped; ranks stay
/// contiguous over the kept tracks.
pub fn normalize(payload: &Value) -> Result<Vec<Track>, NormalizeError> {
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::InvalidShape("missing 'items' array"))?;

    let mut tracks = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let track = match item.get("track") {
            Some(track) if track.is_object() => track,
            _ => {
                warn!("spotify item {index} has no track, skipping");
                continue;
            }
        };

        let rank = rank_at(tracks.len()).ok_or(NormalizeError::RankOutOfRange(index))?;

        tracks.push(Track {
            name: str_at(track, "/name", index, "track.name")?.to_string(),
            artist: join_artists(track),
            link: str_at(track, "/external_urls/spotify", index, "track.external_urls.spotify")?
                .to_string(),
            rank,
            album_url: str_at(track, "/album/images/0/url", index, "track.album.images")?
                .to_string(),
            source: TrackSource::Spotify,
        });
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mock_item(name: &str, artists: &[&str]) -> Value {
        json!({
            "track": {
                "name": name,
                "artists": artists.iter().map(|a| json!({"name": a})).collect::<Vec<_>>(),
                "external_urls": {"spotify": "https://open.spotify.com/track/4fZ9WECee9p7FEWOUP03jD"},
                "album": {"images": [{"url": "https://i.scdn.co/image/ab67616d0000b273aa54578ae163a7342b6a82c5"}]}
            }
        })
    }

    #[test]
    fn test_normalize_joins_artists() -> anyhow::Result<()> {
        let payload = json!({
            "items": [mock_item("I Believe In Love Again", &["Peggy Gou", "Lenny Kravitz"])]
        });

        let tracks = normalize(&payload)?;

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist, "Peggy Gou, Lenny Kravitz");
        assert_eq!(tracks[0].rank, 1);
        assert_eq!(tracks[0].source, TrackSource::Spotify);

        Ok(())
    }

    #[test]
    fn test_null_tracks_are_skipped_and_ranks_stay_contiguous() -> anyhow::Result<()> {
        let payload = json!({
            "items": [
                mock_item("Easy", &["3LAU", "XIRA"]),
                {"track": null},
                mock_item("Starting From Scratch", &["k?d"])
            ]
        });

        let tracks = normalize(&payload)?;

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1].name, "Starting From Scratch");
        assert_eq!(tracks[1].rank, 2);

        Ok(())
    }

    #[test]
    fn test_missing_album_image() {
        let payload = json!({
            "items": [{
                "track": {
                    "name": "Easy",
                    "artists": [],
                    "external_urls": {"spotify": "x"},
                    "album": {"images": []}
                }
            }]
        });

        let err = normalize(&payload).unwrap_err();

        assert!(matches!(
            err,
            NormalizeError::MissingField { index: 0, field: "track.album.images" }
        ));
    }
}

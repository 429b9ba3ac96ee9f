use serde_json::Value;

use crate::{
    domain::track::{Track, TrackSource},
    normalize::{NormalizeError, rank_at, str_at},
};

/// SoundCloud uploads often title a track "Artist - Title" under a label's
/// account. The title's artist wins over the uploader in that case.
fn split_title(title: &str, uploader: &str) -> (String, String) {
    match title.split_once(" - ") {
        Some((artist, name)) => (name.to_string(), artist.to_string()),
        None => (title.to_string(), uploader.to_string()),
    }
}

/// Expects `tracks.items[*]` with `title`, `permalink`, `user.name` and an
/// optional `artworkUrl`.
pub fn normalize(payload: &Value) -> Result<Vec<Track>, NormalizeError> {
    let items = payload
        .pointer("/tracks/items")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::InvalidShape("missing 'tracks.items' array"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let title = str_at(item, "/title", index, "title")?;
            let link = str_at(item, "/permalink", index, "permalink")?;
            let uploader = str_at(item, "/user/name", index, "user.name")?;
            let (name, artist) = split_title(title, uploader);
            let rank = rank_at(index).ok_or(NormalizeError::RankOutOfRange(index))?;

            Ok(Track {
                name,
                artist,
                link: link.to_string(),
                rank,
                album_url: item
                    .get("artworkUrl")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                source: TrackSource::SoundCloud,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_items() -> anyhow::Result<()> {
        let payload = json!({
            "tracks": {
                "items": [
                    {
                        "title": "k?d - Starting From Scratch",
                        "permalink": "https://soundcloud.com/ophelia_records/kd-starting-from-scratch",
                        "user": {"name": "Ophelia Records"},
                        "artworkUrl": "https://i1.sndcdn.com/artworks-iGWgY4yu6vqyFBi4-K0aVuA-original.jpg"
                    },
                    {
                        "title": "Fine Fine Baby",
                        "permalink": "https://soundcloud.com/jamie-jones/jamie-jones-kah-lo-fine-fine",
                        "user": {"name": "Jamie Jones"}
                    }
                ]
            }
        });

        let tracks = normalize(&payload)?;

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Starting From Scratch");
        assert_eq!(tracks[0].artist, "k?d");
        assert_eq!(tracks[0].rank, 1);
        assert!(tracks[0].album_url.ends_with("original.jpg"));

        assert_eq!(tracks[1].name, "Fine Fine Baby");
        assert_eq!(tracks[1].artist, "Jamie Jones");
        assert_eq!(tracks[1].rank, 2);
        assert!(tracks[1].album_url.is_empty());
        assert_eq!(tracks[1].source, TrackSource::SoundCloud);

        Ok(())
    }

    #[test]
    fn test_missing_user_name() {
        let payload = json!({
            "tracks": {"items": [{"title": "x", "permalink": "y", "user": {}}]}
        });

        let err = normalize(&payload).unwrap_err();

        assert!(matches!(
            err,
            NormalizeError::MissingField { index: 0, field: "user.name" }
        ));
    }

    #[test]
    fn test_missing_items() {
        let err = normalize(&json!({"tracks": {}})).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidShape(_)));
    }
}

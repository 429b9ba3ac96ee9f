use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Streaming service a track was observed on.
///
/// Discriminants drive the deterministic ordering of additional sources,
/// they carry no priority meaning. See [`super::priority`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TrackSource {
    AppleMusic = 0,
    Spotify = 1,
    SoundCloud = 2,
    #[default]
    Unknown = 3,
}

impl TrackSource {
    /// stable token used in every serialized artifact
    pub fn token(&self) -> &'static str {
        match self {
            TrackSource::AppleMusic => "apple_music",
            TrackSource::Spotify => "spotify",
            TrackSource::SoundCloud => "soundcloud",
            TrackSource::Unknown => "unknown",
        }
    }

    /// Parses a token. Anything unrecognized becomes [`TrackSource::Unknown`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "apple_music" => TrackSource::AppleMusic,
            "spotify" => TrackSource::Spotify,
            "soundcloud" => TrackSource::SoundCloud,
            _ => TrackSource::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != TrackSource::Unknown
    }
}

impl Display for TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TrackSource::AppleMusic => "Apple Music",
            TrackSource::Spotify => "Spotify",
            TrackSource::SoundCloud => "SoundCloud",
            TrackSource::Unknown => "Unknown",
        };
        write!(f, "{label}")
    }
}

impl Serialize for TrackSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for TrackSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

/// One observation of a song on one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub link: String,
    /// 1-based position within its source's list
    pub rank: u32,
    #[serde(default)]
    pub album_url: String,
    #[serde(default)]
    pub source: TrackSource,
}

/// A song reconciled across services.
///
/// The embedded track is the primary record. `additional_sources` lists every
/// other service the song was matched on and never contains the primary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldTrack {
    #[serde(flatten)]
    pub track: Track,
    #[serde(default)]
    pub additional_sources: Vec<TrackSource>,
}

impl GoldTrack {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            additional_sources: Vec::new(),
        }
    }

    pub fn primary_source(&self) -> TrackSource {
        self.track.source
    }

    /// Records `source` as an additional source.
    ///
    /// Returns false when nothing changed: the source is the primary one or
    /// already listed.
    pub fn add_source(&mut self, source: TrackSource) -> bool {
        if source == self.track.source || self.additional_sources.contains(&source) {
            return false;
        }
        self.additional_sources.push(source);
        true
    }

    pub fn sort_additional_sources(&mut self) {
        self.additional_sources.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_track(source: TrackSource) -> Track {
        Track {
            name: "Starting From Scratch".to_string(),
            artist: "k?d".to_string(),
            link: "https://soundcloud.com/ophelia_records/kd-starting-from-scratch".to_string(),
            rank: 1,
            album_url: String::new(),
            source,
        }
    }

    #[test]
    fn test_source_tokens() -> anyhow::Result<()> {
        let sources: Vec<TrackSource> =
            serde_json::from_str(r#"["apple_music", "spotify", "soundcloud"]"#)?;
        assert_eq!(
            sources,
            vec![
                TrackSource::AppleMusic,
                TrackSource::Spotify,
                TrackSource::SoundCloud
            ]
        );
        assert_eq!(serde_json::to_string(&TrackSource::AppleMusic)?, "\"apple_music\"");
        Ok(())
    }

    #[test]
    fn test_unrecognized_token_is_unknown() -> anyhow::Result<()> {
        let source: TrackSource = serde_json::from_str("\"youtube\"")?;
        assert_eq!(source, TrackSource::Unknown);
        assert!(!source.is_known());
        Ok(())
    }

    #[test]
    fn test_track_without_source_defaults_to_unknown() -> anyhow::Result<()> {
        let track: Track = serde_json::from_str(
            r#"{"name": "Easy", "artist": "3LAU & XIRA", "link": "x", "rank": 4}"#,
        )?;
        assert_eq!(track.source, TrackSource::Unknown);
        assert!(track.album_url.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_source_skips_primary_and_duplicates() {
        let mut gold = GoldTrack::new(mock_track(TrackSource::SoundCloud));

        assert!(!gold.add_source(TrackSource::SoundCloud));
        assert!(gold.add_source(TrackSource::Spotify));
        assert!(!gold.add_source(TrackSource::Spotify));
        assert!(gold.add_source(TrackSource::AppleMusic));

        gold.sort_additional_sources();
        assert_eq!(
            gold.additional_sources,
            vec![TrackSource::AppleMusic, TrackSource::Spotify]
        );
    }

    #[test]
    fn test_gold_track_flattens_primary() -> anyhow::Result<()> {
        let mut gold = GoldTrack::new(mock_track(TrackSource::SoundCloud));
        gold.add_source(TrackSource::AppleMusic);

        let value = serde_json::to_value(&gold)?;
        assert_eq!(value["name"], "Starting From Scratch");
        assert_eq!(value["source"], "soundcloud");
        assert_eq!(value["additional_sources"][0], "apple_music");
        Ok(())
    }
}

//! Cross-source reconciliation: three ranked track lists in, one gold list out

use crate::domain::track::{GoldTrack, Track};

pub mod error;
pub mod index;
pub mod matcher;
pub mod pairwise;
pub mod pipeline;
pub mod trigram;

use error::ReconcileError;

/// A backend that turns the three per-source lists into a gold playlist.
///
/// Implementations agree on the high-level guarantees (deduplicated songs,
/// SoundCloud > Apple Music > Spotify priority, ranks exactly `1..=N`) but not
/// necessarily on bit-identical output.
pub trait Reconciler {
    fn reconcile(
        &self,
        sound_cloud: &[Track],
        spotify: &[Track],
        apple_music: &[Track],
    ) -> Result<Vec<GoldTrack>, ReconcileError>;
}

/// Sorts each record's additional sources, then orders the list by rank
/// (stable, ties keep insertion order) and renumbers ranks from 1.
pub fn finalize(gold: &mut [GoldTrack]) {
    for track in gold.iter_mut() {
        track.sort_additional_sources();
    }

    gold.sort_by_key(|g| g.track.rank);

    for (position, track) in gold.iter_mut().enumerate() {
        track.track.rank = position as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::track::TrackSource;

    fn mock_gold(name: &str, rank: u32, additional: Vec<TrackSource>) -> GoldTrack {
        GoldTrack {
            track: Track {
                name: name.to_string(),
                artist: "artist".to_string(),
                link: String::new(),
                rank,
                album_url: String::new(),
                source: TrackSource::SoundCloud,
            },
            additional_sources: additional,
        }
    }

    #[test]
    fn test_finalize_sorts_and_reranks() {
        let mut gold = vec![
            mock_gold("c", 7, vec![]),
            mock_gold("a", 1, vec![TrackSource::Spotify, TrackSource::AppleMusic]),
            mock_gold("b", 3, vec![]),
        ];

        finalize(&mut gold);

        let names: Vec<_> = gold.iter().map(|g| g.track.name.as_str()).collect();
        let ranks: Vec<_> = gold.iter().map(|g| g.track.rank).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(
            gold[0].additional_sources,
            vec![TrackSource::AppleMusic, TrackSource::Spotify]
        );
    }

    #[test]
    fn test_finalize_keeps_insertion_order_on_ties() {
        let mut gold = vec![
            mock_gold("first", 1, vec![]),
            mock_gold("second", 1, vec![]),
            mock_gold("third", 1, vec![]),
        ];

        finalize(&mut gold);

        let names: Vec<_> = gold.iter().map(|g| g.track.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_finalize_empty() {
        let mut gold: Vec<GoldTrack> = vec![];
        finalize(&mut gold);
        assert!(gold.is_empty());
    }
}

use log::{debug, info};

use crate::{
    domain::track::{GoldTrack, Track, TrackSource},
    reconcile::{
        Reconciler,
        error::ReconcileError,
        finalize,
        index::IdentityKey,
        matcher::FuzzyMatcher,
        pairwise::{PassStats, SourceList, WorkingSet, reconcile_pair},
    },
};

/// In-memory reconciliation over three ordered pairwise passes.
///
/// Pass order is (SoundCloud, Spotify), (SoundCloud, Apple Music),
/// (Spotify, Apple Music). Because the first list of a pair supplies the
/// primary record, SoundCloud becomes primary for anything it shares, and a
/// Spotify/Apple Music-only song can only surface in the last pass.
///
/// Matching is not transitive: identities come from the literal text of the
/// first list, so a song spelled differently enough on two services may be
/// split even if both match a third spelling.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReconciler {
    matcher: FuzzyMatcher,
}

impl InMemoryReconciler {
    pub fn new(matcher: FuzzyMatcher) -> Self {
        Self { matcher }
    }
}

impl Reconciler for InMemoryReconciler {
    fn reconcile(
        &self,
        sound_cloud: &[Track],
        spotify: &[Track],
        apple_music: &[Track],
    ) -> Result<Vec<GoldTrack>, ReconcileError> {
        let sound_cloud = SourceList::new(TrackSource::SoundCloud, sound_cloud);
        let spotify = SourceList::new(TrackSource::Spotify, spotify);
        let apple_music = SourceList::new(TrackSource::AppleMusic, apple_music);

        let mut working = WorkingSet::new();

        for (a, b) in [
            (sound_cloud, spotify),
            (sound_cloud, apple_music),
            (spotify, apple_music),
        ] {
            let stats = reconcile_pair(&mut working, &self.matcher, a, b)?;
            debug!(
                "pass {} x {}: {} new, {} merged, {} ranks adopted",
                a.source, b.source, stats.created, stats.merged, stats.adopted_ranks
            );
        }

        for list in [sound_cloud, spotify, apple_music] {
            let stats = sweep_unmatched(&mut working, list)?;
            debug!(
                "unmatched {}: {} passed through, {} folded",
                list.source, stats.created, stats.merged
            );
        }

        debug!("{} identities indexed", working.index.len());
        let mut gold = working.into_result();
        finalize(&mut gold);

        info!(
            "reconciled {} SoundCloud, {} Spotify, {} Apple Music tracks into {} gold tracks",
            sound_cloud.tracks.len(),
            spotify.tracks.len(),
            apple_music.tracks.len(),
            gold.len()
        );
        Ok(gold)
    }
}

/// Adds every track of `list` that matched nothing as its own gold record.
///
/// A track whose identity is already indexed is folded into that record
/// instead, so each identity keeps a single gold record. Folding takes the
/// rank over under the same priority rule as a pairwise merge.
///
/// Folding compares identity keys only, ignoring the source tag, so tracks
/// tagged `Unknown` that never match by edit distance still fold when their
/// lowercase name and artist are equal.
fn sweep_unmatched(
    working: &mut WorkingSet,
    list: SourceList<'_>,
) -> Result<PassStats, ReconcileError> {
    let mut stats = PassStats::default();

    for (i, track) in list.tracks.iter().enumerate() {
        if working.was_matched(list.source, i) {
            continue;
        }

        let key = IdentityKey::new(&track.name, &track.artist);
        match working.index.lookup(&key) {
            Some(position) => {
                stats.merged += 1;
                if working.merge(position, list.source, list.source, track.rank) {
                    stats.adopted_ranks += 1;
                }
            }
            None => {
                working.create(key, track, list.source)?;
                stats.created += 1;
            }
        }
    }

    Ok(stats)
}

use std::collections::HashSet;

use log::trace;

use crate::{
    domain::{
        priority::should_adopt_rank,
        track::{GoldTrack, Track, TrackSource},
    },
    reconcile::{
        error::ReconcileError,
        index::{ConsolidationIndex, IdentityKey},
        matcher::FuzzyMatcher,
    },
};

/// A source's track list, tagged with the source it came from
#[derive(Debug, Clone, Copy)]
pub struct SourceList<'a> {
    pub source: TrackSource,
    pub tracks: &'a [Track],
}

impl<'a> SourceList<'a> {
    pub fn new(source: TrackSource, tracks: &'a [Track]) -> Self {
        Self { source, tracks }
    }
}

/// What a single pass or sweep did to the working set
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub created: usize,
    pub merged: usize,
    pub adopted_ranks: usize,
}

/// Gold records under construction, shared by every pass of one run
#[derive(Debug, Default)]
pub struct WorkingSet {
    pub result: Vec<GoldTrack>,
    pub index: ConsolidationIndex,
    /// (source, position in its list) of every track that took part in a match
    matched: HashSet<(TrackSource, usize)>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_matched(&self, source: TrackSource, position: usize) -> bool {
        self.matched.contains(&(source, position))
    }

    pub fn into_result(self) -> Vec<GoldTrack> {
        self.result
    }

    /// Appends a gold record with `track` as primary and indexes it under `key`
    pub(crate) fn create(
        &mut self,
        key: IdentityKey,
        track: &Track,
        source: TrackSource,
    ) -> Result<usize, ReconcileError> {
        let position = self.result.len();
        self.index.insert(key, position)?;
        self.result.push(GoldTrack::new(Track {
            source,
            ..track.clone()
        }));
        Ok(position)
    }

    /// Folds a sighting into the gold record at `position`.
    ///
    /// `seen_on` becomes an additional source. If `candidate_source` outranks
    /// the primary source, only the rank is taken over: name, artist, link and
    /// album art stay as first recorded. Returns whether the rank was adopted.
    pub(crate) fn merge(
        &mut self,
        position: usize,
        seen_on: TrackSource,
        candidate_source: TrackSource,
        candidate_rank: u32,
    ) -> bool {
        let gold = &mut self.result[position];
        gold.add_source(seen_on);

        if should_adopt_rank(gold.primary_source(), candidate_source) {
            gold.track.rank = candidate_rank;
            true
        } else {
            false
        }
    }
}

/// Compares every track of `a` with every track of `b` and records each match
/// in `working`.
///
/// The identity key always comes from the `a` side, so the primary of a new
/// gold record is the `a` track.
pub fn reconcile_pair(
    working: &mut WorkingSet,
    matcher: &FuzzyMatcher,
    a: SourceList<'_>,
    b: SourceList<'_>,
) -> Result<PassStats, ReconcileError> {
    let mut stats = PassStats::default();

    for (i, track_a) in a.tracks.iter().enumerate() {
        for (j, track_b) in b.tracks.iter().enumerate() {
            if !matcher.matches(track_a, track_b) {
                continue;
            }
            trace!(
                "{} #{} '{}' matches {} #{} '{}'",
                a.source, track_a.rank, track_a.name, b.source, track_b.rank, track_b.name
            );

            working.matched.insert((a.source, i));
            working.matched.insert((b.source, j));

            let key = IdentityKey::new(&track_a.name, &track_a.artist);
            match working.index.lookup(&key) {
                Some(position) => {
                    stats.merged += 1;
                    if working.merge(position, b.source, a.source, track_a.rank) {
                        stats.adopted_ranks += 1;
                    }
                }
                None => {
                    let position = working.create(key, track_a, a.source)?;
                    working.result[position].add_source(b.source);
                    stats.created += 1;
                }
            }
        }
    }

    Ok(stats)
}

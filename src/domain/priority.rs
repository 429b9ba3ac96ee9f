//! Trust order between sources.
//!
//! Higher number wins. The table is the only place the order lives: the
//! in-memory reconciler consults it through [`should_adopt_rank`] and the
//! relational backend loads it as a SQL table.

use super::track::TrackSource;

pub const PRIORITY_TABLE: &[(TrackSource, u8)] = &[
    (TrackSource::SoundCloud, 3),
    (TrackSource::AppleMusic, 2),
    (TrackSource::Spotify, 1),
];

/// Priority of `source`, 0 for sources absent from the table
pub fn priority(source: TrackSource) -> u8 {
    PRIORITY_TABLE
        .iter()
        .find(|(s, _)| *s == source)
        .map(|(_, p)| *p)
        .unwrap_or(0)
}

/// Decides whether a track from `candidate` should take over the rank of a
/// gold record whose primary source is `current`.
pub fn should_adopt_rank(current: TrackSource, candidate: TrackSource) -> bool {
    let current = priority(current);
    current > 0 && priority(candidate) > current
}

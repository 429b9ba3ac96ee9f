//! Decides whether two track observations denote the same song

use crate::domain::track::Track;

pub const DEFAULT_MAX_NAME_DISTANCE: usize = 2;
pub const DEFAULT_MAX_ARTIST_DISTANCE: usize = 2;

/// Edit-distance matcher over track names and artists.
///
/// Comparison is character-level Levenshtein on the text exactly as given,
/// case included. Tracks from an unknown source never match here, though the
/// unmatched sweep can still fold them into a record with the same identity
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    pub max_name_distance: usize,
    pub max_artist_distance: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            max_name_distance: DEFAULT_MAX_NAME_DISTANCE,
            max_artist_distance: DEFAULT_MAX_ARTIST_DISTANCE,
        }
    }
}

impl FuzzyMatcher {
    pub fn new(max_name_distance: usize, max_artist_distance: usize) -> Self {
        Self {
            max_name_distance,
            max_artist_distance,
        }
    }

    pub fn matches(&self, a: &Track, b: &Track) -> bool {
        if !a.source.is_known() || !b.source.is_known() {
            return false;
        }
        strsim::levenshtein(&a.name, &b.name) <= self.max_name_distance
            && strsim::levenshtein(&a.artist, &b.artist) <= self.max_artist_distance
    }
}

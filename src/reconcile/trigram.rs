//! Trigram text similarity in the manner of PostgreSQL's pg_trgm

use std::collections::BTreeSet;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Trigrams of every alphanumeric word of `text`, lowercased, each word
/// padded with two leading blanks and one trailing blank.
pub fn trigrams(text: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.to_lowercase().chars())
            .chain(std::iter::once(' '))
            .collect();

        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }

    set
}

/// Shared trigrams over all distinct trigrams, in `0.0..=1.0`
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = trigrams(a);
    let b = trigrams(b);

    let shared = a.intersection(&b).count();
    let total = a.len() + b.len() - shared;
    if total == 0 {
        return 0.0;
    }
    shared as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigrams_of_word() {
        let expected: BTreeSet<String> = ["  c", " ca", "cat", "at "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(trigrams("Cat"), expected);
    }

    #[test]
    fn test_identical_text() {
        assert_eq!(similarity("Starting From Scratch", "starting from scratch"), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let s = similarity("word", "two words");
        assert!((s - 4.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_punctuation_is_ignored() {
        assert_eq!(similarity("k?d", "k d"), 1.0);
    }

    #[test]
    fn test_empty_text_is_dissimilar() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "Easy"), 0.0);
    }

    #[test]
    fn test_truncated_title_above_default_threshold() {
        let s = similarity("Starting From Scratchk?d", "Starting From Scratk?d");
        assert!(s > DEFAULT_SIMILARITY_THRESHOLD, "similarity was {s}");
    }
}

use std::{collections::HashMap, fmt::Display};

use crate::reconcile::error::ReconcileError;

/// Case-insensitive `name-artist` key under which gold records are indexed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(name: &str, artist: &str) -> Self {
        Self(format!("{name}-{artist}").to_lowercase())
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps an identity to the position of its gold record in the working list.
///
/// Lives for one reconciliation run and only grows.
#[derive(Debug, Default)]
pub struct ConsolidationIndex {
    positions: HashMap<IdentityKey, usize>,
}

impl ConsolidationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &IdentityKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Indexes `key` at `position`. Callers must `lookup` first: indexing the
    /// same identity twice is an error.
    pub fn insert(&mut self, key: IdentityKey, position: usize) -> Result<(), ReconcileError> {
        if self.positions.contains_key(&key) {
            return Err(ReconcileError::DuplicateIdentity(key.to_string()));
        }
        self.positions.insert(key, position);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_ignores_case() {
        assert_eq!(
            IdentityKey::new("Starting From Scratch", "k?d"),
            IdentityKey::new("STARTING FROM SCRATCH", "K?D")
        );
        assert_eq!(
            IdentityKey::new("Easy", "3LAU & XIRA").to_string(),
            "easy-3lau & xira"
        );
    }

    #[test]
    fn test_lookup_after_insert() -> anyhow::Result<()> {
        let mut index = ConsolidationIndex::new();
        let key = IdentityKey::new("Fine Fine Baby", "Jamie Jones");

        assert_eq!(index.lookup(&key), None);
        index.insert(key.clone(), 3)?;
        assert_eq!(index.lookup(&key), Some(3));
        assert_eq!(index.len(), 1);

        Ok(())
    }

    #[test]
    fn test_insert_twice_fails() -> anyhow::Result<()> {
        let mut index = ConsolidationIndex::new();
        index.insert(IdentityKey::new("Easy", "3LAU"), 0)?;

        let err = index.insert(IdentityKey::new("EASY", "3lau"), 1).unwrap_err();

        assert!(matches!(err, ReconcileError::DuplicateIdentity(ref k) if k == "easy-3lau"));
        assert_eq!(index.lookup(&IdentityKey::new("easy", "3lau")), Some(0));

        Ok(())
    }
}

use std::collections::BTreeSet;

/// Deduplicated set of candidate reviewer identities for one leaf rule
///
/// Backed by a `BTreeSet` so that iteration order, and therefore the draw
/// sequence for a seeded random source, is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool(BTreeSet<String>);

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one identity; returns false if it was already present
    pub fn insert(&mut self, identity: impl Into<String>) -> bool {
        self.0.insert(identity.into())
    }

    /// Union the given identities into the pool
    pub fn add_all<I, S>(&mut self, identities: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(identities.into_iter().map(Into::into));
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.0.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pool = Self::new();
        pool.add_all(iter);
        pool
    }
}

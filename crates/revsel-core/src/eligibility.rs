//! Eligibility filtering of candidate pools.
//!
//! The host rejects a review request batch outright if any requested
//! identity is the author or not a collaborator, so every candidate is
//! checked here before sampling.

use crate::model::{CandidatePool, CollaboratorPermissionMap};

/// Keep only candidates that are repository collaborators and not the author
///
/// Any permission level counts; presence in the map is what matters.
///
/// # Returns
/// Eligible identities in pool order
pub fn filter_eligible(
    pool: &CandidatePool,
    permissions: &CollaboratorPermissionMap,
    author: &str,
) -> Vec<String> {
    pool.iter()
        .filter(|identity| *identity != author && permissions.contains(identity))
        .map(str::to_string)
        .collect()
}

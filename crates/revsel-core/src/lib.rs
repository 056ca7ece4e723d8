//! revsel core - reviewer selection for pending policy rules
//!
//! Given the result tree of a policy evaluation, this crate works out who
//! should be asked to review next:
//! - Collecting pending leaf rules from the result tree
//! - Resolving each rule's reviewer specification against a directory
//!   (explicit users, one random team, one random organization, admins,
//!   write collaborators)
//! - Dropping the author and non-collaborators
//! - Sampling the required number of reviewers uniformly without replacement
//!
//! The randomness source and the directory are injected, so a run is a pure
//! function of the tree, the directory snapshot and the seed.

pub mod candidate_resolver;
pub mod directory;
pub mod eligibility;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reviewers;
pub mod sampler;
pub mod settings;
pub mod traversal;

// Re-export commonly used types
pub use directory::{CachedCollaborators, PullContext, StaticDirectory};
pub use errors::{ExError, ExErrorKind, Result, RevselError};
pub use model::{
    CandidatePool, CollaboratorPermissionMap, EvaluationStatus, Permission, ResultNode,
    ReviewRequestRule,
};
pub use reviewers::{find_random_requesters, find_random_requesters_with};
pub use settings::SelectionSettings;

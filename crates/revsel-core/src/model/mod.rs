pub mod permission;
pub mod pool;
pub mod result;
pub mod rule;

pub use permission::{CollaboratorPermissionMap, Permission};
pub use pool::CandidatePool;
pub use result::{EvaluationStatus, ResultNode};
pub use rule::{ReviewRequestRule, TeamRef};

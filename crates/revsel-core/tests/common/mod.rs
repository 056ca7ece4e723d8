use revsel_core::model::{CollaboratorPermissionMap, Permission};
use revsel_core::{ExError, ExErrorKind, PullContext, StaticDirectory};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Directory for scenarios: author `author`, repository `acme/widgets`
#[allow(dead_code)]
pub fn directory() -> StaticDirectory {
    StaticDirectory::new("author", "acme", "widgets")
}

/// Directory where every listed identity is a write collaborator
#[allow(dead_code)]
pub fn directory_with_writers(writers: &[&str]) -> StaticDirectory {
    writers.iter().fold(directory(), |dir, w| {
        dir.with_collaborator(*w, Permission::Write)
    })
}

/// Wraps a directory and injects listing failures
///
/// Counts collaborator listings so tests can check caching and the
/// per-leaf fetch.
#[allow(dead_code)]
pub struct FaultyDirectory {
    pub inner: StaticDirectory,
    pub fail_teams: bool,
    pub fail_orgs: bool,
    /// Fail collaborator listings once this many have succeeded
    pub fail_collaborators_after: Option<usize>,
    /// Kind reported by every injected failure
    pub failure_kind: ExErrorKind,
    pub collaborator_calls: AtomicUsize,
    pub team_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FaultyDirectory {
    pub fn new(inner: StaticDirectory) -> Self {
        Self {
            inner,
            fail_teams: false,
            fail_orgs: false,
            fail_collaborators_after: None,
            failure_kind: ExErrorKind::ExternalService,
            collaborator_calls: AtomicUsize::new(0),
            team_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_teams(mut self) -> Self {
        self.fail_teams = true;
        self
    }

    pub fn failing_orgs(mut self) -> Self {
        self.fail_orgs = true;
        self
    }

    pub fn failing_collaborators_after(mut self, successes: usize) -> Self {
        self.fail_collaborators_after = Some(successes);
        self
    }

    pub fn failing_with(mut self, kind: ExErrorKind) -> Self {
        self.failure_kind = kind;
        self
    }

    pub fn collaborator_calls(&self) -> usize {
        self.collaborator_calls.load(Ordering::SeqCst)
    }

    pub fn team_calls(&self) -> usize {
        self.team_calls.load(Ordering::SeqCst)
    }
}

impl FaultyDirectory {
    fn unavailable(&self, op: &str) -> ExError {
        ExError::new(self.failure_kind)
            .with_op(op)
            .with_message("directory unavailable")
    }
}

impl PullContext for FaultyDirectory {
    fn author(&self) -> &str {
        self.inner.author()
    }

    fn repository_owner(&self) -> &str {
        self.inner.repository_owner()
    }

    fn repository_name(&self) -> &str {
        self.inner.repository_name()
    }

    fn list_team_members(&self, org: &str, team: &str) -> Result<Vec<String>, ExError> {
        self.team_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_teams {
            return Err(self.unavailable("list_team_members"));
        }
        self.inner.list_team_members(org, team)
    }

    fn list_organization_members(&self, org: &str) -> Result<Vec<String>, ExError> {
        if self.fail_orgs {
            return Err(self.unavailable("list_organization_members"));
        }
        self.inner.list_organization_members(org)
    }

    fn list_repository_collaborators(&self) -> Result<CollaboratorPermissionMap, ExError> {
        let previous = self.collaborator_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_collaborators_after {
            Some(successes) if previous >= successes => {
                Err(self.unavailable("list_repository_collaborators"))
            }
            _ => self.inner.list_repository_collaborators(),
        }
    }
}

/// Same directory, different pull request author
#[allow(dead_code)]
pub fn authored_by(mut dir: StaticDirectory, author: &str) -> StaticDirectory {
    dir.author = author.to_string();
    dir
}

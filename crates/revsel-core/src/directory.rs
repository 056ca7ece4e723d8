//! Pull-request context and directory lookups consumed by reviewer selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::errors::{ExError, ExErrorKind};
use crate::model::{CollaboratorPermissionMap, Permission};

/// Pull request being reviewed, plus the directory service behind it
///
/// Implementations usually talk to a remote host (paginated listings,
/// authentication, rate limits). Calls may block; callers that need a
/// deadline enforce it inside their implementation.
pub trait PullContext: Send + Sync {
    /// Identity that opened the pull request
    fn author(&self) -> &str;

    fn repository_owner(&self) -> &str;

    fn repository_name(&self) -> &str;

    /// List every member of `org/team`.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::NotFound` if the team does not exist, or any
    /// transport-level kind if the listing fails.
    fn list_team_members(&self, org: &str, team: &str) -> Result<Vec<String>, ExError>;

    /// List every member of an organization.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::NotFound` if the organization does not exist, or any
    /// transport-level kind if the listing fails.
    fn list_organization_members(&self, org: &str) -> Result<Vec<String>, ExError>;

    /// List the repository's collaborators with their permission levels.
    ///
    /// # Errors
    ///
    /// Any transport-level kind if the listing fails.
    fn list_repository_collaborators(&self) -> Result<CollaboratorPermissionMap, ExError>;
}

/// In-memory directory snapshot
///
/// Serves lookups from fixed data. Used for fixtures and the CLI, where the
/// directory is captured ahead of time as JSON or YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticDirectory {
    pub author: String,
    pub owner: String,
    pub repository: String,

    /// Team members keyed by `org/team-slug`
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<String>>,

    /// Organization members keyed by organization name
    #[serde(default)]
    pub organizations: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub collaborators: CollaboratorPermissionMap,
}

impl StaticDirectory {
    pub fn new(
        author: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            owner: owner.into(),
            repository: repository.into(),
            ..Self::default()
        }
    }

    pub fn with_team<I, S>(mut self, team_ref: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams.insert(
            team_ref.into(),
            members.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_organization<I, S>(mut self, org: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations.insert(
            org.into(),
            members.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_collaborator(
        mut self,
        identity: impl Into<String>,
        permission: Permission,
    ) -> Self {
        self.collaborators.insert(identity, permission);
        self
    }
}

impl PullContext for StaticDirectory {
    fn author(&self) -> &str {
        &self.author
    }

    fn repository_owner(&self) -> &str {
        &self.owner
    }

    fn repository_name(&self) -> &str {
        &self.repository
    }

    fn list_team_members(&self, org: &str, team: &str) -> Result<Vec<String>, ExError> {
        let key = format!("{}/{}", org, team);
        self.teams.get(&key).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("list_team_members")
                .with_entity_id(key)
                .with_message("Team not found")
        })
    }

    fn list_organization_members(&self, org: &str) -> Result<Vec<String>, ExError> {
        self.organizations.get(org).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("list_organization_members")
                .with_entity_id(org)
                .with_message("Organization not found")
        })
    }

    fn list_repository_collaborators(&self) -> Result<CollaboratorPermissionMap, ExError> {
        Ok(self.collaborators.clone())
    }
}

/// Memoizes the collaborator listing of an inner context
///
/// Selection fetches the permission map once per pending leaf; wrapping the
/// context turns that into one fetch per wrapper. Failed fetches are not
/// cached, so a later leaf retries.
pub struct CachedCollaborators<C> {
    inner: C,
    collaborators: Mutex<Option<CollaboratorPermissionMap>>,
}

impl<C: PullContext> CachedCollaborators<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            collaborators: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: PullContext> PullContext for CachedCollaborators<C> {
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
        self.inner.list_team_members(org, team)
    }

    fn list_organization_members(&self, org: &str) -> Result<Vec<String>, ExError> {
        self.inner.list_organization_members(org)
    }

    fn list_repository_collaborators(&self) -> Result<CollaboratorPermissionMap, ExError> {
        let mut cached = self.collaborators.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("list_repository_collaborators")
                .with_message("Collaborator cache lock poisoned")
        })?;

        if let Some(map) = cached.as_ref() {
            return Ok(map.clone());
        }

        let map = self.inner.list_repository_collaborators()?;
        *cached = Some(map.clone());
        Ok(map)
    }
}

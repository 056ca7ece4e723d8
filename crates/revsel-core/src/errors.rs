use thiserror::Error;

/// Result type alias using RevselError
pub type Result<T> = std::result::Result<T, RevselError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidTeamReference,
    InvalidSettings,
    NotFound,

    // Selection
    /// The sampler ran out of retry budget while drawing unique indices
    SamplingExhausted,

    // Directory/IO
    ExternalService,
    Timeout,
    Unauthorised,
    Forbidden,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTeamReference => "ERR_INVALID_TEAM_REFERENCE",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::SamplingExhausted => "ERR_SAMPLING_EXHAUSTED",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Directory collaborators report their failures with this type, and every
/// `RevselError` converts into it for logging and external reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    repository: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            repository: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (team, organization, rule or leaf)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add repository context in `owner/name` form
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the repository context, if any
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(repository) = &self.repository {
            write!(f, " (repository: {})", repository)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for reviewer selection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevselError {
    // ===== Resolution Errors (non-fatal, logged only) =====
    /// Team reference is not in `org/team-slug` form
    #[error("Invalid team reference '{team_ref}': expected org/team-slug")]
    InvalidTeamReference { team_ref: String },

    /// Team membership could not be listed; `source` is the directory's error
    #[error("Unable to get member listing for team {team}: {source}")]
    TeamListing {
        team: String,
        #[source]
        source: ExError,
    },

    /// Organization membership could not be listed
    #[error("Unable to get member listing for org {org}: {source}")]
    OrganizationListing {
        org: String,
        #[source]
        source: ExError,
    },

    // ===== Resolution Errors (fatal) =====
    /// Repository collaborators could not be listed
    #[error("Unable to list repository collaborators for {owner}/{repo}: {source}")]
    CollaboratorListing {
        owner: String,
        repo: String,
        #[source]
        source: ExError,
    },

    // ===== Selection Errors =====
    /// Retry budget ran out before enough unique candidates were drawn
    #[error(
        "Unable to select {requested} unique reviewers from {available} candidates \
         within {attempts} attempts"
    )]
    SamplingExhausted {
        requested: usize,
        available: usize,
        attempts: usize,
    },

    /// A pending leaf failed fatally; wraps the underlying cause
    #[error("Reviewer selection failed for leaf {leaf_index} ('{rule_name}'): {source}")]
    LeafSelectionFailed {
        leaf_index: usize,
        rule_name: String,
        #[source]
        source: Box<RevselError>,
    },

    // ===== Configuration Errors =====
    /// Settings are structurally valid but semantically unusable
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// Settings or fixture text could not be parsed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A settings or fixture file could not be read
    #[error("Unable to read {path}: {message}")]
    Io { path: String, message: String },
}

impl RevselError {
    /// Whether this error aborts the selection run
    ///
    /// Membership listing failures only narrow the candidate pool, so the
    /// resolver logs them and keeps going.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            RevselError::InvalidTeamReference { .. }
                | RevselError::TeamListing { .. }
                | RevselError::OrganizationListing { .. }
        )
    }
}

/// Convert RevselError to ExError for structured reporting
impl From<RevselError> for ExError {
    fn from(err: RevselError) -> Self {
        match err {
            RevselError::InvalidTeamReference { team_ref } => {
                ExError::new(ExErrorKind::InvalidTeamReference)
                    .with_entity_id(team_ref)
                    .with_message("Team reference must be org/team-slug")
            }

            RevselError::TeamListing { team, source } => ExError::new(source.kind())
                .with_op("list_team_members")
                .with_message(format!("Unable to get member listing for team {}", team))
                .with_entity_id(team)
                .with_source(source),

            RevselError::OrganizationListing { org, source } => ExError::new(source.kind())
                .with_op("list_organization_members")
                .with_message(format!("Unable to get member listing for org {}", org))
                .with_entity_id(org)
                .with_source(source),

            RevselError::CollaboratorListing {
                owner,
                repo,
                source,
            } => ExError::new(source.kind())
                .with_op("list_repository_collaborators")
                .with_repository(format!("{}/{}", owner, repo))
                .with_message("Unable to list repository collaborators")
                .with_source(source),

            RevselError::SamplingExhausted {
                requested,
                available,
                attempts,
            } => ExError::new(ExErrorKind::SamplingExhausted).with_message(format!(
                "Selected fewer than {} of {} candidates after {} attempts",
                requested, available, attempts
            )),

            RevselError::LeafSelectionFailed {
                leaf_index,
                rule_name,
                source,
            } => {
                let inner: ExError = (*source).into();
                ExError::new(inner.kind())
                    .with_op("find_random_requesters")
                    .with_entity_id(format!("leaf[{}]:{}", leaf_index, rule_name))
                    .with_message(inner.message().to_string())
                    .with_source(inner)
            }

            RevselError::InvalidSettings { reason } => {
                ExError::new(ExErrorKind::InvalidSettings).with_message(reason)
            }

            RevselError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            RevselError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_entity_id(path)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("list_team_members")
            .with_entity_id("acme/platform")
            .with_message("team not found");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("list_team_members"));
        assert!(rendered.contains("acme/platform"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::Timeout).with_message("deadline");
        let outer = ExError::new(ExErrorKind::ExternalService).with_source(inner);

        assert!(outer.source().is_some());
        assert_eq!(outer.source_error().unwrap().kind(), ExErrorKind::Timeout);
    }

    #[test]
    fn test_listing_failures_are_not_fatal() {
        let boom = ExError::new(ExErrorKind::Timeout).with_message("boom");
        let team = RevselError::TeamListing {
            team: "acme/core".to_string(),
            source: boom.clone(),
        };
        let collaborators = RevselError::CollaboratorListing {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            source: boom,
        };

        assert!(!team.is_fatal());
        assert!(collaborators.is_fatal());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{Result, RevselError};

/// Reviewer specification attached to a pending leaf rule
///
/// Every source is optional; the resolver takes the union of all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewRequestRule {
    /// Explicit usernames
    pub users: BTreeSet<String>,

    /// Team references in `org/team-slug` form
    pub teams: BTreeSet<String>,

    /// Organization names
    pub organizations: BTreeSet<String>,

    /// Any repository admin is a candidate
    pub admins: bool,

    /// Any collaborator with write permission is a candidate
    pub write_collaborators: bool,

    /// How many reviewers to request for this rule
    pub required_count: usize,
}

impl ReviewRequestRule {
    pub fn new(required_count: usize) -> Self {
        Self {
            required_count,
            ..Self::default()
        }
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn with_teams<I, S>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams.extend(teams.into_iter().map(Into::into));
        self
    }

    pub fn with_organizations<I, S>(mut self, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations
            .extend(organizations.into_iter().map(Into::into));
        self
    }

    pub fn with_admins(mut self) -> Self {
        self.admins = true;
        self
    }

    pub fn with_write_collaborators(mut self) -> Self {
        self.write_collaborators = true;
        self
    }
}

/// A parsed `org/team-slug` team reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub org: String,
    pub slug: String,
}

impl TeamRef {
    /// Parse an `org/team-slug` reference
    ///
    /// # Errors
    ///
    /// Returns `RevselError::InvalidTeamReference` if either side is empty or
    /// the slug contains another `/`.
    pub fn parse(team_ref: &str) -> Result<Self> {
        let invalid = || RevselError::InvalidTeamReference {
            team_ref: team_ref.to_string(),
        };

        let (org, slug) = team_ref.split_once('/').ok_or_else(invalid)?;
        let (org, slug) = (org.trim(), slug.trim());
        if org.is_empty() || slug.is_empty() || slug.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            org: org.to_string(),
            slug: slug.to_string(),
        })
    }
}

impl std::fmt::Display for TeamRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.org, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_ref_parse() {
        let team = TeamRef::parse("acme/platform-reviewers").unwrap();
        assert_eq!(team.org, "acme");
        assert_eq!(team.slug, "platform-reviewers");
        assert_eq!(team.to_string(), "acme/platform-reviewers");
    }

    #[test]
    fn test_team_ref_rejects_malformed() {
        for bad in ["acme", "/team", "acme/", "acme/a/b", ""] {
            let err = TeamRef::parse(bad).unwrap_err();
            let rejected = matches!(
                err,
                RevselError::InvalidTeamReference { ref team_ref } if team_ref == bad
            );
            assert!(rejected, "expected rejection of {:?}", bad);
        }
    }

    #[test]
    fn test_builder_deduplicates_users() {
        let rule = ReviewRequestRule::new(2).with_users(["a", "b", "a"]);
        assert_eq!(rule.users.len(), 2);
        assert_eq!(rule.required_count, 2);
    }

    #[test]
    fn test_rule_deserializes_with_defaults() {
        let rule: ReviewRequestRule =
            serde_json::from_str(r#"{"users": ["a"], "admins": true, "required_count": 1}"#)
                .unwrap();

        assert!(rule.admins);
        assert!(!rule.write_collaborators);
        assert!(rule.teams.is_empty());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Repository permission level of a collaborator
///
/// Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    None,
    Read,
    Triage,
    Write,
    Maintain,
    Admin,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Triage => "triage",
            Permission::Write => "write",
            Permission::Maintain => "maintain",
            Permission::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository collaborators keyed by identity
///
/// Presence of a key is what makes an identity a collaborator; the level is
/// only consulted when expanding admin and write pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollaboratorPermissionMap(BTreeMap<String, Permission>);

impl CollaboratorPermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, permission: Permission) {
        self.0.insert(identity.into(), permission);
    }

    pub fn with(mut self, identity: impl Into<String>, permission: Permission) -> Self {
        self.insert(identity, permission);
        self
    }

    pub fn get(&self, identity: &str) -> Option<Permission> {
        self.0.get(identity).copied()
    }

    /// Whether the identity is a known collaborator at any level
    pub fn contains(&self, identity: &str) -> bool {
        self.0.contains_key(identity)
    }

    /// Identities holding exactly the given permission level
    pub fn with_permission(&self, permission: Permission) -> impl Iterator<Item = &str> + '_ {
        self.0
            .iter()
            .filter(move |(_, p)| **p == permission)
            .map(|(identity, _)| identity.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Permission)> + '_ {
        self.0.iter().map(|(identity, p)| (identity.as_str(), *p))
    }
}

impl<S: Into<String>> FromIterator<(S, Permission)> for CollaboratorPermissionMap {
    fn from_iter<I: IntoIterator<Item = (S, Permission)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(identity, p)| (identity.into(), p))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_ordering() {
        assert!(Permission::Admin > Permission::Maintain);
        assert!(Permission::Write > Permission::Triage);
        assert!(Permission::Read > Permission::None);
    }

    #[test]
    fn test_with_permission_matches_exact_level() {
        let map = CollaboratorPermissionMap::new()
            .with("alice", Permission::Admin)
            .with("bob", Permission::Write)
            .with("carol", Permission::Maintain)
            .with("dave", Permission::Admin);

        let admins: Vec<&str> = map.with_permission(Permission::Admin).collect();
        let writers: Vec<&str> = map.with_permission(Permission::Write).collect();

        assert_eq!(admins, vec!["alice", "dave"]);
        assert_eq!(writers, vec!["bob"]);
    }

    #[test]
    fn test_map_deserializes_from_object() {
        let map: CollaboratorPermissionMap =
            serde_json::from_str(r#"{"alice": "admin", "bob": "read"}"#).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("alice"), Some(Permission::Admin));
        assert!(map.contains("bob"));
        assert!(!map.contains("mallory"));
    }
}

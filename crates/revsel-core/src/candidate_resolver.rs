//! Candidate pool resolution.
//!
//! Turns one leaf rule's reviewer specification into the raw set of
//! identities worth considering, before eligibility filtering.

use rand::Rng;
use std::collections::BTreeSet;

use crate::directory::PullContext;
use crate::errors::{ExError, Result, RevselError};
use crate::model::{
    CandidatePool, CollaboratorPermissionMap, Permission, ReviewRequestRule, TeamRef,
};

const OP_RESOLVE: &str = "resolve_candidate_pool";

/// Candidates for one rule together with the permission map they were
/// resolved against
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPool {
    pub candidates: CandidatePool,
    pub permissions: CollaboratorPermissionMap,
}

/// Resolve a rule's reviewer specification into a candidate pool
///
/// Sources are unioned in this order:
/// 1. explicit users
/// 2. all members of ONE team picked uniformly from `teams`
/// 3. all members of ONE organization picked uniformly from `organizations`
/// 4. collaborators at `admin` level (if `admins`) and at `write` level
///    (if `write_collaborators`)
///
/// Failures that are not fatal (see [`RevselError::is_fatal`]) are logged
/// and the source is skipped. The collaborator map is fetched for every rule
/// since eligibility filtering needs it.
///
/// # Errors
///
/// - `RevselError::CollaboratorListing` if the collaborator map cannot be
///   fetched.
pub fn resolve_candidate_pool<C, R>(
    rule: &ReviewRequestRule,
    ctx: &C,
    rng: &mut R,
) -> Result<ResolvedPool>
where
    C: PullContext + ?Sized,
    R: Rng + ?Sized,
{
    let mut candidates: CandidatePool = rule.users.iter().cloned().collect();

    if let Some(team) = choose_one(&rule.teams, rng) {
        absorb(
            &mut candidates,
            list_team(ctx, team),
            "Unable to get member listing for team, skipping team member selection",
        )?;
    }

    if let Some(org) = choose_one(&rule.organizations, rng) {
        let members = ctx
            .list_organization_members(org)
            .map_err(|source| RevselError::OrganizationListing {
                org: org.to_string(),
                source,
            });
        absorb(
            &mut candidates,
            members,
            "Unable to get member listing for org, skipping org member selection",
        )?;
    }

    let permissions = ctx
        .list_repository_collaborators()
        .map_err(|source| RevselError::CollaboratorListing {
            owner: ctx.repository_owner().to_string(),
            repo: ctx.repository_name().to_string(),
            source,
        })?;

    if rule.admins {
        candidates.add_all(permissions.with_permission(Permission::Admin));
    }
    if rule.write_collaborators {
        candidates.add_all(permissions.with_permission(Permission::Write));
    }

    Ok(ResolvedPool {
        candidates,
        permissions,
    })
}

/// Pick one element uniformly at random, or `None` for an empty set
fn choose_one<'a, R>(set: &'a BTreeSet<String>, rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    if set.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..set.len());
    set.iter().nth(index).map(String::as_str)
}

fn list_team<C>(ctx: &C, team_ref: &str) -> Result<Vec<String>>
where
    C: PullContext + ?Sized,
{
    let team = TeamRef::parse(team_ref)?;
    ctx.list_team_members(&team.org, &team.slug)
        .map_err(|source| RevselError::TeamListing {
            team: team.to_string(),
            source,
        })
}

/// Add listed members to the pool, or log and skip a non-fatal failure
fn absorb(
    candidates: &mut CandidatePool,
    listing: Result<Vec<String>>,
    message: &str,
) -> Result<()> {
    match listing {
        Ok(members) => candidates.add_all(members),
        Err(err) if !err.is_fatal() => warn_skipped(&err, message),
        Err(err) => return Err(err),
    }
    Ok(())
}

fn warn_skipped(err: &RevselError, message: &str) {
    let ex_err: ExError = err.clone().into();
    tracing::warn!(
        component = module_path!(),
        op = OP_RESOLVE,
        entity_id = ex_err.entity_id().unwrap_or_default(),
        err.kind = ?ex_err.kind(),
        err.code = ex_err.code(),
        error = %err,
        "{}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;
    use crate::errors::ExErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn directory() -> StaticDirectory {
        StaticDirectory::new("author", "acme", "widgets")
            .with_team("acme/core", ["t1", "t2"])
            .with_organization("acme", ["o1"])
            .with_collaborator("admin1", Permission::Admin)
            .with_collaborator("writer1", Permission::Write)
            .with_collaborator("reader1", Permission::Read)
    }

    #[test]
    fn test_explicit_users_seed_pool() {
        let rule = ReviewRequestRule::new(1).with_users(["u1", "u2"]);
        let mut rng = StdRng::seed_from_u64(7);

        let resolved = resolve_candidate_pool(&rule, &directory(), &mut rng).unwrap();

        assert_eq!(resolved.candidates.iter().collect::<Vec<_>>(), vec!["u1", "u2"]);
        assert_eq!(resolved.permissions.len(), 3);
    }

    #[test]
    fn test_admins_and_writers_match_exact_levels() {
        let rule = ReviewRequestRule::new(1)
            .with_admins()
            .with_write_collaborators();
        let mut rng = StdRng::seed_from_u64(7);

        let resolved = resolve_candidate_pool(&rule, &directory(), &mut rng).unwrap();

        assert!(resolved.candidates.contains("admin1"));
        assert!(resolved.candidates.contains("writer1"));
        assert!(!resolved.candidates.contains("reader1"));
    }

    #[test]
    fn test_malformed_team_is_skipped() {
        let rule = ReviewRequestRule::new(1)
            .with_users(["u1"])
            .with_teams(["no-slash"]);
        let mut rng = StdRng::seed_from_u64(7);

        let resolved = resolve_candidate_pool(&rule, &directory(), &mut rng).unwrap();

        assert_eq!(resolved.candidates.iter().collect::<Vec<_>>(), vec!["u1"]);
    }

    #[test]
    fn test_absorb_propagates_fatal_errors() {
        let mut pool = CandidatePool::new();
        let fatal = RevselError::SamplingExhausted {
            requested: 1,
            available: 2,
            attempts: 3,
        };

        let err = absorb(&mut pool, Err(fatal.clone()), "skipping").unwrap_err();

        assert_eq!(err, fatal);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_absorb_skips_listing_failures() {
        let mut pool = CandidatePool::new();
        let listing = Err(RevselError::TeamListing {
            team: "acme/core".to_string(),
            source: ExError::new(ExErrorKind::Timeout),
        });

        absorb(&mut pool, listing, "skipping").unwrap();
        absorb(&mut pool, Ok(vec!["a".to_string()]), "skipping").unwrap();

        assert_eq!(pool.iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_choose_one_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_one(&BTreeSet::new(), &mut rng), None);
    }
}

//! Reviewer selection for pending policy rules.
//!
//! Entry point for the review-request stage: walks the evaluation result,
//! then for every pending leaf resolves, filters and samples reviewers.
//!
//! # Logging
//! - `log_op_start!` at entry, carrying the run's `request_id`
//! - `log_op_end!` on success with the number of reviewers selected
//! - `log_op_error!` on failure
//! - DEBUG events per leaf, WARN events for skipped team/org listings
//!
//! # Failure semantics
//! All-or-nothing: if any leaf fails fatally, selections already made for
//! earlier leaves are dropped and only the error is returned.

use rand::Rng;
use revsel_core_types::RequestId;
use std::time::Instant;

use crate::candidate_resolver::resolve_candidate_pool;
use crate::directory::PullContext;
use crate::eligibility::filter_eligible;
use crate::errors::{Result, RevselError};
use crate::model::{ResultNode, ReviewRequestRule};
use crate::sampler::select_random_with_budget;
use crate::settings::SelectionSettings;
use crate::traversal::find_pending_leaves;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_FIND: &str = "find_random_requesters";

/// Pick reviewers for every pending leaf of `result` using default settings
///
/// # Returns
/// Selected identities, grouped by leaf in traversal order. The same
/// identity may appear under more than one leaf.
///
/// # Errors
///
/// - `RevselError::LeafSelectionFailed` wrapping `CollaboratorListing` or
///   `SamplingExhausted` for the first leaf that failed.
pub fn find_random_requesters<C, R>(
    result: &ResultNode,
    ctx: &C,
    rng: &mut R,
) -> Result<Vec<String>>
where
    C: PullContext + ?Sized,
    R: Rng + ?Sized,
{
    find_random_requesters_with(result, ctx, rng, &SelectionSettings::default())
}

/// Pick reviewers for every pending leaf of `result`
///
/// # Errors
///
/// See [`find_random_requesters`].
pub fn find_random_requesters_with<C, R>(
    result: &ResultNode,
    ctx: &C,
    rng: &mut R,
    settings: &SelectionSettings,
) -> Result<Vec<String>>
where
    C: PullContext + ?Sized,
    R: Rng + ?Sized,
{
    let request_id = RequestId::new();
    let repository = format!("{}/{}", ctx.repository_owner(), ctx.repository_name());
    log_op_start!(OP_FIND, request_id = %request_id, repository = %repository);
    let start = Instant::now();

    let reviewers = find_random_requesters_impl(result, ctx, rng, settings, &request_id)
        .map_err(|e| {
            log_op_error!(
                OP_FIND,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %request_id
            );
            e
        })?;

    log_op_end!(
        OP_FIND,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        selected_count = reviewers.len()
    );

    Ok(reviewers)
}

fn find_random_requesters_impl<C, R>(
    result: &ResultNode,
    ctx: &C,
    rng: &mut R,
    settings: &SelectionSettings,
    request_id: &RequestId,
) -> Result<Vec<String>>
where
    C: PullContext + ?Sized,
    R: Rng + ?Sized,
{
    settings.validate()?;

    let pending = find_pending_leaves(result);
    tracing::debug!(
        op = OP_FIND,
        request_id = %request_id,
        leaf_count = pending.len(),
        "Collecting reviewers for pending leaf nodes"
    );

    let mut requested = Vec::new();
    for (leaf_index, leaf) in pending.into_iter().enumerate() {
        let Some(rule) = leaf.review_request_rule.as_ref() else {
            tracing::debug!(
                op = OP_FIND,
                request_id = %request_id,
                leaf_index,
                rule_name = %leaf.name,
                "Pending leaf has no review request rule"
            );
            continue;
        };

        let selection = select_for_rule(rule, ctx, rng, settings).map_err(|source| {
            RevselError::LeafSelectionFailed {
                leaf_index,
                rule_name: leaf.name.clone(),
                source: Box::new(source),
            }
        })?;

        tracing::debug!(
            op = OP_FIND,
            request_id = %request_id,
            leaf_index,
            rule_name = %leaf.name,
            selected_count = selection.len(),
            "Selected reviewers for leaf"
        );
        requested.extend(selection);
    }

    Ok(requested)
}

/// Resolve, filter and sample reviewers for a single rule
///
/// # Errors
///
/// - `RevselError::CollaboratorListing` if collaborators cannot be listed.
/// - `RevselError::SamplingExhausted` if the random source keeps colliding.
pub fn select_for_rule<C, R>(
    rule: &ReviewRequestRule,
    ctx: &C,
    rng: &mut R,
    settings: &SelectionSettings,
) -> Result<Vec<String>>
where
    C: PullContext + ?Sized,
    R: Rng + ?Sized,
{
    let resolved = resolve_candidate_pool(rule, ctx, rng)?;
    let eligible = filter_eligible(&resolved.candidates, &resolved.permissions, ctx.author());

    tracing::debug!(
        op = OP_FIND,
        candidate_count = resolved.candidates.len(),
        eligible_count = eligible.len(),
        required_count = rule.required_count,
        "Found candidates after removing author and non-collaborators; randomly selecting some"
    );

    select_random_with_budget(rule.required_count, &eligible, rng, settings.retry_factor)
}

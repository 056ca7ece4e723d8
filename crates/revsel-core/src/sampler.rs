//! Uniform sampling of reviewers without replacement.

use rand::Rng;

use crate::errors::{Result, RevselError};

/// Default multiplier for the per-pick retry budget
pub const DEFAULT_RETRY_FACTOR: usize = 5;

/// Select `n` distinct candidates uniformly at random
///
/// Uses the default retry budget; see [`select_random_with_budget`].
///
/// # Errors
///
/// - `RevselError::SamplingExhausted` if the random source keeps colliding.
pub fn select_random<R>(n: usize, candidates: &[String], rng: &mut R) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
{
    select_random_with_budget(n, candidates, rng, DEFAULT_RETRY_FACTOR)
}

/// Select `n` distinct candidates uniformly at random with an explicit budget
///
/// - `n == 0` returns an empty list.
/// - `n >= candidates.len()` returns the whole list unchanged, in order.
/// - Otherwise indices are drawn uniformly from `[0, m)` and collisions are
///   redrawn. The budget is `retry_factor * n` collisions per pick: a pick
///   may see at most that many, and the next collision fails the call.
///
/// Since `m > n` on the drawing path, a fresh index always exists; running
/// out of budget means the random source is broken.
///
/// # Errors
///
/// - `RevselError::SamplingExhausted` if a pick exceeds its retry budget.
pub fn select_random_with_budget<R>(
    n: usize,
    candidates: &[String],
    rng: &mut R,
    retry_factor: usize,
) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
{
    if n == 0 {
        return Ok(Vec::new());
    }
    if n >= candidates.len() {
        return Ok(candidates.to_vec());
    }

    let budget = n.saturating_mul(retry_factor);
    let mut taken = vec![false; candidates.len()];
    let mut selections = Vec::with_capacity(n);
    let mut attempts = 0usize;

    while selections.len() < n {
        let mut collisions = 0usize;
        loop {
            attempts += 1;
            let index = rng.gen_range(0..candidates.len());
            if !taken[index] {
                taken[index] = true;
                selections.push(candidates[index].clone());
                break;
            }

            collisions += 1;
            if collisions > budget {
                return Err(RevselError::SamplingExhausted {
                    requested: n,
                    available: candidates.len(),
                    attempts,
                });
            }
        }
    }

    Ok(selections)
}

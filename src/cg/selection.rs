//! Candidate selection shared by every phase.
//!
//! Every remaining candidate is scored against the current solution, the
//! highest score wins, and ties are broken either by enumeration order or
//! uniformly at random from the solver's own stream.

use rand::Rng;

use super::types::{CgContext, CgProblem};

/// How [`select_best`] scores the pool and resolves ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Break ties uniformly at random instead of taking the first.
    pub random_tie_break: bool,
    /// Score the pool with rayon (requires the `parallel` feature).
    pub parallel: bool,
}

/// Picks the best candidate from `pool` and returns its position in `pool`.
///
/// Returns `None` only when `pool` is empty. NaN scores rank below every
/// other score; if the whole pool scores NaN, all of it is tied.
///
/// The random stream is drawn from only when more than one candidate shares
/// the best score and random tie-breaking is enabled.
pub fn select_best<P, R>(
    problem: &P,
    ctx: &CgContext,
    solution: &[P::Element],
    pool: &[&P::Element],
    policy: SelectionPolicy,
    rng: &mut R,
) -> Option<usize>
where
    P: CgProblem,
    R: Rng,
{
    if pool.is_empty() {
        return None;
    }

    let scores = score_pool(problem, ctx, solution, pool, policy.parallel);
    let best = scores
        .iter()
        .copied()
        .filter(|s| !s.is_nan())
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |b| b.max(s))));

    let ties: Vec<usize> = match best {
        Some(best) => scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == best)
            .map(|(i, _)| i)
            .collect(),
        None => (0..scores.len()).collect(),
    };

    if policy.random_tie_break && ties.len() > 1 {
        Some(ties[rng.random_range(0..ties.len())])
    } else {
        ties.first().copied()
    }
}

/// Scores every pool member, preserving pool order.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn score_pool<P: CgProblem>(
    problem: &P,
    ctx: &CgContext,
    solution: &[P::Element],
    pool: &[&P::Element],
    parallel: bool,
) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return pool
            .par_iter()
            .map(|candidate| problem.score(ctx, solution, candidate))
            .collect();
    }

    pool.iter()
        .map(|candidate| problem.score(ctx, solution, candidate))
        .collect()
}

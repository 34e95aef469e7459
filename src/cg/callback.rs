//! Closure-backed problem definition.
//!
//! [`CallbackProblem`] lets callers plug a feasibility predicate and a
//! scoring function into the solver without declaring a type, with an
//! opaque `data` payload passed through to both closures unmodified.

use std::fmt;
use std::hash::Hash;

use super::types::{CgContext, CgProblem};
use crate::error::{CgError, Result};

type FeasibilityFn<E, D> = dyn Fn(&D, &CgContext, &[E]) -> bool + Send + Sync;
type ScoreFn<E, D> = dyn Fn(&D, &CgContext, &[E], &E) -> f64 + Send + Sync;

/// A [`CgProblem`] made of two closures and a caller-owned payload.
///
/// # Examples
///
/// ```
/// use u_carousel::cg::{CallbackProblem, CarouselGreedy, CgConfig};
///
/// let problem = CallbackProblem::builder(4usize)
///     .feasibility(|k: &usize, _ctx, solution: &[u32]| solution.len() >= *k)
///     .score(|_k: &usize, _ctx, _solution: &[u32], _candidate: &u32| 1.0)
///     .build()
///     .unwrap();
///
/// let config = CgConfig::default().with_random_tie_break(false);
/// let mut solver = CarouselGreedy::new(problem, (1..=10).collect(), config).unwrap();
/// assert_eq!(solver.greedy_minimize(), vec![1, 2, 3, 4]);
/// ```
pub struct CallbackProblem<E, D = ()> {
    data: D,
    feasibility: Box<FeasibilityFn<E, D>>,
    score: Box<ScoreFn<E, D>>,
}

impl<E: 'static, D: 'static> CallbackProblem<E, D> {
    /// Starts building a problem around `data`.
    pub fn builder(data: D) -> CallbackProblemBuilder<E, D> {
        CallbackProblemBuilder {
            data,
            feasibility: None,
            score: None,
        }
    }
}

impl<E, D> CallbackProblem<E, D> {
    /// Returns the payload.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Consumes the problem, returning the payload.
    pub fn into_data(self) -> D {
        self.data
    }
}

impl<E, D: fmt::Debug> fmt::Debug for CallbackProblem<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProblem")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl<E, D> CgProblem for CallbackProblem<E, D>
where
    E: Clone + Eq + Hash + Send + Sync,
    D: Send + Sync,
{
    type Element = E;

    fn feasible(&self, ctx: &CgContext, solution: &[E]) -> bool {
        (self.feasibility)(&self.data, ctx, solution)
    }

    fn score(&self, ctx: &CgContext, solution: &[E], candidate: &E) -> f64 {
        (self.score)(&self.data, ctx, solution, candidate)
    }
}

/// Builder for [`CallbackProblem`].
pub struct CallbackProblemBuilder<E, D> {
    data: D,
    feasibility: Option<Box<FeasibilityFn<E, D>>>,
    score: Option<Box<ScoreFn<E, D>>>,
}

impl<E: 'static, D: 'static> CallbackProblemBuilder<E, D> {
    /// Sets the feasibility predicate.
    pub fn feasibility<F>(mut self, f: F) -> Self
    where
        F: Fn(&D, &CgContext, &[E]) -> bool + Send + Sync + 'static,
    {
        self.feasibility = Some(Box::new(f));
        self
    }

    /// Sets the scoring function. Higher scores are preferred.
    pub fn score<F>(mut self, f: F) -> Self
    where
        F: Fn(&D, &CgContext, &[E], &E) -> f64 + Send + Sync + 'static,
    {
        self.score = Some(Box::new(f));
        self
    }

    /// Finishes the problem.
    ///
    /// Fails with [`CgError::InvalidConfiguration`] if either callback was
    /// never supplied.
    pub fn build(self) -> Result<CallbackProblem<E, D>> {
        let feasibility = self.feasibility.ok_or_else(|| {
            CgError::InvalidConfiguration("feasibility callback is required".into())
        })?;
        let score = self
            .score
            .ok_or_else(|| CgError::InvalidConfiguration("score callback is required".into()))?;
        Ok(CallbackProblem {
            data: self.data,
            feasibility,
            score,
        })
    }
}

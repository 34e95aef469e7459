//! Core types and the problem trait for Carousel Greedy.

use std::hash::Hash;

/// Optimization direction of a run.
///
/// Selection always prefers the highest score regardless of direction;
/// the direction only decides how the phases grow the solution and which
/// of the greedy and carousel solutions is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemType {
    /// Look for the smallest feasible subset.
    Minimize,
    /// Look for the largest feasible subset.
    Maximize,
}

impl ProblemType {
    /// Returns `true` if a carousel solution of `carousel_len` elements
    /// should be preferred over a greedy solution of `greedy_len` elements.
    ///
    /// Minimization keeps the carousel solution on ties; maximization only
    /// takes it when strictly larger.
    pub fn prefers_carousel(self, carousel_len: usize, greedy_len: usize) -> bool {
        match self {
            ProblemType::Minimize => carousel_len <= greedy_len,
            ProblemType::Maximize => carousel_len > greedy_len,
        }
    }
}

/// Phase currently executing when a callback is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Construction,
    Removal,
    Iterative,
    Completion,
}

/// Read-only view of the solver handed to every callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgContext {
    /// Direction of the active run.
    pub problem_type: ProblemType,
    /// Phase issuing the call.
    pub phase: Phase,
    /// Iterative-phase rounds performed over the solver's lifetime.
    pub iteration: u64,
    /// Effective `alpha` of the active run.
    pub alpha: usize,
    /// Effective `beta` of the active run.
    pub beta: f64,
}

/// Defines a subset selection problem for Carousel Greedy.
///
/// The implementor is also the place to keep any problem data (graphs,
/// weights, caches) the callbacks need; the solver never inspects it.
///
/// Both methods must be deterministic in their inputs: identical solution
/// content must yield identical answers.
///
/// # Examples
///
/// ```
/// use u_carousel::cg::{CgContext, CgProblem};
///
/// /// Pick at least `k` numbers, preferring large ones.
/// struct AtLeastK { k: usize }
///
/// impl CgProblem for AtLeastK {
///     type Element = u32;
///
///     fn feasible(&self, _ctx: &CgContext, solution: &[u32]) -> bool {
///         solution.len() >= self.k
///     }
///
///     fn score(&self, _ctx: &CgContext, _solution: &[u32], candidate: &u32) -> f64 {
///         *candidate as f64
///     }
/// }
/// ```
pub trait CgProblem: Send + Sync {
    /// Candidate element type. Only equality matters to the solver.
    type Element: Clone + Eq + Hash + Send + Sync;

    /// Returns `true` if `solution` satisfies the problem's constraints.
    ///
    /// In maximize mode this is also called on tentative solutions that
    /// end with a not-yet-confirmed candidate.
    fn feasible(&self, ctx: &CgContext, solution: &[Self::Element]) -> bool;

    /// Greedy desirability of appending `candidate` to `solution`.
    ///
    /// Higher is better in both directions.
    fn score(&self, ctx: &CgContext, solution: &[Self::Element], candidate: &Self::Element)
        -> f64;
}

//! Carousel Greedy execution engine.
//!
//! # Algorithm
//!
//! 1. Construction: plain greedy build of an initial solution
//! 2. Removal: drop the most recently added `floor(beta * |S|)` elements
//! 3. Iterative: `alpha * |greedy|` rounds, each evicting the oldest
//!    element and appending the best-scoring remaining candidate
//! 4. Completion: repair feasibility (minimize) or extend while feasible
//!    (maximize)
//!
//! The better of the greedy and carousel solutions is returned, so a run
//! never does worse than plain greedy.
//!
//! # Reference
//!
//! Cerrone, Cerulli & Golden (2017), "Carousel greedy: A generalized greedy
//! algorithm with applications in optimization", *Computers & Operations
//! Research* 85, 97-112.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::config::{CgConfig, CgOverrides};
use super::selection::{select_best, SelectionPolicy};
use super::types::{CgContext, CgProblem, Phase, ProblemType};
use crate::error::{CgError, Result};

/// Result of a full Carousel Greedy run.
#[derive(Debug, Clone, PartialEq)]
pub struct CgResult<E> {
    /// The returned solution: the better of `greedy` and `carousel`.
    pub best: Vec<E>,
    /// Solution after the construction phase alone.
    pub greedy: Vec<E>,
    /// Solution after the completion phase.
    pub carousel: Vec<E>,
    /// Direction of the run.
    pub problem_type: ProblemType,
    /// Iterative-phase rounds performed in this run.
    pub rounds: usize,
    /// Whether `best` is the carousel solution.
    pub from_carousel: bool,
}

/// Mutable state of a single run.
///
/// Holds the ordered solution (oldest element first), a membership index
/// over the candidate universe, and the effective configuration of the run.
/// Obtained from [`CarouselGreedy::start_run`] and threaded through the
/// phase methods.
#[derive(Debug, Clone)]
pub struct RunState<E> {
    problem_type: ProblemType,
    config: CgConfig,
    // Callbacks take the solution as a slice, so it stays a `Vec`; evicting
    // its front shifts at most one solution's worth of elements per round.
    solution: Vec<E>,
    indices: VecDeque<usize>,
    in_solution: Vec<bool>,
}

impl<E: Clone> RunState<E> {
    fn new(problem_type: ProblemType, config: CgConfig, universe: usize) -> Self {
        Self {
            problem_type,
            config,
            solution: Vec::new(),
            indices: VecDeque::new(),
            in_solution: vec![false; universe],
        }
    }

    /// Direction of this run.
    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    /// Effective configuration, overrides included.
    pub fn config(&self) -> &CgConfig {
        &self.config
    }

    /// Current solution, oldest element first.
    pub fn solution(&self) -> &[E] {
        &self.solution
    }

    /// Number of elements in the solution.
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    /// Returns `true` if the solution has no elements.
    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// Consumes the state, returning the solution.
    pub fn into_solution(self) -> Vec<E> {
        self.solution
    }

    fn push(&mut self, index: usize, element: E) {
        debug_assert!(!self.in_solution[index]);
        self.in_solution[index] = true;
        self.indices.push_back(index);
        self.solution.push(element);
    }

    fn pop_oldest(&mut self) -> Option<E> {
        let index = self.indices.pop_front()?;
        self.in_solution[index] = false;
        Some(self.solution.remove(0))
    }

    fn remove_newest(&mut self, count: usize) -> Vec<E> {
        let keep = self.solution.len().saturating_sub(count);
        for &index in self.indices.range(keep..) {
            self.in_solution[index] = false;
        }
        self.indices.truncate(keep);
        self.solution.split_off(keep)
    }

    /// Candidate indices not in the solution, in enumeration order.
    fn remaining(&self) -> Vec<usize> {
        self.in_solution
            .iter()
            .enumerate()
            .filter(|&(_, &taken)| !taken)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Carousel Greedy solver.
///
/// Owns the problem, the candidate universe, the configuration and a
/// private random stream used only for tie-breaking. The stream is seeded
/// once at construction, so two solvers built the same way produce the
/// same sequence of results.
///
/// # Examples
///
/// ```
/// use u_carousel::cg::{CarouselGreedy, CgConfig, CgContext, CgProblem};
///
/// /// Cover every edge of a path 0-1-2-3-4.
/// struct PathCover;
///
/// const EDGES: [(u8, u8); 4] = [(0, 1), (1, 2), (2, 3), (3, 4)];
///
/// impl CgProblem for PathCover {
///     type Element = u8;
///
///     fn feasible(&self, _ctx: &CgContext, s: &[u8]) -> bool {
///         EDGES.iter().all(|(u, v)| s.contains(u) || s.contains(v))
///     }
///
///     fn score(&self, _ctx: &CgContext, s: &[u8], c: &u8) -> f64 {
///         EDGES
///             .iter()
///             .filter(|(u, v)| (u == c || v == c) && !s.contains(u) && !s.contains(v))
///             .count() as f64
///     }
/// }
///
/// let config = CgConfig::default().with_alpha(2).with_seed(1);
/// let mut solver = CarouselGreedy::new(PathCover, (0..5).collect(), config).unwrap();
/// let result = solver.minimize();
/// assert!(result.best.len() <= result.greedy.len());
/// ```
pub struct CarouselGreedy<P: CgProblem> {
    problem: P,
    candidates: Vec<P::Element>,
    config: CgConfig,
    rng: StdRng,
    iterations: u64,
    greedy_solution: Vec<P::Element>,
    cg_solution: Vec<P::Element>,
}

impl<P> fmt::Debug for CarouselGreedy<P>
where
    P: CgProblem + fmt::Debug,
    P::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselGreedy")
            .field("problem", &self.problem)
            .field("candidates", &self.candidates)
            .field("config", &self.config)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl<P: CgProblem> CarouselGreedy<P> {
    /// Creates a solver over `candidates`.
    ///
    /// Repeated candidates are collapsed, keeping the first occurrence, so
    /// the enumeration order used for tie-breaking is the order of first
    /// appearance.
    ///
    /// # Errors
    ///
    /// [`CgError::InvalidConfiguration`] if `config` is invalid or
    /// `candidates` is empty.
    pub fn new(problem: P, candidates: Vec<P::Element>, config: CgConfig) -> Result<Self> {
        config.validate()?;
        if candidates.is_empty() {
            return Err(CgError::InvalidConfiguration(
                "candidate set must not be empty".into(),
            ));
        }

        let given = candidates.len();
        let mut seen = HashSet::with_capacity(given);
        let candidates: Vec<P::Element> = candidates
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        if candidates.len() < given {
            debug!(
                event = "duplicates_collapsed",
                given,
                kept = candidates.len(),
            );
        }

        Ok(Self {
            problem,
            candidates,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            iterations: 0,
            greedy_solution: Vec::new(),
            cg_solution: Vec::new(),
        })
    }

    /// The problem definition.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The candidate universe, in enumeration order.
    pub fn candidates(&self) -> &[P::Element] {
        &self.candidates
    }

    /// The stored configuration.
    pub fn config(&self) -> &CgConfig {
        &self.config
    }

    /// Iterative-phase rounds performed over this solver's lifetime.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Greedy solution of the most recent run.
    pub fn greedy_solution(&self) -> &[P::Element] {
        &self.greedy_solution
    }

    /// Carousel solution of the most recent full run.
    pub fn cg_solution(&self) -> &[P::Element] {
        &self.cg_solution
    }

    /// Starts a run with the stored configuration.
    pub fn start_run(&self, problem_type: ProblemType) -> RunState<P::Element> {
        RunState::new(problem_type, self.config.clone(), self.candidates.len())
    }

    /// Starts a run with `overrides` applied to a copy of the configuration.
    pub fn start_run_with(
        &self,
        problem_type: ProblemType,
        overrides: &CgOverrides,
    ) -> Result<RunState<P::Element>> {
        let config = self.config.overridden(overrides)?;
        Ok(RunState::new(problem_type, config, self.candidates.len()))
    }

    // ------------------------------------------------------------------
    // Phases
    // ------------------------------------------------------------------

    /// Builds a solution greedily.
    ///
    /// Minimize appends the best candidate until the solution is feasible.
    /// Maximize appends until no candidates remain. Both stop early when the
    /// pool runs dry, possibly leaving an infeasible solution.
    pub fn construction_phase(&mut self, state: &mut RunState<P::Element>) {
        debug!(
            event = "phase_start",
            phase = "construction",
            problem_type = ?state.problem_type,
        );

        loop {
            if state.problem_type == ProblemType::Minimize
                && self.is_feasible(state, Phase::Construction)
            {
                break;
            }
            let remaining = state.remaining();
            let Some(index) = self.select(state, Phase::Construction, &remaining) else {
                break;
            };
            state.push(index, self.candidates[index].clone());
        }

        debug!(event = "phase_end", phase = "construction", size = state.len());
    }

    /// Removes the most recently added `floor(beta * |S|)` elements.
    ///
    /// At least two elements survive (or all of them, if there are fewer
    /// than two). Returns the removed elements, oldest first.
    pub fn removal_phase(&self, state: &mut RunState<P::Element>) -> Vec<P::Element> {
        let size = state.len();
        let to_remove = removal_count(size, state.config.beta);
        let removed = state.remove_newest(to_remove);

        debug!(
            event = "phase_end",
            phase = "removal",
            before = size,
            removed = removed.len(),
            size = state.len(),
        );
        removed
    }

    /// Runs up to `iterations` carousel rounds and returns how many ran.
    ///
    /// Each round evicts the oldest element and selects the best remaining
    /// candidate. Minimize always appends it; maximize appends it only if
    /// the result stays feasible, otherwise the solution shrinks by one.
    pub fn iterative_phase(
        &mut self,
        state: &mut RunState<P::Element>,
        iterations: usize,
    ) -> usize {
        debug!(event = "phase_start", phase = "iterative", budget = iterations);

        let mut rounds = 0;
        while rounds < iterations {
            rounds += 1;
            self.iterations += 1;

            state.pop_oldest();
            let remaining = state.remaining();
            let Some(index) = self.select(state, Phase::Iterative, &remaining) else {
                break;
            };

            match state.problem_type {
                ProblemType::Minimize => state.push(index, self.candidates[index].clone()),
                ProblemType::Maximize => {
                    if self.is_feasible_with(state, Phase::Iterative, index) {
                        state.push(index, self.candidates[index].clone());
                    }
                }
            }
        }

        debug!(
            event = "phase_end",
            phase = "iterative",
            rounds,
            size = state.len(),
        );
        rounds
    }

    /// Repairs the solution.
    ///
    /// Minimize appends the best candidate until feasible. Maximize appends
    /// the best candidate among those that keep the solution feasible until
    /// none does. Either way the loop ends when the pool is exhausted.
    pub fn completion_phase(&mut self, state: &mut RunState<P::Element>) {
        debug!(event = "phase_start", phase = "completion", size = state.len());

        loop {
            let pool = match state.problem_type {
                ProblemType::Minimize => {
                    if self.is_feasible(state, Phase::Completion) {
                        break;
                    }
                    state.remaining()
                }
                ProblemType::Maximize => {
                    let mut feasible = Vec::new();
                    for index in state.remaining() {
                        if self.is_feasible_with(state, Phase::Completion, index) {
                            feasible.push(index);
                        }
                    }
                    feasible
                }
            };
            let Some(index) = self.select(state, Phase::Completion, &pool) else {
                break;
            };
            state.push(index, self.candidates[index].clone());
        }

        debug!(event = "phase_end", phase = "completion", size = state.len());
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// Plain greedy minimization (construction phase only).
    pub fn greedy_minimize(&mut self) -> Vec<P::Element> {
        let state = self.start_run(ProblemType::Minimize);
        self.greedy(state)
    }

    /// Plain greedy maximization (construction phase only).
    pub fn greedy_maximize(&mut self) -> Vec<P::Element> {
        let state = self.start_run(ProblemType::Maximize);
        self.greedy(state)
    }

    /// Runs Carousel Greedy looking for a small feasible subset.
    pub fn minimize(&mut self) -> CgResult<P::Element> {
        let state = self.start_run(ProblemType::Minimize);
        self.run(state)
    }

    /// Runs Carousel Greedy looking for a large feasible subset.
    pub fn maximize(&mut self) -> CgResult<P::Element> {
        let state = self.start_run(ProblemType::Maximize);
        self.run(state)
    }

    /// [`minimize`](Self::minimize) with per-call `alpha`/`beta` overrides.
    ///
    /// The stored configuration is not modified.
    pub fn minimize_with(&mut self, overrides: &CgOverrides) -> Result<CgResult<P::Element>> {
        let state = self.start_run_with(ProblemType::Minimize, overrides)?;
        Ok(self.run(state))
    }

    /// [`maximize`](Self::maximize) with per-call `alpha`/`beta` overrides.
    ///
    /// The stored configuration is not modified.
    pub fn maximize_with(&mut self, overrides: &CgOverrides) -> Result<CgResult<P::Element>> {
        let state = self.start_run_with(ProblemType::Maximize, overrides)?;
        Ok(self.run(state))
    }

    fn greedy(&mut self, mut state: RunState<P::Element>) -> Vec<P::Element> {
        self.construction_phase(&mut state);
        self.greedy_solution = state.into_solution();
        self.greedy_solution.clone()
    }

    fn run(&mut self, mut state: RunState<P::Element>) -> CgResult<P::Element> {
        let problem_type = state.problem_type;

        self.construction_phase(&mut state);
        let greedy = state.solution.clone();
        self.greedy_solution = greedy.clone();

        self.removal_phase(&mut state);
        let budget = state.config.alpha.saturating_mul(greedy.len());
        let rounds = self.iterative_phase(&mut state, budget);
        self.completion_phase(&mut state);

        let carousel = state.into_solution();
        self.cg_solution = carousel.clone();

        let from_carousel = problem_type.prefers_carousel(carousel.len(), greedy.len());
        let best = if from_carousel {
            carousel.clone()
        } else {
            greedy.clone()
        };

        info!(
            event = "run_end",
            problem_type = ?problem_type,
            greedy_size = greedy.len(),
            carousel_size = carousel.len(),
            rounds,
            from_carousel,
        );

        CgResult {
            best,
            greedy,
            carousel,
            problem_type,
            rounds,
            from_carousel,
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn context(&self, state: &RunState<P::Element>, phase: Phase) -> CgContext {
        CgContext {
            problem_type: state.problem_type,
            phase,
            iteration: self.iterations,
            alpha: state.config.alpha,
            beta: state.config.beta,
        }
    }

    fn is_feasible(&self, state: &RunState<P::Element>, phase: Phase) -> bool {
        let ctx = self.context(state, phase);
        self.problem.feasible(&ctx, &state.solution)
    }

    /// Feasibility of the solution with candidate `index` tentatively appended.
    fn is_feasible_with(
        &self,
        state: &mut RunState<P::Element>,
        phase: Phase,
        index: usize,
    ) -> bool {
        let ctx = self.context(state, phase);
        state.solution.push(self.candidates[index].clone());
        let feasible = self.problem.feasible(&ctx, &state.solution);
        state.solution.pop();
        feasible
    }

    /// Selects from `pool` (candidate indices) and returns the chosen index.
    fn select(
        &mut self,
        state: &RunState<P::Element>,
        phase: Phase,
        pool: &[usize],
    ) -> Option<usize> {
        let ctx = self.context(state, phase);
        let policy = SelectionPolicy {
            random_tie_break: state.config.random_tie_break,
            parallel: state.config.parallel,
        };
        let refs: Vec<&P::Element> = pool.iter().map(|&i| &self.candidates[i]).collect();
        let position = select_best(
            &self.problem,
            &ctx,
            &state.solution,
            &refs,
            policy,
            &mut self.rng,
        )?;

        let index = pool[position];
        trace!(event = "select", phase = ?phase, candidate = index, pool = pool.len());
        Some(index)
    }
}

/// Number of trailing elements the removal phase drops from `size`.
fn removal_count(size: usize, beta: f64) -> usize {
    let raw = (size as f64 * beta).floor() as usize;
    raw.min(size.saturating_sub(2))
}

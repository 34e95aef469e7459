//! Domain-agnostic Carousel Greedy optimization.
//!
//! Carousel Greedy extends a plain greedy constructor with partial
//! destruction and a rotating refinement loop, so that poorly informed
//! early choices get a chance to be revisited:
//!
//! - **Construction**: greedy build from scratch.
//! - **Removal**: drop a trailing fraction (β) of the constructed solution.
//! - **Iterative**: α × |greedy| rounds retiring the oldest choice and
//!   greedily picking a replacement.
//! - **Completion**: restore feasibility (minimize) or extend while
//!   feasible (maximize).
//!
//! # Architecture
//!
//! The crate contains no domain concepts. Callers describe a subset
//! selection problem through [`cg::CgProblem`] (or closures via
//! [`cg::CallbackProblem`]): a feasibility predicate over a candidate
//! subset and a greedy score for adding one more candidate. Vertex cover,
//! set cover, independent set and similar problems are all defined by
//! consumers.
//!
//! # Example
//!
//! ```
//! use u_carousel::cg::{CallbackProblem, CarouselGreedy, CgConfig};
//!
//! // Choose at least three even numbers, preferring small ones.
//! let problem = CallbackProblem::builder(())
//!     .feasibility(|_, _, s: &[i32]| s.iter().filter(|&&x| x % 2 == 0).count() >= 3)
//!     .score(|_, _, _, &c: &i32| if c % 2 == 0 { -(c as f64) } else { f64::NEG_INFINITY })
//!     .build()?;
//!
//! let mut solver = CarouselGreedy::new(problem, (1..=20).collect(), CgConfig::default())?;
//! let result = solver.minimize();
//! assert_eq!(result.best.len(), 3);
//! # Ok::<(), u_carousel::CgError>(())
//! ```

pub mod cg;
mod error;

pub use error::{CgError, Result};

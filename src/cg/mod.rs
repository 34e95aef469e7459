//! Carousel Greedy (CG).
//!
//! A generalized greedy algorithm that constructs a solution, removes its
//! most recent choices, then repeatedly retires the oldest choice and lets
//! the greedy rule pick a replacement before completing the solution. The
//! caller supplies only a feasibility predicate and a scoring function.
//!
//! # References
//!
//! Cerrone, C., Cerulli, R., & Golden, B. (2017). "Carousel greedy: A
//! generalized greedy algorithm with applications in optimization",
//! *Computers & Operations Research* 85, 97-112.

mod callback;
mod config;
mod runner;
mod selection;
mod types;

pub use callback::{CallbackProblem, CallbackProblemBuilder};
pub use config::{CgConfig, CgOverrides};
pub use runner::{CarouselGreedy, CgResult, RunState};
pub use selection::{select_best, SelectionPolicy};
pub use types::{CgContext, CgProblem, Phase, ProblemType};

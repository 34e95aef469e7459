//! Error types for u-carousel.

use thiserror::Error;

/// Errors raised while configuring a Carousel Greedy solver.
///
/// Running out of candidates during a phase is not an error; every phase
/// terminates early and keeps whatever solution it has built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CgError {
    /// A parameter, override, candidate universe or callback is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for u-carousel operations.
pub type Result<T> = std::result::Result<T, CgError>;

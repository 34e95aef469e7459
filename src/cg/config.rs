//! Carousel Greedy configuration.

use crate::error::{CgError, Result};

/// Configuration for the Carousel Greedy algorithm.
///
/// # Parameters
///
/// - `alpha` (α): the iterative phase runs `alpha × |greedy solution|`
///   rounds. Cerrone et al. report α in 5–20 as a robust range.
/// - `beta` (β): fraction of the constructed solution removed from its
///   tail before the iterative phase, in [0, 1].
///
/// # References
///
/// Cerrone, Cerulli & Golden (2017), "Carousel greedy: A generalized greedy
/// algorithm with applications in optimization", *Computers & Operations
/// Research* 85, 97-112.
///
/// # Examples
///
/// ```
/// use u_carousel::cg::CgConfig;
///
/// let config = CgConfig::default()
///     .with_alpha(5)
///     .with_beta(0.3)
///     .with_random_tie_break(false)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.alpha, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CgConfig {
    /// Iterative phase length multiplier. Must be positive.
    pub alpha: usize,

    /// Destruction fraction, in [0, 1].
    pub beta: f64,

    /// Whether ties among equally scored candidates are broken uniformly
    /// at random. When `false` the first candidate in enumeration order wins.
    pub random_tie_break: bool,

    /// Seed for the solver's private random stream.
    pub seed: u64,

    /// Whether candidates are scored in parallel using rayon.
    ///
    /// Only has an effect when the `parallel` feature is enabled. Scores are
    /// always gathered in candidate order, so results do not depend on it.
    pub parallel: bool,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            alpha: 10,
            beta: 0.2,
            random_tie_break: true,
            seed: 42,
            parallel: false,
        }
    }
}

impl CgConfig {
    /// Sets the iterative phase multiplier.
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the destruction fraction.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Enables or disables random tie-breaking.
    pub fn with_random_tie_break(mut self, enabled: bool) -> Self {
        self.random_tie_break = enabled;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        validate_beta(self.beta)
    }

    /// Returns a copy of this configuration with `overrides` applied.
    ///
    /// The receiver is left untouched, so the stored configuration is in
    /// effect again as soon as the overridden run returns.
    pub fn overridden(&self, overrides: &CgOverrides) -> Result<CgConfig> {
        let mut config = self.clone();
        if let Some(alpha) = overrides.alpha {
            validate_alpha(alpha)?;
            config.alpha = alpha;
        }
        if let Some(beta) = overrides.beta {
            validate_beta(beta)?;
            config.beta = beta;
        }
        Ok(config)
    }
}

/// Per-call overrides for [`CgConfig::alpha`] and [`CgConfig::beta`].
///
/// # Examples
///
/// ```
/// use u_carousel::cg::{CgConfig, CgOverrides};
///
/// let base = CgConfig::default();
/// let run = base.overridden(&CgOverrides::default().with_alpha(3)).unwrap();
/// assert_eq!(run.alpha, 3);
/// assert_eq!(base.alpha, 10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CgOverrides {
    /// Replacement for `alpha`, if any.
    pub alpha: Option<usize>,
    /// Replacement for `beta`, if any.
    pub beta: Option<f64>,
}

impl CgOverrides {
    /// Overrides `alpha` for one run.
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Overrides `beta` for one run.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }
}

fn validate_alpha(alpha: usize) -> Result<()> {
    if alpha == 0 {
        return Err(CgError::InvalidConfiguration(
            "alpha must be a positive integer".into(),
        ));
    }
    Ok(())
}

fn validate_beta(beta: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&beta) {
        return Err(CgError::InvalidConfiguration(format!(
            "beta must be in [0, 1], got {beta}"
        )));
    }
    Ok(())
}

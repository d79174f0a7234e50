//! Run configuration.
//!
//! All physical parameters and sampling controls are passed to
//! [`crate::simulate`] through one [`SimulationConfig`]; nothing is read from
//! globals.

use crate::error::{PressureDropError, Result};
use crate::poiseuille::PressureDropModel;
use crate::quantity::{FluidProperties, PipeGeometry, QuantityRules};

/// Trials drawn when no count is given. Well above the 10 000 needed for
/// stable tail quantiles.
pub const DEFAULT_TRIALS: usize = 100_000;

/// Central interval reported alongside the mean.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// How the Monte Carlo trial set is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Number of independent trials.
    pub trials: usize,
    /// Seed for a reproducible run; `None` draws from the thread-local RNG.
    pub seed: Option<u64>,
    /// Split trials across rayon workers (needs the `parallel` feature).
    pub parallel: bool,
    /// Confidence level of the reported interval, in (0, 1).
    pub confidence: f64,
}

impl SamplingConfig {
    /// A seeded configuration with the given trial count.
    #[must_use]
    pub fn seeded(trials: usize, seed: u64) -> Self {
        Self {
            trials,
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// # Errors
    /// Rejects a zero trial count and a confidence level outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(PressureDropError::invalid_sample_count(
                self.trials,
                "must be greater than zero",
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(PressureDropError::invalid_confidence(self.confidence));
        }
        Ok(())
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: cfg!(feature = "parallel"),
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Everything one evaluation needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationConfig {
    pub fluid: FluidProperties,
    pub pipe: PipeGeometry,
    pub rules: QuantityRules,
    pub sampling: SamplingConfig,
}

impl SimulationConfig {
    /// The physical model described by this configuration.
    #[must_use]
    pub fn model(&self) -> PressureDropModel {
        PressureDropModel::with_rules(self.fluid, self.pipe, self.rules)
    }
}

//! Result reporting: one human-readable line on stdout, everything else as
//! structured log events.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::poiseuille::UncertaintyBudget;
use crate::statistics::SampleSummary;
use std::fmt;

/// The outcome of one pressure-drop evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureDropReport {
    /// Monte Carlo summary of the pressure drop (Pa).
    pub summary: SampleSummary,
    /// Pressure drop at the nominal inputs (Pa).
    pub nominal: f64,
    /// Linearized relative uncertainty per input.
    pub budget: UncertaintyBudget,
}

impl PressureDropReport {
    /// The reported pressure drop: the Monte Carlo mean (Pa).
    #[must_use]
    pub fn pressure_drop(&self) -> f64 {
        self.summary.mean
    }

    /// Emits the full summary as `tracing` events.
    pub fn log(&self) {
        let (lower, upper) = self.summary.interval;
        tracing::info!(
            trials = self.summary.trials,
            mean = self.summary.mean,
            std_dev = self.summary.std_dev,
            median = self.summary.median,
            min = self.summary.min,
            max = self.summary.max,
            confidence = self.summary.confidence,
            lower,
            upper,
            nominal = self.nominal,
            "pressure drop (Pa)"
        );
        for (input, relative) in self.budget.contributions() {
            tracing::debug!(input = input.name(), relative, "uncertainty contribution");
        }
        tracing::info!(
            dominant = self.budget.dominant().name(),
            combined = self.budget.combined(),
            "linearized relative uncertainty"
        );
    }
}

impl fmt::Display for PressureDropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pressure difference is given by: {:.6} Pa",
            self.pressure_drop()
        )
    }
}

/// Evaluates the pressure drop described by `config`.
///
/// Builds the input distributions, propagates them through the formula, draws
/// `config.sampling.trials` trials and summarizes them.
///
/// # Errors
/// Any invalid physical or sampling parameter.
///
/// # Example
/// ```rust
/// use poiseuille_uncertain::{SamplingConfig, SimulationConfig, simulate};
///
/// let config = SimulationConfig {
///     sampling: SamplingConfig::seeded(10_000, 42),
///     ..SimulationConfig::default()
/// };
/// let report = simulate(&config).unwrap();
/// assert!((report.pressure_drop() - report.nominal).abs() / report.nominal < 0.01);
/// ```
pub fn simulate(config: &SimulationConfig) -> Result<PressureDropReport> {
    let model = config.model();

    let pressure_drop = model.pressure_drop()?;
    let summary = pressure_drop.summarize(&config.sampling)?;

    let report = PressureDropReport {
        summary,
        nominal: model.nominal(),
        budget: model.uncertainty_budget(),
    };
    report.log();
    Ok(report)
}

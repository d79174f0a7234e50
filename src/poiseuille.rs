//! Hagen–Poiseuille pressure drop for laminar flow in a cylindrical pipe:
//!
//! ```text
//! Δp = 8 · π · μ · L · Q / A²
//! ```
//!
//! with μ the dynamic viscosity (Pa·s), L the pipe length (m), Q the
//! volumetric flow rate (m³/s) and A the cross-sectional area (m²). The model
//! holds for laminar flow in a long pipe; laminarity is assumed, not checked.

use crate::Uncertain;
use crate::error::{PressureDropError, Result};
use crate::quantity::{
    DistributionShape, FluidProperties, Measurement, PipeGeometry, QuantityRules,
};
use std::f64::consts::PI;
use std::fmt;

/// Pressure drop on plain values (Pa).
#[must_use]
pub fn nominal_pressure_drop(
    viscosity: f64,
    length: f64,
    flow_rate: f64,
    cross_section: f64,
) -> f64 {
    8.0 * PI * viscosity * length * flow_rate / (cross_section * cross_section)
}

/// Pressure drop on uncertain values (Pa).
///
/// The inputs are independent; `cross_section` is squared as `A * A` over a
/// single draw per trial, so the result is the pushforward of the four input
/// distributions through the formula.
#[must_use]
pub fn pressure_drop(
    viscosity: Uncertain<f64>,
    length: Uncertain<f64>,
    flow_rate: Uncertain<f64>,
    cross_section: Uncertain<f64>,
) -> Uncertain<f64> {
    8.0 * PI * viscosity * length * flow_rate / (cross_section.clone() * cross_section)
}

/// One input of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeFlowInput {
    Viscosity,
    Length,
    FlowRate,
    CrossSection,
}

impl PipeFlowInput {
    pub const ALL: [PipeFlowInput; 4] = [
        PipeFlowInput::Viscosity,
        PipeFlowInput::Length,
        PipeFlowInput::FlowRate,
        PipeFlowInput::CrossSection,
    ];

    /// Exponent of the input in the formula; `A` appears as `A^-2`.
    #[must_use]
    pub fn exponent(self) -> f64 {
        match self {
            PipeFlowInput::CrossSection => -2.0,
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PipeFlowInput::Viscosity => "viscosity",
            PipeFlowInput::Length => "length",
            PipeFlowInput::FlowRate => "flow_rate",
            PipeFlowInput::CrossSection => "cross_section",
        }
    }
}

impl fmt::Display for PipeFlowInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four input distributions, one per formula term.
#[derive(Clone)]
pub struct PipeFlowInputs {
    pub viscosity: Uncertain<f64>,
    pub length: Uncertain<f64>,
    pub flow_rate: Uncertain<f64>,
    pub cross_section: Uncertain<f64>,
}

impl PipeFlowInputs {
    /// Combines the inputs into the pressure-drop distribution.
    #[must_use]
    pub fn pressure_drop(self) -> Uncertain<f64> {
        pressure_drop(self.viscosity, self.length, self.flow_rate, self.cross_section)
    }
}

/// First-order (linearized) relative standard uncertainty of the pressure
/// drop, broken down by input.
///
/// For a product of powers, each input contributes
/// `|exponent| · σᵢ / meanᵢ`, and the contributions add in quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBudget {
    contributions: [(PipeFlowInput, f64); 4],
}

impl UncertaintyBudget {
    /// Relative contribution of one input.
    #[must_use]
    pub fn contribution(&self, input: PipeFlowInput) -> f64 {
        self.contributions
            .iter()
            .find(|(candidate, _)| *candidate == input)
            .map_or(0.0, |(_, value)| *value)
    }

    /// All contributions, in [`PipeFlowInput::ALL`] order.
    #[must_use]
    pub fn contributions(&self) -> &[(PipeFlowInput, f64)] {
        &self.contributions
    }

    /// Combined relative standard uncertainty.
    #[must_use]
    pub fn combined(&self) -> f64 {
        self.contributions
            .iter()
            .map(|(_, value)| value * value)
            .sum::<f64>()
            .sqrt()
    }

    /// The input with the largest contribution.
    #[must_use]
    pub fn dominant(&self) -> PipeFlowInput {
        self.contributions
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(PipeFlowInput::Viscosity, |(input, _)| *input)
    }
}

/// The physical system: fluid, pipe and the shape rules for their inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureDropModel {
    fluid: FluidProperties,
    pipe: PipeGeometry,
    rules: QuantityRules,
}

impl PressureDropModel {
    /// A model with the default shape rules.
    #[must_use]
    pub fn new(fluid: FluidProperties, pipe: PipeGeometry) -> Self {
        Self::with_rules(fluid, pipe, QuantityRules::default())
    }

    #[must_use]
    pub fn with_rules(fluid: FluidProperties, pipe: PipeGeometry, rules: QuantityRules) -> Self {
        Self { fluid, pipe, rules }
    }

    #[must_use]
    pub fn fluid(&self) -> &FluidProperties {
        &self.fluid
    }

    #[must_use]
    pub fn pipe(&self) -> &PipeGeometry {
        &self.pipe
    }

    #[must_use]
    pub fn rules(&self) -> &QuantityRules {
        &self.rules
    }

    fn measurement(&self, input: PipeFlowInput) -> (Measurement, DistributionShape) {
        match input {
            PipeFlowInput::Viscosity => (self.fluid.viscosity(), self.rules.viscosity),
            PipeFlowInput::Length => (self.pipe.length(), self.rules.length),
            PipeFlowInput::FlowRate => (self.fluid.flow_rate(), self.rules.flow_rate),
            PipeFlowInput::CrossSection => (self.pipe.cross_section(), self.rules.cross_section),
        }
    }

    /// Checks the non-negativity of every parameter and that the
    /// cross-section cannot reach zero.
    ///
    /// # Errors
    /// [`PressureDropError::DegenerateDivision`] when the cross-section
    /// support touches zero; otherwise the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.fluid.validate()?;
        self.pipe.validate()?;

        let (area, shape) = self.measurement(PipeFlowInput::CrossSection);
        let (lower, _) = shape.support(area);
        if area.mean <= 0.0 || (shape == DistributionShape::BoundedUniform && lower <= 0.0) {
            return Err(PressureDropError::degenerate_division(area.mean, area.uncertainty));
        }
        Ok(())
    }

    /// Materializes one distribution per input.
    ///
    /// # Errors
    /// Any error from [`Self::validate`] or from building a distribution.
    pub fn inputs(&self) -> Result<PipeFlowInputs> {
        self.validate()?;

        let build = |input: PipeFlowInput| {
            let (measurement, shape) = self.measurement(input);
            tracing::debug!(
                input = input.name(),
                ?shape,
                mean = measurement.mean,
                uncertainty = measurement.uncertainty,
                "materializing input distribution"
            );
            shape.materialize(measurement)
        };

        Ok(PipeFlowInputs {
            viscosity: build(PipeFlowInput::Viscosity)?,
            length: build(PipeFlowInput::Length)?,
            flow_rate: build(PipeFlowInput::FlowRate)?,
            cross_section: build(PipeFlowInput::CrossSection)?,
        })
    }

    /// The pressure-drop distribution.
    ///
    /// # Errors
    /// Any error from [`Self::inputs`].
    pub fn pressure_drop(&self) -> Result<Uncertain<f64>> {
        Ok(self.inputs()?.pressure_drop())
    }

    /// Pressure drop at the nominal values, ignoring all uncertainty.
    #[must_use]
    pub fn nominal(&self) -> f64 {
        nominal_pressure_drop(
            self.fluid.mean_viscosity,
            self.pipe.length,
            self.fluid.mean_flow_rate,
            self.pipe.cross_section,
        )
    }

    /// Linearized uncertainty budget around the nominal values.
    #[must_use]
    pub fn uncertainty_budget(&self) -> UncertaintyBudget {
        let contributions = PipeFlowInput::ALL.map(|input| {
            let (measurement, shape) = self.measurement(input);
            let relative = if measurement.mean == 0.0 {
                0.0
            } else {
                shape.standard_deviation(measurement) / measurement.mean.abs()
            };
            (input, input.exponent().abs() * relative)
        });
        UncertaintyBudget { contributions }
    }
}

impl Default for PressureDropModel {
    fn default() -> Self {
        Self::new(FluidProperties::default(), PipeGeometry::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::cast_precision_loss)]

    use super::*;

    const CLOSED_FORM: f64 = 8.0 * PI * 0.001 * 1.0 * 0.5 / (0.1 * 0.1);

    fn exact_model() -> PressureDropModel {
        PressureDropModel::new(
            FluidProperties::default().exact(),
            PipeGeometry::default().exact(),
        )
    }

    fn mean_of(samples: &[f64]) -> f64 {
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    #[test]
    fn test_nominal_matches_closed_form() {
        let nominal = PressureDropModel::default().nominal();
        assert!((nominal - CLOSED_FORM).abs() < 1e-12);
        // 8π · 0.001 · 1 · 0.5 / 0.01 = 0.4π
        assert!((nominal - 0.4 * PI).abs() < 1e-9);
        assert!((nominal - 1.256_637_061).abs() < 1e-9);
    }

    #[test]
    fn test_zero_uncertainty_collapses() {
        let dp = exact_model().pressure_drop().unwrap();
        for sample in dp.take_samples(100) {
            assert!((sample - CLOSED_FORM).abs() < 1e-9);
        }
    }

    #[test]
    fn test_point_inputs_give_point_output() {
        let dp = pressure_drop(
            Uncertain::point(0.001),
            Uncertain::point(1.0),
            Uncertain::point(0.5),
            Uncertain::point(0.1),
        );
        assert!((dp.sample() - nominal_pressure_drop(0.001, 1.0, 0.5, 0.1)).abs() < 1e-15);
    }

    #[test]
    fn test_samples_within_input_support() {
        // Viscosity spread is ~2e-6 relative; allow a generous 1e-4 band
        let model = PressureDropModel::default();
        let lower = nominal_pressure_drop(0.001 * (1.0 - 1e-4), 0.99, 0.4999, 0.101);
        let upper = nominal_pressure_drop(0.001 * (1.0 + 1e-4), 1.01, 0.5001, 0.099);

        let samples = model.pressure_drop().unwrap().take_samples_seeded(10_000, 17);
        assert!(samples.iter().all(|&x| x > lower && x < upper));
    }

    #[test]
    fn test_cross_section_must_stay_positive() {
        let pipe = PipeGeometry {
            cross_section: 0.001,
            cross_section_tolerance: 0.001,
            ..PipeGeometry::default()
        };
        let model = PressureDropModel::new(FluidProperties::default(), pipe);
        assert_eq!(
            model.validate(),
            Err(PressureDropError::degenerate_division(0.001, 0.001))
        );
        assert!(model.pressure_drop().is_err());

        let zero_area = PipeGeometry {
            cross_section: 0.0,
            ..PipeGeometry::default().exact()
        };
        let zero = PressureDropModel::new(FluidProperties::default(), zero_area);
        assert!(matches!(
            zero.validate(),
            Err(PressureDropError::DegenerateDivision { .. })
        ));
    }

    #[test]
    fn test_negative_parameters_fail_fast() {
        let fluid = FluidProperties {
            flow_rate_uncertainty: -0.1,
            ..FluidProperties::default()
        };
        let model = PressureDropModel::new(fluid, PipeGeometry::default());
        assert!(matches!(
            model.inputs(),
            Err(PressureDropError::InvalidDistributionParameter {
                parameter: "flow_rate_uncertainty",
                ..
            })
        ));
    }

    #[test]
    fn test_alternate_rules_are_honoured() {
        let rules = QuantityRules {
            length: DistributionShape::LogNormal,
            ..QuantityRules::default()
        };
        let model = PressureDropModel::with_rules(
            FluidProperties::default(),
            PipeGeometry::default(),
            rules,
        );
        let length = model.inputs().unwrap().length;
        let samples = length.take_samples_seeded(20_000, 8);
        // log-normal with std 0.01 escapes the ±0.01 band about 32% of the time
        let outside = samples.iter().filter(|&&x| (x - 1.0).abs() > 0.01).count();
        assert!(outside > 2_000);
    }

    #[test]
    fn test_default_budget() {
        let budget = PressureDropModel::default().uncertainty_budget();
        let root3 = 3.0_f64.sqrt();

        assert!((budget.contribution(PipeFlowInput::Length) - 0.01 / root3).abs() < 1e-12);
        assert!((budget.contribution(PipeFlowInput::CrossSection) - 0.02 / root3).abs() < 1e-12);
        assert!((budget.contribution(PipeFlowInput::FlowRate) - 0.0002 / root3).abs() < 1e-12);
        assert!((budget.contribution(PipeFlowInput::Viscosity) - 2e-6).abs() < 1e-12);
        assert_eq!(budget.dominant(), PipeFlowInput::CrossSection);
        assert!((budget.combined() - 0.012_91).abs() < 1e-4);
    }

    #[test]
    fn test_monte_carlo_spread_matches_budget() {
        let model = PressureDropModel::default();
        let samples = model.pressure_drop().unwrap().take_samples_seeded(50_000, 99);
        let mean = mean_of(&samples);
        let std_dev = (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / samples.len() as f64)
            .sqrt();

        let predicted = model.nominal() * model.uncertainty_budget().combined();
        assert!(
            (std_dev / predicted - 1.0).abs() < 0.1,
            "std_dev {std_dev} vs predicted {predicted}"
        );
    }

    #[test]
    fn test_input_names() {
        assert_eq!(PipeFlowInput::CrossSection.to_string(), "cross_section");
        assert!((PipeFlowInput::CrossSection.exponent() + 2.0).abs() < f64::EPSILON);
        assert_eq!(PipeFlowInput::ALL.len(), 4);
    }
}

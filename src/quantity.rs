//! Physical inputs and the rules that turn them into distributions.
//!
//! Each input is a [`Measurement`] (nominal value plus uncertainty). A
//! [`DistributionShape`] says how that pair becomes an [`Uncertain`] value,
//! and [`QuantityRules`] assigns a shape to each of the four pipe-flow inputs.

use crate::Uncertain;
use crate::error::{Result, ensure_non_negative};

/// A nominal value with its uncertainty, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub mean: f64,
    /// Half-width of a tolerance band, or a standard deviation, depending on
    /// the shape it is materialized with.
    pub uncertainty: f64,
}

impl Measurement {
    #[must_use]
    pub const fn new(mean: f64, uncertainty: f64) -> Self {
        Self { mean, uncertainty }
    }

    /// A measurement with no uncertainty.
    #[must_use]
    pub const fn exact(mean: f64) -> Self {
        Self::new(mean, 0.0)
    }
}

/// How a [`Measurement`] is turned into a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionShape {
    /// Uniform over `[mean - uncertainty, mean + uncertainty]`; models an
    /// instrument tolerance band.
    BoundedUniform,
    /// Log-normal with arithmetic mean `mean` and standard deviation
    /// `uncertainty`; models a strictly positive, multiplicative error.
    LogNormal,
}

impl DistributionShape {
    /// Builds the distribution for `measurement`.
    ///
    /// # Errors
    /// Returns an error if the uncertainty is negative or non-finite, or if the
    /// shape's own constraints fail (see [`Uncertain::bounded_uniform`] and
    /// [`Uncertain::log_normal_from_moments`]).
    pub fn materialize(self, measurement: Measurement) -> Result<Uncertain<f64>> {
        let Measurement { mean, uncertainty } = measurement;
        match self {
            DistributionShape::BoundedUniform => Uncertain::bounded_uniform(mean, uncertainty),
            DistributionShape::LogNormal => Uncertain::log_normal_from_moments(mean, uncertainty),
        }
    }

    /// Standard deviation of the distribution this shape builds from `measurement`.
    #[must_use]
    pub fn standard_deviation(self, measurement: Measurement) -> f64 {
        match self {
            DistributionShape::BoundedUniform => measurement.uncertainty / 3.0_f64.sqrt(),
            DistributionShape::LogNormal => measurement.uncertainty,
        }
    }

    /// Closed support `(lower, upper)` of the distribution built from `measurement`.
    #[must_use]
    pub fn support(self, measurement: Measurement) -> (f64, f64) {
        match self {
            DistributionShape::BoundedUniform => (
                measurement.mean - measurement.uncertainty,
                measurement.mean + measurement.uncertainty,
            ),
            DistributionShape::LogNormal if measurement.uncertainty == 0.0 => {
                (measurement.mean, measurement.mean)
            }
            DistributionShape::LogNormal => (0.0, f64::INFINITY),
        }
    }
}

/// Properties of the fluid flowing through the pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    /// Mean volumetric flow rate (m^3/s)
    pub mean_flow_rate: f64,
    /// Flow-rate uncertainty (m^3/s)
    pub flow_rate_uncertainty: f64,
    /// Mean dynamic viscosity (Pa·s)
    pub mean_viscosity: f64,
    /// Dynamic-viscosity uncertainty (Pa·s)
    pub viscosity_uncertainty: f64,
}

impl FluidProperties {
    /// Water at 20 °C through a flow meter with 0.02% precision.
    ///
    /// Viscosity after Kestin, Sokolov and Wakeham, "Viscosity of liquid water
    /// in the range −8 °C to 150 °C", <https://doi.org/10.1063/1.555581>.
    pub const WATER_20C: Self = Self {
        mean_flow_rate: 0.5,
        flow_rate_uncertainty: 0.0001,
        mean_viscosity: 0.001,
        viscosity_uncertainty: 0.002e-6,
    };

    #[must_use]
    pub fn flow_rate(&self) -> Measurement {
        Measurement::new(self.mean_flow_rate, self.flow_rate_uncertainty)
    }

    #[must_use]
    pub fn viscosity(&self) -> Measurement {
        Measurement::new(self.mean_viscosity, self.viscosity_uncertainty)
    }

    /// The same fluid with every uncertainty set to zero.
    #[must_use]
    pub fn exact(self) -> Self {
        Self {
            flow_rate_uncertainty: 0.0,
            viscosity_uncertainty: 0.0,
            ..self
        }
    }

    /// Checks that all four values are finite and non-negative.
    ///
    /// # Errors
    /// Names the first offending field.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("mean_flow_rate", self.mean_flow_rate)?;
        ensure_non_negative("flow_rate_uncertainty", self.flow_rate_uncertainty)?;
        ensure_non_negative("mean_viscosity", self.mean_viscosity)?;
        ensure_non_negative("viscosity_uncertainty", self.viscosity_uncertainty)
    }
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::WATER_20C
    }
}

/// Dimensions of the pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    /// Pipe length (m)
    pub length: f64,
    /// Length tolerance (m)
    pub length_tolerance: f64,
    /// Cross-sectional area (m^2)
    pub cross_section: f64,
    /// Cross-sectional area tolerance (m^2)
    pub cross_section_tolerance: f64,
}

impl PipeGeometry {
    /// A 1 m pipe of 0.1 m^2 section, machined to 1% tolerance.
    pub const REFERENCE: Self = Self {
        length: 1.0,
        length_tolerance: 0.01,
        cross_section: 0.1,
        cross_section_tolerance: 0.001,
    };

    #[must_use]
    pub fn length(&self) -> Measurement {
        Measurement::new(self.length, self.length_tolerance)
    }

    #[must_use]
    pub fn cross_section(&self) -> Measurement {
        Measurement::new(self.cross_section, self.cross_section_tolerance)
    }

    /// The same pipe with every tolerance set to zero.
    #[must_use]
    pub fn exact(self) -> Self {
        Self {
            length_tolerance: 0.0,
            cross_section_tolerance: 0.0,
            ..self
        }
    }

    /// Checks that all four values are finite and non-negative.
    ///
    /// # Errors
    /// Names the first offending field.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("length", self.length)?;
        ensure_non_negative("length_tolerance", self.length_tolerance)?;
        ensure_non_negative("cross_section", self.cross_section)?;
        ensure_non_negative("cross_section_tolerance", self.cross_section_tolerance)
    }
}

impl Default for PipeGeometry {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The distribution shape used for each input of the pressure-drop formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityRules {
    pub length: DistributionShape,
    pub cross_section: DistributionShape,
    pub flow_rate: DistributionShape,
    pub viscosity: DistributionShape,
}

impl Default for QuantityRules {
    /// Tolerance bands for the geometry and the flow meter; log-normal for
    /// viscosity, which is strictly positive.
    fn default() -> Self {
        Self {
            length: DistributionShape::BoundedUniform,
            cross_section: DistributionShape::BoundedUniform,
            flow_rate: DistributionShape::BoundedUniform,
            viscosity: DistributionShape::LogNormal,
        }
    }
}

//! # poiseuille-uncertain
//!
//! Pressure drop of laminar flow in a cylindrical pipe (Hagen–Poiseuille),
//! with the measurement uncertainty of every input carried through the
//! formula:
//!
//! ```text
//! Δp = 8 · π · μ · L · Q / A²
//! ```
//!
//! Inputs are modeled as distributions (bounded-uniform tolerance bands for
//! length, cross-section and flow rate; log-normal for viscosity) and
//! propagated by Monte Carlo sampling: an [`Uncertain`] value is a sampling
//! function plus a lazily evaluated computation graph, so arithmetic on
//! uncertain values propagates whole distributions instead of point values.
//!
//! ```rust
//! use poiseuille_uncertain::{SamplingConfig, SimulationConfig, simulate};
//!
//! let config = SimulationConfig {
//!     sampling: SamplingConfig::seeded(20_000, 7),
//!     ..SimulationConfig::default()
//! };
//! let report = simulate(&config).unwrap();
//! println!("{report}");
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): draws trials on rayon workers, with per-chunk
//!   seeded RNGs so seeded runs stay reproducible.

pub mod computation;
pub mod config;
pub mod distributions;
pub mod error;
pub mod operations;
pub mod poiseuille;
pub mod quantity;
pub mod report;
pub mod statistics;
pub mod traits;
pub mod uncertain;

pub use config::{SamplingConfig, SimulationConfig};
pub use error::{PressureDropError, Result};
pub use poiseuille::{PressureDropModel, pressure_drop};
pub use quantity::{DistributionShape, FluidProperties, Measurement, PipeGeometry, QuantityRules};
pub use report::{PressureDropReport, simulate};
pub use statistics::SampleSummary;
pub use uncertain::Uncertain;

pub use operations::Arithmetic;

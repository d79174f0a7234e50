//! Error types for pressure-drop evaluation.
//!
//! Every error here is a configuration error: the inputs are fixed before any
//! sampling happens, so construction fails fast instead of producing a
//! silently wrong distribution.

use thiserror::Error;

/// The error type for building input distributions and summarizing results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PressureDropError {
    /// A distribution parameter violates its constraint (negative uncertainty,
    /// non-positive log-normal mean or scale).
    #[error("Invalid distribution parameter '{parameter}': value {value} {constraint}")]
    InvalidDistributionParameter {
        /// The name of the parameter
        parameter: &'static str,
        /// The invalid value
        value: f64,
        /// A description of the constraint that was violated
        constraint: &'static str,
    },

    /// A parameter is NaN or infinite.
    #[error("Non-finite parameter '{parameter}': {value}")]
    NonFiniteParameter {
        /// The name of the parameter
        parameter: &'static str,
        /// The non-finite value
        value: f64,
    },

    /// The cross-section interval reaches zero, so `A * A` could vanish.
    #[error(
        "Degenerate division: cross-section {cross_section} m^2 with tolerance {tolerance} m^2 can reach zero"
    )]
    DegenerateDivision {
        /// Mean cross-sectional area
        cross_section: f64,
        /// Cross-sectional area tolerance
        tolerance: f64,
    },

    /// Sample count is invalid (zero).
    #[error("Invalid sample count: {count} ({reason})")]
    InvalidSampleCount {
        /// The invalid sample count
        count: usize,
        /// The reason the count is invalid
        reason: &'static str,
    },

    /// A quantile value is out of range [0, 1].
    #[error("Invalid quantile: {value} (must be in range [0, 1])")]
    InvalidQuantile {
        /// The invalid quantile value
        value: f64,
    },

    /// A confidence level is out of range (0, 1).
    #[error("Invalid confidence level: {value} (must be in range (0, 1))")]
    InvalidConfidence {
        /// The invalid confidence level
        value: f64,
    },
}

/// A specialized `Result` type for pressure-drop evaluation.
pub type Result<T> = std::result::Result<T, PressureDropError>;

impl PressureDropError {
    /// Create an error for an invalid distribution parameter.
    ///
    /// # Example
    /// ```
    /// use poiseuille_uncertain::error::PressureDropError;
    ///
    /// let error = PressureDropError::invalid_parameter("length_tolerance", -1.0, "must be non-negative");
    /// assert!(error.to_string().contains("length_tolerance"));
    /// ```
    #[must_use]
    pub fn invalid_parameter(
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidDistributionParameter {
            parameter,
            value,
            constraint,
        }
    }

    /// Create an error for a non-finite parameter.
    #[must_use]
    pub fn non_finite(parameter: &'static str, value: f64) -> Self {
        Self::NonFiniteParameter { parameter, value }
    }

    /// Create an error for a cross-section interval that touches zero.
    #[must_use]
    pub fn degenerate_division(cross_section: f64, tolerance: f64) -> Self {
        Self::DegenerateDivision {
            cross_section,
            tolerance,
        }
    }

    /// Create an error for an invalid sample count.
    #[must_use]
    pub fn invalid_sample_count(count: usize, reason: &'static str) -> Self {
        Self::InvalidSampleCount { count, reason }
    }

    /// Create an error for an invalid quantile.
    #[must_use]
    pub fn invalid_quantile(value: f64) -> Self {
        Self::InvalidQuantile { value }
    }

    /// Create an error for an invalid confidence level.
    #[must_use]
    pub fn invalid_confidence(value: f64) -> Self {
        Self::InvalidConfidence { value }
    }
}

/// Rejects NaN and infinite values.
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PressureDropError::non_finite(parameter, value))
    }
}

/// Rejects non-finite and negative values.
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    ensure_finite(parameter, value)?;
    if value < 0.0 {
        return Err(PressureDropError::invalid_parameter(
            parameter,
            value,
            "must be non-negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_error() {
        let error = PressureDropError::invalid_parameter("std_dev", -1.0, "must be non-negative");
        assert!(error.to_string().contains("std_dev"));
        assert!(error.to_string().contains("-1"));
        assert!(error.to_string().contains("must be non-negative"));
    }

    #[test]
    fn test_non_finite_error() {
        let error = PressureDropError::non_finite("mean", f64::NAN);
        assert!(error.to_string().contains("mean"));
        assert!(error.to_string().contains("NaN"));
    }

    #[test]
    fn test_degenerate_division_error() {
        let error = PressureDropError::degenerate_division(0.1, 0.2);
        assert_eq!(
            error.to_string(),
            "Degenerate division: cross-section 0.1 m^2 with tolerance 0.2 m^2 can reach zero"
        );
    }

    #[test]
    fn test_invalid_sample_count_error() {
        let error = PressureDropError::invalid_sample_count(0, "must be greater than zero");
        assert!(error.to_string().contains('0'));
        assert!(error.to_string().contains("must be greater than zero"));
    }

    #[test]
    fn test_invalid_quantile_error() {
        let error = PressureDropError::invalid_quantile(1.5);
        assert!(error.to_string().contains("1.5"));
        assert!(error.to_string().contains("[0, 1]"));
    }

    #[test]
    fn test_invalid_confidence_error() {
        let error = PressureDropError::invalid_confidence(1.5);
        assert!(error.to_string().contains("1.5"));
        assert!(error.to_string().contains("(0, 1)"));
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("length", 0.0).is_ok());
        assert!(ensure_non_negative("length", 1.0).is_ok());
        assert_eq!(
            ensure_non_negative("length", -0.5),
            Err(PressureDropError::invalid_parameter(
                "length",
                -0.5,
                "must be non-negative"
            ))
        );
        assert!(matches!(
            ensure_non_negative("length", f64::INFINITY),
            Err(PressureDropError::NonFiniteParameter { .. })
        ));
    }

    #[test]
    fn test_error_partial_eq() {
        let error1 = PressureDropError::invalid_sample_count(0, "empty");
        let error2 = PressureDropError::invalid_sample_count(0, "empty");
        let error3 = PressureDropError::invalid_quantile(2.0);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }
}

#![allow(clippy::cast_precision_loss)]

use crate::Uncertain;
use crate::error::{PressureDropError, Result, ensure_finite, ensure_non_negative};
use crate::traits::Shareable;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

impl<T> Uncertain<T>
where
    T: Shareable,
{
    /// Creates a point-mass distribution (certain value)
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let certain_value = Uncertain::point(42.0);
    /// assert_eq!(certain_value.sample(), 42.0);
    /// ```
    #[must_use]
    pub fn point(value: T) -> Self {
        Uncertain::new(move |_: &mut dyn RngCore| value.clone())
    }
}

// Floating point distributions
impl Uncertain<f64> {
    /// Creates a normal (Gaussian) distribution
    ///
    /// # Arguments
    /// * `mean` - The mean of the distribution
    /// * `std_dev` - The standard deviation
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let normal = Uncertain::normal(0.0, 1.0); // Standard normal
    /// ```
    #[must_use]
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Uncertain::new(move |rng: &mut dyn RngCore| {
            // Box-Muller; u1 is in (0, 1] so the logarithm stays finite
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random::<f64>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            mean + std_dev * z0
        })
    }

    /// Creates a uniform distribution over `[min, max]`, with `min <= max`.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let uniform = Uncertain::uniform(0.0, 10.0);
    /// ```
    #[must_use]
    pub fn uniform(min: f64, max: f64) -> Self {
        Uncertain::new(move |rng: &mut dyn RngCore| {
            (min + (max - min) * rng.random::<f64>()).min(max)
        })
    }

    /// Creates a log-normal distribution from the parameters of the
    /// underlying normal.
    ///
    /// # Arguments
    /// * `mu` - Mean of the underlying normal distribution
    /// * `sigma` - Standard deviation of the underlying normal distribution
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let lognormal = Uncertain::log_normal(0.0, 1.0);
    /// ```
    #[must_use]
    pub fn log_normal(mu: f64, sigma: f64) -> Self {
        Self::normal(mu, sigma).map(f64::exp)
    }

    /// Creates a bounded-uniform distribution over `[mean - tolerance, mean + tolerance]`.
    ///
    /// A zero tolerance gives a point mass at `mean`.
    ///
    /// # Errors
    /// Returns an error if `mean` is not finite or `tolerance` is negative or not finite.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let length = Uncertain::bounded_uniform(1.0, 0.01).unwrap();
    /// assert!((0.99..=1.01).contains(&length.sample()));
    /// ```
    pub fn bounded_uniform(mean: f64, tolerance: f64) -> Result<Self> {
        ensure_finite("mean", mean)?;
        ensure_non_negative("tolerance", tolerance)?;

        if tolerance == 0.0 {
            return Ok(Self::point(mean));
        }
        Ok(Self::uniform(mean - tolerance, mean + tolerance))
    }

    /// Creates a log-normal distribution whose own mean and standard deviation
    /// are `mean` and `std_dev`.
    ///
    /// A zero `std_dev` gives a point mass at `mean`.
    ///
    /// # Errors
    /// Returns an error if `mean` is not positive, `std_dev` is negative, or
    /// the derived scale underflows to zero.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let viscosity = Uncertain::log_normal_from_moments(0.001, 0.002e-6).unwrap();
    /// assert!(viscosity.sample() > 0.0);
    /// ```
    pub fn log_normal_from_moments(mean: f64, std_dev: f64) -> Result<Self> {
        ensure_finite("mean", mean)?;
        ensure_non_negative("std_dev", std_dev)?;
        if mean <= 0.0 {
            return Err(PressureDropError::invalid_parameter(
                "mean",
                mean,
                "must be positive for a log-normal distribution",
            ));
        }

        if std_dev == 0.0 {
            return Ok(Self::point(mean));
        }

        let (mu, sigma) = log_normal_parameters(mean, std_dev)?;
        Ok(Self::log_normal(mu, sigma))
    }
}

/// Location and scale `(mu, sigma)` of the normal underlying a log-normal
/// with the given mean and standard deviation.
///
/// `sigma^2 = ln(1 + (std_dev / mean)^2)` and `mu = ln(mean) - sigma^2 / 2`.
///
/// # Errors
/// Returns [`PressureDropError::InvalidDistributionParameter`] if `sigma` is
/// not strictly positive.
pub fn log_normal_parameters(mean: f64, std_dev: f64) -> Result<(f64, f64)> {
    let variation = std_dev / mean;
    let variance = (variation * variation).ln_1p();
    let sigma = variance.sqrt();

    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(PressureDropError::invalid_parameter(
            "sigma",
            sigma,
            "derived log-normal scale must be positive",
        ));
    }

    Ok((mean.ln() - variance / 2.0, sigma))
}

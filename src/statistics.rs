#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::Uncertain;
use crate::config::SamplingConfig;
use crate::error::{PressureDropError, Result};

/// Arithmetic mean; NaN for an empty slice.
#[must_use]
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population variance about `mean`.
#[must_use]
pub fn variance(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

/// The `q`-quantile of an ascending slice, taking the sample at
/// `floor(q * (n - 1))`.
///
/// # Errors
/// Rejects `q` outside [0, 1] and an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(PressureDropError::invalid_quantile(q));
    }
    if sorted.is_empty() {
        return Err(PressureDropError::invalid_sample_count(0, "no samples to rank"));
    }

    let index = (q * sorted.len().saturating_sub(1) as f64).floor() as usize;
    Ok(sorted[index.min(sorted.len() - 1)])
}

/// Central interval holding `confidence` of an ascending slice.
///
/// # Errors
/// Rejects `confidence` outside (0, 1) and an empty slice.
pub fn confidence_interval_sorted(sorted: &[f64], confidence: f64) -> Result<(f64, f64)> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(PressureDropError::invalid_confidence(confidence));
    }
    if sorted.is_empty() {
        return Err(PressureDropError::invalid_sample_count(0, "no samples to rank"));
    }

    let alpha = 1.0 - confidence;
    let len = sorted.len();
    let lower_idx = (((alpha / 2.0) * len as f64).floor() as usize).min(len - 1);
    let upper_idx = (((1.0 - alpha / 2.0) * len as f64).floor() as usize)
        .saturating_sub(1)
        .clamp(lower_idx, len - 1);

    Ok((sorted[lower_idx], sorted[upper_idx]))
}

/// Summary statistics of one Monte Carlo trial set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub trials: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Confidence level of `interval`.
    pub confidence: f64,
    /// Central interval holding `confidence` of the trials.
    pub interval: (f64, f64),
}

impl SampleSummary {
    /// Summarizes a complete trial set.
    ///
    /// # Errors
    /// Rejects an empty trial set and an invalid confidence level.
    pub fn from_samples(samples: &[f64], confidence: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(PressureDropError::invalid_sample_count(
                0,
                "must be greater than zero",
            ));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted);
        let variance = variance(&sorted, mean);

        Ok(Self {
            trials: sorted.len(),
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: quantile_sorted(&sorted, 0.5)?,
            confidence,
            interval: confidence_interval_sorted(&sorted, confidence)?,
        })
    }

    /// Standard deviation relative to the mean.
    #[must_use]
    pub fn relative_std_dev(&self) -> f64 {
        self.std_dev / self.mean.abs()
    }
}

/// Statistical methods for numeric types
impl<T> Uncertain<T>
where
    T: Clone + Send + Sync + Into<f64> + 'static,
{
    /// Estimates the expected value (mean) from `sample_count` trials.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let uniform = Uncertain::uniform(9.0, 11.0);
    /// let mean = uniform.expected_value(10_000);
    /// assert!((mean - 10.0).abs() < 0.1);
    /// ```
    #[must_use]
    pub fn expected_value(&self, sample_count: usize) -> f64 {
        let samples: Vec<f64> = self
            .take_samples(sample_count)
            .into_iter()
            .map(Into::into)
            .collect();
        mean(&samples)
    }

    /// Estimates the variance from `sample_count` trials.
    #[must_use]
    pub fn variance(&self, sample_count: usize) -> f64 {
        let samples: Vec<f64> = self
            .take_samples(sample_count)
            .into_iter()
            .map(Into::into)
            .collect();
        variance(&samples, mean(&samples))
    }

    /// Estimates the standard deviation from `sample_count` trials.
    #[must_use]
    pub fn standard_deviation(&self, sample_count: usize) -> f64 {
        self.variance(sample_count).sqrt()
    }

    /// Estimates the `q`-quantile from `sample_count` trials.
    ///
    /// # Errors
    /// Rejects `q` outside [0, 1] and a zero sample count.
    pub fn quantile(&self, q: f64, sample_count: usize) -> Result<f64> {
        let mut samples: Vec<f64> = self
            .take_samples(sample_count)
            .into_iter()
            .map(Into::into)
            .collect();
        samples.sort_by(f64::total_cmp);
        quantile_sorted(&samples, q)
    }
}

impl Uncertain<f64> {
    /// Draws the trial set described by `config` and summarizes it.
    ///
    /// All trials are collected before any statistic is computed.
    ///
    /// # Errors
    /// Rejects an invalid `config`.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::{SamplingConfig, Uncertain};
    ///
    /// let length = Uncertain::uniform(0.99, 1.01);
    /// let summary = length.summarize(&SamplingConfig::seeded(10_000, 1)).unwrap();
    /// assert!(summary.min >= 0.99 && summary.max <= 1.01);
    /// ```
    pub fn summarize(&self, config: &SamplingConfig) -> Result<SampleSummary> {
        config.validate()?;
        let samples = self.draw(config)?;
        SampleSummary::from_samples(&samples, config.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_value() {
        let uniform = Uncertain::uniform(0.0, 10.0);
        let mean = uniform.expected_value(10_000);
        assert!((mean - 5.0).abs() < 0.2);
    }

    #[test]
    fn test_standard_deviation() {
        // uniform on [0, 12] has std 12 / sqrt(12)
        let uniform = Uncertain::uniform(0.0, 12.0);
        let std_dev = uniform.standard_deviation(10_000);
        assert!((std_dev - 12.0_f64.sqrt()).abs() < 0.1);
    }

    #[test]
    fn test_variance_zero() {
        let constant = Uncertain::point(42.0);
        assert!(constant.variance(1000) < 1e-12);
    }

    #[test]
    fn test_quantile() {
        let uniform = Uncertain::uniform(0.0, 1.0);
        let median = uniform.quantile(0.5, 10_000).unwrap();
        assert!((median - 0.5).abs() < 0.05);

        assert!(matches!(
            uniform.quantile(1.5, 100),
            Err(PressureDropError::InvalidQuantile { .. })
        ));
        assert!(matches!(
            uniform.quantile(0.5, 0),
            Err(PressureDropError::InvalidSampleCount { .. })
        ));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_quantile_sorted_indices() {
        let sorted: Vec<f64> = (0..=10).map(f64::from).collect();
        assert_eq!(quantile_sorted(&sorted, 0.0).unwrap(), 0.0);
        assert_eq!(quantile_sorted(&sorted, 0.5).unwrap(), 5.0);
        assert_eq!(quantile_sorted(&sorted, 1.0).unwrap(), 10.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_confidence_interval_sorted() {
        let sorted: Vec<f64> = (0..1000).map(f64::from).collect();
        let (lower, upper) = confidence_interval_sorted(&sorted, 0.95).unwrap();
        assert!((24.0..=25.0).contains(&lower));
        assert!((973.0..=975.0).contains(&upper));

        let (lower_99, upper_99) = confidence_interval_sorted(&sorted, 0.99).unwrap();
        assert!(lower_99 < lower && upper_99 > upper);

        assert!(matches!(
            confidence_interval_sorted(&sorted, 1.0),
            Err(PressureDropError::InvalidConfidence { .. })
        ));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_narrow_interval_is_never_inverted() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (lower, upper) = confidence_interval_sorted(&sorted, 0.001).unwrap();
        assert!(lower <= upper, "inverted interval ({lower}, {upper})");
        assert_eq!((lower, upper), (3.0, 3.0));

        for confidence in [0.01, 0.1, 0.3, 0.5, 0.9, 0.99] {
            for len in 1..20 {
                let sorted: Vec<f64> = (0..len).map(f64::from).collect();
                let (lower, upper) = confidence_interval_sorted(&sorted, confidence).unwrap();
                assert!(lower <= upper, "inverted for len {len}, confidence {confidence}");
            }
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_summary_from_samples() {
        let samples = [3.0, 1.0, 2.0, 5.0, 4.0];
        let summary = SampleSummary::from_samples(&samples, 0.5).unwrap();

        assert_eq!(summary.trials, 5);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.variance, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.median, 3.0);
        assert!(summary.interval.0 <= summary.median && summary.median <= summary.interval.1);
    }

    #[test]
    fn test_summary_rejects_empty() {
        assert!(matches!(
            SampleSummary::from_samples(&[], 0.95),
            Err(PressureDropError::InvalidSampleCount { .. })
        ));
    }

    #[test]
    fn test_summarize_seeded_is_reproducible() {
        let normal = Uncertain::normal(10.0, 2.0);
        let config = SamplingConfig::seeded(20_000, 5);
        let first = normal.summarize(&config).unwrap();
        let second = normal.summarize(&config).unwrap();

        assert_eq!(first, second);
        assert!((first.mean - 10.0).abs() < 0.1);
        assert!((first.std_dev - 2.0).abs() < 0.1);
        assert!((first.relative_std_dev() - 0.2).abs() < 0.02);
    }
}

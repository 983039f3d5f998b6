//! Aggregate statistics with explicit not-available results.
//!
//! Every helper returns `None` instead of dividing by zero or reporting a
//! statistic over too few samples.

use crate::constants::features::MIN_STDDEV_SAMPLES;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population (not Bessel-corrected) standard deviation.
///
/// Returns `None` for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_STDDEV_SAMPLES {
        return None;
    }
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.max(0.0).sqrt())
}

/// `numerator / denominator`, `None` when the denominator is zero or the result is not finite.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Summary of a star-rating sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RatingStats {
    /// Sample mean, `None` for an empty sample.
    pub mean: Option<f64>,
    /// Population standard deviation, `None` below two samples.
    pub std_dev: Option<f64>,
}

impl RatingStats {
    /// Compute mean and population standard deviation of `stars`.
    pub fn from_stars(stars: &[f64]) -> Self {
        Self {
            mean: mean(stars),
            std_dev: population_std_dev(stars),
        }
    }

    /// `(deviation) / std_dev` when the deviation exists and the spread is positive.
    pub fn normalize(&self, deviation: Option<f64>) -> Option<f64> {
        let spread = self.std_dev.filter(|sd| *sd > 0.0)?;
        ratio(deviation?, spread)
    }
}

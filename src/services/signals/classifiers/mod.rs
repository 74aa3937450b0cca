//! Regime classifiers evaluated on the latest row of a series.

pub mod golden_ratio;
pub mod mayer;
pub mod oscillator;
pub mod pi_cycle;
pub mod rainbow;
pub mod two_year_multiplier;

pub use golden_ratio::GoldenRatio;
pub use mayer::MayerMultiple;
pub use oscillator::MomentumOscillator;
pub use pi_cycle::PiCycle;
pub use rainbow::Rainbow;
pub use two_year_multiplier::TwoYearMultiplier;

use super::statistics::{moving_average, SeriesStatistics};
use crate::error::Result;
use crate::types::{ClassifierResult, PriceSeries, Statistic};
use std::borrow::Cow;

/// Trait for the regime classifiers.
pub trait Classifier: Send + Sync {
    /// Unique identifier, matching the `indicator` tag of its result.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Rows needed before the classifier can produce a reading.
    fn min_periods(&self) -> usize;

    /// Classify the latest row. Short series yield an `InsufficientData`
    /// reading rather than an error.
    fn classify(&self, series: &PriceSeries, stats: &SeriesStatistics)
        -> Result<ClassifierResult>;
}

/// The six classifiers in canonical order.
pub fn all_classifiers(oscillator_period: usize) -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(PiCycle),
        Box::new(TwoYearMultiplier),
        Box::new(MomentumOscillator::new(oscillator_period)),
        Box::new(Rainbow),
        Box::new(MayerMultiple),
        Box::new(GoldenRatio),
    ]
}

/// Moving average served from `stats` when precomputed, else computed here.
pub(crate) fn window_average<'a>(
    series: &PriceSeries,
    stats: &'a SeriesStatistics,
    window: usize,
) -> Result<Cow<'a, Statistic>> {
    match stats.moving_average(window) {
        Some(ma) => Ok(Cow::Borrowed(ma)),
        None => Ok(Cow::Owned(moving_average(series, window)?)),
    }
}

/// Latest value of `ma` when defined and usable as a divisor.
pub(crate) fn latest_divisor(ma: &Statistic) -> Option<f64> {
    ma.latest().filter(|v| *v != 0.0)
}

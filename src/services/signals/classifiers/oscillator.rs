//! Momentum oscillator regime.

use super::Classifier;
use crate::error::Result;
use crate::services::signals::ladder::OSCILLATOR_LADDER;
use crate::services::signals::statistics::{
    momentum_oscillator, SeriesStatistics, DEFAULT_OSCILLATOR_PERIOD,
};
use crate::types::{ClassifierResult, OscillatorReading, PriceSeries, Reading};
use std::borrow::Cow;

/// Momentum oscillator over simple rolling means of gains and losses.
///
/// Values range from 0-100:
/// - Below 30: oversold
/// - Above 70: overbought
pub struct MomentumOscillator {
    period: usize,
    name: String,
}

impl Default for MomentumOscillator {
    fn default() -> Self {
        Self::new(DEFAULT_OSCILLATOR_PERIOD)
    }
}

impl MomentumOscillator {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("RSI ({})", period),
        }
    }
}

impl Classifier for MomentumOscillator {
    fn id(&self) -> &str {
        "oscillator"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn classify(
        &self,
        series: &PriceSeries,
        stats: &SeriesStatistics,
    ) -> Result<ClassifierResult> {
        if series.len() < self.min_periods() {
            return Ok(ClassifierResult::Oscillator(Reading::InsufficientData));
        }

        let oscillator = if stats.oscillator_period() == self.period {
            Cow::Borrowed(stats.oscillator())
        } else {
            Cow::Owned(momentum_oscillator(series, self.period)?)
        };

        let Some(value) = oscillator.latest() else {
            return Ok(ClassifierResult::Oscillator(Reading::InsufficientData));
        };

        Ok(ClassifierResult::Oscillator(Reading::Ready(
            OscillatorReading {
                state: OSCILLATOR_LADDER.classify(value),
                value,
                period: self.period,
                history: vec![oscillator.into_owned()],
            },
        )))
    }
}

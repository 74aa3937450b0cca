//! Price against Fibonacci multiples of the 350-day moving average.

use super::{latest_divisor, window_average, Classifier};
use crate::error::Result;
use crate::services::signals::ladder::GOLDEN_RATIO_LADDER;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{ClassifierResult, FibonacciLevels, GoldenRatioReading, PriceSeries, Reading};

pub const WINDOW: usize = 350;

impl FibonacciLevels {
    /// Levels at 0.5, 1, 1.618, 2.618 and 3.618 times `ma_350`.
    pub fn from_average(ma_350: f64) -> Self {
        Self {
            bottom: ma_350 * 0.5,
            accumulation: ma_350,
            bullish: ma_350 * 1.618,
            euphoria: ma_350 * 2.618,
            extreme: ma_350 * 3.618,
        }
    }
}

pub struct GoldenRatio;

impl Classifier for GoldenRatio {
    fn id(&self) -> &str {
        "golden_ratio"
    }

    fn name(&self) -> &str {
        "Golden Ratio Multiplier"
    }

    fn min_periods(&self) -> usize {
        WINDOW
    }

    fn classify(
        &self,
        series: &PriceSeries,
        stats: &SeriesStatistics,
    ) -> Result<ClassifierResult> {
        let ma = window_average(series, stats, WINDOW)?;
        let Some(ma_350) = latest_divisor(&ma) else {
            return Ok(ClassifierResult::GoldenRatio(Reading::InsufficientData));
        };

        let price = series.last_price();

        Ok(ClassifierResult::GoldenRatio(Reading::Ready(
            GoldenRatioReading {
                state: GOLDEN_RATIO_LADDER.classify(price / ma_350),
                price,
                ma_350,
                levels: FibonacciLevels::from_average(ma_350),
            },
        )))
    }
}

//! Price against the 730-day moving average.

use super::{latest_divisor, window_average, Classifier};
use crate::error::Result;
use crate::services::signals::ladder::TWO_YEAR_LADDER;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{ClassifierResult, PriceSeries, Reading, TwoYearReading};

pub const WINDOW: usize = 730;
/// Upper band drawn at five times the 730-day MA.
pub const UPPER_MULTIPLIER: f64 = 5.0;

pub struct TwoYearMultiplier;

impl Classifier for TwoYearMultiplier {
    fn id(&self) -> &str {
        "two_year_multiplier"
    }

    fn name(&self) -> &str {
        "2-Year MA Multiplier"
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
        let Some(ma_730) = latest_divisor(&ma) else {
            return Ok(ClassifierResult::TwoYearMultiplier(Reading::InsufficientData));
        };

        let price = series.last_price();
        let multiplier = price / ma_730;
        let upper = ma.scaled(UPPER_MULTIPLIER, "ma_730_x5");

        Ok(ClassifierResult::TwoYearMultiplier(Reading::Ready(
            TwoYearReading {
                state: TWO_YEAR_LADDER.classify(multiplier),
                price,
                ma_730,
                ma_730_x5: ma_730 * UPPER_MULTIPLIER,
                multiplier,
                history: vec![ma.into_owned(), upper],
            },
        )))
    }
}

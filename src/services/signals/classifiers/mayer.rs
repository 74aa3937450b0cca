//! Mayer multiple: price against the 200-day moving average.

use super::{latest_divisor, window_average, Classifier};
use crate::error::Result;
use crate::services::signals::ladder::MAYER_LADDER;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{ClassifierResult, MayerReading, PriceSeries, Reading, Statistic};

pub const WINDOW: usize = 200;

/// `price / ma200` at every row where the average is defined and non-zero.
pub fn multiple_history(series: &PriceSeries, ma_200: &Statistic) -> Statistic {
    ma_200.price_ratio(series, "mayer_multiple")
}

pub struct MayerMultiple;

impl Classifier for MayerMultiple {
    fn id(&self) -> &str {
        "mayer"
    }

    fn name(&self) -> &str {
        "Mayer Multiple"
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
        let Some(ma_200) = latest_divisor(&ma) else {
            return Ok(ClassifierResult::Mayer(Reading::InsufficientData));
        };

        let price = series.last_price();
        let multiple = price / ma_200;

        Ok(ClassifierResult::Mayer(Reading::Ready(MayerReading {
            state: MAYER_LADDER.classify(multiple),
            price,
            ma_200,
            multiple,
            history: vec![multiple_history(series, &ma)],
        })))
    }
}

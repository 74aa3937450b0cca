//! 111-day moving average against twice the 350-day moving average.

use super::{window_average, Classifier};
use crate::error::Result;
use crate::services::signals::ladder::PI_CYCLE_LADDER;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{ClassifierResult, PiCycleReading, PriceSeries, Reading};

pub const SHORT_WINDOW: usize = 111;
pub const LONG_WINDOW: usize = 350;
pub const LONG_MULTIPLIER: f64 = 2.0;

/// Flags cycle tops when the short MA climbs to or through the doubled long MA.
///
/// - SAFE: short MA below twice the long MA
/// - WARNING: crossed, distance under 5% of price
/// - TOP: distance of 5% of price or more
pub struct PiCycle;

impl Classifier for PiCycle {
    fn id(&self) -> &str {
        "pi_cycle"
    }

    fn name(&self) -> &str {
        "Pi Cycle Top"
    }

    fn min_periods(&self) -> usize {
        LONG_WINDOW
    }

    fn classify(
        &self,
        series: &PriceSeries,
        stats: &SeriesStatistics,
    ) -> Result<ClassifierResult> {
        let short = window_average(series, stats, SHORT_WINDOW)?;
        let long = window_average(series, stats, LONG_WINDOW)?;

        let price = series.last_price();
        let (Some(ma_111), Some(ma_350)) = (short.latest(), long.latest()) else {
            return Ok(ClassifierResult::PiCycle(Reading::InsufficientData));
        };
        if price == 0.0 {
            return Ok(ClassifierResult::PiCycle(Reading::InsufficientData));
        }

        let ma_350_x2 = ma_350 * LONG_MULTIPLIER;
        let distance_pct = (ma_111 - ma_350_x2) / price * 100.0;

        Ok(ClassifierResult::PiCycle(Reading::Ready(PiCycleReading {
            state: PI_CYCLE_LADDER.classify(distance_pct),
            price,
            ma_111,
            ma_350_x2,
            distance_pct,
            history: vec![
                short.into_owned(),
                long.scaled(LONG_MULTIPLIER, "ma_350_x2"),
            ],
        })))
    }
}

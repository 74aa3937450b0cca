//! Where price sits inside a stack of moving-average bands.

use super::{window_average, Classifier};
use crate::error::Result;
use crate::services::signals::ladder::RAINBOW_LADDER;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{ClassifierResult, PriceSeries, RainbowReading, Reading, Statistic};
use std::collections::BTreeMap;

/// Band windows from fastest to slowest.
pub const BAND_WINDOWS: [usize; 11] = [7, 14, 21, 28, 35, 42, 56, 70, 90, 120, 150];

const FAST_WINDOW: usize = 7;
const SLOW_WINDOW: usize = 150;

/// Position reported when the fast and slow bands coincide.
pub const DEGENERATE_POSITION: f64 = 0.5;

/// `(price - slow) / (fast - slow)`: 0 on the slow band, 1 on the fast band.
pub fn position_ratio(price: f64, fast: f64, slow: f64) -> f64 {
    let spread = fast - slow;
    if spread == 0.0 {
        DEGENERATE_POSITION
    } else {
        (price - slow) / spread
    }
}

pub struct Rainbow;

impl Classifier for Rainbow {
    fn id(&self) -> &str {
        "rainbow"
    }

    fn name(&self) -> &str {
        "Rainbow Bands"
    }

    fn min_periods(&self) -> usize {
        SLOW_WINDOW
    }

    fn classify(
        &self,
        series: &PriceSeries,
        stats: &SeriesStatistics,
    ) -> Result<ClassifierResult> {
        if series.len() < self.min_periods() {
            return Ok(ClassifierResult::Rainbow(Reading::InsufficientData));
        }

        let bands = BAND_WINDOWS
            .iter()
            .map(|&window| Ok((window, window_average(series, stats, window)?.into_owned())))
            .collect::<Result<BTreeMap<usize, Statistic>>>()?;

        let latest = |window: usize| bands.get(&window).and_then(Statistic::latest);
        let (Some(fast), Some(slow)) = (latest(FAST_WINDOW), latest(SLOW_WINDOW)) else {
            return Ok(ClassifierResult::Rainbow(Reading::InsufficientData));
        };

        let price = series.last_price();
        let position_ratio = position_ratio(price, fast, slow);
        let current = bands
            .iter()
            .filter_map(|(&window, band)| band.latest().map(|v| (window, v)))
            .collect();

        Ok(ClassifierResult::Rainbow(Reading::Ready(RainbowReading {
            state: RAINBOW_LADDER.classify(position_ratio),
            price,
            position_ratio,
            bands: current,
            history: bands.into_values().collect(),
        })))
    }
}

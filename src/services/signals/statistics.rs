//! Rolling-window statistics over a price series.

use crate::error::{Error, Result};
use crate::types::{PriceSeries, Statistic};
use std::collections::BTreeMap;

/// Moving-average windows consumed by the classifiers.
pub const STANDARD_WINDOWS: [usize; 15] = [
    7, 14, 21, 28, 35, 42, 56, 70, 90, 111, 120, 150, 200, 350, 730,
];

/// Default momentum oscillator period.
pub const DEFAULT_OSCILLATOR_PERIOD: usize = 14;

/// Oscillator value used when both mean gain and mean loss are zero.
pub const FLAT_OSCILLATOR: f64 = 50.0;

/// Oscillator value when mean loss is zero and mean gain is positive.
pub const SATURATED_OSCILLATOR: f64 = 100.0;

/// Arithmetic mean of `values[i-window+1..=i]` at every `i`, `None` until the
/// window fills.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(Error::InvalidWindow);
    }

    let means = (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            // Summed per window so settled positions never depend on later rows.
            let sum: f64 = values[i + 1 - window..=i].iter().sum();
            Some(sum / window as f64)
        })
        .collect();
    Ok(means)
}

/// Simple moving average of price.
pub fn moving_average(series: &PriceSeries, window: usize) -> Result<Statistic> {
    Ok(Statistic::new(
        format!("ma_{}", window),
        rolling_mean(series.prices(), window)?,
    ))
}

/// Day-over-day price change split into gains and losses (both non-negative).
///
/// Row 0 has no predecessor and counts as no change.
pub fn gains_and_losses(series: &PriceSeries) -> (Vec<f64>, Vec<f64>) {
    let prices = series.prices();
    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());

    gains.push(0.0);
    losses.push(0.0);
    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else if change < 0.0 {
            gains.push(0.0);
            losses.push(-change);
        } else {
            gains.push(0.0);
            losses.push(0.0);
        }
    }

    (gains, losses)
}

/// Oscillator value for one pair of mean gain / mean loss.
pub fn oscillator_value(mean_gain: f64, mean_loss: f64) -> f64 {
    if mean_loss == 0.0 {
        if mean_gain == 0.0 {
            FLAT_OSCILLATOR
        } else {
            SATURATED_OSCILLATOR
        }
    } else {
        let ratio = mean_gain / mean_loss;
        100.0 - 100.0 / (1.0 + ratio)
    }
}

/// Momentum oscillator built from *simple* rolling means of gains and losses.
///
/// This is not Wilder's smoothed RSI: each position averages the last
/// `period` changes with equal weight.
pub fn momentum_oscillator(series: &PriceSeries, period: usize) -> Result<Statistic> {
    let (gains, losses) = gains_and_losses(series);
    let mean_gains = rolling_mean(&gains, period)?;
    let mean_losses = rolling_mean(&losses, period)?;

    let values = mean_gains
        .into_iter()
        .zip(mean_losses)
        .map(|pair| match pair {
            (Some(gain), Some(loss)) => Some(oscillator_value(gain, loss)),
            _ => None,
        })
        .collect();

    Ok(Statistic::new(format!("rsi_{}", period), values))
}

/// Every statistic the classifiers and backtests need, computed once per series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStatistics {
    moving_averages: BTreeMap<usize, Statistic>,
    oscillator: Statistic,
    oscillator_period: usize,
}

impl SeriesStatistics {
    /// Compute the standard moving averages and the oscillator.
    pub fn compute(series: &PriceSeries, oscillator_period: usize) -> Result<Self> {
        let moving_averages = STANDARD_WINDOWS
            .iter()
            .map(|&window| Ok((window, moving_average(series, window)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            moving_averages,
            oscillator: momentum_oscillator(series, oscillator_period)?,
            oscillator_period,
        })
    }

    /// Moving average for one of [`STANDARD_WINDOWS`].
    pub fn moving_average(&self, window: usize) -> Option<&Statistic> {
        self.moving_averages.get(&window)
    }

    pub fn oscillator(&self) -> &Statistic {
        &self.oscillator
    }

    pub fn oscillator_period(&self) -> usize {
        self.oscillator_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::daily(0, prices).unwrap()
    }

    #[test]
    fn test_rolling_mean_undefined_until_full() {
        let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(means, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_rolling_mean_rejects_zero_window() {
        assert!(matches!(rolling_mean(&[1.0], 0), Err(Error::InvalidWindow)));
    }

    #[test]
    fn test_rolling_mean_longer_than_series() {
        let means = rolling_mean(&[1.0, 2.0], 5).unwrap();
        assert!(means.iter().all(Option::is_none));
    }

    #[test]
    fn test_moving_average_name_and_alignment() {
        let s = series(&[2.0, 4.0, 6.0, 8.0]);
        let ma = moving_average(&s, 2).unwrap();
        assert_eq!(ma.name(), "ma_2");
        assert_eq!(ma.len(), s.len());
        assert_eq!(ma.get(0), None);
        assert_eq!(ma.get(1), Some(3.0));
        assert_eq!(ma.latest(), Some(7.0));
    }

    #[test]
    fn test_gains_and_losses_split() {
        let (gains, losses) = gains_and_losses(&series(&[10.0, 12.0, 9.0, 9.0]));
        assert_eq!(gains, vec![0.0, 2.0, 0.0, 0.0]);
        assert_eq!(losses, vec![0.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_oscillator_saturates_without_losses() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rsi = momentum_oscillator(&series(&prices), 14).unwrap();
        assert_eq!(rsi.latest(), Some(SATURATED_OSCILLATOR));
    }

    #[test]
    fn test_oscillator_flat_fallback() {
        let rsi = momentum_oscillator(&series(&[50.0; 20]), 14).unwrap();
        assert_eq!(rsi.latest(), Some(FLAT_OSCILLATOR));
    }

    #[test]
    fn test_oscillator_first_defined_at_period_minus_one() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let rsi = momentum_oscillator(&series(&prices), 14).unwrap();
        assert_eq!(rsi.first_defined(), Some(13));
    }

    #[test]
    fn test_oscillator_simple_average_value() {
        let s = series(&[10.0, 12.0, 11.0, 13.0, 12.0]);
        let rsi = momentum_oscillator(&s, 4).unwrap();
        // Window over rows 1..=4: gains [2,0,2,0] -> 1.0, losses [0,1,0,1] -> 0.5.
        let expected = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((rsi.latest().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_oscillator_value_edges() {
        assert_eq!(oscillator_value(0.0, 0.0), FLAT_OSCILLATOR);
        assert_eq!(oscillator_value(1.0, 0.0), SATURATED_OSCILLATOR);
        assert_eq!(oscillator_value(0.0, 1.0), 0.0);
        assert!((oscillator_value(1.0, 1.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_series_statistics_serves_standard_windows() {
        let prices: Vec<f64> = (0..800).map(|i| 100.0 + i as f64).collect();
        let stats = SeriesStatistics::compute(&series(&prices), 14).unwrap();
        for window in STANDARD_WINDOWS {
            let ma = stats.moving_average(window).unwrap();
            assert_eq!(ma.first_defined(), Some(window - 1));
        }
        assert!(stats.moving_average(13).is_none());
        assert_eq!(stats.oscillator_period(), 14);
    }

    #[test]
    fn test_settled_positions_unchanged_by_appending() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let full = series(&prices);
        let prefix = full.head(40).unwrap();

        let ma_full = moving_average(&full, 14).unwrap();
        let ma_prefix = moving_average(&prefix, 14).unwrap();
        assert_eq!(&ma_full.values()[..40], ma_prefix.values());

        let rsi_full = momentum_oscillator(&full, 14).unwrap();
        let rsi_prefix = momentum_oscillator(&prefix, 14).unwrap();
        assert_eq!(&rsi_full.values()[..40], rsi_prefix.values());
    }
}

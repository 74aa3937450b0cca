//! Historical event scans: threshold crossings and local extrema.

use crate::error::{Error, Result};
use crate::types::{Event, EventClass, EventOrigin, PriceSeries, Statistic};

/// Default half-width of the extremum window.
pub const DEFAULT_EXTREMUM_RADIUS: usize = 30;

/// Which side a crossing approaches the threshold from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From below to at-or-above.
    Rising,
    /// From above to at-or-below.
    Falling,
}

/// Level a metric is compared against at each row.
#[derive(Debug, Clone, Copy)]
pub enum Threshold<'a> {
    Level(f64),
    Series(&'a Statistic),
}

impl Threshold<'_> {
    fn at(&self, index: usize) -> Option<f64> {
        match self {
            Threshold::Level(level) => Some(*level),
            Threshold::Series(stat) => stat.get(index),
        }
    }
}

/// Rows `i >= 1` where `metric` crosses `threshold` between `i-1` and `i`.
///
/// A row where either side is undefined, now or at `i-1`, never fires.
pub fn crossing_indices(
    metric: &Statistic,
    threshold: Threshold<'_>,
    direction: Direction,
) -> Vec<usize> {
    (1..metric.len())
        .filter(|&i| {
            let (Some(prev), Some(curr), Some(t_prev), Some(t_curr)) = (
                metric.get(i - 1),
                metric.get(i),
                threshold.at(i - 1),
                threshold.at(i),
            ) else {
                return false;
            };
            match direction {
                Direction::Rising => prev < t_prev && curr >= t_curr,
                Direction::Falling => prev > t_prev && curr <= t_curr,
            }
        })
        .collect()
}

/// Crossing events for `metric`, tagged with `class` and `origin`.
pub fn detect_crossings(
    series: &PriceSeries,
    metric: &Statistic,
    threshold: Threshold<'_>,
    direction: Direction,
    class: EventClass,
    origin: EventOrigin,
) -> Vec<Event> {
    crossing_indices(metric, threshold, direction)
        .into_iter()
        .filter_map(|index| {
            let point = series.points().get(index)?;
            Some(Event {
                index,
                time: point.time,
                price: point.price,
                class,
                origin,
                metric: metric.get(index),
            })
        })
        .collect()
}

/// Peaks and troughs found by [`find_extrema`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extrema {
    pub peaks: Vec<Event>,
    pub troughs: Vec<Event>,
}

/// Local maxima and minima over a symmetric window of `radius` rows each side.
///
/// Only rows in `[radius, n - radius)` are scanned, so the first and last
/// `radius` rows are never flagged. A row equal to its window's max (min) is a
/// peak (trough); a flat plateau therefore yields one event per row.
pub fn find_extrema(series: &PriceSeries, radius: usize) -> Result<Extrema> {
    if radius == 0 {
        return Err(Error::InvalidWindow);
    }

    let prices = series.prices();
    let mut extrema = Extrema::default();
    if prices.len() <= 2 * radius {
        return Ok(extrema);
    }

    for index in radius..prices.len() - radius {
        let window = &prices[index - radius..=index + radius];
        let price = prices[index];
        let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = window.iter().copied().fold(f64::INFINITY, f64::min);

        let event = |class| Event {
            index,
            time: series.points()[index].time,
            price,
            class,
            origin: EventOrigin::Extremum,
            metric: None,
        };
        if price == max {
            extrema.peaks.push(event(EventClass::Top));
        }
        if price == min {
            extrema.troughs.push(event(EventClass::Bottom));
        }
    }

    Ok(extrema)
}

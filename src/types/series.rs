use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Milliseconds in one day, the spacing used by [`PriceSeries::daily`].
pub const DAY_MS: i64 = 86_400_000;

/// A single observation of an asset's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    /// Price in the asset's native quote currency.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl PricePoint {
    pub fn new(time: i64, price: f64) -> Self {
        Self {
            time,
            price,
            volume: None,
            market_cap: None,
        }
    }
}

/// An ordered, validated price history.
///
/// Timestamps strictly increase and every price is finite. The series has no
/// mutating API: once built it is only ever borrowed. Window sizes used
/// throughout the crate count rows, not calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series, rejecting empty input, non-finite prices and
    /// duplicate or out-of-order timestamps.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptySeries);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(Error::NonFinitePrice {
                    index,
                    price: point.price,
                });
            }
            if index > 0 && point.time <= points[index - 1].time {
                return Err(Error::NonIncreasingTimestamp {
                    index,
                    previous: points[index - 1].time,
                    current: point.time,
                });
            }
        }

        let prices = points.iter().map(|p| p.price).collect();
        Ok(Self { points, prices })
    }

    /// Build a daily series from bare prices, starting at `start_ms`.
    pub fn daily(start_ms: i64, prices: &[f64]) -> Result<Self> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                i64::try_from(i)
                    .ok()
                    .and_then(|i| i.checked_mul(DAY_MS))
                    .and_then(|offset| start_ms.checked_add(offset))
                    .map(|time| PricePoint::new(time, price))
                    .ok_or(Error::TimestampOutOfRange(start_ms))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(points)
    }

    /// The first `len` rows as a new series.
    pub fn head(&self, len: usize) -> Result<Self> {
        let len = len.min(self.points.len());
        Self::new(self.points[..len].to_vec())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series; kept for slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn price(&self, index: usize) -> Option<f64> {
        self.prices.get(index).copied()
    }

    pub fn time(&self, index: usize) -> Option<i64> {
        self.points.get(index).map(|p| p.time)
    }

    pub fn first(&self) -> &PricePoint {
        // Non-empty by construction.
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn last_price(&self) -> f64 {
        self.last().price
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = Error;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// A named numeric sequence aligned index-for-index with a [`PriceSeries`].
///
/// Positions where the underlying window has not filled are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    name: String,
    values: Vec<Option<f64>>,
}

impl Statistic {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the latest position, if defined.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Every defined value multiplied by `factor`.
    pub fn scaled(&self, factor: f64, name: impl Into<String>) -> Statistic {
        Statistic::new(
            name,
            self.values.iter().map(|v| v.map(|x| x * factor)).collect(),
        )
    }

    /// `price / self` at every position where the statistic is defined and non-zero.
    pub fn price_ratio(&self, series: &PriceSeries, name: impl Into<String>) -> Statistic {
        let values = self
            .values
            .iter()
            .zip(series.prices())
            .map(|(stat, &price)| match stat {
                Some(base) if *base != 0.0 => Some(price / base),
                _ => None,
            })
            .collect();
        Statistic::new(name, values)
    }
}

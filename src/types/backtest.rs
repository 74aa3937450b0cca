use super::regime::MarketAssessment;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Direction a detected event implies for subsequent price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClass {
    /// Price is expected to fall afterwards.
    Top,
    /// Price is expected to rise afterwards.
    Bottom,
}

/// Detector that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
    /// 111-day MA crossing up through twice the 350-day MA.
    PiCycleCrossover,
    /// Price / 200-day MA crossing a fixed level.
    MayerMultiple,
    /// Momentum oscillator crossing an overbought/oversold level.
    Oscillator,
    /// Local price maximum or minimum over a symmetric window.
    Extremum,
}

/// A detected event at one row of a price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub index: usize,
    pub time: i64,
    pub price: f64,
    pub class: EventClass,
    pub origin: EventOrigin,
    /// Value of the tracked metric at the trigger row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}

/// Percentage returns keyed by forward offset in rows.
///
/// Only offsets that land inside the series are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForwardReturns(BTreeMap<usize, f64>);

impl ForwardReturns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, horizon: usize, pct: f64) {
        self.0.insert(horizon, pct);
    }

    pub fn get(&self, horizon: usize) -> Option<f64> {
        self.0.get(&horizon).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(&h, &r)| (h, r))
    }
}

/// An event together with what happened after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub forward_returns: ForwardReturns,
    pub accurate: bool,
}

/// Accuracy tier of a backtest summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    Moderate,
    Partial,
    Unreliable,
}

impl Reliability {
    pub fn from_accuracy(accuracy_pct: f64) -> Self {
        match accuracy_pct {
            a if a >= 75.0 => Reliability::High,
            a if a >= 60.0 => Reliability::Moderate,
            a if a >= 50.0 => Reliability::Partial,
            _ => Reliability::Unreliable,
        }
    }
}

/// Aggregated accuracy and mean forward returns for one detector/class run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSummary {
    pub origin: EventOrigin,
    pub class: EventClass,
    pub total_events: usize,
    pub accurate_events: usize,
    /// `100 * accurate / total`, 0 when there are no events.
    pub accuracy_pct: f64,
    /// Mean return per horizon over the events that reach it.
    pub mean_returns: BTreeMap<usize, f64>,
    pub reliability: Reliability,
}

impl BacktestSummary {
    pub fn mean_return(&self, horizon: usize) -> Option<f64> {
        self.mean_returns.get(&horizon).copied()
    }
}

/// One backtest run: the summary plus every evaluated signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalBacktest {
    pub summary: BacktestSummary,
    pub signals: Vec<EvaluatedEvent>,
}

/// First and last timestamps of the analysed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rows: usize,
}

/// Every backtest run for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub data_period: DataPeriod,
    pub pi_cycle_top: SignalBacktest,
    pub mayer_top: SignalBacktest,
    pub mayer_bottom: SignalBacktest,
    pub oscillator_overbought: SignalBacktest,
    pub oscillator_oversold: SignalBacktest,
    pub extremum_peaks: SignalBacktest,
    pub extremum_troughs: SignalBacktest,
}

impl BacktestReport {
    /// All runs in report order.
    pub fn runs(&self) -> [&SignalBacktest; 7] {
        [
            &self.pi_cycle_top,
            &self.mayer_top,
            &self.mayer_bottom,
            &self.oscillator_overbought,
            &self.oscillator_oversold,
            &self.extremum_peaks,
            &self.extremum_troughs,
        ]
    }
}

/// Complete analysis of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub symbol: String,
    pub assessment: MarketAssessment,
    pub backtest: BacktestReport,
}

//! Backtesting Engine
//!
//! Replays the event detectors over a full price history and scores each
//! signal against what price did afterwards.
//! Runs:
//! - Pi cycle crossover tops
//! - Mayer multiple tops and bottoms
//! - Oscillator overbought and oversold crossings
//! - Local price peaks and troughs

use crate::error::{Error, Result};
use crate::services::signals::accuracy::{
    evaluate, summarize, DEFAULT_ACCURACY_HORIZON, DEFAULT_HORIZONS,
};
use crate::services::signals::classifiers::{mayer, pi_cycle, window_average};
use crate::services::signals::events::{
    detect_crossings, find_extrema, Direction, Threshold, DEFAULT_EXTREMUM_RADIUS,
};
use crate::services::signals::statistics::{
    momentum_oscillator, SeriesStatistics, DEFAULT_OSCILLATOR_PERIOD,
};
use crate::types::{
    BacktestReport, DataPeriod, Event, EventClass, EventOrigin, PriceSeries, SignalBacktest,
};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use tracing::{debug, info};

/// Settings for a backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    /// Forward offsets, in rows, at which returns are measured.
    pub horizons: Vec<usize>,
    /// Horizon whose return decides accuracy.
    pub accuracy_horizon: usize,
    /// Half-width of the extremum window.
    pub extremum_radius: usize,
    pub oscillator_period: usize,
    pub mayer_top_level: f64,
    pub mayer_bottom_level: f64,
    pub overbought_level: f64,
    pub oversold_level: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            horizons: DEFAULT_HORIZONS.to_vec(),
            accuracy_horizon: DEFAULT_ACCURACY_HORIZON,
            extremum_radius: DEFAULT_EXTREMUM_RADIUS,
            oscillator_period: DEFAULT_OSCILLATOR_PERIOD,
            mayer_top_level: 2.4,
            mayer_bottom_level: 0.8,
            overbought_level: 70.0,
            oversold_level: 30.0,
        }
    }
}

/// First and last timestamps of `series` as UTC datetimes.
pub fn data_period(series: &PriceSeries) -> Result<DataPeriod> {
    let to_utc = |ms: i64| {
        DateTime::<Utc>::from_timestamp_millis(ms).ok_or(Error::TimestampOutOfRange(ms))
    };
    Ok(DataPeriod {
        start: to_utc(series.first().time)?,
        end: to_utc(series.last().time)?,
        rows: series.len(),
    })
}

/// Scores every detector over one series.
pub struct Backtester {
    config: BacktestConfig,
}

impl Default for Backtester {
    fn default() -> Self {
        Self::new(BacktestConfig::default())
    }
}

impl Backtester {
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run every detector and evaluate its events.
    pub fn run(&self, series: &PriceSeries, stats: &SeriesStatistics) -> Result<BacktestReport> {
        let data_period = data_period(series)?;

        let ma_111 = window_average(series, stats, pi_cycle::SHORT_WINDOW)?;
        let ma_350_x2 = window_average(series, stats, pi_cycle::LONG_WINDOW)?
            .scaled(pi_cycle::LONG_MULTIPLIER, "ma_350_x2");
        let pi_cycle_top = self.score(
            series,
            detect_crossings(
                series,
                &ma_111,
                Threshold::Series(&ma_350_x2),
                Direction::Rising,
                EventClass::Top,
                EventOrigin::PiCycleCrossover,
            ),
            EventOrigin::PiCycleCrossover,
            EventClass::Top,
        );

        let ma_200 = window_average(series, stats, mayer::WINDOW)?;
        let multiple = mayer::multiple_history(series, &ma_200);
        let mayer_top = self.score(
            series,
            detect_crossings(
                series,
                &multiple,
                Threshold::Level(self.config.mayer_top_level),
                Direction::Rising,
                EventClass::Top,
                EventOrigin::MayerMultiple,
            ),
            EventOrigin::MayerMultiple,
            EventClass::Top,
        );
        let mayer_bottom = self.score(
            series,
            detect_crossings(
                series,
                &multiple,
                Threshold::Level(self.config.mayer_bottom_level),
                Direction::Falling,
                EventClass::Bottom,
                EventOrigin::MayerMultiple,
            ),
            EventOrigin::MayerMultiple,
            EventClass::Bottom,
        );

        let oscillator = if stats.oscillator_period() == self.config.oscillator_period {
            Cow::Borrowed(stats.oscillator())
        } else {
            Cow::Owned(momentum_oscillator(series, self.config.oscillator_period)?)
        };
        let oscillator_overbought = self.score(
            series,
            detect_crossings(
                series,
                &oscillator,
                Threshold::Level(self.config.overbought_level),
                Direction::Rising,
                EventClass::Top,
                EventOrigin::Oscillator,
            ),
            EventOrigin::Oscillator,
            EventClass::Top,
        );
        let oscillator_oversold = self.score(
            series,
            detect_crossings(
                series,
                &oscillator,
                Threshold::Level(self.config.oversold_level),
                Direction::Falling,
                EventClass::Bottom,
                EventOrigin::Oscillator,
            ),
            EventOrigin::Oscillator,
            EventClass::Bottom,
        );

        let extrema = find_extrema(series, self.config.extremum_radius)?;
        let extremum_peaks = self.score(
            series,
            extrema.peaks,
            EventOrigin::Extremum,
            EventClass::Top,
        );
        let extremum_troughs = self.score(
            series,
            extrema.troughs,
            EventOrigin::Extremum,
            EventClass::Bottom,
        );

        let report = BacktestReport {
            data_period,
            pi_cycle_top,
            mayer_top,
            mayer_bottom,
            oscillator_overbought,
            oscillator_oversold,
            extremum_peaks,
            extremum_troughs,
        };

        let total: usize = report.runs().iter().map(|r| r.summary.total_events).sum();
        info!(
            rows = series.len(),
            events = total,
            "Backtest complete"
        );
        Ok(report)
    }

    fn score(
        &self,
        series: &PriceSeries,
        events: Vec<Event>,
        origin: EventOrigin,
        class: EventClass,
    ) -> SignalBacktest {
        debug!("{:?} {:?}: {} events", origin, class, events.len());
        let signals = evaluate(
            series,
            events,
            &self.config.horizons,
            self.config.accuracy_horizon,
        );
        SignalBacktest {
            summary: summarize(origin, class, &signals, &self.config.horizons),
            signals,
        }
    }
}

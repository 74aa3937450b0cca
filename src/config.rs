use crate::error::{Error, Result};
use crate::services::backtester::BacktestConfig;
use crate::services::signals::accuracy::{DEFAULT_ACCURACY_HORIZON, DEFAULT_HORIZONS};
use crate::services::signals::events::DEFAULT_EXTREMUM_RADIUS;
use crate::services::signals::statistics::DEFAULT_OSCILLATOR_PERIOD;
use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Asset JSON files to analyse.
    pub inputs: Vec<PathBuf>,
    /// Forward return horizons in rows.
    pub horizons: Vec<usize>,
    /// Horizon that decides signal accuracy.
    pub accuracy_horizon: usize,
    /// Half-width of the extremum scan window.
    pub extremum_radius: usize,
    /// Momentum oscillator period.
    pub oscillator_period: usize,
    /// Pretty-print the JSON report.
    pub pretty: bool,
    /// Keep the classifiers' historical statistics in the report.
    pub include_history: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        // Comma-separated paths: "btc.json,eth.json"
        let inputs: Vec<PathBuf> = var("CYCLESCOPE_INPUTS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        // Comma-separated row offsets: "30,60,90". Any bad entry keeps the default.
        let horizons = var("CYCLESCOPE_HORIZONS")
            .and_then(|s| {
                s.split(',')
                    .map(|h| h.trim().parse::<usize>().ok())
                    .collect::<Option<Vec<_>>>()
            })
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HORIZONS.to_vec());

        Self {
            inputs,
            horizons,
            accuracy_horizon: var("CYCLESCOPE_ACCURACY_HORIZON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCURACY_HORIZON),
            extremum_radius: var("CYCLESCOPE_EXTREMUM_RADIUS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_EXTREMUM_RADIUS),
            oscillator_period: var("CYCLESCOPE_RSI_PERIOD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_OSCILLATOR_PERIOD),
            pretty: var("CYCLESCOPE_PRETTY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            include_history: var("CYCLESCOPE_INCLUDE_HISTORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.extremum_radius == 0 {
            return Err(Error::Config("extremum radius must be positive".into()));
        }
        if self.oscillator_period == 0 {
            return Err(Error::Config("oscillator period must be positive".into()));
        }
        if self.horizons.iter().any(|&h| h == 0) {
            return Err(Error::Config("horizons must be positive".into()));
        }
        if !self.horizons.contains(&self.accuracy_horizon) {
            return Err(Error::Config(format!(
                "accuracy horizon {} is not one of the horizons {:?}",
                self.accuracy_horizon, self.horizons
            )));
        }
        Ok(())
    }

    /// Backtest settings derived from this configuration.
    pub fn backtest(&self) -> BacktestConfig {
        BacktestConfig {
            horizons: self.horizons.clone(),
            accuracy_horizon: self.accuracy_horizon,
            extremum_radius: self.extremum_radius,
            oscillator_period: self.oscillator_period,
            ..BacktestConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

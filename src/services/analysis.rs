//! Per-asset analysis: load a series, assess it, backtest it.

use crate::error::Result;
use crate::services::backtester::{BacktestConfig, Backtester};
use crate::services::signals::assessment::assess;
use crate::services::signals::statistics::SeriesStatistics;
use crate::types::{AssetReport, PriceSeries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One asset's price history as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInput {
    pub symbol: String,
    /// Validated on deserialization.
    pub points: PriceSeries,
}

/// Read and validate an asset file.
pub fn load_asset(path: impl AsRef<Path>) -> Result<AssetInput> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let input: AssetInput = serde_json::from_str(&raw)?;
    debug!(
        "Loaded {} rows for {} from {}",
        input.points.len(),
        input.symbol,
        path.display()
    );
    Ok(input)
}

/// Classify the latest row and backtest the full history of one asset.
pub fn analyze_asset(input: &AssetInput, config: &BacktestConfig) -> Result<AssetReport> {
    let series = &input.points;
    let stats = SeriesStatistics::compute(series, config.oscillator_period)?;

    let assessment = assess(series, &stats)?;
    let backtest = Backtester::new(config.clone()).run(series, &stats)?;

    info!(
        symbol = %input.symbol,
        rows = series.len(),
        verdict = ?assessment.verdict,
        "Asset analysed"
    );

    Ok(AssetReport {
        symbol: input.symbol.clone(),
        assessment,
        backtest,
    })
}

/// Analyse independent assets in parallel. Output order matches input order.
pub fn analyze_assets(inputs: &[AssetInput], config: &BacktestConfig) -> Vec<Result<AssetReport>> {
    inputs
        .par_iter()
        .map(|input| analyze_asset(input, config))
        .collect()
}

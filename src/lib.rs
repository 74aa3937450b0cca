//! Cyclescope - market-cycle regime classification and signal backtesting

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use services::{analyze_asset, analyze_assets, load_asset, AssetInput, BacktestConfig, Backtester};
pub use services::signals::{assess, SeriesStatistics};

// Re-export commonly used types
pub use types::*;

pub mod analysis;
pub mod backtester;
pub mod signals;

pub use analysis::{analyze_asset, analyze_assets, load_asset, AssetInput};
pub use backtester::{BacktestConfig, Backtester};
pub use signals::{assess, Classifier, SeriesStatistics};

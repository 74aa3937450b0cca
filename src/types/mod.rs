pub mod backtest;
pub mod regime;
pub mod series;

pub use backtest::*;
pub use regime::*;
pub use series::*;

//! Cycle signals service module.
//!
//! Provides rolling statistics, regime classifiers with their threshold
//! ladders, the overall assessment, event scans and forward-return accuracy.

pub mod accuracy;
pub mod assessment;
pub mod classifiers;
pub mod events;
pub mod ladder;
pub mod statistics;

pub use accuracy::{evaluate, forward_returns, is_accurate, percent_return, summarize};
pub use assessment::{assess, tally};
pub use classifiers::{all_classifiers, Classifier};
pub use events::{crossing_indices, detect_crossings, find_extrema, Direction, Extrema, Threshold};
pub use ladder::{Bound, Ladder};
pub use statistics::{momentum_oscillator, moving_average, rolling_mean, SeriesStatistics};

use thiserror::Error;

/// Errors raised by the signal engine and its report driver.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Timestamps must strictly increase: index {index} has {current} after {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Price at index {index} is not a finite number: {price}")]
    NonFinitePrice { index: usize, price: f64 },

    #[error("Timestamp {0} ms is outside the representable date range")]
    TimestampOutOfRange(i64),

    #[error("Window size must be greater than zero")]
    InvalidWindow,

    #[error("Signal price is zero at index {index}, forward return is undefined")]
    ZeroSignalPrice { index: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

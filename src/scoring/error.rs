use std::time::Duration;

use thiserror::Error;

use super::request::{MAX_TIMEOUT, MIN_TIMEOUT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error(
        "timeout must be between {}s and {}s (got {:?})",
        MIN_TIMEOUT.as_secs(),
        MAX_TIMEOUT.as_secs(),
        .0
    )]
    TimeoutOutOfRange(Duration),
    #[error("unknown validation level '{0}', use: syntax|dns|smtp|full")]
    UnknownLevel(String),
    #[error("batch of {0} addresses exceeds the limit of {1}")]
    BatchTooLarge(usize, usize),
}

use std::time::Duration;

use super::error::RequestError;
use super::types::ValidationLevel;

pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest batch accepted in one call by front ends.
pub const MAX_BATCH_SIZE: usize = 100;

/// One validation call: address, depth and per-step network timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub email: String,
    pub level: ValidationLevel,
    pub timeout: Duration,
}

impl ValidationRequest {
    /// Request at `full` level with the default 10 s timeout.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            level: ValidationLevel::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_level(mut self, level: ValidationLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, RequestError> {
        self.timeout = check_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_timeout_secs(self, secs: u64) -> Result<Self, RequestError> {
        self.with_timeout(Duration::from_secs(secs))
    }
}

pub fn check_timeout(timeout: Duration) -> Result<Duration, RequestError> {
    if (MIN_TIMEOUT..=MAX_TIMEOUT).contains(&timeout) {
        Ok(timeout)
    } else {
        Err(RequestError::TimeoutOutOfRange(timeout))
    }
}

pub fn check_batch_size(len: usize) -> Result<(), RequestError> {
    if len > MAX_BATCH_SIZE {
        return Err(RequestError::BatchTooLarge(len, MAX_BATCH_SIZE));
    }
    Ok(())
}

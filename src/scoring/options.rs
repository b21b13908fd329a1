#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::smtp::SmtpProbeOptions;

use super::policy::ScoringPolicy;

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Settings shared by every run of a [`Validator`](super::Validator).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub smtp: SmtpProbeOptions,
    pub policy: ScoringPolicy,
    /// Upper bound on addresses validated at once by `validate_many`.
    pub concurrency: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            smtp: SmtpProbeOptions::default(),
            policy: ScoringPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

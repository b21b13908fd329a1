use std::fmt;
use std::str::FromStr;

use crate::analysis::DeepAnalysisResult;
use crate::dns::DnsResult;
use crate::smtp::SmtpResult;
use crate::validator::SyntaxResult;

use super::error::RequestError;

/// How many pipeline stages run. Ordered: `Syntax < Dns < Smtp < Full`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationLevel {
    Syntax,
    Dns,
    Smtp,
    #[default]
    Full,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Dns => "dns",
            Self::Smtp => "smtp",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "syntax" => Ok(Self::Syntax),
            "dns" => Ok(Self::Dns),
            "smtp" => Ok(Self::Smtp),
            "full" => Ok(Self::Full),
            other => Err(RequestError::UnknownLevel(other.to_string())),
        }
    }
}

/// Risk tier, derived from the final score only.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Invalid,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate verdict for one address. Stage results are present only for
/// the stages that actually ran.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub email: String,
    pub valid: bool,
    pub risk_level: RiskLevel,
    pub score: u8,
    pub syntax: SyntaxResult,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub dns: Option<DnsResult>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub smtp: Option<SmtpResult>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub deep_analysis: Option<DeepAnalysisResult>,
    pub elapsed_time_ms: u64,
    pub message: String,
}

impl ValidationResult {
    pub fn quick(&self) -> QuickCheck {
        QuickCheck::from(self)
    }
}

/// Reduced view of a [`ValidationResult`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickCheck {
    pub email: String,
    pub valid: bool,
    pub score: u8,
    pub risk: RiskLevel,
}

impl From<&ValidationResult> for QuickCheck {
    fn from(result: &ValidationResult) -> Self {
        Self {
            email: result.email.clone(),
            valid: result.valid,
            score: result.score,
            risk: result.risk_level,
        }
    }
}

/// Results of a batch run, in input order.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub results: Vec<ValidationResult>,
}

impl BatchResult {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        Self {
            total: results.len(),
            valid_count,
            invalid_count: results.len() - valid_count,
            results,
        }
    }
}

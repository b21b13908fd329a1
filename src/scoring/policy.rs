#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::DeepAnalysisResult;
use crate::dns::DnsResult;
use crate::smtp::SmtpResult;

use super::types::RiskLevel;

/// Point weights and tier cutoffs used to turn stage evidence into a score.
///
/// Penalties are stored as negative numbers. The defaults give 30 for
/// syntax, 20 for DNS, 30 for SMTP and 20 for deep analysis, with tiers at
/// 80/60/40.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub syntax_valid: i32,
    pub mx_record: i32,
    pub a_record_only: i32,
    pub smtp_connectable: i32,
    pub smtp_accepts_mail: i32,
    pub catch_all: i32,
    pub not_disposable: i32,
    pub disposable: i32,
    pub not_role_account: i32,
    pub role_account: i32,
    pub provider_classified: i32,
    pub low_risk_min: u8,
    pub medium_risk_min: u8,
    pub high_risk_min: u8,
    /// Fixed score when only the syntax stage ran.
    pub syntax_only_score: u8,
    /// Fixed score when the run stopped after DNS.
    pub dns_only_score: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            syntax_valid: 30,
            mx_record: 20,
            a_record_only: 10,
            smtp_connectable: 10,
            smtp_accepts_mail: 20,
            catch_all: -10,
            not_disposable: 10,
            disposable: -20,
            not_role_account: 5,
            role_account: -5,
            provider_classified: 5,
            low_risk_min: 80,
            medium_risk_min: 60,
            high_risk_min: 40,
            syntax_only_score: 50,
            dns_only_score: 60,
        }
    }
}

impl ScoringPolicy {
    /// Tier, validity and headline for a final score.
    pub fn classify(&self, score: u8) -> (RiskLevel, bool, &'static str) {
        if score >= self.low_risk_min {
            (RiskLevel::Low, true, "address verified, high confidence")
        } else if score >= self.medium_risk_min {
            (RiskLevel::Medium, true, "address probably valid, confirmation advised")
        } else if score >= self.high_risk_min {
            (RiskLevel::High, false, "address probably invalid, high risk")
        } else {
            (RiskLevel::Invalid, false, "address invalid")
        }
    }
}

/// Final verdict computed by [`score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub valid: bool,
    pub message: String,
}

/// Weighted score over the evidence of a run that reached the SMTP stage.
/// `deep` is `None` at `smtp` level. The sum is clamped to `[0, 100]` and
/// the message lists every explanatory finding in parentheses.
pub fn score(
    policy: &ScoringPolicy,
    dns: &DnsResult,
    smtp: &SmtpResult,
    deep: Option<&DeepAnalysisResult>,
) -> Scorecard {
    let mut total = policy.syntax_valid;
    let mut notes: Vec<String> = Vec::new();

    if dns.has_mx {
        total += policy.mx_record;
    } else if dns.has_a_record {
        total += policy.a_record_only;
        notes.push("A record used as mail server".to_string());
    }

    if smtp.connectable {
        total += policy.smtp_connectable;
        if smtp.accepts_mail {
            total += policy.smtp_accepts_mail;
        } else {
            notes.push(
                smtp.error
                    .clone()
                    .unwrap_or_else(|| "SMTP verification failed".to_string()),
            );
        }
        if smtp.is_catch_all == Some(true) {
            total += policy.catch_all;
            notes.push("mail server accepts all addresses (catch-all)".to_string());
        }
    } else if let Some(error) = &smtp.error {
        notes.push(format!("mail server unreachable: {error}"));
    }

    if let Some(deep) = deep {
        if deep.is_disposable {
            total += policy.disposable;
            notes.push("disposable/temporary address".to_string());
        } else {
            total += policy.not_disposable;
        }

        if deep.is_role_account {
            total += policy.role_account;
            notes.push("role account".to_string());
        } else {
            total += policy.not_role_account;
        }

        total += policy.provider_classified;
        match (deep.is_free_provider, &deep.provider_name) {
            (true, Some(name)) => notes.push(format!("provider: {name}")),
            (true, None) => {}
            (false, _) => notes.push("possibly a corporate domain".to_string()),
        }
    }

    let score = total.clamp(0, 100) as u8;
    let (risk_level, valid, headline) = policy.classify(score);
    let message = if notes.is_empty() {
        headline.to_string()
    } else {
        format!("{headline} ({})", notes.join("; "))
    };

    Scorecard {
        score,
        risk_level,
        valid,
        message,
    }
}

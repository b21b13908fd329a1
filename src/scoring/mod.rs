//! Pipeline orchestration: runs the stages up to the requested level,
//! short-circuits on failure and turns the evidence into a score.

mod error;
mod options;
mod policy;
mod request;
mod types;

pub use error::RequestError;
pub use options::{DEFAULT_CONCURRENCY, ValidatorConfig};
pub use policy::{Scorecard, ScoringPolicy, score};
pub use request::{
    DEFAULT_TIMEOUT, MAX_BATCH_SIZE, MAX_TIMEOUT, MIN_TIMEOUT, ValidationRequest, check_batch_size,
    check_timeout,
};
pub use types::{BatchResult, QuickCheck, RiskLevel, ValidationLevel, ValidationResult};

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::analysis;
use crate::dns::{self, DnsLookup, SystemResolver};
use crate::smtp;
use crate::validator::{self, SyntaxResult};

/// Runs the validation pipeline. Each call is self-contained; the validator
/// only holds the resolver and read-only configuration.
#[derive(Debug, Clone)]
pub struct Validator<R = SystemResolver> {
    resolver: R,
    config: ValidatorConfig,
}

impl Validator<SystemResolver> {
    /// Uses the system resolver with per-attempt timeouts as long as the
    /// largest request timeout, so the caller's `timeout` is what bounds DNS.
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_resolver(SystemResolver::new(MAX_TIMEOUT), config)
    }
}

impl Default for Validator<SystemResolver> {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl<R: DnsLookup> Validator<R> {
    pub fn with_resolver(resolver: R, config: ValidatorConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub async fn validate_request(&self, request: &ValidationRequest) -> ValidationResult {
        self.validate(&request.email, request.level, request.timeout)
            .await
    }

    /// Validates one address. Every network step is bounded by `timeout`.
    pub async fn validate(
        &self,
        address: &str,
        level: ValidationLevel,
        timeout: Duration,
    ) -> ValidationResult {
        let started = Instant::now();
        let email = validator::normalize(address);
        let parsed = validator::parse(&email);
        let syntax = match &parsed {
            Ok(address) => SyntaxResult::ok(address.clone()),
            Err(err) => SyntaxResult::invalid(err),
        };
        let mut result = ValidationResult {
            email: email.clone(),
            valid: false,
            risk_level: RiskLevel::Invalid,
            score: 0,
            syntax,
            dns: None,
            smtp: None,
            deep_analysis: None,
            elapsed_time_ms: 0,
            message: String::new(),
        };

        let domain = match parsed {
            Ok(address) => address.domain,
            Err(err) => {
                debug!(email = %email, error = %err, "syntax check failed");
                result.message = format!("syntax error: {err}");
                return finish(result, started);
            }
        };

        if level == ValidationLevel::Syntax {
            result.valid = true;
            result.risk_level = RiskLevel::Medium;
            result.score = self.config.policy.syntax_only_score;
            result.message = "syntax check passed; no further verification performed".to_string();
            return finish(result, started);
        }

        let dns_result = dns::resolve_with(&self.resolver, &domain, timeout).await;
        if !dns_result.resolved() {
            let reason = dns_result
                .error
                .clone()
                .unwrap_or_else(|| "no MX record".to_string());
            result.message = format!("DNS check failed: {reason}");
            result.dns = Some(dns_result);
            return finish(result, started);
        }

        if level == ValidationLevel::Dns {
            result.valid = true;
            result.risk_level = RiskLevel::Medium;
            result.score = self.config.policy.dns_only_score;
            result.message = "DNS check passed; SMTP not verified".to_string();
            result.dns = Some(dns_result);
            return finish(result, started);
        }

        let smtp_result = smtp::probe_with_options(
            &email,
            dns_result.mail_hosts(),
            timeout,
            &self.config.smtp,
        )
        .await;

        let deep = (level == ValidationLevel::Full).then(|| analysis::analyze(&email));

        let card = score(&self.config.policy, &dns_result, &smtp_result, deep.as_ref());
        result.valid = card.valid;
        result.risk_level = card.risk_level;
        result.score = card.score;
        result.message = card.message;
        result.dns = Some(dns_result);
        result.smtp = Some(smtp_result);
        result.deep_analysis = deep;
        finish(result, started)
    }

    /// Validates every address with at most `concurrency` runs in flight.
    /// Results keep the input order.
    pub async fn validate_many<S>(
        &self,
        addresses: &[S],
        level: ValidationLevel,
        timeout: Duration,
    ) -> BatchResult
    where
        S: AsRef<str>,
    {
        let results: Vec<ValidationResult> = stream::iter(addresses)
            .map(|address| self.validate(address.as_ref(), level, timeout))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;
        let batch = BatchResult::from_results(results);
        info!(
            total = batch.total,
            valid = batch.valid_count,
            invalid = batch.invalid_count,
            "batch finished"
        );
        batch
    }
}

fn finish(mut result: ValidationResult, started: Instant) -> ValidationResult {
    result.elapsed_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        email = %result.email,
        valid = result.valid,
        score = result.score,
        risk = %result.risk_level,
        "validation finished"
    );
    result
}

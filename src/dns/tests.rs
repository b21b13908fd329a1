use std::time::Duration;

use async_trait::async_trait;

use super::{DnsError, DnsLookup, MxRecord, resolve_with, resolver};

type MxFn = dyn Fn(&str) -> Result<Vec<MxRecord>, DnsError> + Send + Sync;
type AFn = dyn Fn(&str) -> Result<usize, DnsError> + Send + Sync;
type DelayFn = dyn Fn(&str) -> Duration + Send + Sync;

pub(crate) struct StubResolver {
    pub on_mx: Box<MxFn>,
    pub on_a: Box<AFn>,
    pub mx_delay: Option<Box<DelayFn>>,
}

impl StubResolver {
    pub(crate) fn new<M, A>(on_mx: M, on_a: A) -> Self
    where
        M: Fn(&str) -> Result<Vec<MxRecord>, DnsError> + Send + Sync + 'static,
        A: Fn(&str) -> Result<usize, DnsError> + Send + Sync + 'static,
    {
        Self {
            on_mx: Box::new(on_mx),
            on_a: Box::new(on_a),
            mx_delay: None,
        }
    }

    /// Delays every MX answer by `delay`.
    pub(crate) fn with_mx_delay(self, delay: Duration) -> Self {
        self.with_mx_delay_by(move |_| delay)
    }

    /// Delays the MX answer by a per-domain amount.
    pub(crate) fn with_mx_delay_by<F>(mut self, delay: F) -> Self
    where
        F: Fn(&str) -> Duration + Send + Sync + 'static,
    {
        self.mx_delay = Some(Box::new(delay));
        self
    }
}

#[async_trait]
impl DnsLookup for StubResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        if let Some(delay) = &self.mx_delay {
            tokio::time::sleep(delay(domain)).await;
        }
        (self.on_mx)(domain)
    }

    async fn lookup_a(&self, domain: &str) -> Result<usize, DnsError> {
        (self.on_a)(domain)
    }
}

const LIMIT: Duration = Duration::from_secs(5);

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("empty domain should fail");
    assert!(matches!(err, DnsError::EmptyDomain));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.");
    assert_eq!(out, "mail.example.com");
}

#[tokio::test]
async fn mx_hosts_sorted_and_deduplicated() {
    let stub = StubResolver::new(
        |domain| {
            assert_eq!(domain, "example.com");
            Ok(vec![
                MxRecord::new(20, "mx2.example.com"),
                MxRecord::new(10, "mx1.example.com"),
                MxRecord::new(10, "mx1.example.com"),
                MxRecord::new(30, "mx3.example.com"),
            ])
        },
        |_| Ok(1),
    );

    let result = resolve_with(&stub, "example.com", LIMIT).await;
    assert!(result.has_mx);
    assert!(result.has_a_record);
    assert_eq!(
        result.mx_records,
        vec!["mx1.example.com", "mx2.example.com", "mx3.example.com"]
    );
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn a_record_only_uses_domain_as_implicit_mx() {
    let stub = StubResolver::new(|_| Err(DnsError::NoRecords), |_| Ok(2));
    let result = resolve_with(&stub, "example.org", LIMIT).await;
    assert!(!result.has_mx);
    assert!(result.has_a_record);
    assert!(result.uses_implicit_mx());
    assert_eq!(result.mail_hosts(), ["example.org".to_string()]);
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn mx_failure_does_not_abort_a_lookup() {
    let stub = StubResolver::new(|_| Err(DnsError::Lookup("SERVFAIL".into())), |_| Ok(1));
    let result = resolve_with(&stub, "example.net", LIMIT).await;
    assert!(result.has_a_record);
    assert_eq!(result.mx_records, vec!["example.net"]);
    assert_eq!(result.error.as_deref(), Some("DNS lookup failed: SERVFAIL"));
}

#[tokio::test]
async fn a_failure_does_not_abort_mx_lookup() {
    let stub = StubResolver::new(
        |_| Ok(vec![MxRecord::new(5, "mx.example.com")]),
        |_| Err(DnsError::Timeout),
    );
    let result = resolve_with(&stub, "example.com", LIMIT).await;
    assert!(result.has_mx);
    assert!(!result.has_a_record);
    assert_eq!(result.mx_records, vec!["mx.example.com"]);
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn nxdomain_reports_short_error() {
    let stub = StubResolver::new(|_| Err(DnsError::NxDomain), |_| Err(DnsError::NxDomain));
    let result = resolve_with(&stub, "nope.invalid", LIMIT).await;
    assert!(!result.resolved());
    assert!(result.mx_records.is_empty());
    assert_eq!(result.error.as_deref(), Some("domain does not exist"));
}

#[tokio::test(start_paused = true)]
async fn slow_mx_lookup_times_out_independently() {
    let stub = StubResolver::new(
        |_| Ok(vec![MxRecord::new(10, "mx.example.com")]),
        |_| Ok(1),
    )
    .with_mx_delay(Duration::from_secs(60));

    let result = resolve_with(&stub, "example.com", Duration::from_secs(2)).await;
    assert!(!result.has_mx);
    assert!(result.has_a_record);
    assert_eq!(result.error.as_deref(), Some("DNS query timed out"));
    assert_eq!(result.mx_records, vec!["example.com"]);
}

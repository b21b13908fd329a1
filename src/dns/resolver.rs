use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};

use super::{DnsError, MxRecord};

/// Record lookups the DNS stage depends on.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;

    /// Number of A records for `domain`.
    async fn lookup_a(&self, domain: &str) -> Result<usize, DnsError>;
}

/// Async resolver built from the host configuration (`/etc/resolv.conf`),
/// falling back to the default upstream when it cannot be read.
#[derive(Clone)]
pub struct SystemResolver {
    inner: TokioAsyncResolver,
    timeout: Duration,
}

impl SystemResolver {
    /// `timeout` bounds each resolver attempt; two attempts are made.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match trust_dns_resolver::system_conf::read_system_conf() {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "system resolver configuration unavailable, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 2;
        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl std::fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DnsLookup for SystemResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = self.inner.mx_lookup(domain).await?;
        let records = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
            .collect();
        Ok(records)
    }

    async fn lookup_a(&self, domain: &str) -> Result<usize, DnsError> {
        let lookup = self.inner.ipv4_lookup(domain).await?;
        Ok(lookup.iter().count())
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, DnsError> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(DnsError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(DnsError::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

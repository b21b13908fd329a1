//! DNS stage: MX and A lookups for the address domain.
//!
//! The public entry point is [`resolve`]; [`resolve_with`] takes any
//! [`DnsLookup`] implementation and is what the pipeline uses.

mod error;
mod resolver;
mod types;

pub use error::DnsError;
pub use resolver::{DnsLookup, SystemResolver};
pub use types::{DnsResult, MxRecord};

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

/// Resolves `domain` with the host resolver configuration.
pub async fn resolve(domain: &str, limit: Duration) -> DnsResult {
    let resolver = SystemResolver::new(limit);
    resolve_with(&resolver, domain, limit).await
}

/// Runs the MX and A queries concurrently, each bounded by `limit`.
///
/// A failure of one query never cancels the other. MX hosts come back
/// sorted by preference; with no MX but an A record the domain itself is
/// returned as the only host (implicit MX).
pub async fn resolve_with<R>(resolver: &R, domain: &str, limit: Duration) -> DnsResult
where
    R: DnsLookup + ?Sized,
{
    let ascii = match resolver::normalize_domain(domain) {
        Ok(ascii) => ascii,
        Err(err) => {
            return DnsResult {
                error: Some(err.to_string()),
                ..DnsResult::default()
            };
        }
    };

    let (mx, a) = tokio::join!(
        bounded(limit, resolver.lookup_mx(&ascii)),
        bounded(limit, resolver.lookup_a(&ascii)),
    );

    let mut result = DnsResult::default();

    match mx {
        Ok(records) => {
            result.mx_records = sorted_hosts(records);
            result.has_mx = !result.mx_records.is_empty();
        }
        Err(err) => {
            debug!(domain = %ascii, error = %err, "MX lookup failed");
            if err != DnsError::NoRecords {
                result.error = Some(err.to_string());
            }
        }
    }

    match a {
        Ok(count) => result.has_a_record = count > 0,
        Err(err) => {
            debug!(domain = %ascii, error = %err, "A lookup failed");
            if !result.has_mx && result.error.is_none() && !err.is_expected() {
                result.error = Some(err.to_string());
            }
        }
    }

    if result.uses_implicit_mx() {
        result.mx_records = vec![ascii.clone()];
    }

    debug!(
        domain = %ascii,
        has_mx = result.has_mx,
        has_a = result.has_a_record,
        hosts = ?result.mx_records,
        "DNS stage finished"
    );
    result
}

async fn bounded<T, F>(limit: Duration, lookup: F) -> Result<T, DnsError>
where
    F: std::future::Future<Output = Result<T, DnsError>>,
{
    timeout(limit, lookup)
        .await
        .unwrap_or(Err(DnsError::Timeout))
}

fn sorted_hosts(mut records: Vec<MxRecord>) -> Vec<String> {
    records.sort();
    let mut hosts: Vec<String> = Vec::with_capacity(records.len());
    for record in records {
        if !record.exchange.is_empty() && !hosts.contains(&record.exchange) {
            hosts.push(record.exchange);
        }
    }
    hosts
}

#[cfg(test)]
pub(crate) mod tests;

use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed: {0}")]
    Idna(String),
    #[error("domain does not exist")]
    NxDomain,
    #[error("no records found")]
    NoRecords,
    #[error("DNS query timed out")]
    Timeout,
    #[error("DNS lookup failed: {0}")]
    Lookup(String),
}

impl DnsError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::Idna(source.to_string())
    }

    /// NXDOMAIN and empty answers are normal outcomes, not resolver faults.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NxDomain | Self::NoRecords)
    }
}

impl From<ResolveError> for DnsError {
    fn from(err: ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                if *response_code == ResponseCode::NXDomain {
                    Self::NxDomain
                } else {
                    Self::NoRecords
                }
            }
            ResolveErrorKind::Timeout => Self::Timeout,
            _ => Self::Lookup(err.to_string()),
        }
    }
}

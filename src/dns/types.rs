#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Outcome of the DNS stage.
///
/// `mx_records` holds plain hostnames in ascending preference order. When the
/// domain has no MX but does have an A record, it is `[domain]` (implicit MX).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsResult {
    pub has_mx: bool,
    pub mx_records: Vec<String>,
    pub has_a_record: bool,
    pub error: Option<String>,
}

impl DnsResult {
    /// Whether any record usable for mail delivery was found.
    pub fn resolved(&self) -> bool {
        self.has_mx || self.has_a_record
    }

    /// Whether the host list comes from the A-record fallback.
    pub fn uses_implicit_mx(&self) -> bool {
        !self.has_mx && self.has_a_record
    }

    /// Hosts handed to the SMTP stage.
    pub fn mail_hosts(&self) -> &[String] {
        &self.mx_records
    }
}

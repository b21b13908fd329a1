use thiserror::Error;

pub const MAX_ADDRESS_LENGTH: usize = 254;
pub const MAX_LOCAL_LENGTH: usize = 64;
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Outcome of the syntax stage. `local_part`/`domain` are only set when
/// `valid` is true, `error` only when it is false.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxResult {
    pub valid: bool,
    pub local_part: Option<String>,
    pub domain: Option<String>,
    pub error: Option<String>,
}

impl SyntaxResult {
    pub fn ok(address: ParsedAddress) -> Self {
        Self {
            valid: true,
            local_part: Some(address.local_part),
            domain: Some(address.domain),
            error: None,
        }
    }

    pub fn invalid(error: &SyntaxError) -> Self {
        Self {
            valid: false,
            local_part: None,
            domain: None,
            error: Some(error.to_string()),
        }
    }
}

/// A syntactically valid, normalized (trimmed, lower-cased) address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub local_part: String,
    pub domain: String,
}

impl ParsedAddress {
    pub fn address(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }
}

/// First violation found while checking an address, in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("email address must not be empty")]
    Empty,
    #[error("email address too long ({0} > {MAX_ADDRESS_LENGTH})")]
    TooLong(usize),
    #[error("missing '@' separator")]
    MissingAt,
    #[error("local part must not be empty")]
    EmptyLocalPart,
    #[error("local part too long ({0} > {MAX_LOCAL_LENGTH})")]
    LocalPartTooLong(usize),
    #[error("domain must not be empty")]
    EmptyDomain,
    #[error("domain too long ({0} > {MAX_DOMAIN_LENGTH})")]
    DomainTooLong(usize),
    #[error("consecutive dots")]
    ConsecutiveDots,
    #[error("leading or trailing dot")]
    EdgeDot,
    #[error("multiple '@' characters")]
    MultipleAt,
    #[error("contains whitespace")]
    Whitespace,
    #[error("contains forbidden character '{0}'")]
    ForbiddenChar(char),
    #[error("address does not match local-part@domain format")]
    Malformed,
    #[error("invalid domain: {0}")]
    Domain(DomainError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("starts or ends with a dot")]
    EdgeDot,
    #[error("contains consecutive dots")]
    ConsecutiveDots,
    #[error("must contain at least one dot")]
    SingleLabel,
    #[error("top-level label '{0}' must be at least 2 characters")]
    TldTooShort(String),
    #[error("top-level label '{0}' must be alphabetic")]
    TldNotAlphabetic(String),
    #[error("empty label")]
    EmptyLabel,
    #[error("label '{0}' longer than 63 characters")]
    LabelTooLong(String),
    #[error("label '{0}' cannot start/end with '-'")]
    HyphenEdge(String),
    #[error("label '{0}' has invalid characters")]
    InvalidChars(String),
}

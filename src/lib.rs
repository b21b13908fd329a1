#![forbid(unsafe_code)]
//! mailprobe_lib: email address verification without sending mail.
//!
//! Syntax check, DNS (MX/A) resolution, SMTP mailbox probe and heuristic
//! analysis, combined into a score and risk tier by [`Validator`].

pub mod analysis;
pub mod dns;
pub mod scoring;
pub mod smtp;
pub mod validator;

pub use analysis::{DeepAnalysisResult, analyze, is_disposable_domain, is_role_account, provider_name};
pub use dns::{DnsError, DnsLookup, DnsResult, SystemResolver, resolve, resolve_with};
pub use scoring::{
    BatchResult, MAX_BATCH_SIZE, QuickCheck, RequestError, RiskLevel, ScoringPolicy,
    ValidationLevel, ValidationRequest, ValidationResult, Validator, ValidatorConfig,
};
pub use smtp::{SmtpError, SmtpProbeOptions, SmtpResult, probe, probe_with_options};
pub use validator::{ParsedAddress, SyntaxError, SyntaxResult, check, normalize, parse};

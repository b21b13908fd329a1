use std::borrow::Cow;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Controls how [`probe_with_options`](crate::smtp::probe_with_options)
/// talks to mail exchangers.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub port: u16,
    pub helo_domain: Option<String>,
    pub envelope_sender: Option<String>,
    pub max_hosts: usize,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_domain: None,
            envelope_sender: None,
            max_hosts: 3,
        }
    }
}

impl SmtpProbeOptions {
    /// Identity sent with `EHLO`, `localhost` when unset.
    pub fn helo_domain(&self) -> Cow<'_, str> {
        self.helo_domain
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed("localhost"))
    }

    /// Envelope sender for `MAIL FROM`. When unspecified a
    /// `postmaster@domain` placeholder is synthesised.
    pub fn envelope_sender(&self, domain: &str) -> String {
        self.envelope_sender
            .as_ref()
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("postmaster@{domain}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fall_back() {
        let options = SmtpProbeOptions::default();
        assert_eq!(options.port, 25);
        assert_eq!(options.max_hosts, 3);
        assert_eq!(options.helo_domain(), "localhost");
        assert_eq!(options.envelope_sender("example.com"), "postmaster@example.com");
    }

    #[test]
    fn explicit_values_win() {
        let options = SmtpProbeOptions {
            helo_domain: Some("probe.example.net".into()),
            envelope_sender: Some("verify@example.net".into()),
            ..SmtpProbeOptions::default()
        };
        assert_eq!(options.helo_domain(), "probe.example.net");
        assert_eq!(options.envelope_sender("example.com"), "verify@example.net");
    }
}

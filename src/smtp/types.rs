use std::fmt;

/// A raw SMTP reply: status code plus the text of every reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    /// Last status line as seen on the wire, e.g. `550 5.1.1 User unknown`.
    pub fn status_line(&self) -> String {
        match self.lines.last() {
            Some(line) if !line.is_empty() => format!("{} {}", self.code, line),
            _ => self.code.to_string(),
        }
    }
}

/// Commands the prober may issue. There is deliberately no variant for
/// `DATA` or message content: a session can only write what this renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCommand {
    Ehlo(String),
    MailFrom(String),
    RcptTo(String),
    Rset,
    Quit,
}

impl fmt::Display for SmtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ehlo(identity) => write!(f, "EHLO {identity}"),
            Self::MailFrom(sender) => write!(f, "MAIL FROM:<{sender}>"),
            Self::RcptTo(recipient) => write!(f, "RCPT TO:<{recipient}>"),
            Self::Rset => f.write_str("RSET"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}

/// Classification of the reply to `RCPT TO` for the candidate address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcptOutcome {
    /// 250
    Accepted,
    /// 251, user not local but will forward
    Relayed,
    /// 450/451/452
    TemporaryFailure,
    /// 550/551/552/553
    MailboxUnavailable,
    Unrecognized,
}

impl RcptOutcome {
    pub fn classify(code: u16) -> Self {
        match code {
            250 => Self::Accepted,
            251 => Self::Relayed,
            450..=452 => Self::TemporaryFailure,
            550..=553 => Self::MailboxUnavailable,
            _ => Self::Unrecognized,
        }
    }

    pub fn accepts_mail(self) -> bool {
        matches!(self, Self::Accepted | Self::Relayed)
    }
}

/// Outcome of the SMTP stage.
///
/// `is_catch_all` is `None` whenever catch-all behaviour was not probed or
/// the probe itself failed; it is never defaulted to `false`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmtpResult {
    pub connectable: bool,
    pub accepts_mail: bool,
    pub is_catch_all: Option<bool>,
    pub raw_response: Option<String>,
    pub error: Option<String>,
}

impl SmtpResult {
    pub(crate) fn connected() -> Self {
        Self {
            connectable: true,
            ..Self::default()
        }
    }

    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

use thiserror::Error;

/// Transport-level failures that abort the exchange with one host.
#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("no mail server available")]
    NoMailServer,
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{host} timed out during {stage}")]
    Timeout { host: String, stage: &'static str },
    #[error("{host} disconnected during {stage}: {source}")]
    Io {
        host: String,
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{host} sent an unexpected greeting: {reply}")]
    Greeting { host: String, reply: String },
    #[error("protocol error from {host}: {message}")]
    Protocol { host: String, message: String },
}

impl SmtpError {
    pub(crate) fn protocol(host: &str, message: impl Into<String>) -> Self {
        Self::Protocol {
            host: host.to_string(),
            message: message.into(),
        }
    }
}

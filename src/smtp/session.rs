use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::error::SmtpError;
use super::types::{SmtpCommand, SmtpReply};

const MAX_LINE_BYTES: u64 = 4096;
const MAX_REPLY_LINES: usize = 64;

/// One transient SMTP connection. Every network step is bounded by `limit`.
/// After a transport error the session is marked broken and teardown is
/// skipped; the socket closes when the session is dropped.
pub(crate) struct SmtpSession {
    host: String,
    stream: BufReader<TcpStream>,
    limit: Duration,
    broken: bool,
}

impl SmtpSession {
    /// Opens the TCP connection and reads the server greeting.
    pub(crate) async fn connect(
        host: &str,
        port: u16,
        limit: Duration,
    ) -> Result<(Self, SmtpReply), SmtpError> {
        let stream = match timeout(limit, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(SmtpError::Connect {
                    host: host.to_string(),
                    source,
                });
            }
            Err(_) => {
                return Err(SmtpError::Timeout {
                    host: host.to_string(),
                    stage: "connect",
                });
            }
        };

        let mut session = Self {
            host: host.to_string(),
            stream: BufReader::new(stream),
            limit,
            broken: false,
        };

        let greeting = match timeout(limit, session.read_reply()).await {
            Ok(reply) => reply?,
            Err(_) => {
                return Err(SmtpError::Timeout {
                    host: host.to_string(),
                    stage: "greeting",
                });
            }
        };
        debug!(host, code = greeting.code, "greeting received");
        if !greeting.is_positive_completion() {
            return Err(SmtpError::Greeting {
                host: host.to_string(),
                reply: greeting.status_line(),
            });
        }
        Ok((session, greeting))
    }

    /// Writes one command and reads its reply within the step limit.
    pub(crate) async fn send(&mut self, command: &SmtpCommand) -> Result<SmtpReply, SmtpError> {
        let stage = stage_name(command);
        let line = command.to_string();
        debug!(host = %self.host, command = %line, "C");

        let outcome = match timeout(self.limit, self.round_trip(&line, stage)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SmtpError::Timeout {
                host: self.host.clone(),
                stage,
            }),
        };
        match &outcome {
            Ok(reply) => debug!(host = %self.host, code = reply.code, text = %reply.text(), "S"),
            Err(_) => self.broken = true,
        }
        outcome
    }

    /// `RSET` then `QUIT`; failures are swallowed.
    pub(crate) async fn teardown(mut self) {
        for command in [SmtpCommand::Rset, SmtpCommand::Quit] {
            if self.broken {
                return;
            }
            if let Err(err) = self.send(&command).await {
                debug!(host = %self.host, error = %err, "teardown step failed");
            }
        }
    }

    async fn round_trip(&mut self, line: &str, stage: &'static str) -> Result<SmtpReply, SmtpError> {
        let mut data = line.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        let host = &self.host;
        let stream = self.stream.get_mut();
        stream
            .write_all(&data)
            .await
            .map_err(|source| io_error(host, stage, source))?;
        stream
            .flush()
            .await
            .map_err(|source| io_error(host, stage, source))?;
        self.read_reply().await
    }

    async fn read_reply(&mut self) -> Result<SmtpReply, SmtpError> {
        let mut code: Option<u16> = None;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            let parsed_code = line
                .get(..3)
                .and_then(|digits| digits.parse::<u16>().ok())
                .ok_or_else(|| SmtpError::protocol(&self.host, format!("invalid reply: {line}")))?;
            match code {
                Some(existing) if existing != parsed_code => {
                    return Err(SmtpError::protocol(
                        &self.host,
                        format!("inconsistent reply codes: {existing} vs {parsed_code}"),
                    ));
                }
                Some(_) => {}
                None => code = Some(parsed_code),
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            lines.push(line.get(4..).unwrap_or_default().to_string());
            if is_last {
                break;
            }
            if lines.len() >= MAX_REPLY_LINES {
                return Err(SmtpError::protocol(&self.host, "reply has too many lines"));
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or_default(),
            lines,
        })
    }

    async fn read_line(&mut self) -> Result<String, SmtpError> {
        let mut raw = Vec::new();
        let host = &self.host;
        let read = (&mut self.stream)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut raw)
            .await
            .map_err(|source| io_error(host, "reply", source))?;
        if read == 0 {
            return Err(io_error(
                host,
                "reply",
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection closed"),
            ));
        }
        if !raw.ends_with(b"\n") {
            return Err(SmtpError::protocol(host, "reply line too long"));
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn io_error(host: &str, stage: &'static str, source: std::io::Error) -> SmtpError {
    SmtpError::Io {
        host: host.to_string(),
        stage,
        source,
    }
}

fn stage_name(command: &SmtpCommand) -> &'static str {
    match command {
        SmtpCommand::Ehlo(_) => "EHLO",
        SmtpCommand::MailFrom(_) => "MAIL FROM",
        SmtpCommand::RcptTo(_) => "RCPT TO",
        SmtpCommand::Rset => "RSET",
        SmtpCommand::Quit => "QUIT",
    }
}

//! SMTP stage: mailbox existence and catch-all probing without sending mail.
//!
//! The public entry point is [`probe`], which walks the ordered host list,
//! runs a bounded `EHLO`/`MAIL FROM`/`RCPT TO` dialogue and stops at the
//! first host that completes it. A host that connected but then failed
//! still marks the result `connectable`. No message is ever transmitted.

mod error;
mod options;
mod session;
mod types;
mod util;

pub use error::SmtpError;
pub use options::SmtpProbeOptions;
pub use types::{RcptOutcome, SmtpCommand, SmtpReply, SmtpResult};

use std::time::Duration;

use tracing::{debug, warn};

use session::SmtpSession;
use util::random_local_part;

/// Probes `address` against `mx_hosts` with default options (port 25, at
/// most three hosts).
pub async fn probe(address: &str, mx_hosts: &[String], limit: Duration) -> SmtpResult {
    probe_with_options(address, mx_hosts, limit, &SmtpProbeOptions::default()).await
}

/// Identical to [`probe`], with explicit port, EHLO identity, envelope sender
/// and host budget.
pub async fn probe_with_options(
    address: &str,
    mx_hosts: &[String],
    limit: Duration,
    options: &SmtpProbeOptions,
) -> SmtpResult {
    if mx_hosts.is_empty() {
        return SmtpResult::failed(SmtpError::NoMailServer.to_string());
    }
    let Some((_, domain)) = address.rsplit_once('@') else {
        return SmtpResult::failed("address has no domain");
    };

    let mut last_error = None;
    let mut connected = false;
    for host in mx_hosts.iter().take(options.max_hosts.max(1)) {
        let mut session = match SmtpSession::connect(host, options.port, limit).await {
            Ok((session, _greeting)) => session,
            Err(err) => {
                warn!(host = %host, error = %err, "mail exchanger unreachable");
                last_error = Some(err.to_string());
                continue;
            }
        };
        connected = true;

        // Err here is a transport failure mid-dialogue: try the next host.
        let outcome = exchange(&mut session, address, domain, options).await;
        session.teardown().await;
        match outcome {
            Ok(result) => return result,
            Err(err) => {
                warn!(host = %host, error = %err, "mail exchanger dialogue failed");
                last_error = Some(err.to_string());
            }
        }
    }

    let mut result =
        SmtpResult::failed(last_error.unwrap_or_else(|| "all mail servers unreachable".to_string()));
    result.connectable = connected;
    result
}

async fn exchange(
    session: &mut SmtpSession,
    address: &str,
    domain: &str,
    options: &SmtpProbeOptions,
) -> Result<SmtpResult, SmtpError> {
    let mut result = SmtpResult::connected();

    let ehlo = session
        .send(&SmtpCommand::Ehlo(options.helo_domain().into_owned()))
        .await?;
    if !ehlo.is_positive_completion() {
        result.raw_response = Some(ehlo.status_line());
        result.error = Some(format!("EHLO rejected: {}", ehlo.status_line()));
        return Ok(result);
    }

    let mail = session
        .send(&SmtpCommand::MailFrom(options.envelope_sender(domain)))
        .await?;
    if mail.code >= 400 {
        result.raw_response = Some(mail.status_line());
        result.error = Some("MAIL FROM rejected".to_string());
        return Ok(result);
    }

    let rcpt = session
        .send(&SmtpCommand::RcptTo(address.to_string()))
        .await?;
    result.raw_response = Some(rcpt.status_line());

    let outcome = RcptOutcome::classify(rcpt.code);
    result.accepts_mail = outcome.accepts_mail();
    match outcome {
        RcptOutcome::Accepted => {
            result.is_catch_all = probe_catch_all(session, address, domain).await;
        }
        RcptOutcome::Relayed => {}
        RcptOutcome::TemporaryFailure => {
            result.error = Some(format!("temporary failure: {}", rcpt.text()));
        }
        RcptOutcome::MailboxUnavailable => {
            result.error = Some(format!("mailbox does not exist: {}", rcpt.text()));
        }
        RcptOutcome::Unrecognized => {
            result.error = Some(format!("unrecognized response: {}", rcpt.status_line()));
        }
    }
    Ok(result)
}

/// `Some(true)` when an implausible recipient is also accepted with 250,
/// `Some(false)` for any other reply, `None` if the probe itself failed.
async fn probe_catch_all(
    session: &mut SmtpSession,
    address: &str,
    domain: &str,
) -> Option<bool> {
    let mut local = random_local_part(24);
    if address.starts_with(&format!("{local}@")) {
        local.push('x');
    }
    match session
        .send(&SmtpCommand::RcptTo(format!("{local}@{domain}")))
        .await
    {
        Ok(reply) => Some(reply.code == 250),
        Err(err) => {
            debug!(error = %err, "catch-all probe failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;

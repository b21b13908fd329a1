use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::*;

const LIMIT: Duration = Duration::from_secs(5);

/// How the mock treats one accepted connection.
#[derive(Clone)]
pub(crate) enum Session {
    /// Accept then close without a greeting.
    Drop,
    /// Send the greeting, then answer each command with the next scripted
    /// reply. What happens once the script runs out is set by `then`.
    Scripted {
        greeting: &'static str,
        replies: Vec<&'static str>,
        then: Exhausted,
    },
    /// Send a greeting and never answer anything.
    Silent,
}

/// Behaviour of a scripted session after its last reply.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exhausted {
    /// `250 OK`, or `221` for QUIT.
    Default,
    /// Close the connection.
    Hangup,
    /// Keep reading, never answer.
    Stall,
}

impl Session {
    pub(crate) fn script(replies: Vec<&'static str>) -> Self {
        Self::script_then(replies, Exhausted::Default)
    }

    pub(crate) fn script_then(replies: Vec<&'static str>, then: Exhausted) -> Self {
        Self::Scripted {
            greeting: "220 mock.smtp.test ESMTP\r\n",
            replies,
            then,
        }
    }
}

pub(crate) struct MockServer {
    pub port: u16,
    pub handle: JoinHandle<Vec<String>>,
    pub accepted: Arc<AtomicUsize>,
}

/// Loopback SMTP server playing `sessions` in order and recording every
/// command line it receives.
pub(crate) async fn spawn_mock_server(sessions: Vec<Session>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    let handle = tokio::spawn(async move {
        let mut received = Vec::new();
        for session in sessions {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let (reader, mut writer) = stream.into_split();
            let mut reader = BufReader::new(reader);
            match session {
                Session::Drop => drop(writer),
                Session::Silent => {
                    writer.write_all(b"220 silent ESMTP\r\n").await.ok();
                    let mut line = String::new();
                    while reader.read_line(&mut line).await.is_ok_and(|n| n > 0) {
                        received.push(line.trim_end().to_string());
                        line.clear();
                    }
                }
                Session::Scripted {
                    greeting,
                    replies,
                    then,
                } => {
                    let mut replies: VecDeque<&str> = replies.into();
                    writer.write_all(greeting.as_bytes()).await.ok();
                    let mut line = String::new();
                    while reader.read_line(&mut line).await.is_ok_and(|n| n > 0) {
                        let command = line.trim_end().to_string();
                        line.clear();
                        let is_quit = command.eq_ignore_ascii_case("QUIT");
                        received.push(command);
                        let reply = match (replies.pop_front(), then) {
                            (Some(reply), _) => reply,
                            (None, Exhausted::Hangup) => break,
                            (None, Exhausted::Stall) => continue,
                            (None, Exhausted::Default) if is_quit => "221 Bye\r\n",
                            (None, Exhausted::Default) => "250 OK\r\n",
                        };
                        if writer.write_all(reply.as_bytes()).await.is_err() || is_quit {
                            break;
                        }
                    }
                }
            }
        }
        received
    });

    MockServer {
        port,
        handle,
        accepted,
    }
}

fn options(port: u16) -> SmtpProbeOptions {
    SmtpProbeOptions {
        port,
        helo_domain: Some("probe.test".into()),
        envelope_sender: Some("verify@probe.test".into()),
        ..SmtpProbeOptions::default()
    }
}

fn local_hosts(n: usize) -> Vec<String> {
    vec!["127.0.0.1".to_string(); n]
}

fn assert_no_data(commands: &[String]) {
    assert!(
        commands
            .iter()
            .all(|c| !c.to_ascii_uppercase().starts_with("DATA")),
        "DATA must never be sent: {commands:?}"
    );
}

#[tokio::test]
async fn empty_host_list_fails_immediately() {
    let result = probe("user@example.com", &[], LIMIT).await;
    assert!(!result.connectable);
    assert_eq!(result.error.as_deref(), Some("no mail server available"));
    assert_eq!(result.is_catch_all, None);
}

#[tokio::test]
async fn accepted_mailbox_on_strict_server() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250-mock.smtp.test\r\n250 SIZE 1000000\r\n",
        "250 2.1.0 Ok\r\n",
        "250 2.1.5 Ok\r\n",
        "550 5.1.1 User unknown\r\n",
        "250 2.0.0 Reset\r\n",
        "221 2.0.0 Bye\r\n",
    ])])
    .await;

    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(result.accepts_mail);
    assert_eq!(result.is_catch_all, Some(false));
    assert_eq!(result.raw_response.as_deref(), Some("250 2.1.5 Ok"));
    assert_eq!(result.error, None);

    let commands = server.handle.await.expect("server task");
    assert_eq!(commands[0], "EHLO probe.test");
    assert_eq!(commands[1], "MAIL FROM:<verify@probe.test>");
    assert_eq!(commands[2], "RCPT TO:<user@example.com>");
    assert!(commands[3].starts_with("RCPT TO:<nx-") && commands[3].ends_with("@example.com>"));
    assert_eq!(&commands[4..], ["RSET", "QUIT"]);
    assert_no_data(&commands);
}

#[tokio::test]
async fn catch_all_detected() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "250 Ok\r\n",
        "250 Ok\r\n",
        "250 Ok\r\n",
    ])])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.accepts_mail);
    assert_eq!(result.is_catch_all, Some(true));
    assert_no_data(&server.handle.await.expect("server task"));
}

#[tokio::test]
async fn relayed_recipient_accepts_without_catch_all_probe() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "250 Ok\r\n",
        "251 User not local; will forward\r\n",
    ])])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.accepts_mail);
    assert_eq!(result.is_catch_all, None);
    let commands = server.handle.await.expect("server task");
    assert_eq!(commands.iter().filter(|c| c.starts_with("RCPT")).count(), 1);
    assert_eq!(&commands[3..], ["RSET", "QUIT"]);
}

#[tokio::test]
async fn permanent_rejection_reports_missing_mailbox() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "250 Ok\r\n",
        "550 5.1.1 User unknown\r\n",
    ])])
    .await;
    let result =
        probe_with_options("ghost@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(result.is_catch_all, None);
    assert_eq!(
        result.error.as_deref(),
        Some("mailbox does not exist: 5.1.1 User unknown")
    );
    assert_eq!(result.raw_response.as_deref(), Some("550 5.1.1 User unknown"));
    assert_no_data(&server.handle.await.expect("server task"));
}

#[tokio::test]
async fn temporary_failure_is_not_a_rejection() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "250 Ok\r\n",
        "451 4.7.1 Greylisted, try later\r\n",
    ])])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(
        result.error.as_deref(),
        Some("temporary failure: 4.7.1 Greylisted, try later")
    );
}

#[tokio::test]
async fn unrecognized_rcpt_code() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "250 Ok\r\n",
        "554 Transaction failed\r\n",
    ])])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(!result.accepts_mail);
    assert_eq!(
        result.error.as_deref(),
        Some("unrecognized response: 554 Transaction failed")
    );
}

#[tokio::test]
async fn mail_from_rejection_stops_before_rcpt() {
    let server = spawn_mock_server(vec![Session::script(vec![
        "250 mock\r\n",
        "553 Sender rejected\r\n",
    ])])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(result.error.as_deref(), Some("MAIL FROM rejected"));
    assert_eq!(result.raw_response.as_deref(), Some("553 Sender rejected"));
    let commands = server.handle.await.expect("server task");
    assert!(commands.iter().all(|c| !c.starts_with("RCPT")));
    assert_eq!(&commands[2..], ["RSET", "QUIT"]);
}

#[tokio::test]
async fn falls_through_to_next_host_after_transport_error() {
    let server = spawn_mock_server(vec![
        Session::Drop,
        Session::script(vec!["250 mock\r\n", "250 Ok\r\n", "251 forward\r\n"]),
    ])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(2), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(result.accepts_mail);
    assert_eq!(server.accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn tries_at_most_three_hosts_and_keeps_last_error() {
    let server = spawn_mock_server(vec![Session::Drop; 4]).await;
    let result =
        probe_with_options("user@example.com", &local_hosts(5), LIMIT, &options(server.port)).await;
    assert!(!result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(result.is_catch_all, None);
    let error = result.error.expect("error recorded");
    assert!(error.contains("127.0.0.1"), "{error}");
    assert_eq!(server.accepted.load(Ordering::SeqCst), 3);
    server.handle.abort();
}

#[tokio::test]
async fn refused_connection_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let result = probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(port)).await;
    assert!(!result.connectable);
    let error = result.error.expect("error recorded");
    assert!(error.starts_with("connection to 127.0.0.1 failed"), "{error}");
}

#[tokio::test]
async fn silent_server_times_out() {
    let server = spawn_mock_server(vec![Session::Silent]).await;
    let result = probe_with_options(
        "user@example.com",
        &local_hosts(1),
        Duration::from_millis(300),
        &options(server.port),
    )
    .await;
    assert!(result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(
        result.error.as_deref(),
        Some("127.0.0.1 timed out during EHLO")
    );
    server.handle.abort();
}

#[tokio::test]
async fn stalled_rcpt_keeps_host_connectable() {
    let server = spawn_mock_server(vec![Session::script_then(
        vec!["250 mock\r\n", "250 Ok\r\n"],
        Exhausted::Stall,
    )])
    .await;
    let result = probe_with_options(
        "user@example.com",
        &local_hosts(1),
        Duration::from_millis(300),
        &options(server.port),
    )
    .await;
    assert!(result.connectable);
    assert!(!result.accepts_mail);
    assert_eq!(result.is_catch_all, None);
    assert_eq!(
        result.error.as_deref(),
        Some("127.0.0.1 timed out during RCPT TO")
    );
    let commands = server.handle.await.expect("server task");
    assert_eq!(commands.last().map(String::as_str), Some("RCPT TO:<user@example.com>"));
    assert_no_data(&commands);
}

#[tokio::test]
async fn stalled_host_falls_through_to_next() {
    let server = spawn_mock_server(vec![
        Session::script_then(vec!["250 mock\r\n", "250 Ok\r\n"], Exhausted::Stall),
        Session::script(vec!["250 mock\r\n", "250 Ok\r\n", "251 forward\r\n"]),
    ])
    .await;
    let result = probe_with_options(
        "user@example.com",
        &local_hosts(2),
        Duration::from_millis(300),
        &options(server.port),
    )
    .await;
    assert!(result.connectable);
    assert!(result.accepts_mail);
    assert_eq!(result.error, None);
    assert_eq!(server.accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn catch_all_check_cut_short_stays_undetermined() {
    let server = spawn_mock_server(vec![Session::script_then(
        vec!["250 mock\r\n", "250 Ok\r\n", "250 2.1.5 Ok\r\n"],
        Exhausted::Hangup,
    )])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(result.connectable);
    assert!(result.accepts_mail);
    assert_eq!(result.is_catch_all, None);
    assert_eq!(result.error, None);
    assert_eq!(result.raw_response.as_deref(), Some("250 2.1.5 Ok"));

    let commands = server.handle.await.expect("server task");
    assert_eq!(commands.len(), 4);
    assert!(commands[3].starts_with("RCPT TO:<nx-"));
    assert_no_data(&commands);
}

#[tokio::test]
async fn rejecting_greeting_moves_on() {
    let server = spawn_mock_server(vec![Session::Scripted {
        greeting: "554 No SMTP service here\r\n",
        replies: Vec::new(),
        then: Exhausted::Default,
    }])
    .await;
    let result =
        probe_with_options("user@example.com", &local_hosts(1), LIMIT, &options(server.port)).await;
    assert!(!result.connectable);
    assert_eq!(
        result.error.as_deref(),
        Some("127.0.0.1 sent an unexpected greeting: 554 No SMTP service here")
    );
    server.handle.abort();
}

#[test]
fn rcpt_classification() {
    assert_eq!(RcptOutcome::classify(250), RcptOutcome::Accepted);
    assert_eq!(RcptOutcome::classify(251), RcptOutcome::Relayed);
    for code in [450, 451, 452] {
        assert_eq!(RcptOutcome::classify(code), RcptOutcome::TemporaryFailure);
    }
    for code in [550, 551, 552, 553] {
        assert_eq!(RcptOutcome::classify(code), RcptOutcome::MailboxUnavailable);
    }
    assert_eq!(RcptOutcome::classify(554), RcptOutcome::Unrecognized);
    assert_eq!(RcptOutcome::classify(421), RcptOutcome::Unrecognized);
}

#[test]
fn command_rendering_has_no_data_variant() {
    let rendered: Vec<String> = [
        SmtpCommand::Ehlo("probe.test".into()),
        SmtpCommand::MailFrom("a@b.test".into()),
        SmtpCommand::RcptTo("c@d.test".into()),
        SmtpCommand::Rset,
        SmtpCommand::Quit,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(
        rendered,
        [
            "EHLO probe.test",
            "MAIL FROM:<a@b.test>",
            "RCPT TO:<c@d.test>",
            "RSET",
            "QUIT"
        ]
    );
}

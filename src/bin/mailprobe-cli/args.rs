use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use mailprobe_lib::scoring::check_timeout;
use mailprobe_lib::{ScoringPolicy, SmtpProbeOptions, ValidationLevel, ValidatorConfig};

#[derive(Parser)]
#[command(name = "mailprobe-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// read addresses from stdin (one per line)
    #[arg(long, global = true)]
    pub stdin: bool,

    /// write the report to a file (json/ndjson/csv)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, global = true, default_value = "human")]
    pub format: String,

    /// level: syntax|dns|smtp|full
    #[arg(long, global = true, default_value = "full")]
    pub level: String,

    /// per-step network timeout in seconds (1-30)
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// addresses validated at once
    #[arg(long, global = true, default_value_t = mailprobe_lib::scoring::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// identity sent with EHLO
    #[arg(long, global = true)]
    pub helo: Option<String>,

    /// envelope sender for MAIL FROM (defaults to postmaster@<domain>)
    #[arg(long = "from", global = true)]
    pub mail_from: Option<String>,

    /// SMTP port of the mail exchangers
    #[arg(long, global = true, default_value_t = 25)]
    pub port: u16,

    /// scoring policy JSON file (feature `with-serde`)
    #[arg(long, global = true)]
    pub policy: Option<String>,

    /// more logging on stderr (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// full verdict per address
    Validate { emails: Vec<String> },
    /// email, valid, score and risk only
    Quick { emails: Vec<String> },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn quick(&self) -> bool {
        matches!(self.cmd, Some(Commands::Quick { .. }))
    }

    /// Addresses given on the command line, in order.
    pub fn emails(&self) -> &[String] {
        match &self.cmd {
            Some(Commands::Validate { emails }) | Some(Commands::Quick { emails }) => emails,
            None => &[],
        }
    }

    pub fn parsed_level(&self) -> Result<ValidationLevel> {
        self.level
            .parse()
            .with_context(|| format!("invalid --level '{}'", self.level))
    }

    pub fn parsed_timeout(&self) -> Result<Duration> {
        Ok(check_timeout(Duration::from_secs(self.timeout))?)
    }

    pub fn validator_config(&self) -> Result<ValidatorConfig> {
        if self.concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }
        Ok(ValidatorConfig {
            smtp: SmtpProbeOptions {
                port: self.port,
                helo_domain: self.helo.clone(),
                envelope_sender: self.mail_from.clone(),
                ..SmtpProbeOptions::default()
            },
            policy: self.load_policy()?,
            concurrency: self.concurrency,
        })
    }

    #[cfg(feature = "with-serde")]
    fn load_policy(&self) -> Result<ScoringPolicy> {
        let Some(path) = &self.policy else {
            return Ok(ScoringPolicy::default());
        };
        let raw = std::fs::read_to_string(path).with_context(|| format!("read policy {path}"))?;
        serde_json::from_str(&raw).with_context(|| format!("parse policy {path}"))
    }

    #[cfg(not(feature = "with-serde"))]
    fn load_policy(&self) -> Result<ScoringPolicy> {
        if self.policy.is_some() {
            bail!("--policy requires the 'with-serde' feature");
        }
        Ok(ScoringPolicy::default())
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

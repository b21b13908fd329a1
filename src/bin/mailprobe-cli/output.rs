use anyhow::{Result, bail};

use crate::args::Cli;
use mailprobe_lib::ValidationResult;

pub fn write_reports(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows, cli),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[ValidationResult]) -> bool {
    rows.iter().any(|row| !row.valid)
}

fn write_human(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    if cli.out.is_some() {
        bail!("--out requires --format json, ndjson or csv");
    }
    for row in rows {
        let tag = if row.valid { "[OK]     " } else { "[INVALID]" };
        println!(
            "{tag} {} score={} risk={}",
            row.email, row.score, row.risk_level
        );
        if cli.quick() {
            continue;
        }
        println!("          {}", row.message);
        if let Some(dns) = &row.dns {
            if !dns.mx_records.is_empty() {
                println!("          mx: {}", dns.mx_records.join(", "));
            }
        }
        if let Some(smtp) = &row.smtp {
            if let Some(reply) = &smtp.raw_response {
                println!("          smtp: {reply}");
            }
        }
        if let Some(deep) = &row.deep_analysis {
            for note in &deep.suggestions {
                println!("          note: {note}");
            }
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    let payload = if cli.quick() {
        let quick: Vec<_> = rows.iter().map(ValidationResult::quick).collect();
        serde_json::to_string_pretty(&quick)?
    } else {
        serde_json::to_string_pretty(&mailprobe_lib::BatchResult::from_results(rows.to_vec()))?
    };
    match &cli.out {
        Some(path) => write_all_atomically(path, payload.as_bytes()),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_rows: &[ValidationResult], _cli: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    let mut buf = Vec::new();
    for row in rows {
        let line = if cli.quick() {
            serde_json::to_string(&row.quick())?
        } else {
            serde_json::to_string(row)?
        };
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
    }
    match &cli.out {
        Some(path) => write_all_atomically(path, &buf),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&buf)?;
            Ok(())
        }
    }
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_rows: &[ValidationResult], _cli: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if cli.quick() {
        wtr.write_record(["email", "valid", "score", "risk"])?;
        for row in rows {
            let quick = row.quick();
            wtr.write_record([
                quick.email,
                quick.valid.to_string(),
                quick.score.to_string(),
                quick.risk.to_string(),
            ])?;
        }
    } else {
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
    }
    let data = wtr.into_inner()?;
    match &cli.out {
        Some(path) => write_all_atomically(path, &data),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&data)?;
            Ok(())
        }
    }
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_rows: &[ValidationResult], _cli: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 14] = [
    "email",
    "valid",
    "score",
    "risk",
    "has_mx",
    "mx_records",
    "connectable",
    "accepts_mail",
    "is_catch_all",
    "disposable",
    "role_account",
    "provider",
    "elapsed_ms",
    "message",
];

#[cfg(feature = "with-csv")]
fn csv_record(row: &ValidationResult) -> [String; 14] {
    fn flag(value: Option<bool>) -> String {
        match value {
            Some(true) => "true".into(),
            Some(false) => "false".into(),
            None => String::new(),
        }
    }

    let dns = row.dns.as_ref();
    let smtp = row.smtp.as_ref();
    let deep = row.deep_analysis.as_ref();
    [
        row.email.clone(),
        row.valid.to_string(),
        row.score.to_string(),
        row.risk_level.to_string(),
        flag(dns.map(|d| d.has_mx)),
        dns.map(|d| d.mx_records.join("|")).unwrap_or_default(),
        flag(smtp.map(|s| s.connectable)),
        flag(smtp.map(|s| s.accepts_mail)),
        flag(smtp.and_then(|s| s.is_catch_all)),
        flag(deep.map(|d| d.is_disposable)),
        flag(deep.map(|d| d.is_role_account)),
        deep.and_then(|d| d.provider_name.clone()).unwrap_or_default(),
        row.elapsed_time_ms.to_string(),
        row.message.clone(),
    ]
}

#[cfg(feature = "with-serde")]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use anyhow::Context;
    use std::io::Write;
    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

//! Heuristic analysis: disposable domains, free providers, role accounts and
//! machine-generated local parts. Pure and table-driven, no I/O.

mod heuristics;
mod tables;

pub use heuristics::{is_disposable_domain, is_role_account, looks_random, provider_name};

/// Findings of the deep-analysis stage. `suggestions` are display notes in
/// the order they were found.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepAnalysisResult {
    pub is_disposable: bool,
    pub is_role_account: bool,
    pub is_free_provider: bool,
    pub provider_name: Option<String>,
    pub suggestions: Vec<String>,
}

pub fn analyze(address: &str) -> DeepAnalysisResult {
    let mut result = DeepAnalysisResult::default();
    let address = address.trim().to_lowercase();
    let Some((local, domain)) = address.split_once('@') else {
        return result;
    };

    result.is_disposable = is_disposable_domain(domain);
    if result.is_disposable {
        result
            .suggestions
            .push("disposable or temporary address, may stop working soon".to_string());
    }

    match provider_name(domain) {
        Some(name) => {
            result.is_free_provider = true;
            result.provider_name = Some(name.to_string());
        }
        None if !result.is_disposable => {
            result
                .suggestions
                .push("possibly a corporate or organizational domain".to_string());
        }
        None => {}
    }

    result.is_role_account = is_role_account(local);
    if result.is_role_account {
        result
            .suggestions
            .push("shared role account rather than a personal mailbox".to_string());
    }

    if local.chars().count() < 3 {
        result
            .suggestions
            .push("local part is very short, low confidence".to_string());
    }
    if local.bytes().all(|b| b.is_ascii_digit()) {
        result.suggestions.push("local part is all digits".to_string());
    }
    if looks_random(local) {
        result
            .suggestions
            .push("local part looks randomly generated".to_string());
    }

    result
}

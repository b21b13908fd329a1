use super::tables::{DISPOSABLE_DOMAINS, DISPOSABLE_KEYWORDS, FREE_PROVIDERS, ROLE_PREFIXES};

/// Listed domain, subdomain of a listed domain, or a throwaway keyword.
pub fn is_disposable_domain(domain: &str) -> bool {
    let domain = domain.trim().to_ascii_lowercase();

    let mut candidate = domain.as_str();
    loop {
        if DISPOSABLE_DOMAINS.contains(candidate) {
            return true;
        }
        match candidate.split_once('.') {
            Some((_, parent)) if parent.contains('.') => candidate = parent,
            _ => break,
        }
    }

    DISPOSABLE_KEYWORDS.iter().any(|keyword| domain.contains(keyword))
}

pub fn provider_name(domain: &str) -> Option<&'static str> {
    FREE_PROVIDERS
        .get(domain.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Exact role prefix, or a role prefix followed only by digits (`admin1`).
pub fn is_role_account(local_part: &str) -> bool {
    let local = local_part.to_ascii_lowercase();
    if ROLE_PREFIXES.contains(local.as_str()) {
        return true;
    }
    ROLE_PREFIXES.iter().any(|prefix| {
        local
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// Flags local parts that look machine generated once `.`, `_` and `-` are
/// removed: at least 8 chars with under 15% vowels, or at least 10 chars
/// with more than 40% digits.
pub fn looks_random(local_part: &str) -> bool {
    let cleaned: Vec<char> = local_part
        .chars()
        .filter(|c| !matches!(c, '.' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let len = cleaned.len();
    if len < 8 {
        return false;
    }

    let vowels = cleaned.iter().filter(|c| "aeiou".contains(**c)).count();
    if (vowels as f64) < len as f64 * 0.15 {
        return true;
    }

    let digits = cleaned.iter().filter(|c| c.is_ascii_digit()).count();
    len >= 10 && digits as f64 > len as f64 * 0.4
}

use super::types::DomainError;

/// Domain grammar: dot-separated labels (1..=63 chars, alphanumeric plus
/// internal hyphens) ending in an alphabetic TLD of at least 2 characters.
/// Returns the first violation.
pub(crate) fn check_domain(domain: &str) -> Result<(), DomainError> {
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::EdgeDot);
    }
    if domain.contains("..") {
        return Err(DomainError::ConsecutiveDots);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(DomainError::SingleLabel);
    }

    // labels.len() >= 2 so last() is always present
    let tld = labels[labels.len() - 1];
    if tld.chars().count() < 2 {
        return Err(DomainError::TldTooShort(tld.to_string()));
    }
    if !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::TldNotAlphabetic(tld.to_string()));
    }

    for label in labels {
        if label.is_empty() {
            return Err(DomainError::EmptyLabel);
        }
        if label.len() > 63 {
            return Err(DomainError::LabelTooLong(label.to_string()));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainError::HyphenEdge(label.to_string()));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::InvalidChars(label.to_string()));
        }
    }
    Ok(())
}

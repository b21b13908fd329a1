use super::types::SyntaxError;

const FORBIDDEN: &[char] = &['<', '>', '(', ')', '[', ']', ':', ';', ',', '\\'];

/// Scans the whole (normalized) address for patterns that are never valid.
/// Checks run in a fixed order and the first hit is reported.
pub(crate) fn scan_invalid_patterns(address: &str) -> Result<(), SyntaxError> {
    if address.contains("..") {
        return Err(SyntaxError::ConsecutiveDots);
    }
    if address.starts_with('.') || address.ends_with('.') {
        return Err(SyntaxError::EdgeDot);
    }
    if address.matches('@').count() > 1 {
        return Err(SyntaxError::MultipleAt);
    }
    if address.chars().any(char::is_whitespace) {
        return Err(SyntaxError::Whitespace);
    }
    if let Some(c) = address.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(SyntaxError::ForbiddenChar(c));
    }
    Ok(())
}

/// Dot-atom restricted to `[a-z0-9._%+-]`, no leading/trailing dot.
pub(crate) fn is_local_strict(s: &str) -> bool {
    if s.is_empty() || s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
}

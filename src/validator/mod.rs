//! Syntax checking and normalization of email addresses.
//!
//! This stage is pure and authoritative: every later stage assumes the
//! address went through [`parse`] successfully.

mod domain;
mod local;
mod types;

pub use types::{
    DomainError, MAX_ADDRESS_LENGTH, MAX_DOMAIN_LENGTH, MAX_LOCAL_LENGTH, ParsedAddress,
    SyntaxError, SyntaxResult,
};

use once_cell::sync::Lazy;
use regex::Regex;

use domain::check_domain;
use local::{is_local_strict, scan_invalid_patterns};

static SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("static regex is valid")
});

/// Trims surrounding whitespace and lower-cases the address.
pub fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Checks `raw` and returns the stage result consumed by the pipeline.
pub fn check(raw: &str) -> SyntaxResult {
    match parse(raw) {
        Ok(parsed) => SyntaxResult::ok(parsed),
        Err(err) => SyntaxResult::invalid(&err),
    }
}

/// Validates `raw` and splits it into normalized local part and domain.
///
/// Checks run in a fixed order (emptiness, lengths, structural split,
/// invalid-pattern scan, overall shape, domain grammar); the first
/// violation is returned.
pub fn parse(raw: &str) -> Result<ParsedAddress, SyntaxError> {
    let address = normalize(raw);
    if address.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let total = address.chars().count();
    if total > MAX_ADDRESS_LENGTH {
        return Err(SyntaxError::TooLong(total));
    }

    let (local, domain) = address.rsplit_once('@').ok_or(SyntaxError::MissingAt)?;
    if local.is_empty() {
        return Err(SyntaxError::EmptyLocalPart);
    }
    let local_len = local.chars().count();
    if local_len > MAX_LOCAL_LENGTH {
        return Err(SyntaxError::LocalPartTooLong(local_len));
    }
    if domain.is_empty() {
        return Err(SyntaxError::EmptyDomain);
    }
    let domain_len = domain.chars().count();
    if domain_len > MAX_DOMAIN_LENGTH {
        return Err(SyntaxError::DomainTooLong(domain_len));
    }

    scan_invalid_patterns(&address)?;

    if !SHAPE.is_match(&address) {
        return Err(SyntaxError::Malformed);
    }
    if !is_local_strict(local) {
        return Err(SyntaxError::EdgeDot);
    }

    check_domain(domain).map_err(SyntaxError::Domain)?;

    Ok(ParsedAddress {
        local_part: local.to_string(),
        domain: domain.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "user@example.com",
            "user.name@example.com",
            "user+tag@example.com",
            "user123@example.co.uk",
            "user_name@subdomain.example.org",
            "123@example.com",
            "user@mail.example.com",
        ] {
            let r = check(email);
            assert!(r.valid, "{email}: {:?}", r.error);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "   ",
            "notanemail",
            "@example.com",
            "user@",
            "user@@example.com",
            "user@.com",
            "user@example.",
            "user@example..com",
            "user name@example.com",
            "user@example",
            "user.@example.com",
            "<user>@example.com",
        ] {
            let r = check(email);
            assert!(!r.valid, "{email} should be invalid");
            assert!(r.error.as_deref().is_some_and(|e| !e.is_empty()));
            assert!(r.local_part.is_none() && r.domain.is_none());
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize(" User@Example.COM "), "user@example.com");
        let parsed = parse("  John.Doe@Example.COM ").expect("valid");
        assert_eq!(parsed.local_part, "john.doe");
        assert_eq!(parsed.domain, "example.com");
        assert_eq!(parsed.address(), "john.doe@example.com");
    }

    #[test]
    fn check_order_is_fixed() {
        // too long wins over missing '@'
        let long = "a".repeat(300);
        assert_eq!(parse(&long), Err(SyntaxError::TooLong(300)));
        assert_eq!(parse("noatsign"), Err(SyntaxError::MissingAt));
        // structural split precedes the pattern scan
        assert_eq!(parse("a..b@"), Err(SyntaxError::EmptyDomain));
        assert_eq!(
            parse("a@-bad.com"),
            Err(SyntaxError::Domain(DomainError::HyphenEdge("-bad".into())))
        );
    }

    #[test]
    fn length_limits() {
        let local = "a".repeat(65);
        assert_eq!(
            parse(&format!("{local}@example.com")),
            Err(SyntaxError::LocalPartTooLong(65))
        );
        let ok_local = "a".repeat(64);
        assert!(parse(&format!("{ok_local}@example.com")).is_ok());
    }

    #[test]
    fn error_messages_are_readable() {
        insta::assert_snapshot!(check("user@@example.com").error.unwrap_or_default(), @"multiple '@' characters");
        insta::assert_snapshot!(check("user@example.c").error.unwrap_or_default(), @"address does not match local-part@domain format");
        insta::assert_snapshot!(check("user@example.c0m").error.unwrap_or_default(), @"address does not match local-part@domain format");
    }

    proptest! {
        #[test]
        fn addresses_without_at_are_invalid(s in "[a-zA-Z0-9._ -]{0,80}") {
            let r = check(&s);
            prop_assert!(!r.valid);
            prop_assert!(r.error.is_some_and(|e| !e.is_empty()));
        }

        #[test]
        fn consecutive_dots_are_invalid(a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
            let in_local = format!("{a}..{b}@example.com");
            let in_domain = format!("{a}@{b}..example.com");
            prop_assert!(!check(&in_local).valid);
            prop_assert!(!check(&in_domain).valid);
        }

        #[test]
        fn overlong_local_parts_are_invalid(n in 65usize..120) {
            let r = check(&format!("{}@example.com", "x".repeat(n)));
            prop_assert!(!r.valid);
        }
    }
}

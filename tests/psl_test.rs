//! Public Suffix List (PSL) integration tests.

use headerjar::base::neterror::NetError;
use headerjar::cookies::psl::{
    check_cookie_domain, is_public_suffix, is_valid_cookie_domain, registrable_domain,
};

#[test]
fn test_tld_is_public_suffix() {
    assert!(is_public_suffix("com"));
    assert!(is_public_suffix("org"));
    assert!(is_public_suffix("net"));
    assert!(is_public_suffix("co.uk"));
    assert!(is_public_suffix("com.au"));
}

#[test]
fn test_domain_not_public_suffix() {
    assert!(!is_public_suffix("example.com"));
    assert!(!is_public_suffix("google.com"));
    assert!(!is_public_suffix("bbc.co.uk"));
}

#[test]
fn test_unknown_tld_is_not_a_suffix() {
    assert!(!is_public_suffix("localhost"));
    assert!(check_cookie_domain("localhost", "localhost", true).is_ok());
}

#[test]
fn test_registrable_domain_extraction() {
    assert_eq!(
        registrable_domain("www.example.com"),
        Some("example.com".to_string())
    );
    assert_eq!(
        registrable_domain("www.bbc.co.uk"),
        Some("bbc.co.uk".to_string())
    );
}

#[test]
fn test_cookie_domain_validation() {
    // (cookie_domain, url_host)
    assert!(is_valid_cookie_domain("example.com", "example.com"));
    assert!(is_valid_cookie_domain("example.com", "sub.example.com"));
    assert!(!is_valid_cookie_domain(".com", "example.com"));
    assert!(!is_valid_cookie_domain("other.com", "example.com"));
    assert!(!is_valid_cookie_domain("ample.com", "example.com"));
}

#[test]
fn test_supercookie_prevention() {
    assert!(!is_valid_cookie_domain("example.com", ".com"));
    assert!(!is_valid_cookie_domain("example.co.uk", ".co.uk"));
    assert!(!is_valid_cookie_domain("user.github.io", ".github.io"));
    assert!(!is_valid_cookie_domain("github.io", "user.github.io"));
}

#[test]
fn test_rejection_reasons() {
    assert_eq!(
        check_cookie_domain("github.io", "user.github.io", true),
        Err(NetError::CookiePublicSuffix {
            domain: "github.io".to_string()
        })
    );
    assert_eq!(
        check_cookie_domain("example.org", "example.com", true),
        Err(NetError::CookieDomainMismatch {
            domain: "example.org".to_string(),
            host: "example.com".to_string()
        })
    );
}

#[test]
fn test_wildcard_tlds() {
    assert!(is_public_suffix("github.io"));
    assert!(!is_public_suffix("user.github.io"));
}

//! Public Suffix List checks for cookie `Domain` attributes.
//!
//! A response may not scope a cookie to a public suffix such as `com`,
//! `co.uk` or `github.io`; doing so would share it with every site under
//! that suffix.

use crate::base::neterror::NetError;
use crate::cookies::canonicalcookie::domain_matches;
use psl::{List, Psl};

/// True when `domain` is itself a public suffix ("com", "co.uk").
/// Unknown TLDs are not treated as suffixes.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    List.suffix(domain.as_bytes())
        .is_some_and(|suffix| suffix.is_known() && suffix.as_bytes() == domain.as_bytes())
}

/// Registrable domain (eTLD+1): "sub.example.com" → "example.com".
/// `None` for public suffixes.
pub fn registrable_domain(domain: &str) -> Option<String> {
    let domain = domain.to_ascii_lowercase();
    psl::domain(domain.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(str::to_string)
}

/// Check that a response from `request_host` may set a cookie for
/// `cookie_domain`.
///
/// The request host must domain-match the cookie domain; with
/// `enforce_public_suffix` the domain must also not be a public suffix.
pub fn check_cookie_domain(
    cookie_domain: &str,
    request_host: &str,
    enforce_public_suffix: bool,
) -> Result<(), NetError> {
    let cookie_domain = cookie_domain.trim_start_matches('.');

    if !domain_matches(cookie_domain, request_host, false) {
        return Err(NetError::CookieDomainMismatch {
            domain: cookie_domain.to_string(),
            host: request_host.to_string(),
        });
    }

    if enforce_public_suffix && is_public_suffix(cookie_domain) {
        return Err(NetError::CookiePublicSuffix {
            domain: cookie_domain.to_string(),
        });
    }

    Ok(())
}

/// Convenience form of [`check_cookie_domain`] with suffix enforcement on.
pub fn is_valid_cookie_domain(cookie_domain: &str, request_host: &str) -> bool {
    check_cookie_domain(cookie_domain, request_host, true).is_ok()
}

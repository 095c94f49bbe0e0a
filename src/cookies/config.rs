//! Cookie jar configuration.

use serde::{Deserialize, Serialize};

/// Limits and acceptance rules for a [`CookieMonster`](super::monster::CookieMonster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarConfig {
    /// Cookies kept per domain before the oldest is evicted (Chromium default)
    pub max_cookies_per_domain: usize,
    /// Cookies kept across all domains
    pub max_cookies_total: usize,
    /// Reject response cookies whose Domain is a public suffix
    pub enforce_public_suffix: bool,
    /// Apply `__Secure-` / `__Host-` prefix rules to response cookies
    pub enforce_prefixes: bool,
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            max_cookies_per_domain: 50,
            // Chromium uses 3300; kept lower for predictable memory use.
            max_cookies_total: 3000,
            enforce_public_suffix: true,
            enforce_prefixes: true,
        }
    }
}

impl JarConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-domain limit.
    pub fn max_cookies_per_domain(mut self, max: usize) -> Self {
        self.max_cookies_per_domain = max;
        self
    }

    /// Set the global limit.
    pub fn max_cookies_total(mut self, max: usize) -> Self {
        self.max_cookies_total = max;
        self
    }

    pub fn enforce_public_suffix(mut self, enforce: bool) -> Self {
        self.enforce_public_suffix = enforce;
        self
    }

    pub fn enforce_prefixes(mut self, enforce: bool) -> Self {
        self.enforce_prefixes = enforce;
        self
    }
}

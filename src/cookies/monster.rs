use crate::base::neterror::NetError;
use crate::cookies::canonicalcookie::{default_path, CanonicalCookie};
use crate::cookies::config::JarConfig;
use crate::cookies::cookieheader::CookieHeader;
use crate::cookies::psl;
use crate::http::genericheader::HeaderField;
use crate::http::orderedheaders::OrderedHeaderMap;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

#[derive(Debug, Clone)]
struct StoredCookie {
    /// Insertion order; kept when the cookie is overwritten.
    seq: u64,
    cookie: CanonicalCookie,
}

/// The main entry point for cookie management.
/// Modeled after Chromium's `net::CookieMonster`.
///
/// At most one cookie is kept per (domain, path, name). Reads return cookies
/// in insertion order and drop expired entries they come across.
pub struct CookieMonster {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<StoredCookie>>>,
    next_seq: AtomicU64,
    config: JarConfig,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self::with_config(JarConfig::default())
    }

    pub fn with_config(config: JarConfig) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            next_seq: AtomicU64::new(0),
            config,
        }
    }

    pub fn config(&self) -> &JarConfig {
        &self.config
    }

    /// Store a cookie as-is. No domain or prefix checks are applied.
    ///
    /// A cookie with the same (domain, path, name) as a stored one replaces
    /// it in its existing slot.
    pub fn set_canonical_cookie(&self, mut cookie: CanonicalCookie) {
        cookie.domain = cookie.domain.trim_start_matches('.').to_ascii_lowercase();
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        if let Some(existing) = entry
            .iter_mut()
            .find(|s| {
                s.cookie.name == cookie.name && s.cookie.effective_path() == cookie.effective_path()
            })
        {
            tracing::debug!(name = %cookie.name, domain = %cookie.domain, "Overwriting cookie");
            existing.cookie = cookie;
            return;
        }

        // Enforce per-domain limit, oldest first
        while entry.len() >= self.config.max_cookies_per_domain {
            let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| (s.cookie.creation_time, s.seq))
                .map(|(i, _)| i)
            else {
                break;
            };
            let evicted = entry.remove(oldest_idx);
            tracing::debug!(
                name = %evicted.cookie.name,
                domain = %evicted.cookie.domain,
                "Evicted cookie (per-domain limit)"
            );
        }

        if self.config.max_cookies_per_domain > 0 {
            let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
            entry.push(StoredCookie { seq, cookie });
        }
        drop(entry); // Release lock before checking global count

        self.enforce_global_limit();
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > self.config.max_cookies_total {
            let mut oldest: Option<(String, u64, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for stored in entry.value() {
                    let older = oldest.as_ref().map_or(true, |(_, seq, time)| {
                        (stored.cookie.creation_time, stored.seq) < (*time, *seq)
                    });
                    if older {
                        oldest = Some((
                            entry.key().clone(),
                            stored.seq,
                            stored.cookie.creation_time,
                        ));
                    }
                }
            }

            let Some((domain, seq, _)) = oldest else {
                break;
            };
            if let Some(mut entry) = self.store.get_mut(&domain) {
                entry.retain(|s| s.seq != seq);
            }
            tracing::debug!(domain = %domain, "Evicted cookie (global limit)");
        }
    }

    /// Store a cookie on behalf of `ref_url`, filling an empty domain with
    /// the URL host (host-only) and an empty path with the URL's default path.
    pub fn add_cookie(&self, mut cookie: CanonicalCookie, ref_url: &Url) {
        if cookie.domain.is_empty() {
            cookie.domain = ref_url.host_str().unwrap_or("").to_ascii_lowercase();
            cookie.host_only = true;
        }
        if cookie.path.is_empty() {
            cookie.path = default_path(ref_url.path()).to_string();
        }
        self.set_canonical_cookie(cookie);
    }

    /// Parse a `Set-Cookie` line received from `url` and store it.
    ///
    /// The Domain attribute must cover the request host and, unless disabled
    /// in [`JarConfig`], must not be a public suffix. `__Secure-` and
    /// `__Host-` prefixes are checked against the URL scheme.
    pub fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) -> Result<(), NetError> {
        let mut cookie = CanonicalCookie::from_set_cookie_str(cookie_line)?;
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();

        if host.is_empty() {
            return Err(NetError::CookieDomainMismatch {
                domain: cookie.domain,
                host,
            });
        }

        if cookie.host_only {
            cookie.domain = host;
        } else {
            psl::check_cookie_domain(&cookie.domain, &host, self.config.enforce_public_suffix)?;
        }

        if cookie.path.is_empty() {
            cookie.path = default_path(url.path()).to_string();
        }

        if self.config.enforce_prefixes {
            cookie.validate_prefix(is_secure_scheme(url))?;
        }

        self.set_canonical_cookie(cookie);
        Ok(())
    }

    /// Store every `Set-Cookie` value of a response. Rejected cookies are
    /// logged and skipped. Returns how many were stored.
    pub fn add_cookies_from_response_headers(
        &self,
        headers: &OrderedHeaderMap,
        url: &Url,
    ) -> usize {
        let mut stored = 0;

        for line in headers.get_all("Set-Cookie") {
            match self.parse_and_save_cookie(url, line) {
                Ok(()) => stored += 1,
                Err(e) if e.is_parse_error() => {
                    tracing::warn!(url = %url, error = %e, "Malformed Set-Cookie header");
                }
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Rejected cookie");
                }
            }
        }

        stored
    }

    /// Cookies to send to `url`, in insertion order.
    pub fn get_matching_cookies(&self, url: &Url, secure_channel: bool) -> Vec<CanonicalCookie> {
        self.get_matching_cookies_at(url, secure_channel, true, OffsetDateTime::now_utc())
    }

    /// [`get_matching_cookies`](Self::get_matching_cookies) at a fixed time.
    ///
    /// Expired cookies in the inspected domains are removed from the store.
    pub fn get_matching_cookies_at(
        &self,
        url: &Url,
        secure_channel: bool,
        include_session: bool,
        now: OffsetDateTime,
    ) -> Vec<CanonicalCookie> {
        let Some(host) = url.host_str() else {
            return Vec::new();
        };
        let host = host.to_ascii_lowercase();
        let path = url.path();

        let mut result: Vec<(u64, CanonicalCookie)> = Vec::new();
        let mut drained = Vec::new();

        for domain in Self::get_matching_domains(&host) {
            let Some(mut entry) = self.store.get_mut(&domain) else {
                continue;
            };

            let before = entry.len();
            entry.retain(|s| !s.cookie.is_expired(now));
            if entry.len() < before {
                tracing::debug!(
                    domain = %domain,
                    pruned = before - entry.len(),
                    "Pruned expired cookies"
                );
            }
            if entry.is_empty() {
                drained.push(domain.clone());
            }

            for stored in entry.iter_mut() {
                if stored
                    .cookie
                    .matches_with_session(&host, path, secure_channel, include_session, now)
                {
                    stored.cookie.last_access_time = now;
                    result.push((stored.seq, stored.cookie.clone()));
                }
            }
        }

        for domain in drained {
            self.store.remove_if(&domain, |_, cookies| cookies.is_empty());
        }

        result.sort_by_key(|(seq, _)| *seq);
        result.into_iter().map(|(_, cookie)| cookie).collect()
    }

    /// Matching cookies, treating `https`/`wss` as a secure channel.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        self.get_matching_cookies(url, is_secure_scheme(url))
    }

    /// The cookie `name` stored for exactly the URL host and its directory
    /// path.
    pub fn get_cookie(&self, url: &Url, name: &str) -> Option<CanonicalCookie> {
        let host = url.host_str()?.to_ascii_lowercase();
        let path = default_path(url.path());
        let now = OffsetDateTime::now_utc();

        let entry = self.store.get(&host)?;
        entry
            .iter()
            .map(|s| &s.cookie)
            .find(|c| c.name == name && c.effective_path() == path && !c.is_expired(now))
            .cloned()
    }

    /// `Cookie` header for a request to `url`, most specific path first.
    pub fn cookie_header_for_url(&self, url: &Url) -> Option<CookieHeader> {
        let mut cookies = self.get_cookies_for_url(url);
        if cookies.is_empty() {
            return None;
        }
        cookies.sort_by(|a, b| b.effective_path().len().cmp(&a.effective_path().len()));
        Some(CookieHeader::from_cookies(&cookies))
    }

    /// Every stored cookie in insertion order, expired ones included.
    pub fn get_all_cookies(&self) -> Vec<CanonicalCookie> {
        let mut all: Vec<StoredCookie> = self
            .store
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|s| s.seq);
        all.into_iter().map(|s| s.cookie).collect()
    }

    /// `Set-Cookie: ...` line for every stored cookie.
    pub fn to_set_cookie_lines(&self) -> Vec<String> {
        self.get_all_cookies()
            .iter()
            .map(|c| c.to_header_line())
            .collect()
    }

    pub fn remove_cookie(&self, domain: &str, path: &str, name: &str) -> bool {
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        let Some(mut entry) = self.store.get_mut(&domain) else {
            return false;
        };
        let before = entry.len();
        let path = if path.is_empty() { "/" } else { path };
        entry.retain(|s| s.cookie.name != name || s.cookie.effective_path() != path);
        let removed = entry.len() < before;
        let empty = entry.is_empty();
        drop(entry);

        if empty {
            self.store.remove_if(&domain, |_, cookies| cookies.is_empty());
        }
        removed
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cookie_count() == 0
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Get all domains to check for a given host.
    /// Returns the host itself and all parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        // "foo.bar.example.com" → "bar.example.com", "example.com", "com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len() {
            domains.push(parts[i..].join("."));
        }

        domains
    }
}

fn is_secure_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "https" | "wss")
}

use crate::base::neterror::NetError;
use crate::cookies::cookievalue::CookieValue;
use crate::http::genericheader::HeaderField;
use crate::http::headervalue;
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use time::format_description::BorrowedFormatItem;
use time::macros::{datetime, format_description};
use time::{Duration, OffsetDateTime, UtcOffset};

pub const SET_COOKIE: &str = "Set-Cookie";

/// Latest expiry a cookie can carry; larger `Max-Age` values are clamped here.
pub const MAX_EXPIRY: OffsetDateTime = datetime!(9999-12-31 23:59:59 UTC);

/// IMF-fixdate, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`.
const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
///
/// An empty `domain` or `path` means the attribute was not supplied; the jar
/// fills both from the request URL when the cookie is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(with = "time::serde::timestamp")]
    pub creation_time: OffsetDateTime,
    #[serde(with = "time::serde::timestamp::option")]
    pub expiration_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp")]
    pub last_access_time: OffsetDateTime,
    /// `Max-Age` as received, in seconds.
    pub max_age: Option<i64>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl SameSite {
    fn as_attribute(self) -> Option<&'static str> {
        match self {
            SameSite::Unspecified => None,
            SameSite::NoRestriction => Some("None"),
            SameSite::Lax => Some("Lax"),
            SameSite::Strict => Some("Strict"),
        }
    }
}

impl From<cookie::SameSite> for SameSite {
    fn from(same_site: cookie::SameSite) -> Self {
        match same_site {
            cookie::SameSite::Lax => SameSite::Lax,
            cookie::SameSite::Strict => SameSite::Strict,
            cookie::SameSite::None => SameSite::NoRestriction,
        }
    }
}

impl CanonicalCookie {
    /// Session cookie with no domain or path yet. The name is not validated;
    /// use [`CanonicalCookie::from_value`] for untrusted input.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: String::new(),
            creation_time: now,
            expiration_time: None,
            last_access_time: now,
            max_age: None,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: SameSite::Unspecified,
        }
    }

    /// Build a cookie from a typed value.
    ///
    /// `None` is rejected; integers and booleans are converted (`true` → `"1"`,
    /// `false` → `""`). Maps cannot be carried by a single `Set-Cookie`.
    pub fn from_value(name: &str, value: Option<CookieValue>) -> Result<Self, NetError> {
        validate_name(name)?;
        let value = value.ok_or_else(|| NetError::CookieValueMissing {
            name: name.to_string(),
        })?;
        let value = value.as_scalar().ok_or_else(|| NetError::UnsupportedCookieValue {
            name: name.to_string(),
        })?;
        validate_value(&value)?;
        Ok(Self::new(name, value))
    }

    /// Parse a `Set-Cookie` value, with or without the leading field name.
    ///
    /// Name and value are percent-decoded. A missing `Domain` leaves the
    /// cookie host-only with an empty domain; `Max-Age` wins over `Expires`.
    pub fn from_set_cookie_str(s: &str) -> Result<Self, NetError> {
        let s = s.trim();
        let value = match s.split_once(':') {
            Some((name, rest)) if name.trim().eq_ignore_ascii_case(SET_COOKIE) => rest.trim(),
            _ => s,
        };
        headervalue::assert_valid(value)?;

        let parsed = Cookie::parse_encoded(value)?;
        validate_name(parsed.name())?;
        // Percent-decoding can reintroduce CR/LF.
        validate_value(parsed.value())?;

        let mut cookie = Self::new(parsed.name(), parsed.value());

        if let Some(domain) = parsed.domain() {
            let domain = domain.trim_start_matches('.');
            if !domain.is_empty() {
                cookie.domain = domain.to_ascii_lowercase();
                cookie.host_only = false;
            }
        }
        if let Some(path) = parsed.path() {
            if path.starts_with('/') {
                cookie.path = path.to_string();
            }
        }

        if let Some(max_age) = parsed.max_age() {
            cookie.max_age = Some(max_age.whole_seconds());
            cookie.expiration_time = Some(expiry_after(cookie.creation_time, max_age));
        } else if let Some(expires) = parsed.expires().and_then(|e| e.datetime()) {
            cookie.expiration_time = Some(expires);
        }

        cookie.secure = parsed.secure().unwrap_or(false);
        cookie.http_only = parsed.http_only().unwrap_or(false);
        cookie.same_site = parsed.same_site().map(SameSite::from).unwrap_or_default();

        Ok(cookie)
    }

    /// Host-only cookie bound to exactly `host`.
    pub fn with_host(mut self, host: &str) -> Self {
        self.domain = host.to_ascii_lowercase();
        self.host_only = true;
        self
    }

    /// Domain cookie, also sent to subdomains of `domain`.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = domain.trim_start_matches('.').to_ascii_lowercase();
        self.host_only = false;
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expiration_time = Some(expires);
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        let max_age = Duration::seconds(seconds);
        self.expiration_time = Some(expiry_after(self.creation_time, max_age));
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time.is_some_and(|expiry| expiry <= current_time)
    }

    pub fn is_session_cookie(&self) -> bool {
        self.expiration_time.is_none()
    }

    /// Path used for matching; an unset path behaves as `/`.
    pub fn effective_path(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }

    pub fn matches(&self, host: &str, path: &str, secure_channel: bool) -> bool {
        self.matches_at(host, path, secure_channel, OffsetDateTime::now_utc())
    }

    pub fn matches_at(
        &self,
        host: &str,
        path: &str,
        secure_channel: bool,
        now: OffsetDateTime,
    ) -> bool {
        self.matches_with_session(host, path, secure_channel, true, now)
    }

    /// Full match check. With `include_session` false, cookies without an
    /// expiry never match.
    pub fn matches_with_session(
        &self,
        host: &str,
        path: &str,
        secure_channel: bool,
        include_session: bool,
        now: OffsetDateTime,
    ) -> bool {
        if self.secure && !secure_channel {
            return false;
        }
        if !include_session && self.is_session_cookie() {
            return false;
        }
        if self.is_expired(now) {
            return false;
        }
        domain_matches(&self.domain, host, self.host_only)
            && path_matches(self.effective_path(), path)
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(&self, secure_origin: bool) -> Result<(), NetError> {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(NetError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(NetError::CookieInvalidPrefix);
        }

        Ok(())
    }

    /// `name=value` followed by Expires, Max-Age, Domain, Path, Secure,
    /// HttpOnly and SameSite when set.
    pub fn to_set_cookie_string(&self) -> String {
        let pair = Cookie::new(self.name.as_str(), self.value.as_str());
        let mut out = pair.encoded().to_string();

        if let Some(expires) = self.expiration_time {
            if let Ok(date) = expires.to_offset(UtcOffset::UTC).format(EXPIRES_FORMAT) {
                out.push_str("; Expires=");
                out.push_str(&date);
            }
        }
        if let Some(max_age) = self.max_age {
            out.push_str(&format!("; Max-Age={}", max_age));
        }
        if !self.domain.is_empty() {
            out.push_str("; Domain=");
            out.push_str(&self.domain);
        }
        if !self.path.is_empty() {
            out.push_str("; Path=");
            out.push_str(&self.path);
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site.as_attribute() {
            out.push_str("; SameSite=");
            out.push_str(same_site);
        }

        out
    }
}

impl HeaderField for CanonicalCookie {
    fn field_name(&self) -> &str {
        SET_COOKIE
    }

    fn field_value(&self) -> String {
        self.to_set_cookie_string()
    }
}

/// A cookie name is non-empty and free of control characters, whitespace,
/// `=`, `;` and `,`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b > 0x20 && b != 0x7f && !matches!(b, b'=' | b';' | b','))
}

pub(crate) fn validate_name(name: &str) -> Result<(), NetError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(NetError::InvalidCookieName {
            name: name.to_string(),
        })
    }
}

pub(crate) fn validate_value(value: &str) -> Result<(), NetError> {
    if !headervalue::is_valid(value) || value.contains(['\t', ';']) {
        return Err(NetError::invalid_header_value(value));
    }
    Ok(())
}

/// `start + max_age`, clamped to [`MAX_EXPIRY`] or the epoch when out of range.
fn expiry_after(start: OffsetDateTime, max_age: Duration) -> OffsetDateTime {
    start.checked_add(max_age).unwrap_or(if max_age.is_negative() {
        OffsetDateTime::UNIX_EPOCH
    } else {
        MAX_EXPIRY
    })
}

/// RFC 6265 §5.1.3 domain matching.
///
/// Host-only cookies need an exact (case-insensitive) host. Domain cookies
/// also match subdomains, split on a `.` boundary; IP hosts never
/// suffix-match.
pub fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.');
    if cookie_domain.is_empty() {
        return false;
    }
    if request_host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }
    if host_only || request_host.len() <= cookie_domain.len() {
        return false;
    }
    if request_host.parse::<IpAddr>().is_ok() {
        return false;
    }

    let split = request_host.len() - cookie_domain.len();
    request_host.as_bytes()[split - 1] == b'.'
        && request_host.is_char_boundary(split)
        && request_host[split..].eq_ignore_ascii_case(cookie_domain)
}

/// RFC 6265 §5.1.4 path matching on segment boundaries.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    let request_path = if request_path.is_empty() {
        "/"
    } else {
        request_path
    };
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => rest.is_empty() || cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// RFC 6265 §5.1.4 default-path: the request path up to, not including,
/// its right-most `/`.
pub fn default_path(request_path: &str) -> &str {
    if !request_path.starts_with('/') {
        return "/";
    }
    match request_path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &request_path[..idx],
    }
}

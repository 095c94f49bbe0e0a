//! `Cookie:` request header.
//!
//! Built from the jar for an outgoing request, or parsed from an incoming
//! request line. Map values are sent PHP-style: a value
//! `{a: {a1: va1}}` under `test` becomes `test[a][a1]=va1`.

use crate::base::neterror::NetError;
use crate::cookies::canonicalcookie::{validate_name, validate_value, CanonicalCookie};
use crate::cookies::cookievalue::CookieValue;
use crate::http::genericheader::{expect_header_line, HeaderField};
use std::fmt;

pub const COOKIE: &str = "Cookie";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieHeader {
    cookies: Vec<(String, CookieValue)>,
}

impl CookieHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name/value pairs of the given cookies, in order. For a repeated name
    /// the first cookie wins. Cookies whose name or value cannot be sent
    /// on a header line are left out.
    pub fn from_cookies<'a, I>(cookies: I) -> Self
    where
        I: IntoIterator<Item = &'a CanonicalCookie>,
    {
        let mut header = Self::new();
        for cookie in cookies {
            if header.get(&cookie.name).is_some() {
                continue;
            }
            if let Err(err) = validate_name(&cookie.name).and(validate_value(&cookie.value)) {
                tracing::debug!(name = %cookie.name, error = %err, "Skipping unsendable cookie");
                continue;
            }
            header.set(cookie.name.clone(), CookieValue::Text(cookie.value.clone()));
        }
        header
    }

    /// Parse `Cookie: a=b; c=d`. Segments without `=` are ignored.
    pub fn from_string(line: &str) -> Result<Self, NetError> {
        let value = expect_header_line(COOKIE, line)?;
        let mut header = Self::new();

        for pair in value.split(';') {
            let pair = pair.trim();
            let Some((name, value)) = pair.split_once('=') else {
                if !pair.is_empty() {
                    tracing::debug!(segment = %pair, "Ignoring cookie segment without '='");
                }
                continue;
            };
            let value = value.trim().trim_matches('"');
            header.insert(name.trim(), CookieValue::Text(value.to_string()))?;
        }

        Ok(header)
    }

    /// Add or replace `name`. Every scalar inside `value` is checked for
    /// header-injection characters before the header changes.
    pub fn insert(
        &mut self,
        name: &str,
        value: impl Into<CookieValue>,
    ) -> Result<&mut Self, NetError> {
        validate_name(name)?;
        let value = value.into();
        for (_, scalar) in value.flatten(name) {
            validate_value(&scalar)?;
        }
        self.set(name.to_string(), value);
        Ok(self)
    }

    fn set(&mut self, name: String, value: CookieValue) {
        match self.cookies.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.cookies.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CookieValue> {
        self.cookies.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<CookieValue> {
        let pos = self.cookies.iter().position(|(n, _)| n == name)?;
        Some(self.cookies.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CookieValue)> {
        self.cookies.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl HeaderField for CookieHeader {
    fn field_name(&self) -> &str {
        COOKIE
    }

    fn field_value(&self) -> String {
        self.cookies
            .iter()
            .flat_map(|(name, value)| value.flatten(name))
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for CookieHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cookies_skips_unsendable_values() {
        let cookies = [
            CanonicalCookie::new("a", "x\r\nX-Evil: yes"),
            CanonicalCookie::new("b", "2"),
        ];
        let header = CookieHeader::from_cookies(&cookies);
        assert_eq!(header.len(), 1);
        assert_eq!(header.to_header_line(), "Cookie: b=2");
    }

    #[test]
    fn test_array_cookie_value() {
        let mut header = CookieHeader::new();
        header
            .insert(
                "test",
                CookieValue::map([
                    ("a", CookieValue::from("value_a")),
                    ("b", CookieValue::from("value_b")),
                ]),
            )
            .unwrap();
        assert_eq!(header.field_value(), "test[a]=value_a; test[b]=value_b");
    }

    #[test]
    fn test_nested_array_cookie_value() {
        let mut header = CookieHeader::new();
        header
            .insert(
                "test",
                CookieValue::map([
                    (
                        "a",
                        CookieValue::map([
                            ("a1", CookieValue::from("va1")),
                            ("a2", CookieValue::from("va2")),
                        ]),
                    ),
                    (
                        "b",
                        CookieValue::map([
                            ("b1", CookieValue::from("vb1")),
                            ("b2", CookieValue::from("vb2")),
                        ]),
                    ),
                ]),
            )
            .unwrap();
        assert_eq!(
            header.field_value(),
            "test[a][a1]=va1; test[a][a2]=va2; test[b][b1]=vb1; test[b][b2]=vb2"
        );
    }

    #[test]
    fn test_from_string() {
        let header = CookieHeader::from_string("Cookie: name=value; foo=\"bar\"; flag").unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(header.get("foo"), Some(&CookieValue::from("bar")));
        assert_eq!(header.to_header_line(), "Cookie: name=value; foo=bar");
    }

    #[test]
    fn test_from_string_wrong_field_name() {
        let err = CookieHeader::from_string("Set-Cookie: a=b").unwrap_err();
        assert!(matches!(err, NetError::InvalidHeaderLine { .. }));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut header = CookieHeader::new();
        header.insert("a", "1").unwrap().insert("b", "2").unwrap();
        header.insert("a", 3i64).unwrap();
        assert_eq!(header.field_value(), "a=3; b=2");
    }

    #[test]
    fn test_insert_rejects_injection() {
        let mut header = CookieHeader::new();
        let nested = CookieValue::map([("k", CookieValue::from("v\r\nX: y"))]);
        assert!(header.insert("a", nested).is_err());
        assert!(header.insert("b", "x; c=d").is_err());
        assert!(header.is_empty());
    }

    #[test]
    fn test_from_cookies() {
        let cookies = vec![
            CanonicalCookie::new("a", "1"),
            CanonicalCookie::new("b", ""),
            CanonicalCookie::new("a", "shadowed"),
        ];
        let header = CookieHeader::from_cookies(&cookies);
        assert_eq!(header.field_value(), "a=1; b=");
    }
}

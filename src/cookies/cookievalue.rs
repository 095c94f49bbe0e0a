use serde::{Deserialize, Serialize};
use std::fmt;

/// Value kinds a cookie may be built from.
///
/// An absent value is expressed as `Option::None` by callers and is rejected;
/// `Text(String::new())` is a legitimate empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookieValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    /// Ordered nested mapping, sent as `name[key]=value` pairs.
    Map(Vec<(String, CookieValue)>),
}

impl CookieValue {
    /// Scalar string form: `true` → `"1"`, `false` → `""`.
    ///
    /// Maps have no scalar form.
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            CookieValue::Text(s) => Some(s.clone()),
            CookieValue::Integer(n) => Some(n.to_string()),
            CookieValue::Boolean(true) => Some("1".to_string()),
            CookieValue::Boolean(false) => Some(String::new()),
            CookieValue::Map(_) => None,
        }
    }

    /// Build a `Map` from ordered entries.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CookieValue)>,
    {
        CookieValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, CookieValue::Map(_))
    }

    /// Flatten into `(name, value)` pairs, expanding maps as `name[key]`
    /// recursively in mapping order.
    pub fn flatten(&self, name: &str) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into(name, &mut out);
        out
    }

    fn flatten_into(&self, name: &str, out: &mut Vec<(String, String)>) {
        match self {
            CookieValue::Map(entries) => {
                for (key, value) in entries {
                    value.flatten_into(&format!("{}[{}]", name, key), out);
                }
            }
            scalar => {
                if let Some(s) = scalar.as_scalar() {
                    out.push((name.to_string(), s));
                }
            }
        }
    }
}

impl fmt::Display for CookieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_scalar() {
            Some(s) => f.write_str(&s),
            None => f.write_str("[map]"),
        }
    }
}

impl From<&str> for CookieValue {
    fn from(s: &str) -> Self {
        CookieValue::Text(s.to_string())
    }
}

impl From<String> for CookieValue {
    fn from(s: String) -> Self {
        CookieValue::Text(s)
    }
}

impl From<i64> for CookieValue {
    fn from(n: i64) -> Self {
        CookieValue::Integer(n)
    }
}

impl From<bool> for CookieValue {
    fn from(b: bool) -> Self {
        CookieValue::Boolean(b)
    }
}

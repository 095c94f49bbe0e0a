use crate::base::neterror::NetError;
use crate::http::genericheader::{split_header_line, HeaderField};
use crate::http::headervalue;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
struct Entry {
    name: HeaderName,
    /// Name as the caller spelled it, used when rendering lines.
    display: String,
    value: HeaderValue,
}

/// A header collection that strictly preserves insertion order.
///
/// Names compare case-insensitively. A name may carry several values
/// (`Set-Cookie`, repeated `Content-Security-Policy`); each is kept as its
/// own line.
#[derive(Debug, Clone, Default)]
pub struct OrderedHeaderMap {
    headers: Vec<Entry>,
}

impl OrderedHeaderMap {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    fn entry(name: &str, value: &str) -> Result<Entry, NetError> {
        let header_name = HeaderName::from_str(name).map_err(|_| NetError::InvalidHeaderName {
            name: name.to_string(),
        })?;
        let header_value = headervalue::assert_valid(value)?;
        Ok(Entry {
            name: header_name,
            display: name.to_string(),
            value: header_value,
        })
    }

    /// Set `name` to a single value.
    ///
    /// An existing header keeps its position and loses any extra values;
    /// otherwise the header is appended.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let entry = Self::entry(name, value)?;

        if let Some(pos) = self.headers.iter().position(|e| e.name == entry.name) {
            let target = entry.name.clone();
            self.headers[pos] = entry;
            let mut idx = 0;
            self.headers.retain(|e| {
                let keep = idx <= pos || e.name != target;
                idx += 1;
                keep
            });
        } else {
            self.headers.push(entry);
        }
        Ok(())
    }

    /// Add another value for `name` after all existing headers.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let entry = Self::entry(name, value)?;
        self.headers.push(entry);
        Ok(())
    }

    /// Append a typed header.
    pub fn add_header<H: HeaderField + ?Sized>(&mut self, header: &H) -> Result<(), NetError> {
        self.append(header.field_name(), &header.field_value())
    }

    pub fn remove(&mut self, name: &str) {
        if let Ok(target) = HeaderName::from_str(name) {
            self.headers.retain(|e| e.name != target);
        }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        let target = HeaderName::from_str(name).ok()?;
        self.headers
            .iter()
            .find(|e| e.name == target)
            .and_then(|e| e.value.to_str().ok())
    }

    /// Every value for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        match HeaderName::from_str(name) {
            Ok(target) => self
                .headers
                .iter()
                .filter(|e| e.name == target)
                .filter_map(|e| e.value.to_str().ok())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Headers with their original name spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .filter_map(|e| Some((e.display.as_str(), e.value.to_str().ok()?)))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Parse a raw header block as exchanged with a transport.
    ///
    /// A leading status or request line is skipped, parsing stops at the
    /// first empty line (start of the body). Both CRLF and bare LF line
    /// endings are accepted between lines.
    pub fn from_raw(block: &str) -> Result<Self, NetError> {
        let mut headers = Self::new();

        for (idx, line) in block.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                break;
            }
            if idx == 0 && is_start_line(line) {
                continue;
            }
            let (name, value) = split_header_line(line)?;
            headers.append(name, value)?;
        }

        Ok(headers)
    }

    /// Consumes the map and returns a standard http::HeaderMap.
    /// Note: http::HeaderMap preserves insertion order.
    pub fn to_header_map(self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for entry in self.headers {
            map.append(entry.name, entry.value);
        }
        map
    }
}

fn is_start_line(line: &str) -> bool {
    if line.starts_with("HTTP/") {
        return true;
    }
    // Request line: METHOD SP target SP HTTP/x.y
    line.rsplit_once(' ')
        .is_some_and(|(_, version)| version.starts_with("HTTP/"))
}

/// One `Name: value\r\n` line per stored value.
impl fmt::Display for OrderedHeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        Ok(())
    }
}

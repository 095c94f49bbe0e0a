//! Accept-family headers: comma-separated values weighted with `;q=`.
//!
//! Covers `Accept-Language`, `Accept-Charset` and `Accept-Encoding`. Each
//! comma-separated entry becomes a [`FieldValuePart`]; [`AcceptHeader`]
//! keeps them in header order and hands out a priority-sorted view.
//!
//! ```rust
//! use headerjar::http::accept::AcceptHeader;
//!
//! let header = AcceptHeader::parse_accept_language("Accept-Language: da;q=0.8, en-gb, *;q=0.4")?;
//! let order: Vec<_> = header.prioritized().into_iter().map(|p| p.type_string.as_str()).collect();
//! assert_eq!(order, ["en-gb", "da", "*"]);
//! assert!(header.has_language("nl"));
//! # Ok::<(), headerjar::base::neterror::NetError>(())
//! ```

use crate::base::neterror::NetError;
use crate::http::genericheader::{expect_header_line, HeaderField};
use crate::http::headervalue;
use std::fmt;

/// Which Accept-family header a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptKind {
    Language,
    Charset,
    Encoding,
}

impl AcceptKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            AcceptKind::Language => "Accept-Language",
            AcceptKind::Charset => "Accept-Charset",
            AcceptKind::Encoding => "Accept-Encoding",
        }
    }
}

/// One weighted entry of an Accept-family header.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValuePart {
    /// The value itself, e.g. `en-gb`, `utf-8`, `*`.
    pub type_string: String,
    /// Quality in `[0.0, 1.0]`.
    pub priority: f64,
    /// Parameters other than `q`, in header order.
    pub params: Vec<(String, String)>,
    /// The entry as it appeared in the header, trimmed.
    pub raw: String,
    /// Position in the original header.
    pub index: usize,
    /// The query part this entry was matched against, set by
    /// [`AcceptHeader::matches`].
    pub matched_against: Option<Box<FieldValuePart>>,
}

impl FieldValuePart {
    /// Language tag; same as `type_string`.
    pub fn language(&self) -> &str {
        &self.type_string
    }

    /// `en` for `en-US`.
    pub fn primary_tag(&self) -> &str {
        self.type_string
            .split_once('-')
            .map_or(self.type_string.as_str(), |(primary, _)| primary)
    }

    /// `US` for `en-US`, `None` for a bare `en`.
    pub fn sub_tag(&self) -> Option<&str> {
        self.type_string.split_once('-').map(|(_, sub)| sub)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn is_wildcard(&self) -> bool {
        self.type_string == "*"
    }

    fn accepts(&self, kind: AcceptKind, query: &FieldValuePart) -> bool {
        if self.is_wildcard() || query.is_wildcard() {
            return true;
        }

        match kind {
            AcceptKind::Language => {
                if !self.primary_tag().eq_ignore_ascii_case(query.primary_tag()) {
                    return false;
                }
                let ours = self.sub_tag().unwrap_or("*");
                let theirs = query.sub_tag().unwrap_or("*");
                ours == "*" || theirs == "*" || ours.eq_ignore_ascii_case(theirs)
            }
            AcceptKind::Charset | AcceptKind::Encoding => {
                self.type_string.eq_ignore_ascii_case(&query.type_string)
            }
        }
    }

    fn render(&self) -> String {
        let mut out = self.type_string.clone();
        for (key, value) in &self.params {
            out.push(';');
            out.push_str(key);
            if !value.is_empty() {
                out.push('=');
                if headervalue::is_token(value) {
                    out.push_str(value);
                } else {
                    out.push('"');
                    out.push_str(&value.replace('\\', "\\\\").replace('"', "\\\""));
                    out.push('"');
                }
            }
        }
        if self.priority != 1.0 {
            out.push_str(&format!(";q={}", self.priority));
        }
        out
    }
}

/// A parsed Accept-family header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptHeader {
    kind: AcceptKind,
    parts: Vec<FieldValuePart>,
}

impl AcceptHeader {
    pub fn new(kind: AcceptKind) -> Self {
        Self {
            kind,
            parts: Vec::new(),
        }
    }

    pub fn accept_language() -> Self {
        Self::new(AcceptKind::Language)
    }

    pub fn accept_charset() -> Self {
        Self::new(AcceptKind::Charset)
    }

    pub fn accept_encoding() -> Self {
        Self::new(AcceptKind::Encoding)
    }

    /// Parse a full `Name: value` line.
    pub fn from_string(kind: AcceptKind, line: &str) -> Result<Self, NetError> {
        let value = expect_header_line(kind.field_name(), line)?;
        Self::parse_field_value(kind, value)
    }

    /// Parse a bare field value such as `da;q=0.8, en-gb`.
    pub fn parse_field_value(kind: AcceptKind, value: &str) -> Result<Self, NetError> {
        headervalue::assert_valid(value)?;

        let mut header = Self::new(kind);
        for segment in split_unquoted(value, ',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let part = parse_part(segment, header.parts.len())?;
            header.parts.push(part);
        }
        Ok(header)
    }

    pub fn parse_accept_language(line: &str) -> Result<Self, NetError> {
        Self::from_string(AcceptKind::Language, line)
    }

    pub fn parse_accept_charset(line: &str) -> Result<Self, NetError> {
        Self::from_string(AcceptKind::Charset, line)
    }

    pub fn parse_accept_encoding(line: &str) -> Result<Self, NetError> {
        Self::from_string(AcceptKind::Encoding, line)
    }

    pub fn kind(&self) -> AcceptKind {
        self.kind
    }

    /// Entries in header order.
    pub fn parts(&self) -> &[FieldValuePart] {
        &self.parts
    }

    /// Entries by descending priority; equal priorities keep header order.
    pub fn prioritized(&self) -> Vec<&FieldValuePart> {
        let mut sorted: Vec<&FieldValuePart> = self.parts.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        sorted
    }

    /// Append an entry.
    ///
    /// The type is rejected if it contains CR/LF or characters outside the
    /// token set, the priority if it lies outside `[0, 1]`.
    pub fn add(
        &mut self,
        type_string: &str,
        priority: f64,
        params: &[(&str, &str)],
    ) -> Result<&mut Self, NetError> {
        validate_type(type_string)?;
        validate_priority(priority)?;
        for (key, value) in params {
            headervalue::assert_valid(key)?;
            headervalue::assert_valid(value)?;
        }

        let mut part = FieldValuePart {
            type_string: type_string.to_string(),
            priority,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            raw: String::new(),
            index: self.parts.len(),
            matched_against: None,
        };
        part.raw = part.render();
        self.parts.push(part);
        Ok(self)
    }

    pub fn add_language(&mut self, tag: &str, priority: f64) -> Result<&mut Self, NetError> {
        self.add(tag, priority, &[])
    }

    pub fn add_charset(&mut self, charset: &str, priority: f64) -> Result<&mut Self, NetError> {
        self.add(charset, priority, &[])
    }

    pub fn add_encoding(&mut self, encoding: &str, priority: f64) -> Result<&mut Self, NetError> {
        self.add(encoding, priority, &[])
    }

    /// Find the highest-priority entry accepting `query`.
    ///
    /// The returned part has `matched_against` set to the query entry it
    /// matched. An unparsable query matches nothing.
    pub fn matches(&self, query: &str) -> Option<FieldValuePart> {
        let query = match Self::parse_field_value(self.kind, query) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!(error = %e, "unparsable accept query");
                return None;
            }
        };

        for left in self.prioritized() {
            for right in &query.parts {
                if left.accepts(self.kind, right) {
                    let mut matched = left.clone();
                    matched.matched_against = Some(Box::new(right.clone()));
                    return Some(matched);
                }
            }
        }
        None
    }

    pub fn has_language(&self, tag: &str) -> bool {
        self.matches(tag).is_some()
    }

    pub fn has_charset(&self, charset: &str) -> bool {
        self.matches(charset).is_some()
    }

    pub fn has_encoding(&self, encoding: &str) -> bool {
        self.matches(encoding).is_some()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl HeaderField for AcceptHeader {
    fn field_name(&self) -> &str {
        self.kind.field_name()
    }

    fn field_value(&self) -> String {
        self.parts
            .iter()
            .map(FieldValuePart::render)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AcceptHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_line())
    }
}

fn parse_part(segment: &str, index: usize) -> Result<FieldValuePart, NetError> {
    let mut pieces = split_unquoted(segment, ';').into_iter();
    let type_string = pieces.next().unwrap_or_default().trim();
    validate_type(type_string)?;

    let mut priority = 1.0;
    let mut params = Vec::new();
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let Some((key, value)) = piece.split_once('=') else {
            tracing::debug!(param = piece, "dropping accept parameter without value");
            continue;
        };
        let key = key.trim();
        let value = unquote(value.trim());
        if key.eq_ignore_ascii_case("q") {
            priority = parse_quality(&value)?;
        } else {
            params.push((key.to_string(), value));
        }
    }

    Ok(FieldValuePart {
        type_string: type_string.to_string(),
        priority,
        params,
        raw: segment.to_string(),
        index,
        matched_against: None,
    })
}

fn parse_quality(value: &str) -> Result<f64, NetError> {
    match value.parse::<f64>() {
        Ok(q) if (0.0..=1.0).contains(&q) => Ok(q),
        _ => Err(NetError::InvalidQuality {
            value: value.to_string(),
        }),
    }
}

fn validate_priority(priority: f64) -> Result<(), NetError> {
    if (0.0..=1.0).contains(&priority) {
        Ok(())
    } else {
        Err(NetError::InvalidQuality {
            value: priority.to_string(),
        })
    }
}

fn validate_type(type_string: &str) -> Result<(), NetError> {
    let valid = !type_string.is_empty()
        && type_string
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'*' | b'_' | b'.' | b'+'));
    if valid {
        Ok(())
    } else {
        Err(NetError::InvalidFieldValueType {
            value: type_string.to_string(),
        })
    }
}

fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

/// Split on `sep` except inside double-quoted strings.
fn split_unquoted(input: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                out.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&input[start..]);
    out
}

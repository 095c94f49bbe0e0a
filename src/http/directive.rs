//! Directive-based policy headers.
//!
//! `Content-Security-Policy` and `Feature-Policy` share one grammar:
//!
//! ```text
//! Field-Name: name source source; name source; ...
//! ```
//!
//! [`DirectiveHeader`] implements that grammar once. What differs between
//! header types (field name, which directive names exist, what an empty
//! source list means) lives in a [`DirectivePolicy`]; see
//! [`policies`](crate::http::policies) for the two built-in ones.
//!
//! ```rust
//! use headerjar::http::directive::DirectiveHeader;
//! use headerjar::http::genericheader::HeaderField;
//!
//! let mut csp = DirectiveHeader::content_security_policy();
//! csp.set_directive("default-src", &["'self'"])?
//!     .set_directive("img-src", &["*"])?
//!     .set_directive("script-src", &[] as &[&str])?;
//! assert_eq!(
//!     csp.to_header_line(),
//!     "Content-Security-Policy: default-src 'self'; img-src *; script-src 'none';"
//! );
//! # Ok::<(), headerjar::base::neterror::NetError>(())
//! ```

use crate::base::neterror::NetError;
use crate::http::genericheader::{expect_header_line, HeaderField};
use crate::http::headervalue;
use crate::http::policies;
use std::fmt;

/// What `set_directive` does with an empty source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySources {
    /// Store the `'none'` source expression.
    None,
    /// Drop the directive from the header.
    Remove,
    /// Keep the directive as a bare, valueless flag.
    Flag,
}

/// Static description of one directive-based header type.
pub struct DirectivePolicy {
    pub field_name: &'static str,
    /// Case-sensitive allow-list of directive names.
    pub valid_directives: &'static [&'static str],
    pub empty_sources: fn(&str) -> EmptySources,
}

impl fmt::Debug for DirectivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectivePolicy")
            .field("field_name", &self.field_name)
            .field("valid_directives", &self.valid_directives.len())
            .finish()
    }
}

impl DirectivePolicy {
    pub fn is_valid_directive(&self, name: &str) -> bool {
        self.valid_directives.contains(&name)
    }

    fn same_as(&self, other: &DirectivePolicy) -> bool {
        std::ptr::eq(self, other) || self.field_name == other.field_name
    }
}

/// A parsed or programmatically built policy header.
#[derive(Debug, Clone)]
pub struct DirectiveHeader {
    policy: &'static DirectivePolicy,
    // Insertion-ordered; names are unique.
    directives: Vec<(String, String)>,
}

const NONE_SOURCE: &str = "'none'";

impl DirectiveHeader {
    pub fn new(policy: &'static DirectivePolicy) -> Self {
        Self {
            policy,
            directives: Vec::new(),
        }
    }

    pub fn content_security_policy() -> Self {
        Self::new(&policies::CSP)
    }

    pub fn feature_policy() -> Self {
        Self::new(&policies::FEATURE)
    }

    /// Parse a full header line for the given policy.
    ///
    /// The first occurrence of a directive wins; later duplicates in the
    /// same line are ignored. A directive with no sources (`report-uri;`)
    /// is read as an empty source list, so it follows the policy's empty-list
    /// rule: `'none'` for most directives, a bare flag for the valueless CSP
    /// ones, and dropped entirely for `report-uri`.
    pub fn from_string(policy: &'static DirectivePolicy, line: &str) -> Result<Self, NetError> {
        let value = expect_header_line(policy.field_name, line)?;
        let mut header = Self::new(policy);

        for token in value.split(';') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            let (name, directive_value) = match token.split_once(' ') {
                Some((name, rest)) => (name, rest),
                None => (token, ""),
            };

            if header.directive(name).is_some() {
                tracing::debug!(
                    header = policy.field_name,
                    directive = name,
                    "ignoring duplicate directive"
                );
                continue;
            }

            if directive_value.is_empty() {
                header.set_directive(name, &[] as &[&str])?;
            } else {
                header.set_directive(name, &[directive_value])?;
            }
        }

        Ok(header)
    }

    pub fn parse_csp(line: &str) -> Result<Self, NetError> {
        Self::from_string(&policies::CSP, line)
    }

    pub fn parse_feature_policy(line: &str) -> Result<Self, NetError> {
        Self::from_string(&policies::FEATURE, line)
    }

    pub fn policy(&self) -> &'static DirectivePolicy {
        self.policy
    }

    /// Set `name` to the space-joined source list.
    ///
    /// Nothing is modified unless the name and every source are valid.
    pub fn set_directive<S: AsRef<str>>(
        &mut self,
        name: &str,
        sources: &[S],
    ) -> Result<&mut Self, NetError> {
        if !self.policy.is_valid_directive(name) {
            return Err(NetError::invalid_directive(self.policy.field_name, name));
        }

        for source in sources {
            headervalue::assert_valid(source.as_ref())?;
        }

        if sources.is_empty() {
            match (self.policy.empty_sources)(name) {
                EmptySources::None => self.store(name, NONE_SOURCE.to_string()),
                EmptySources::Flag => self.store(name, String::new()),
                EmptySources::Remove => self.remove_directive(name),
            }
            return Ok(self);
        }

        let joined = sources
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.store(name, joined);
        Ok(self)
    }

    fn store(&mut self, name: &str, value: String) {
        if let Some((_, v)) = self.directives.iter_mut().find(|(n, _)| n == name) {
            *v = value;
        } else {
            self.directives.push((name.to_string(), value));
        }
    }

    pub fn remove_directive(&mut self, name: &str) {
        self.directives.retain(|(n, _)| n != name);
    }

    /// Value stored for `name`.
    pub fn directive(&self, name: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All directives in insertion order.
    pub fn directives(&self) -> impl Iterator<Item = (&str, &str)> {
        self.directives
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Render this header followed by `others`, one CRLF-terminated line each.
    ///
    /// All headers must share this header's policy.
    pub fn to_string_multiple_headers(&self, others: &[DirectiveHeader]) -> Result<String, NetError> {
        if let Some(other) = others.iter().find(|h| !h.policy.same_as(self.policy)) {
            return Err(NetError::IncompatibleHeaders {
                expected: self.policy.field_name.to_string(),
                actual: other.policy.field_name.to_string(),
            });
        }

        let mut out = String::new();
        for header in std::iter::once(self).chain(others) {
            out.push_str(&header.to_header_line());
            out.push_str("\r\n");
        }
        Ok(out)
    }
}

impl HeaderField for DirectiveHeader {
    fn field_name(&self) -> &str {
        self.policy.field_name
    }

    fn field_value(&self) -> String {
        self.directives
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    format!("{};", name)
                } else {
                    format!("{} {};", name, value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for DirectiveHeader {
    fn eq(&self, other: &Self) -> bool {
        self.policy.same_as(other.policy) && self.directives == other.directives
    }
}

impl fmt::Display for DirectiveHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_line())
    }
}

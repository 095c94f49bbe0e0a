//! Header line splitting and the common [`HeaderField`] interface.

use crate::base::neterror::NetError;
use crate::http::headervalue;

/// A typed header that can render itself as a `Name: value` line.
pub trait HeaderField {
    /// Canonical field name, e.g. `Content-Security-Policy`.
    fn field_name(&self) -> &str;

    /// Serialized field value without the name.
    fn field_value(&self) -> String;

    /// `"<FieldName>: <field value>"`.
    fn to_header_line(&self) -> String {
        format!("{}: {}", self.field_name(), self.field_value())
    }
}

/// Split a `Name: value` line into its trimmed name and value.
///
/// The name must be a valid token and the value must pass
/// [`headervalue::assert_valid`]; a CR/LF anywhere in the value fails here,
/// before any typed header sees it.
pub fn split_header_line(line: &str) -> Result<(&str, &str), NetError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| NetError::MalformedHeaderLine {
            line: line.to_string(),
        })?;

    let name = name.trim();
    if !headervalue::is_valid_field_name(name) {
        return Err(NetError::InvalidHeaderName {
            name: name.to_string(),
        });
    }

    let value = value.trim_matches(|c| c == ' ' || c == '\t');
    headervalue::assert_valid(value)?;

    Ok((name, value))
}

/// Split `line` and check that its name equals `expected` (ASCII
/// case-insensitive). Returns the value.
pub fn expect_header_line<'a>(expected: &str, line: &'a str) -> Result<&'a str, NetError> {
    let (name, value) = split_header_line(line)?;
    if !name.eq_ignore_ascii_case(expected) {
        return Err(NetError::invalid_header_line(expected, name));
    }
    Ok(value)
}

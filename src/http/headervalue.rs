//! Header value validation.
//!
//! Values are checked, never sanitized: anything that could split a header
//! (CR, LF, NUL and the other control bytes) is rejected outright. The
//! byte rules are the ones `http::HeaderName` / `http::HeaderValue` enforce.

use crate::base::neterror::NetError;
use http::header::{HeaderName, HeaderValue};

/// Returns true if `value` may appear in a header field value.
///
/// Visible ASCII, space, horizontal tab and obs-text (0x80-0xFF) are allowed.
/// Obsolete line folding is not: any CR or LF fails.
pub fn is_valid(value: &str) -> bool {
    HeaderValue::from_bytes(value.as_bytes()).is_ok()
}

/// Validate a header value, naming the offending value on failure.
pub fn assert_valid(value: &str) -> Result<HeaderValue, NetError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| NetError::invalid_header_value(value))
}

/// Returns true if `name` is an RFC 7230 token usable as a field name.
pub fn is_valid_field_name(name: &str) -> bool {
    HeaderName::from_bytes(name.as_bytes()).is_ok()
}

/// Returns true if `value` can be sent unquoted as a parameter value.
///
/// A `token` and a field name share one grammar.
pub fn is_token(value: &str) -> bool {
    is_valid_field_name(value)
}

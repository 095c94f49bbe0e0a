use thiserror::Error;

/// Broad classification of a [`NetError`].
///
/// Parse errors come from malformed input lines, validation errors from values
/// that are well-formed but not acceptable, runtime errors from misuse of an
/// otherwise valid object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Validation,
    Runtime,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Parse Errors
    #[error("Malformed header line: \"{line}\"")]
    MalformedHeaderLine { line: String },
    #[error("Invalid header line for {expected} string: \"{actual}\"")]
    InvalidHeaderLine { expected: String, actual: String },
    #[error("Invalid quality value \"{value}\"; expected a number between 0 and 1")]
    InvalidQuality { value: String },
    #[error("Malformed Set-Cookie string: {reason}")]
    MalformedCookie { reason: String },

    // Validation Errors
    #[error("Invalid header name \"{name}\"")]
    InvalidHeaderName { name: String },
    #[error("Invalid header value detected: {value:?}")]
    InvalidHeaderValue { value: String },
    #[error("Header value {value:?} is not a valid type")]
    InvalidFieldValueType { value: String },
    #[error("{header} expects a valid directive name; received \"{name}\"")]
    InvalidDirectiveName { header: String, name: String },
    #[error("Invalid cookie name \"{name}\"")]
    InvalidCookieName { name: String },
    #[error("Cookie \"{name}\" has no value")]
    CookieValueMissing { name: String },
    #[error("Cookie \"{name}\" has a value kind that cannot be sent in Set-Cookie")]
    UnsupportedCookieValue { name: String },
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,
    #[error("Cookie domain \"{domain}\" is a public suffix")]
    CookiePublicSuffix { domain: String },
    #[error("Cookie domain \"{domain}\" does not match request host \"{host}\"")]
    CookieDomainMismatch { domain: String, host: String },

    // Runtime Errors
    #[error("The {expected} multiple header implementation can only accept {expected} headers; received {actual}")]
    IncompatibleHeaders { expected: String, actual: String },
}

impl NetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NetError::MalformedHeaderLine { .. }
            | NetError::InvalidHeaderLine { .. }
            | NetError::InvalidQuality { .. }
            | NetError::MalformedCookie { .. } => ErrorCategory::Parse,

            NetError::InvalidHeaderName { .. }
            | NetError::InvalidHeaderValue { .. }
            | NetError::InvalidFieldValueType { .. }
            | NetError::InvalidDirectiveName { .. }
            | NetError::InvalidCookieName { .. }
            | NetError::CookieValueMissing { .. }
            | NetError::UnsupportedCookieValue { .. }
            | NetError::CookieInvalidPrefix
            | NetError::CookiePublicSuffix { .. }
            | NetError::CookieDomainMismatch { .. } => ErrorCategory::Validation,

            NetError::IncompatibleHeaders { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }

    pub fn is_validation_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Create an invalid header line error for a field name mismatch.
    pub fn invalid_header_line(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        NetError::InvalidHeaderLine {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid header value error.
    pub fn invalid_header_value(value: impl Into<String>) -> Self {
        NetError::InvalidHeaderValue {
            value: value.into(),
        }
    }

    /// Create an unknown directive error.
    pub fn invalid_directive(header: impl Into<String>, name: impl Into<String>) -> Self {
        NetError::InvalidDirectiveName {
            header: header.into(),
            name: name.into(),
        }
    }

    /// Create a malformed cookie error.
    pub fn malformed_cookie(reason: impl Into<String>) -> Self {
        NetError::MalformedCookie {
            reason: reason.into(),
        }
    }
}

impl From<cookie::ParseError> for NetError {
    fn from(err: cookie::ParseError) -> Self {
        NetError::malformed_cookie(err.to_string())
    }
}

//! Typed HTTP headers.
//!
//! - [`directive`]: `Content-Security-Policy` / `Feature-Policy` engine
//! - [`accept`]: `Accept-Language` / `Accept-Charset` / `Accept-Encoding`
//! - [`orderedheaders`]: insertion-ordered header collection
//! - [`headervalue`], [`genericheader`]: line splitting and validation shared
//!   by all of the above

pub mod accept;
pub mod directive;
pub mod genericheader;
pub mod headervalue;
pub mod orderedheaders;
pub mod policies;

// Re-exports for convenience
pub use accept::{AcceptHeader, AcceptKind, FieldValuePart};
pub use directive::{DirectiveHeader, DirectivePolicy, EmptySources};
pub use genericheader::HeaderField;
pub use orderedheaders::OrderedHeaderMap;

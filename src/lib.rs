//! # headerjar
//!
//! Typed HTTP headers and an RFC 6265 cookie jar for HTTP clients.
//!
//! `headerjar` sits between a transport and the code that builds requests:
//! raw header lines go in, structured values come out, and the same values
//! serialize back to header lines for the next request.
//!
//! ## Features
//!
//! - **Policy headers**: `Content-Security-Policy` and `Feature-Policy` with
//!   per-header directive allow-lists
//! - **Accept family**: weighted `Accept-Language`, `Accept-Charset` and
//!   `Accept-Encoding` parsing, prioritization and wildcard matching
//! - **Cookies**: `Set-Cookie` grammar, nested array values, and a jar with
//!   domain/path matching, PSL validation and eviction
//!
//! ## Quick Start
//!
//! ```rust
//! use headerjar::http::{AcceptHeader, DirectiveHeader, HeaderField};
//!
//! let csp = DirectiveHeader::parse_csp(
//!     "Content-Security-Policy: default-src 'none'; img-src 'self';",
//! )
//! .unwrap();
//! assert_eq!(csp.directive("img-src"), Some("'self'"));
//!
//! let accept = AcceptHeader::parse_accept_language("Accept-Language: da;q=0.8, en-gb").unwrap();
//! let order: Vec<_> = accept.prioritized().into_iter().map(|p| p.type_string.as_str()).collect();
//! assert_eq!(order, ["en-gb", "da"]);
//! assert_eq!(accept.to_header_line(), "Accept-Language: da;q=0.8, en-gb");
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie model, request header and jar
//! - [`http`] - Header parsing, serialization and ordered header maps
//!
//! ## Security
//!
//! - Header values containing CR or LF are rejected, never stripped
//! - Public Suffix List validation prevents supercookies
//! - `__Secure-` / `__Host-` cookie prefixes are enforced

pub mod base;
pub mod cookies;
pub mod http;

//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): every failure the header and cookie
//!   code can report, grouped by [`ErrorCategory`](neterror::ErrorCategory)

pub mod neterror;

//! Cookie model and cookie jar.
//!
//! # Architecture
//!
//! The jar mirrors Chromium's cookie storage:
//!
//! | Chromium (C++) | headerjar (Rust) | Responsibility |
//! |----------------|------------------|----------------|
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Cookie jar with oldest-first eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonicalcookie::CanonicalCookie) | Single cookie, Set-Cookie grammar |
//! | `net::registry_controlled_domains` | [`psl`] | Public suffix checks |
//!
//! Request-side values live in [`cookieheader`]; [`cookievalue`] holds the
//! value kinds a caller may build a cookie from.
//!
//! # Example
//!
//! ```rust
//! use headerjar::cookies::monster::CookieMonster;
//! use headerjar::http::OrderedHeaderMap;
//! use url::Url;
//!
//! let url = Url::parse("http://www.example.org/login").unwrap();
//! let headers = OrderedHeaderMap::from_raw(
//!     "HTTP/1.1 200 OK\r\n\
//!      Set-Cookie: sid=abc; Domain=example.org; Path=/\r\n\r\n",
//! )
//! .unwrap();
//!
//! let jar = CookieMonster::new();
//! assert_eq!(jar.add_cookies_from_response_headers(&headers, &url), 1);
//!
//! let next = Url::parse("http://sub.example.org/").unwrap();
//! let header = jar.cookie_header_for_url(&next).unwrap();
//! assert_eq!(header.to_string(), "Cookie: sid=abc");
//! ```

pub mod canonicalcookie;
pub mod config;
pub mod cookieheader;
pub mod cookievalue;
pub mod monster;
pub mod psl;

pub use canonicalcookie::{CanonicalCookie, SameSite};
pub use config::JarConfig;
pub use cookieheader::CookieHeader;
pub use cookievalue::CookieValue;
pub use monster::CookieMonster;

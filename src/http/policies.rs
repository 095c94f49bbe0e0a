//! Directive allow-lists for the policy headers.
//!
//! References:
//! - Content-Security-Policy Level 3: <https://www.w3.org/TR/CSP3/>
//! - Feature Policy (Editor's Draft, 1 April 2019):
//!   <https://w3c.github.io/webappsec-feature-policy/>

use crate::http::directive::{DirectivePolicy, EmptySources};

pub const CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
pub const FEATURE_POLICY: &str = "Feature-Policy";

const CSP_DIRECTIVES: &[&str] = &[
    // Fetch directives
    "child-src",
    "connect-src",
    "default-src",
    "font-src",
    "frame-src",
    "img-src",
    "manifest-src",
    "media-src",
    "object-src",
    "prefetch-src",
    "script-src",
    "script-src-elem",
    "script-src-attr",
    "style-src",
    "style-src-elem",
    "style-src-attr",
    "worker-src",
    // Document directives
    "base-uri",
    "plugin-types",
    "sandbox",
    // Navigation directives
    "form-action",
    "frame-ancestors",
    "navigate-to",
    // Reporting directives
    "report-uri",
    "report-to",
    // Other directives
    "block-all-mixed-content",
    "require-sri-for",
    "trusted-types",
    "upgrade-insecure-requests",
];

const FEATURE_POLICY_DIRECTIVES: &[&str] = &[
    // Standardized features
    "accelerometer",
    "ambient-light-sensor",
    "autoplay",
    "camera",
    "document-domain",
    "fullscreen",
    "gyroscope",
    "magnetometer",
    "microphone",
    "midi",
    "picture-in-picture",
    "sync-xhr",
    "usb",
    "wake-lock",
    "xr",
    // Proposed features
    "encrypted-media",
    "geolocation",
    "payment",
    "speaker",
    // Experimental features
    "document-write",
    "font-display-late-swap",
    "layout-animations",
    "lazyload",
    "legacy-image-formats",
    "oversized-images",
    "sync-script",
    "unoptimized-images",
    "unsized-media",
    "vertical-scroll",
    "serial",
];

fn csp_empty_sources(name: &str) -> EmptySources {
    match name {
        "report-uri" => EmptySources::Remove,
        "block-all-mixed-content" | "upgrade-insecure-requests" => EmptySources::Flag,
        _ => EmptySources::None,
    }
}

fn feature_policy_empty_sources(_name: &str) -> EmptySources {
    EmptySources::None
}

pub static CSP: DirectivePolicy = DirectivePolicy {
    field_name: CONTENT_SECURITY_POLICY,
    valid_directives: CSP_DIRECTIVES,
    empty_sources: csp_empty_sources,
};

pub static FEATURE: DirectivePolicy = DirectivePolicy {
    field_name: FEATURE_POLICY,
    valid_directives: FEATURE_POLICY_DIRECTIVES,
    empty_sources: feature_policy_empty_sources,
};

//! Content-Security-Policy / Feature-Policy integration tests.

use headerjar::base::neterror::{ErrorCategory, NetError};
use headerjar::http::directive::DirectiveHeader;
use headerjar::http::HeaderField;

const VALID_DIRECTIVES: &[(&str, &[&str], &str)] = &[
    ("child-src", &["'self'"], "Content-Security-Policy: child-src 'self';"),
    ("manifest-src", &["'self'"], "Content-Security-Policy: manifest-src 'self';"),
    ("worker-src", &["'self'"], "Content-Security-Policy: worker-src 'self';"),
    ("prefetch-src", &["'self'"], "Content-Security-Policy: prefetch-src 'self';"),
    ("script-src-elem", &["'self'"], "Content-Security-Policy: script-src-elem 'self';"),
    ("script-src-attr", &["'self'"], "Content-Security-Policy: script-src-attr 'self';"),
    ("style-src-elem", &["'self'"], "Content-Security-Policy: style-src-elem 'self';"),
    ("style-src-attr", &["'self'"], "Content-Security-Policy: style-src-attr 'self';"),
    (
        "base-uri",
        &["'self'", "'unsafe-inline'"],
        "Content-Security-Policy: base-uri 'self' 'unsafe-inline';",
    ),
    ("plugin-types", &["text/csv"], "Content-Security-Policy: plugin-types text/csv;"),
    (
        "form-action",
        &["http://*.example.com", "'self'"],
        "Content-Security-Policy: form-action http://*.example.com 'self';",
    ),
    (
        "frame-ancestors",
        &["http://*.example.com", "'self'"],
        "Content-Security-Policy: frame-ancestors http://*.example.com 'self';",
    ),
    ("navigate-to", &["example.com"], "Content-Security-Policy: navigate-to example.com;"),
    ("sandbox", &["allow-forms"], "Content-Security-Policy: sandbox allow-forms;"),
];

#[test]
fn test_set_directive_renders_header_line() {
    for (name, sources, expected) in VALID_DIRECTIVES {
        let mut csp = DirectiveHeader::content_security_policy();
        csp.set_directive(name, *sources).unwrap();
        assert_eq!(csp.to_header_line(), *expected, "directive {}", name);
    }
}

#[test]
fn test_from_string_reads_each_directive() {
    for (name, sources, line) in VALID_DIRECTIVES {
        let csp = DirectiveHeader::parse_csp(line).unwrap();
        assert_eq!(csp.directive(name), Some(sources.join(" ").as_str()));
    }
}

#[test]
fn test_serialize_then_parse_roundtrip() {
    let mut csp = DirectiveHeader::content_security_policy();
    for (name, sources, _) in VALID_DIRECTIVES {
        csp.set_directive(name, *sources).unwrap();
    }

    let reparsed = DirectiveHeader::parse_csp(&csp.to_header_line()).unwrap();
    assert_eq!(reparsed, csp);
    let names: Vec<_> = reparsed.directives().map(|(name, _)| name).collect();
    let expected: Vec<_> = VALID_DIRECTIVES.iter().map(|(name, _, _)| *name).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_csp_field_value() {
    let mut csp = DirectiveHeader::content_security_policy();
    csp.set_directive("default-src", &["'self'"])
        .unwrap()
        .set_directive("img-src", &["https://*.github.com"])
        .unwrap()
        .set_directive("script-src", &["'none'"])
        .unwrap();
    assert_eq!(
        csp.field_value(),
        "default-src 'self'; img-src https://*.github.com; script-src 'none';"
    );
}

#[test]
fn test_empty_header_line() {
    let csp = DirectiveHeader::content_security_policy();
    assert_eq!(csp.to_header_line(), "Content-Security-Policy: ");
    assert!(csp.is_empty());
}

#[test]
fn test_report_uri_removed_by_empty_list() {
    let mut csp = DirectiveHeader::content_security_policy();
    csp.set_directive("default-src", &["'self'"]).unwrap();
    csp.set_directive("report-uri", &["csp-error"]).unwrap();
    assert_eq!(
        csp.to_header_line(),
        "Content-Security-Policy: default-src 'self'; report-uri csp-error;"
    );

    csp.set_directive("report-uri", &[] as &[&str]).unwrap();
    assert_eq!(csp.to_header_line(), "Content-Security-Policy: default-src 'self';");
}

#[test]
fn test_feature_policy_parse_and_render() {
    let line = "Feature-Policy: geolocation 'none'; autoplay 'self'; microphone 'self';";
    let header = DirectiveHeader::parse_feature_policy(line).unwrap();

    let directives: Vec<_> = header.directives().collect();
    assert_eq!(
        directives,
        vec![
            ("geolocation", "'none'"),
            ("autoplay", "'self'"),
            ("microphone", "'self'")
        ]
    );
    assert_eq!(header.to_header_line(), line);
    assert_eq!(header.field_name(), "Feature-Policy");
}

#[test]
fn test_feature_policy_set_directive() {
    let mut header = DirectiveHeader::feature_policy();
    header
        .set_directive("geolocation", &["https://*.google.com", "http://foo.com"])
        .unwrap()
        .set_directive("autoplay", &["'self'"])
        .unwrap()
        .set_directive("microphone", &["https://*.googleapis.com", "https://*.bar.com"])
        .unwrap();
    assert_eq!(
        header.to_header_line(),
        "Feature-Policy: geolocation https://*.google.com http://foo.com; \
         autoplay 'self'; microphone https://*.googleapis.com https://*.bar.com;"
    );

    header.set_directive("geolocation", &[] as &[&str]).unwrap();
    assert_eq!(header.directive("geolocation"), Some("'none'"));
}

#[test]
fn test_feature_policy_rejects_csp_directive() {
    let mut header = DirectiveHeader::feature_policy();
    let err = header
        .set_directive("default-src", &["'self'"])
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(err.to_string().contains("valid directive name"));
}

#[test]
fn test_improper_field_name() {
    let err =
        DirectiveHeader::parse_feature_policy("X-Feature-Policy: geolocation 'none';").unwrap_err();
    assert!(matches!(err, NetError::InvalidHeaderLine { .. }));

    let err = DirectiveHeader::parse_csp("X-Content-Security-Policy: default-src 'self';")
        .unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_crlf_attacks() {
    assert!(DirectiveHeader::parse_csp(
        "Content-Security-Policy: default-src 'none'\r\n\r\nevilContent"
    )
    .is_err());
    assert!(DirectiveHeader::parse_feature_policy(
        "Feature-Policy: geolocation 'none'\r\n\r\nevilContent"
    )
    .is_err());

    let mut csp = DirectiveHeader::content_security_policy();
    assert!(csp
        .set_directive("default-src", &["\r\n'self'"])
        .is_err());
    assert!(csp.is_empty());
}

#[test]
fn test_multiple_headers_type_mismatch() {
    let csp = DirectiveHeader::parse_csp("Content-Security-Policy: default-src 'self';").unwrap();
    let fp = DirectiveHeader::parse_feature_policy("Feature-Policy: camera 'none';").unwrap();

    let err = csp.to_string_multiple_headers(&[fp]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Runtime);
}

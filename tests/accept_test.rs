//! Accept-family integration tests.

use headerjar::base::neterror::NetError;
use headerjar::http::accept::{AcceptHeader, AcceptKind};
use headerjar::http::orderedheaders::OrderedHeaderMap;
use headerjar::http::HeaderField;

#[test]
fn test_to_string_after_adding_languages() {
    let mut header = AcceptHeader::accept_language();
    header
        .add_language("da", 0.8)
        .unwrap()
        .add_language("en-gb", 1.0)
        .unwrap();
    assert_eq!(header.to_string(), "Accept-Language: da;q=0.8, en-gb");
}

#[test]
fn test_wildcard_language_entry() {
    let mut header = AcceptHeader::accept_language();
    header
        .add_language("da", 0.8)
        .unwrap()
        .add_language("*", 0.4)
        .unwrap();

    assert!(header.has_language("da"));
    assert!(header.has_language("en"));
    assert_eq!(header.to_header_line(), "Accept-Language: da;q=0.8, *;q=0.4");
}

#[test]
fn test_prioritized_order() {
    let header =
        AcceptHeader::parse_accept_language("Accept-Language: da;q=0.8, en-gb, *;q=0.4").unwrap();
    let prioritized = header.prioritized();
    let types: Vec<_> = prioritized.iter().map(|p| p.type_string.as_str()).collect();
    assert_eq!(types, vec!["en-gb", "da", "*"]);
    assert_eq!(prioritized[1].index, 0);
}

#[test]
fn test_match_result_points_back_to_query() {
    let header = AcceptHeader::parse_accept_language("Accept-Language: en-*;q=0.9, fr").unwrap();

    let matched = header.matches("en-US").unwrap();
    assert_eq!(matched.type_string, "en-*");
    let query = matched.matched_against.as_deref().unwrap();
    assert_eq!(query.primary_tag(), "en");
    assert_eq!(query.sub_tag(), Some("US"));

    assert!(header.matches("de").is_none());
}

#[test]
fn test_parse_from_response_headers() {
    let raw = "GET / HTTP/1.1\r\n\
               Host: example.com\r\n\
               Accept-Charset: iso-8859-5, unicode-1-1;q=0.8\r\n\
               Accept-Encoding: gzip, deflate;q=0.5\r\n\r\n";
    let headers = OrderedHeaderMap::from_raw(raw).unwrap();

    let charset = AcceptHeader::parse_field_value(
        AcceptKind::Charset,
        headers.get("accept-charset").unwrap(),
    )
    .unwrap();
    assert!(charset.has_charset("ISO-8859-5"));
    assert!(!charset.has_charset("utf-8"));

    let encoding = AcceptHeader::parse_field_value(
        AcceptKind::Encoding,
        headers.get("accept-encoding").unwrap(),
    )
    .unwrap();
    assert_eq!(encoding.prioritized()[0].type_string, "gzip");
    assert_eq!(encoding.field_name(), "Accept-Encoding");
}

#[test]
fn test_invalid_inputs() {
    let err = AcceptHeader::parse_accept_language("Accept-Language: da;q=high").unwrap_err();
    assert!(matches!(err, NetError::InvalidQuality { .. }));

    let err =
        AcceptHeader::parse_accept_language("Accept-Language: da\r\n\r\nevilContent").unwrap_err();
    assert!(matches!(err, NetError::InvalidHeaderValue { .. }));

    let mut header = AcceptHeader::accept_language();
    let err = header.add_language("\nen", 1.0).unwrap_err();
    assert!(err.to_string().contains("valid type"));
    assert!(header.add_language("en", 1.5).is_err());
    assert!(header.is_empty());
}

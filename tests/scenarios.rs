//! End-to-end scenarios from spec.md §8 ("Concrete scenarios"), run
//! against the public crate surface rather than `DictCore` internals.

use httpdict::{RequestHeaders, ResponseHeaders};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn scenario_1_host_header_parses_clean() {
    init_tracing();
    let mut req = RequestHeaders::new();
    req.try_append(b"Host", b"example.com");

    assert_eq!(req.get("host"), Some(vec!["example.com".to_string()]));
    assert_eq!(req.get("Host").map(|v| v.len()), Some(1));
    assert!(req.iter().any(|e| matches!(
        e,
        httpdict::dictionary::DictEntry::Known(httpdict::KnownHeader::Host, _)
    )));
}

#[test]
fn scenario_2_repeated_accept_encoding_accumulates_in_order() {
    init_tracing();
    let mut req = RequestHeaders::new();
    req.try_append(b"Accept-Encoding", b"gzip");
    req.try_append(b"Accept-Encoding", b"br");

    assert_eq!(
        req.get("Accept-Encoding"),
        Some(vec!["gzip".to_string(), "br".to_string()])
    );
}

#[test]
fn scenario_3_hpack_content_length_parses_and_serializes() {
    init_tracing();
    let index = httpdict::hpack::content_length_index();

    let mut req = RequestHeaders::new();
    assert!(req.try_hpack_append(index, b"42"));
    assert_eq!(req.content_length(), Some(42));

    let mut resp = ResponseHeaders::new();
    assert!(resp.try_hpack_append(index, b"42"));
    assert_eq!(&resp.serialize()[..], b"\r\nContent-Length: 42");
}

#[test]
fn scenario_4_invalid_h2h3_headers_are_detected_and_clearable() {
    init_tracing();
    let mut resp = ResponseHeaders::new();
    resp.set("Connection", "close").unwrap();
    resp.set("Transfer-Encoding", "chunked").unwrap();

    assert!(resp.has_invalid_h2h3_headers());
    resp.clear_invalid_h2h3_headers();
    assert!(!resp.has_invalid_h2h3_headers());

    let bytes = resp.serialize();
    assert!(!bytes.windows(10).any(|w| w == b"Connection"));
}

#[test]
fn scenario_5_enhanced_setters_serialize_raw_slots_verbatim() {
    init_tracing();
    let mut resp = ResponseHeaders::new();
    resp.set("Date", "Tue, 15 Nov 1994 08:12:31 GMT").unwrap();
    resp.set("Server", "demo/1.0").unwrap();
    resp.set("Content-Type", "text/plain").unwrap();

    resp.set_raw("Date", bytes::Bytes::from_static(b"\r\nDate: RAW-DATE")).unwrap();
    resp.set_raw("Server", bytes::Bytes::from_static(b"\r\nServer: RAW-SERVER")).unwrap();
    resp.set_raw(
        "Content-Type",
        bytes::Bytes::from_static(b"\r\nContent-Type: RAW-TYPE"),
    )
    .unwrap();

    let out = resp.serialize();
    let text = std::str::from_utf8(&out).unwrap();
    assert!(text.contains("RAW-DATE"));
    assert!(text.contains("RAW-SERVER"));
    assert!(text.contains("RAW-TYPE"));
    assert!(!text.contains("text/plain"));
}

#[test]
fn scenario_6_control_byte_rejected_under_default_encoding() {
    init_tracing();
    let mut resp = ResponseHeaders::new();
    let err = resp.set("ETag", "\u{1}").unwrap_err();
    assert!(err.is_invalid_value());
    assert_eq!(resp.get("ETag"), None);
}

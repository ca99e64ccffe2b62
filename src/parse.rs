//! HTTP/1 wire integration (SPEC_FULL.md §2): a thin `httparse`-based
//! tokenizer that turns a raw request buffer into `(name, value)` byte
//! pairs fed to [`crate::dictionary::request::RequestHeaders::try_append`].
//!
//! Grounded on the teacher's `proto/h1/role.rs` (`record_header_indices`,
//! `MAX_HEADERS`), which performs the same raw-byte-indices-into-buffer
//! dance before handing headers to its own dictionary.

use crate::dictionary::request::RequestHeaders;
use crate::error::{Error, ErrorKind, Result};

/// Request-line fields recovered alongside the headers.
#[derive(Debug, Clone)]
pub struct RequestLine {
    /// The HTTP method token, e.g. `"GET"`.
    pub method: String,
    /// The request target as written on the wire.
    pub path: String,
    /// Minor HTTP/1 version (0 or 1).
    pub version_minor: u8,
}

/// Maximum number of headers `httparse` will tokenize per request,
/// mirroring the teacher's own `MAX_HEADERS` ceiling.
pub const MAX_HEADERS: usize = 100;

/// Parses a complete HTTP/1 request out of `buf`, appending every header
/// to `headers` via [`RequestHeaders::try_append`].
///
/// Returns `Ok(None)` if `buf` does not yet contain a complete header
/// block (the caller should read more bytes and retry), `Ok(Some(_))`
/// with the request line and the number of bytes consumed on success.
pub fn parse_request(buf: &[u8], headers: &mut RequestHeaders) -> Result<Option<(RequestLine, usize)>> {
    let mut raw_headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut req = httparse::Request::new(&mut raw_headers);

    let status = req
        .parse(buf)
        .map_err(|_| Error::new(ErrorKind::InvalidValue))?;

    let consumed = match status {
        httparse::Status::Complete(n) => n,
        httparse::Status::Partial => return Ok(None),
    };

    for header in req.headers.iter() {
        headers.try_append(header.name.as_bytes(), header.value);
    }

    let line = RequestLine {
        method: req.method.unwrap_or_default().to_string(),
        path: req.path.unwrap_or_default().to_string(),
        version_minor: req.version.unwrap_or_default(),
    };

    Ok(Some((line, consumed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_header() {
        let buf = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let mut headers = RequestHeaders::new();
        let (line, consumed) = parse_request(buf, &mut headers).unwrap().expect("complete request");
        assert_eq!(line.method, "GET");
        assert_eq!(line.path, "/");
        assert_eq!(consumed, buf.len());
        assert_eq!(headers.get("host"), Some(vec!["example.com".to_string()]));
    }

    #[test]
    fn partial_request_returns_none() {
        let buf = b"GET / HTTP/1.1\r\nHost: example.c";
        let mut headers = RequestHeaders::new();
        assert!(parse_request(buf, &mut headers).unwrap().is_none());
    }

    #[test]
    fn repeated_header_accumulates_values() {
        let buf = b"GET / HTTP/1.1\r\nAccept-Encoding: gzip\r\nAccept-Encoding: br\r\n\r\n";
        let mut headers = RequestHeaders::new();
        parse_request(buf, &mut headers).unwrap();
        assert_eq!(
            headers.get("Accept-Encoding"),
            Some(vec!["gzip".to_string(), "br".to_string()])
        );
    }

    #[test]
    fn unknown_header_lands_in_side_table() {
        let buf = b"GET / HTTP/1.1\r\nX-Request-Id: abc123\r\n\r\n";
        let mut headers = RequestHeaders::new();
        parse_request(buf, &mut headers).unwrap();
        assert_eq!(headers.get("X-Request-Id"), Some(vec!["abc123".to_string()]));
    }
}

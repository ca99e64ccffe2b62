//! The request-direction header dictionary.

use super::{DictCore, DictEntry};
use crate::error::{Error, Result};
use crate::registry::REQUEST;

/// A request's known+unknown header dictionary.
///
/// Request values are never validated against a per-header encoding
/// (§4.7: "Response and trailer directions additionally validate...");
/// requests accept whatever bytes the HTTP/1 parser or HPACK dispatcher
/// hands them, same as the teacher's own `HeaderMap` is agnostic about
/// value content on the request path.
#[derive(Debug)]
pub struct RequestHeaders {
    core: DictCore,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        RequestHeaders::new()
    }
}

impl RequestHeaders {
    /// An empty, writable request dictionary.
    pub fn new() -> RequestHeaders {
        RequestHeaders {
            core: DictCore::new(
                REQUEST,
                crate::layout::request(),
                crate::matcher::request(),
                crate::hpack::request(),
                false,
            ),
        }
    }

    /// §6 "Indexed get/set by name (case-insensitive)".
    pub fn get(&self, name: &str) -> Option<Vec<String>> {
        self.core.get(name)
    }

    /// §4.7 `set`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.core.set(name, value.into())
    }

    /// §4.7 `add`.
    pub fn add(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.core.add(name, value.into())
    }

    /// §4.7 `remove`.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        self.core.remove(name)
    }

    /// The parsed `Content-Length`, if any (stored outside `bits` for
    /// the request direction, per spec.md §9).
    pub fn content_length(&self) -> Option<u64> {
        self.core.content_length()
    }

    /// §4.7 `try_append`: called by the HTTP/1 parser with raw name and
    /// value bytes.
    pub fn try_append(&mut self, name: &[u8], value: &[u8]) {
        self.core.try_append(name, value)
    }

    /// §4.7 `try_hpack_append`: called when parsing an HTTP/2 request
    /// whose header field referenced a static-table index.
    pub fn try_hpack_append(&mut self, index: usize, value: &[u8]) -> bool {
        self.core.try_hpack_append(index, value)
    }

    /// Freezes the dictionary; all further mutators return
    /// [`Error`] with [`Error::is_read_only`].
    pub fn freeze(&mut self) {
        self.core.freeze()
    }

    /// Whether [`RequestHeaders::freeze`] has been called.
    pub fn is_readonly(&self) -> bool {
        self.core.is_readonly()
    }

    /// Copies this dictionary's known and unknown headers into `target`
    /// (§2 of SPEC_FULL.md's supplemented `copy_to`).
    pub fn copy_to(&self, target: &mut RequestHeaders) {
        self.core.copy_to(&mut target.core)
    }

    /// §4.7 "Clear": resets the dictionary for the next message on the
    /// same connection, preserving the value-reuse snapshot.
    pub fn clear(&mut self) {
        self.core.clear()
    }

    /// §4.7 "Enumeration": known-then-unknown, in the deterministic
    /// order of §4.7.
    pub fn iter(&self) -> impl Iterator<Item = DictEntry> + '_ {
        self.core.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_roundtrips_through_try_append() {
        let mut req = RequestHeaders::new();
        req.try_append(b"Host", b"example.com");
        assert_eq!(req.get("host"), Some(vec!["example.com".to_string()]));
    }

    #[test]
    fn accept_encoding_accumulates_two_values_in_order() {
        let mut req = RequestHeaders::new();
        req.try_append(b"Accept-Encoding", b"gzip");
        req.try_append(b"Accept-Encoding", b"br");
        assert_eq!(
            req.get("Accept-Encoding"),
            Some(vec!["gzip".to_string(), "br".to_string()])
        );
    }

    #[test]
    fn hpack_content_length_append_parses_and_always_succeeds() {
        let mut req = RequestHeaders::new();
        let index = crate::hpack::content_length_index();
        assert!(req.try_hpack_append(index, b"42"));
        assert_eq!(req.content_length(), Some(42));
    }

    #[test]
    fn copy_to_preserves_known_and_unknown_headers() {
        let mut src = RequestHeaders::new();
        src.set("Host", "example.com").unwrap();
        src.try_append(b"X-Custom", b"value");

        let mut dst = RequestHeaders::new();
        src.copy_to(&mut dst);

        assert_eq!(dst.get("Host"), Some(vec!["example.com".to_string()]));
        assert_eq!(dst.get("X-Custom"), Some(vec!["value".to_string()]));
    }

    #[test]
    fn frozen_dictionary_rejects_mutation() {
        let mut req = RequestHeaders::new();
        req.freeze();
        assert!(req.is_readonly());
        assert!(req.set("Host", "x").unwrap_err().is_read_only());
    }
}

//! The response-direction header dictionary, including the
//! response-only wire serializer (§4.7 "Serialization").

use super::{DictCore, DictEntry};
use crate::error::Result;
use crate::layout::CONTENT_LENGTH_PINNED_INDEX;
use crate::registry::RESPONSE;
use bytes::{BufMut, Bytes, BytesMut};

/// A response's known+unknown header dictionary.
#[derive(Debug)]
pub struct ResponseHeaders {
    core: DictCore,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        ResponseHeaders::new()
    }
}

impl ResponseHeaders {
    /// An empty, writable response dictionary.
    pub fn new() -> ResponseHeaders {
        ResponseHeaders {
            core: DictCore::new(
                RESPONSE,
                crate::layout::response(),
                crate::matcher::response(),
                crate::hpack::response(),
                true,
            ),
        }
    }

    /// §6 "Indexed get/set by name (case-insensitive)".
    pub fn get(&self, name: &str) -> Option<Vec<String>> {
        self.core.get(name)
    }

    /// §4.7 `set`. Validates value bytes against the header's
    /// configured encoding (response direction).
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

    /// The pinned `Content-Length` value (bit 63).
    pub fn content_length(&self) -> Option<u64> {
        self.core.content_length()
    }

    /// Sets the pinned `Content-Length` value directly.
    pub fn set_content_length(&mut self, value: u64) -> Result<()> {
        self.core.set("Content-Length", value.to_string())
    }

    /// §4.7 "enhanced setter": installs a pre-encoded raw byte
    /// replacement for `name`'s serialized form. A no-op if `name`
    /// isn't registered with `enhanced_setter` in this direction.
    pub fn set_raw(&mut self, name: &str, raw: Bytes) -> Result<()> {
        self.core.set_raw(name, raw)
    }

    /// §4.7 `try_append`, for a response-direction caller (e.g. an
    /// HTTP/1 client parsing a server's response).
    pub fn try_append(&mut self, name: &[u8], value: &[u8]) {
        self.core.try_append(name, value)
    }

    /// §4.7 `try_hpack_append`, for an HTTP/2 client.
    pub fn try_hpack_append(&mut self, index: usize, value: &[u8]) -> bool {
        self.core.try_hpack_append(index, value)
    }

    /// Freezes the dictionary.
    pub fn freeze(&mut self) {
        self.core.freeze()
    }

    /// Whether [`ResponseHeaders::freeze`] has been called.
    pub fn is_readonly(&self) -> bool {
        self.core.is_readonly()
    }

    /// §2 of SPEC_FULL.md: whether any bit in
    /// `InvalidH2H3ResponseHeadersBits` is set.
    pub fn has_invalid_h2h3_headers(&self) -> bool {
        self.core.has_invalid_h2h3_headers()
    }

    /// §2 of SPEC_FULL.md: clears every header named by
    /// `InvalidH2H3ResponseHeadersBits`.
    pub fn clear_invalid_h2h3_headers(&mut self) {
        self.core.clear_invalid_h2h3_headers()
    }

    /// Copies known/unknown headers into `target`.
    pub fn copy_to(&self, target: &mut ResponseHeaders) {
        self.core.copy_to(&mut target.core)
    }

    /// §4.7 "Clear".
    pub fn clear(&mut self) {
        self.core.clear()
    }

    /// §4.7 "Enumeration".
    pub fn iter(&self) -> impl Iterator<Item = DictEntry> + '_ {
        self.core.iter()
    }

    /// §4.7 "Serialization (response/trailer only)".
    ///
    /// Iterates the set bits of `bits` from least significant to most,
    /// writing each header's pre-encoded `"\r\nName: "` slice followed
    /// by its value(s), or its raw pre-encoded companion verbatim when
    /// one is populated. `Content-Length` (bit 63) is written as a
    /// decimal integer.
    pub fn serialize(&self) -> Bytes {
        serialize_direction(&self.core, crate::wire::response())
    }
}

/// Shared by [`ResponseHeaders::serialize`] and
/// `TrailerHeaders::serialize`: walk set bits low-to-high, emitting each
/// header's pre-encoded name slice plus value, or its raw companion.
pub(super) fn serialize_direction(core: &DictCore, wire: &crate::wire::WireTable) -> Bytes {
    assert_invalid_bits_subset_of_known(core);

    let mut out = BytesMut::new();
    let mut bits = core.bits();

    while bits != 0 {
        let index = bits.trailing_zeros() as u8;
        bits &= bits - 1;

        if index == CONTENT_LENGTH_PINNED_INDEX {
            if let Some((_, slice)) = wire.slice_for("Content-Length") {
                out.put_slice(slice);
            } else {
                out.put_slice(b"\r\nContent-Length: ");
            }
            if let Some(n) = core.content_length() {
                let mut buf = [0u8; 20];
                let len = itoa::write(&mut buf[..], n).expect("writing to a stack buffer cannot fail");
                out.put_slice(&buf[..len]);
            }
            continue;
        }

        let entry = core
            .layout()
            .entries
            .iter()
            .find(|e| e.index == index)
            .expect("set bit must correspond to a known header");

        let snapshot = core
            .slot_snapshot(index)
            .expect("set bit implies a populated slot");

        if let Some(raw) = snapshot.raw {
            out.put_slice(raw);
            continue;
        }

        if let Some((_, slice)) = wire.slice_for(entry.spec.name) {
            out.put_slice(slice);
        } else {
            out.put_slice(b"\r\n");
            out.put_slice(entry.spec.name.as_bytes());
            out.put_slice(b": ");
        }
        for (i, value) in snapshot.values.iter().enumerate() {
            if i > 0 {
                out.put_slice(b", ");
            }
            out.put_slice(value.as_bytes());
        }
    }

    out.freeze()
}

pub(super) fn assert_invalid_bits_subset_of_known(core: &DictCore) {
    let known_mask = core
        .layout()
        .entries
        .iter()
        .fold(0u64, |acc, e| acc | (1u64 << e.index));
    debug_assert_eq!(
        core.bits() & !known_mask,
        0,
        "InvalidHeaderBitsError: bit set outside the legal set"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_single_header_as_crlf_name_colon_space_value() {
        let mut resp = ResponseHeaders::new();
        resp.set("ETag", "\"abc\"").unwrap();
        let bytes = resp.serialize();
        assert_eq!(&bytes[..], b"\r\nETag: \"abc\"");
    }

    #[test]
    fn serializes_content_length_as_decimal() {
        let mut resp = ResponseHeaders::new();
        resp.set_content_length(42).unwrap();
        let bytes = resp.serialize();
        assert_eq!(&bytes[..], b"\r\nContent-Length: 42");
    }

    #[test]
    fn enhanced_setter_raw_slot_is_written_verbatim() {
        let mut resp = ResponseHeaders::new();
        resp.set("Date", "Tue, 15 Nov 1994 08:12:31 GMT").unwrap();
        resp.set_raw("Date", Bytes::from_static(b"\r\nDate: RAW-OVERRIDE")).unwrap();
        let bytes = resp.serialize();
        assert_eq!(&bytes[..], b"\r\nDate: RAW-OVERRIDE");
    }

    #[test]
    fn invalid_h2h3_roundtrip() {
        let mut resp = ResponseHeaders::new();
        resp.set("Connection", "close").unwrap();
        resp.set("Transfer-Encoding", "chunked").unwrap();
        assert!(resp.has_invalid_h2h3_headers());
        resp.clear_invalid_h2h3_headers();
        assert!(!resp.has_invalid_h2h3_headers());
        assert_eq!(resp.get("Connection"), None);
        assert_eq!(resp.get("Transfer-Encoding"), None);
    }

    #[test]
    fn invalid_value_byte_is_rejected_and_bit_stays_clear() {
        let mut resp = ResponseHeaders::new();
        let err = resp.set("ETag", "\u{1}").unwrap_err();
        assert!(err.is_invalid_value());
        assert_eq!(resp.get("ETag"), None);
    }
}

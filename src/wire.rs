//! Wire-Bytes Table Builder (§4.5).
//!
//! Builds, per direction, a single concatenated byte blob holding
//! `"\r\nName: "` for every header with an [`enhanced_setter`], in
//! ascending bit-index order, and records the `(offset, length)` slice
//! for each. The serializer (§4.7) writes these slices verbatim into the
//! outgoing buffer instead of re-encoding the name on every message.
//!
//! [`enhanced_setter`]: crate::registry::HeaderSpec::enhanced_setter

use crate::layout::Layout;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A `(offset, length)` slice into a direction's [`WireTable::blob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireSlice {
    /// Byte offset into the blob.
    pub offset: usize,
    /// Slice length, including the leading `"\r\n"` and trailing `": "`.
    pub len: usize,
}

/// The pre-encoded name-bytes table for one direction.
#[derive(Debug)]
pub struct WireTable {
    /// `"\r\nName: "` for every enhanced-setter header, concatenated in
    /// bit-index order.
    pub blob: Bytes,
    /// Identifier → slice into [`WireTable::blob`].
    slices: HashMap<&'static str, WireSlice>,
}

impl WireTable {
    /// The pre-encoded `"\r\nName: "` bytes for `name`, if it has an
    /// enhanced setter in this direction.
    pub fn slice_for(&self, name: &str) -> Option<(&WireSlice, &[u8])> {
        self.slices
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, slice)| (slice, &self.blob[slice.offset..slice.offset + slice.len]))
    }

    fn build(layout: &'static Layout) -> WireTable {
        let mut blob = Vec::new();
        let mut slices = HashMap::new();

        let mut entries: Vec<_> = layout.entries.iter().collect();
        entries.sort_by_key(|e| e.index);

        for entry in entries {
            if !entry.spec.enhanced_setter {
                continue;
            }
            let offset = blob.len();
            blob.extend_from_slice(b"\r\n");
            blob.extend_from_slice(entry.spec.name.as_bytes());
            blob.extend_from_slice(b": ");
            let len = blob.len() - offset;
            slices.insert(entry.spec.name, WireSlice { offset, len });
        }

        WireTable {
            blob: Bytes::from(blob),
            slices,
        }
    }
}

static REQUEST_TABLE: OnceLock<WireTable> = OnceLock::new();
static RESPONSE_TABLE: OnceLock<WireTable> = OnceLock::new();
static TRAILER_TABLE: OnceLock<WireTable> = OnceLock::new();

/// The response direction's wire-bytes table.
pub fn response() -> &'static WireTable {
    RESPONSE_TABLE.get_or_init(|| WireTable::build(crate::layout::response()))
}

/// The trailer direction's wire-bytes table.
pub fn trailer() -> &'static WireTable {
    TRAILER_TABLE.get_or_init(|| WireTable::build(crate::layout::trailer()))
}

/// The request direction's wire-bytes table (requests are never
/// serialized by this crate, but the table is still exposed for
/// symmetry and for any caller building an outbound proxy request).
pub fn request() -> &'static WireTable {
    REQUEST_TABLE.get_or_init(|| WireTable::build(crate::layout::request()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_never_overlap_differently_named_headers() {
        let table = response();
        let mut entries: Vec<_> = table.slices.iter().collect();
        entries.sort_by_key(|(_, slice)| slice.offset);
        for pair in entries.windows(2) {
            let (_, a) = pair[0];
            let (_, b) = pair[1];
            assert!(a.offset + a.len <= b.offset);
        }
    }

    #[test]
    fn slice_bytes_are_ascii_crlf_name_colon_space() {
        let table = response();
        let (_, bytes) = table.slice_for("Content-Type").expect("known enhanced header");
        assert!(bytes.is_ascii());
        assert!(bytes.starts_with(b"\r\n"));
        assert!(bytes.ends_with(b": "));
        assert!(bytes.windows(12).any(|w| w == b"Content-Type"));
    }

    #[test]
    fn unknown_names_have_no_slice() {
        assert!(response().slice_for("X-Not-A-Real-Header").is_none());
    }
}

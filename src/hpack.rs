//! HPACK Dispatcher (§4.6).
//!
//! The HTTP/2 (and HTTP/3 QPACK, which reuses the same static table)
//! static table assigns small integer indices to the 61 most common
//! header names (and a few common name+value pairs). This module groups
//! those 61 entries by name and resolves each group, case-insensitively,
//! against a known header in the registry, so [`crate::dictionary`] can
//! dispatch `try_hpack_append(index, value)` straight to a known-header
//! slot without running the name through the SWAR matcher.

use crate::layout::{Layout, LayoutEntry};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The 61-entry HTTP/2 static table (RFC 7541 Appendix A), 1-indexed in
/// the wire format but stored 0-indexed here.
pub const STATIC_TABLE: [(&str, &str); 61] = [
    (":authority", ""),
    (":method", "GET"),
    (":method", "POST"),
    (":path", "/"),
    (":path", "/index.html"),
    (":scheme", "http"),
    (":scheme", "https"),
    (":status", "200"),
    (":status", "204"),
    (":status", "206"),
    (":status", "304"),
    (":status", "400"),
    (":status", "404"),
    (":status", "500"),
    ("accept-charset", ""),
    ("accept-encoding", "gzip, deflate"),
    ("accept-language", ""),
    ("accept-ranges", ""),
    ("accept", ""),
    ("access-control-allow-origin", ""),
    ("age", ""),
    ("allow", ""),
    ("authorization", ""),
    ("cache-control", ""),
    ("content-disposition", ""),
    ("content-encoding", ""),
    ("content-language", ""),
    ("content-length", ""),
    ("content-location", ""),
    ("content-range", ""),
    ("content-type", ""),
    ("cookie", ""),
    ("date", ""),
    ("etag", ""),
    ("expect", ""),
    ("expires", ""),
    ("from", ""),
    ("host", ""),
    ("if-match", ""),
    ("if-modified-since", ""),
    ("if-none-match", ""),
    ("if-range", ""),
    ("if-unmodified-since", ""),
    ("last-modified", ""),
    ("link", ""),
    ("location", ""),
    ("max-forwards", ""),
    ("proxy-authenticate", ""),
    ("proxy-authorization", ""),
    ("range", ""),
    ("referer", ""),
    ("refresh", ""),
    ("retry-after", ""),
    ("server", ""),
    ("set-cookie", ""),
    ("strict-transport-security", ""),
    ("transfer-encoding", ""),
    ("user-agent", ""),
    ("vary", ""),
    ("via", ""),
    ("www-authenticate", ""),
];

/// A resolved dispatch target: every static-table index whose name
/// equals `name` case-insensitively, and the known header it maps to (if
/// any — pseudo-headers and `link`/`content-disposition`/`refresh` have
/// no registered known-header counterpart in every direction).
#[derive(Debug)]
pub struct HpackGroup {
    /// The lower-cased wire name shared by every index in `indices`.
    pub name: &'static str,
    /// Every 0-based `STATIC_TABLE` index with this name.
    pub indices: Vec<usize>,
    /// The known header this name resolves to in the given direction,
    /// if any.
    pub entry: Option<LayoutEntry>,
}

/// Dispatch table for one direction: a mapping from static-table index
/// to the known header it targets.
#[derive(Debug)]
pub struct Dispatcher {
    by_index: HashMap<usize, LayoutEntry>,
}

impl Dispatcher {
    /// Resolve a static-table index to its known-header layout entry,
    /// if the direction has a known header registered under that name.
    pub fn resolve(&self, index: usize) -> Option<&LayoutEntry> {
        self.by_index.get(&index)
    }

    fn build(layout: &'static Layout) -> Dispatcher {
        let mut by_index = HashMap::new();
        for (i, (name, _)) in STATIC_TABLE.iter().enumerate() {
            if let Some(entry) = layout.find(name) {
                by_index.insert(i, *entry);
            }
        }
        Dispatcher { by_index }
    }
}

/// Every static-table entry grouped by name, for documentation /
/// code-generation purposes (§6 "HPACK static table" is part of the
/// generator's declared input).
pub fn groups(layout: &'static Layout) -> Vec<HpackGroup> {
    let mut out: Vec<HpackGroup> = Vec::new();
    for (i, (name, _)) in STATIC_TABLE.iter().enumerate() {
        if let Some(group) = out.iter_mut().find(|g: &&mut HpackGroup| g.name == *name) {
            group.indices.push(i);
        } else {
            out.push(HpackGroup {
                name,
                indices: vec![i],
                entry: layout.find(name).copied(),
            });
        }
    }
    out
}

static REQUEST_DISPATCH: OnceLock<Dispatcher> = OnceLock::new();
static RESPONSE_DISPATCH: OnceLock<Dispatcher> = OnceLock::new();

/// The request direction's HPACK dispatch table.
pub fn request() -> &'static Dispatcher {
    REQUEST_DISPATCH.get_or_init(|| Dispatcher::build(crate::layout::request()))
}

/// The response direction's HPACK dispatch table.
pub fn response() -> &'static Dispatcher {
    RESPONSE_DISPATCH.get_or_init(|| Dispatcher::build(crate::layout::response()))
}

/// `STATIC_TABLE` index of `content-length`, used by
/// [`crate::dictionary`] to special-case numeric parsing (§4.6).
pub fn content_length_index() -> usize {
    STATIC_TABLE
        .iter()
        .position(|(name, _)| *name == "content-length")
        .expect("content-length is always in the HTTP/2 static table")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_table_has_61_entries() {
        assert_eq!(STATIC_TABLE.len(), 61);
    }

    #[test]
    fn request_dispatch_resolves_host() {
        let index = STATIC_TABLE.iter().position(|(n, _)| *n == "host").unwrap();
        let entry = request().resolve(index).expect("host is a known request header");
        assert_eq!(entry.spec.name, "Host");
    }

    #[test]
    fn response_dispatch_resolves_content_length_to_pinned_index() {
        let entry = response()
            .resolve(content_length_index())
            .expect("content-length is a known response header");
        assert_eq!(entry.index, crate::layout::CONTENT_LENGTH_PINNED_INDEX);
    }

    #[test]
    fn pseudo_header_indices_have_no_dispatch_target() {
        assert!(request().resolve(0).is_none());
    }

    #[test]
    fn groups_coalesce_repeated_names() {
        let gs = groups(crate::layout::request());
        let method_group = gs.iter().find(|g| g.name == ":method").unwrap();
        assert_eq!(method_group.indices.len(), 2);
    }
}

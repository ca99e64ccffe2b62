//! Bit Layout Planner (§4.4).
//!
//! Assigns each known header in a direction a distinct bit index in
//! `0..=63`. Indices are handed out in [`crate::ordering`] order starting
//! at zero, with one exception: the response direction's `Content-Length`
//! is pulled out of that ordering and re-appended at a pinned index of
//! 63, matching the asymmetry spec.md §9 calls out (requests have no
//! `Content-Length` bit at all — it is tracked outside `bits`, see
//! [`crate::dictionary`]).

use crate::registry::{self, HeaderSpec, INVALID_H2H3_NAMES, REQUEST, RESPONSE, TRAILER};
use std::sync::OnceLock;

/// The pinned bit index response `Content-Length` always occupies.
pub const CONTENT_LENGTH_PINNED_INDEX: u8 = 63;

/// One header's assigned position within a direction.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEntry {
    /// The header this entry describes.
    pub spec: &'static HeaderSpec,
    /// Its bit index, `0..=63`.
    pub index: u8,
}

/// The full bit assignment for one direction.
#[derive(Debug)]
pub struct Layout {
    /// [`REQUEST`] / [`RESPONSE`] / [`TRAILER`].
    pub direction: u8,
    /// Entries in ascending `index` order.
    pub entries: Vec<LayoutEntry>,
    /// OR of `1 << index` for every header in [`INVALID_H2H3_NAMES`].
    /// Zero for directions other than `RESPONSE`.
    pub invalid_h2h3_bits: u64,
}

impl Layout {
    /// The entry for `name`, matched case-insensitively, if known in
    /// this direction.
    pub fn find(&self, name: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.spec.name.eq_ignore_ascii_case(name))
    }

    fn build(direction: u8) -> Layout {
        let mut specs: Vec<&'static HeaderSpec> = registry::for_direction(direction)
            .filter(|h| !h.is_content_length())
            .collect();
        crate::ordering::sort(&mut specs);

        let mut entries: Vec<LayoutEntry> = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| LayoutEntry {
                spec,
                index: i as u8,
            })
            .collect();

        // Index 63 is reserved for the re-appended, pinned response
        // Content-Length entry below, so the response direction's
        // ordinary registry must leave it free.
        let max_entries = if direction == RESPONSE { 63 } else { 64 };
        assert!(
            entries.len() <= max_entries,
            "direction {direction:#b} has more than {max_entries} known headers"
        );

        if direction == RESPONSE {
            if let Some(content_length) = registry::for_direction(RESPONSE)
                .find(|h| h.is_content_length())
            {
                entries.push(LayoutEntry {
                    spec: content_length,
                    index: CONTENT_LENGTH_PINNED_INDEX,
                });
            }
        }

        let mut seen = 0u64;
        for entry in &entries {
            let bit = 1u64 << entry.index;
            assert_eq!(seen & bit, 0, "duplicate bit index {} in direction", entry.index);
            seen |= bit;
        }

        let invalid_h2h3_bits = if direction == RESPONSE {
            entries
                .iter()
                .filter(|e| INVALID_H2H3_NAMES.iter().any(|n| n.eq_ignore_ascii_case(e.spec.name)))
                .fold(0u64, |acc, e| acc | (1 << e.index))
        } else {
            0
        };

        Layout {
            direction,
            entries,
            invalid_h2h3_bits,
        }
    }
}

static REQUEST_LAYOUT: OnceLock<Layout> = OnceLock::new();
static RESPONSE_LAYOUT: OnceLock<Layout> = OnceLock::new();
static TRAILER_LAYOUT: OnceLock<Layout> = OnceLock::new();

/// The request direction's bit layout.
pub fn request() -> &'static Layout {
    REQUEST_LAYOUT.get_or_init(|| Layout::build(REQUEST))
}

/// The response direction's bit layout.
pub fn response() -> &'static Layout {
    RESPONSE_LAYOUT.get_or_init(|| Layout::build(RESPONSE))
}

/// The trailer direction's bit layout.
pub fn trailer() -> &'static Layout {
    TRAILER_LAYOUT.get_or_init(|| Layout::build(TRAILER))
}

/// The direction's layout, selected at runtime.
pub fn for_direction(direction: u8) -> &'static Layout {
    match direction {
        REQUEST => request(),
        RESPONSE => response(),
        TRAILER => trailer(),
        _ => panic!("invalid direction {direction:#b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_content_length_pinned_to_63() {
        let layout = response();
        let entry = layout.find("Content-Length").expect("Content-Length must be known");
        assert_eq!(entry.index, CONTENT_LENGTH_PINNED_INDEX);
    }

    #[test]
    fn request_has_no_content_length_entry() {
        assert!(request().find("Content-Length").is_none());
    }

    #[test]
    fn indices_are_disjoint_within_a_direction() {
        for layout in [request(), response(), trailer()] {
            let mut seen = std::collections::HashSet::new();
            for entry in &layout.entries {
                assert!(seen.insert(entry.index), "duplicate index {}", entry.index);
            }
        }
    }

    #[test]
    fn invalid_h2h3_mask_has_popcount_five() {
        assert_eq!(response().invalid_h2h3_bits.count_ones(), 5);
    }

    #[test]
    fn invalid_h2h3_mask_matches_named_headers() {
        let layout = response();
        for name in INVALID_H2H3_NAMES {
            let entry = layout.find(name).expect("named header must be known");
            assert_ne!(layout.invalid_h2h3_bits & (1 << entry.index), 0);
        }
    }

    #[test]
    fn non_response_directions_have_zero_invalid_mask() {
        assert_eq!(request().invalid_h2h3_bits, 0);
        assert_eq!(trailer().invalid_h2h3_bits, 0);
    }
}

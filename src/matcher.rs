//! SWAR Matcher Synthesizer (§4.3).
//!
//! Builds, once per direction, a length-bucketed ordinal-case-insensitive
//! matcher: headers are grouped by `name.len()`, and each bucket is
//! tested against an incoming byte slice using word-sized masked
//! compares (8, then 4, then 2, then 1 bytes) instead of a byte-by-byte
//! loop. A byte position that is an ASCII letter in the header's name
//! gets a `0xDF` mask bit (folding case); every other position demands
//! an exact byte match.
//!
//! The teacher's unaligned-pointer-cast idiom isn't available without
//! `unsafe`; per spec.md §9 ("reconstruct words from byte loads"), words
//! are instead reconstructed with `u64::from_le_bytes` et al. over a byte
//! slice, which is how this corpus builds multi-byte words from `&[u8]`
//! elsewhere (see `DESIGN.md`).

use crate::layout::{Layout, LayoutEntry};
use crate::ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A single word-sized masked-compare term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkTest {
    W8 { mask: u64, cmp: u64 },
    W4 { mask: u32, cmp: u32 },
    W2 { mask: u16, cmp: u16 },
    W1 { mask: u8, cmp: u8 },
}

impl ChunkTest {
    fn matches(&self, input: &[u8]) -> bool {
        match *self {
            ChunkTest::W8 { mask, cmp } => {
                u64::from_le_bytes(input.try_into().expect("8-byte chunk")) & mask == cmp
            }
            ChunkTest::W4 { mask, cmp } => {
                u32::from_le_bytes(input.try_into().expect("4-byte chunk")) & mask == cmp
            }
            ChunkTest::W2 { mask, cmp } => {
                u16::from_le_bytes(input.try_into().expect("2-byte chunk")) & mask == cmp
            }
            ChunkTest::W1 { mask, cmp } => input[0] & mask == cmp,
        }
    }

    fn for_bytes(bytes: &[u8]) -> ChunkTest {
        fn mask_byte(b: u8) -> u8 {
            if b.is_ascii_alphabetic() {
                0xDF
            } else {
                0xFF
            }
        }
        match bytes.len() {
            8 => {
                let mask: [u8; 8] = std::array::from_fn(|i| mask_byte(bytes[i]));
                let cmp: [u8; 8] = std::array::from_fn(|i| bytes[i] & mask[i]);
                ChunkTest::W8 {
                    mask: u64::from_le_bytes(mask),
                    cmp: u64::from_le_bytes(cmp),
                }
            }
            4 => {
                let mask: [u8; 4] = std::array::from_fn(|i| mask_byte(bytes[i]));
                let cmp: [u8; 4] = std::array::from_fn(|i| bytes[i] & mask[i]);
                ChunkTest::W4 {
                    mask: u32::from_le_bytes(mask),
                    cmp: u32::from_le_bytes(cmp),
                }
            }
            2 => {
                let mask: [u8; 2] = std::array::from_fn(|i| mask_byte(bytes[i]));
                let cmp: [u8; 2] = std::array::from_fn(|i| bytes[i] & mask[i]);
                ChunkTest::W2 {
                    mask: u16::from_le_bytes(mask),
                    cmp: u16::from_le_bytes(cmp),
                }
            }
            1 => {
                let mask = mask_byte(bytes[0]);
                ChunkTest::W1 {
                    mask,
                    cmp: bytes[0] & mask,
                }
            }
            other => unreachable!("chunk plan never produces a {other}-byte chunk"),
        }
    }
}

/// Greedily decompose a name of length `len` into descending word-sized
/// chunks: as many 8s as fit, then at most one each of 4, 2, 1.
fn chunk_plan(len: usize) -> Vec<(usize, usize)> {
    let mut plan = Vec::new();
    let mut offset = 0;
    let mut remaining = len;
    for size in [8, 4, 2, 1] {
        while remaining >= size {
            plan.push((offset, size));
            offset += size;
            remaining -= size;
        }
    }
    plan
}

#[derive(Debug)]
struct Candidate {
    entry: LayoutEntry,
    /// Tests for every chunk after the bucket's shared first chunk.
    rest: Vec<ChunkTest>,
}

/// Headers sharing an identical first-chunk mask+comparand, coalesced so
/// the first term is evaluated once per incoming name instead of once
/// per candidate (§4.3 "Grouping within a bucket").
#[derive(Debug)]
struct Group {
    first: ChunkTest,
    first_len: usize,
    candidates: Vec<Candidate>,
}

#[derive(Debug)]
struct Bucket {
    plan: Vec<(usize, usize)>,
    groups: Vec<Group>,
}

/// A built, ready-to-query matcher for one direction.
#[derive(Debug)]
pub struct MatchProgram {
    buckets: HashMap<usize, Bucket>,
}

impl MatchProgram {
    /// Match `name` against every known header in this direction.
    /// Returns the unique matching header's layout entry, or `None` if
    /// `name` is not a known header of this direction (it should then be
    /// looked up in the `unknown` side table).
    pub fn match_name(&self, name: &[u8]) -> Option<LayoutEntry> {
        let bucket = self.buckets.get(&name.len())?;
        for group in &bucket.groups {
            let (first_off, first_size) = bucket.plan[0];
            debug_assert_eq!(first_size, group.first_len);
            if !group.first.matches(&name[first_off..first_off + first_size]) {
                continue;
            }
            for candidate in &group.candidates {
                let all_rest_match = candidate
                    .rest
                    .iter()
                    .zip(bucket.plan.iter().skip(1))
                    .all(|(test, &(off, size))| test.matches(&name[off..off + size]));
                if all_rest_match {
                    return Some(candidate.entry);
                }
            }
        }
        None
    }

    fn build(layout: &'static Layout) -> MatchProgram {
        let mut by_len: HashMap<usize, Vec<&'static LayoutEntry>> = HashMap::new();
        for entry in &layout.entries {
            by_len.entry(entry.spec.name.len()).or_default().push(entry);
        }

        let mut buckets = HashMap::new();
        for (len, mut entries) in by_len {
            entries.sort_by(|a, b| ordering::compare(a.spec, b.spec));

            let plan = chunk_plan(len);
            let mut groups: Vec<Group> = Vec::new();

            for entry in entries {
                let name = entry.spec.name.as_bytes();
                let (first_off, first_size) = plan[0];
                let first = ChunkTest::for_bytes(&name[first_off..first_off + first_size]);
                let rest: Vec<ChunkTest> = plan[1..]
                    .iter()
                    .map(|&(off, size)| ChunkTest::for_bytes(&name[off..off + size]))
                    .collect();

                if let Some(group) = groups.iter_mut().find(|g| g.first == first) {
                    group.candidates.push(Candidate { entry: *entry, rest });
                } else {
                    groups.push(Group {
                        first,
                        first_len: first_size,
                        candidates: vec![Candidate { entry: *entry, rest }],
                    });
                }
            }

            buckets.insert(len, Bucket { plan, groups });
        }

        debug!("built match program for {} length buckets", buckets.len());
        MatchProgram { buckets }
    }
}

static REQUEST_MATCHER: OnceLock<MatchProgram> = OnceLock::new();
static RESPONSE_MATCHER: OnceLock<MatchProgram> = OnceLock::new();
static TRAILER_MATCHER: OnceLock<MatchProgram> = OnceLock::new();

/// The request direction's matcher.
pub fn request() -> &'static MatchProgram {
    REQUEST_MATCHER.get_or_init(|| MatchProgram::build(crate::layout::request()))
}

/// The response direction's matcher.
pub fn response() -> &'static MatchProgram {
    RESPONSE_MATCHER.get_or_init(|| MatchProgram::build(crate::layout::response()))
}

/// The trailer direction's matcher.
pub fn trailer() -> &'static MatchProgram {
    TRAILER_MATCHER.get_or_init(|| MatchProgram::build(crate::layout::trailer()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_case() {
        let entry = request().match_name(b"Host").expect("Host is known");
        assert_eq!(entry.spec.name, "Host");
    }

    #[test]
    fn matches_are_case_insensitive_on_letters() {
        for variant in [&b"host"[..], b"HOST", b"HoSt", b"hOST"] {
            let entry = request().match_name(variant).expect("case variant of Host");
            assert_eq!(entry.spec.name, "Host");
        }
    }

    #[test]
    fn rejects_non_letter_byte_flip() {
        // "Content-Length" with the hyphen flipped to a different byte
        // must not match, even though bit 5 of '-' (0x2D) flipped lands
        // on another printable byte; non-letter positions require exact
        // equality.
        let mut mutated = b"Content.Length".to_vec();
        assert_ne!(mutated[7], b'-');
        mutated[7] = b'.';
        assert!(response().match_name(&mutated).is_none());
    }

    #[test]
    fn unknown_length_returns_none() {
        assert!(request().match_name(b"X-Totally-Unregistered-Header-Name").is_none());
    }

    #[test]
    fn no_two_known_headers_share_a_match_in_one_direction() {
        // For every known header's own name, exactly one candidate in its
        // bucket can match (P4: matcher exclusivity).
        for entry in &crate::layout::response().entries {
            let matched = response().match_name(entry.spec.name.as_bytes());
            assert_eq!(matched.map(|e| e.spec.name), Some(entry.spec.name));
        }
    }
}

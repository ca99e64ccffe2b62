//! Ordering Policy (§4.8): primary first, then culture-invariant
//! (plain byte-ordinal) lexicographic order by wire name.
//!
//! Used by the bit layout planner, the matcher group emission order, and
//! dictionary enumeration.

use crate::registry::HeaderSpec;
use std::cmp::Ordering;

/// Total order over [`HeaderSpec`]s: primary headers sort before
/// non-primary ones; within the same `primary` value, sort ascending by
/// `name` using a plain byte comparison (no locale-sensitive collation).
pub fn compare(a: &HeaderSpec, b: &HeaderSpec) -> Ordering {
    match (a.primary, b.primary) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.as_bytes().cmp(b.name.as_bytes()),
    }
}

/// Sort `specs` in place according to [`compare`].
pub fn sort(specs: &mut [&HeaderSpec]) {
    specs.sort_by(|a, b| compare(a, b));
}

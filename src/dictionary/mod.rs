//! Dictionary Emitter (§4.7): the runtime contract shared by every
//! direction's generated dictionary.
//!
//! `DictCore` holds the behavior common to all three directions —
//! bitmap presence tracking, known/unknown routing, the value-reuse
//! rule, enumeration, and `copy_to`/`clear` — and is wrapped by the
//! direction-specific public types in `request.rs`/`response.rs`/
//! `trailer.rs`. This realizes spec.md §9's "three generated concrete
//! types" decision while keeping the shared machinery in one place
//! instead of duplicating it three times.

mod unknown;

use crate::encoding::Encoding;
use crate::error::{Error, ErrorKind};
use crate::hpack::Dispatcher;
use crate::known::KnownHeader;
use crate::layout::Layout;
use crate::matcher::MatchProgram;
use crate::registry::RESPONSE;
use bytes::Bytes;
use std::rc::Rc;
use unknown::UnknownMap;

const SLOT_COUNT: usize = 64;

/// Cutoff above which `clear()` overwrites the whole slot table instead
/// of targeting only the set bits (§4.7 "Clear"). Documented per
/// spec.md §9's Open Question rather than load-bearing for any test.
const CLEAR_OVERWRITE_CUTOFF: u32 = 12;

#[derive(Debug, Default, Clone)]
struct Slot {
    values: Vec<Rc<str>>,
    raw: Option<Bytes>,
}

/// A read-only snapshot of one known header's current slot, used by the
/// response/trailer serializer.
pub(crate) struct SlotSnapshot<'a> {
    pub(crate) values: &'a [Rc<str>],
    pub(crate) raw: Option<&'a [u8]>,
}

impl Slot {
    fn clear(&mut self) {
        self.values.clear();
        self.raw = None;
    }
}

/// Shared state and behavior for one direction's header dictionary.
pub(crate) struct DictCore {
    direction: u8,
    layout: &'static Layout,
    matcher: &'static MatchProgram,
    hpack: &'static Dispatcher,
    validate_values: bool,
    bits: u64,
    previous_bits: u64,
    previous_single: [Option<Rc<str>>; SLOT_COUNT],
    content_length: Option<u64>,
    slots: [Slot; SLOT_COUNT],
    unknown: UnknownMap,
    is_readonly: bool,
}

fn is_content_length_name(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"content-length")
}

fn format_content_length(n: u64) -> String {
    // itoa 0.4's surface is `write(writer, value)`, not the `Buffer` API
    // introduced in 1.0; `&mut [u8]` implements `io::Write`, so a stack
    // buffer sized for `u64::MAX` (20 decimal digits) is enough.
    let mut buf = [0u8; 20];
    let len = itoa::write(&mut buf[..], n).expect("writing to a stack buffer cannot fail");
    std::str::from_utf8(&buf[..len])
        .expect("itoa only ever writes ASCII digits")
        .to_string()
}

fn parse_content_length(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 19 {
        return None;
    }
    let s = std::str::from_utf8(bytes).ok()?;
    s.parse::<u64>().ok()
}

impl std::fmt::Debug for DictCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictCore")
            .field("direction", &self.direction)
            .field("bits", &format_args!("{:#066b}", self.bits))
            .field("is_readonly", &self.is_readonly)
            .finish_non_exhaustive()
    }
}

impl DictCore {
    pub(crate) fn new(
        direction: u8,
        layout: &'static Layout,
        matcher: &'static MatchProgram,
        hpack: &'static Dispatcher,
        validate_values: bool,
    ) -> DictCore {
        DictCore {
            direction,
            layout,
            matcher,
            hpack,
            validate_values,
            bits: 0,
            previous_bits: 0,
            previous_single: std::array::from_fn(|_| None),
            content_length: None,
            slots: std::array::from_fn(|_| Slot::default()),
            unknown: UnknownMap::default(),
            is_readonly: false,
        }
    }

    pub(crate) fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    pub(crate) fn freeze(&mut self) {
        self.is_readonly = true;
    }

    pub(crate) fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Keeps the pinned Content-Length bit (§4.4, index 63) in sync with
    /// `self.content_length` for the response direction, so the
    /// bits-driven serializer (`serialize_direction`) and `bits()`
    /// observe the same source of truth as `content_length()`/`DictIter`.
    /// A no-op for request/trailer, where Content-Length is never
    /// represented in `bits` (spec.md §9's asymmetry).
    fn sync_content_length_bit(&mut self) {
        if self.direction != RESPONSE {
            return;
        }
        let bit = 1u64 << crate::layout::CONTENT_LENGTH_PINNED_INDEX;
        if self.content_length.is_some() {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
    }

    fn check_writable(&self) -> Result<(), Error> {
        if self.is_readonly {
            Err(Error::new(ErrorKind::ReadOnly))
        } else {
            Ok(())
        }
    }

    /// §4.7 `get(name)`.
    pub(crate) fn get(&self, name: &str) -> Option<Vec<String>> {
        if is_content_length_name(name.as_bytes()) {
            return self.content_length.map(|n| vec![format_content_length(n)]);
        }
        if let Some(entry) = self.matcher.match_name(name.as_bytes()) {
            if self.bits & (1 << entry.index) != 0 {
                return Some(
                    self.slots[entry.index as usize]
                        .values
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                );
            }
            return None;
        }
        self.unknown.get(name).map(|v| v.to_vec())
    }

    /// §4.7 `set(name, value)`.
    pub(crate) fn set(&mut self, name: &str, value: String) -> Result<(), Error> {
        self.check_writable()?;

        if is_content_length_name(name.as_bytes()) {
            if value.is_empty() {
                self.content_length = None;
                self.sync_content_length_bit();
                return Ok(());
            }
            self.content_length = Some(
                parse_content_length(value.as_bytes()).ok_or_else(|| Error::new(ErrorKind::InvalidValue))?,
            );
            self.sync_content_length_bit();
            return Ok(());
        }

        if self.validate_values && !value.is_empty() {
            Encoding::for_header(name).validate(value.as_bytes())?;
        }

        if let Some(entry) = self.matcher.match_name(name.as_bytes()) {
            let idx = entry.index as usize;
            if value.is_empty() {
                self.bits &= !(1 << entry.index);
                self.slots[idx].clear();
            } else {
                self.slots[idx].values = vec![Rc::from(value)];
                self.slots[idx].raw = None;
                self.bits |= 1 << entry.index;
            }
        } else if value.is_empty() {
            self.unknown.remove(name);
        } else {
            self.unknown.set(name, value);
        }
        Ok(())
    }

    /// §4.7 `add(name, value)`.
    pub(crate) fn add(&mut self, name: &str, value: String) -> Result<(), Error> {
        self.check_writable()?;

        if is_content_length_name(name.as_bytes()) {
            if self.content_length.is_some() {
                return Err(Error::new(ErrorKind::AlreadyPresent));
            }
            self.content_length =
                Some(parse_content_length(value.as_bytes()).ok_or_else(|| Error::new(ErrorKind::InvalidValue))?);
            self.sync_content_length_bit();
            return Ok(());
        }

        if self.validate_values {
            Encoding::for_header(name).validate(value.as_bytes())?;
        }

        if let Some(entry) = self.matcher.match_name(name.as_bytes()) {
            if self.bits & (1 << entry.index) != 0 {
                return Err(Error::new(ErrorKind::AlreadyPresent));
            }
            let idx = entry.index as usize;
            self.slots[idx].values = vec![Rc::from(value)];
            self.bits |= 1 << entry.index;
            Ok(())
        } else if self.unknown.add(name, value) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::AlreadyPresent))
        }
    }

    /// §4.7 `remove(name)`.
    pub(crate) fn remove(&mut self, name: &str) -> Result<bool, Error> {
        self.check_writable()?;

        if is_content_length_name(name.as_bytes()) {
            let had = self.content_length.take().is_some();
            self.sync_content_length_bit();
            return Ok(had);
        }

        if let Some(entry) = self.matcher.match_name(name.as_bytes()) {
            let bit = 1u64 << entry.index;
            let had = self.bits & bit != 0;
            self.bits &= !bit;
            self.slots[entry.index as usize].clear();
            Ok(had)
        } else {
            Ok(self.unknown.remove(name))
        }
    }

    fn decode(bytes: &[u8]) -> Rc<str> {
        Rc::from(String::from_utf8_lossy(bytes).into_owned())
    }

    fn append_known(&mut self, index: u8, bytes: &[u8]) {
        let bit = 1u64 << index;
        if self.previous_bits & bit != 0 {
            self.previous_bits &= !bit;
            if let Some(prev) = self.previous_single[index as usize].take() {
                if prev.as_bytes() == bytes {
                    self.slots[index as usize].values.push(prev);
                    self.bits |= bit;
                    return;
                }
            }
        }

        let decoded = Self::decode(bytes);
        if self.bits & bit == 0 {
            self.slots[index as usize].values = vec![decoded];
            self.bits |= bit;
        } else {
            self.slots[index as usize].values.push(decoded);
        }
    }

    /// §4.7 `try_append(name_bytes, value_bytes)`.
    pub(crate) fn try_append(&mut self, name: &[u8], value: &[u8]) {
        if is_content_length_name(name) {
            if let Some(n) = parse_content_length(value) {
                self.content_length = Some(n);
                self.sync_content_length_bit();
            }
            return;
        }

        if let Some(entry) = self.matcher.match_name(name) {
            self.append_known(entry.index, value);
        } else {
            let name = String::from_utf8_lossy(name).into_owned();
            self.unknown.append(&name, String::from_utf8_lossy(value).into_owned());
        }
    }

    /// §4.7 `try_hpack_append(index, value_bytes)`. Returns `false` on a
    /// miss (the static-table index has no known-header dispatch
    /// target in this direction).
    pub(crate) fn try_hpack_append(&mut self, index: usize, value: &[u8]) -> bool {
        if index == crate::hpack::content_length_index() {
            self.content_length = parse_content_length(value).or(self.content_length);
            self.sync_content_length_bit();
            return true;
        }

        match self.hpack.resolve(index) {
            Some(entry) => {
                self.append_known(entry.index, value);
                true
            }
            None => false,
        }
    }

    /// §4.7 "Enumeration": known headers in index order (skipping
    /// cleared bits), then Content-Length (response only), then
    /// `unknown` in insertion order.
    pub(crate) fn iter(&self) -> DictIter<'_> {
        DictIter {
            core: self,
            known_cursor: 0,
            content_length_done: false,
            unknown_cursor: 0,
        }
    }

    /// Copies every set known header's values and the `unknown` map
    /// from `self` into `target`, leaving `target`'s `previous_bits`
    /// and `is_readonly` untouched (§2 of SPEC_FULL.md).
    pub(crate) fn copy_to(&self, target: &mut DictCore) {
        for i in 0..SLOT_COUNT {
            if self.bits & (1 << i) != 0 {
                target.slots[i] = self.slots[i].clone();
                target.bits |= 1 << i;
            }
        }
        target.content_length = self.content_length;
        target.sync_content_length_bit();
        for (name, values) in self.unknown.iter() {
            for value in values {
                target.unknown.append(name, value.clone());
            }
        }
    }

    /// §4.7 "Clear": drops `unknown` and `content_length`, snapshots
    /// single-valued known headers into `previous_bits`/
    /// `previous_single` for the next message's reuse rule, then wipes
    /// `bits`. Above [`CLEAR_OVERWRITE_CUTOFF`] set bits, the whole slot
    /// table is overwritten in one pass instead of indexing only the
    /// set bits — a size/latency tradeoff, not a correctness contract
    /// (spec.md §9).
    pub(crate) fn clear(&mut self) {
        self.unknown.clear();
        self.content_length = None;

        let set_count = self.bits.count_ones();
        let overwrite_all = set_count > CLEAR_OVERWRITE_CUTOFF;

        self.previous_bits = 0;
        for i in 0..SLOT_COUNT {
            let bit = 1u64 << i;
            if self.bits & bit != 0 {
                if self.slots[i].values.len() == 1 {
                    self.previous_single[i] = self.slots[i].values.pop();
                    self.previous_bits |= bit;
                } else {
                    self.previous_single[i] = None;
                }
                self.slots[i].clear();
            } else if overwrite_all {
                self.previous_single[i] = None;
                self.slots[i].clear();
            }
        }
        self.bits = 0;
        self.is_readonly = false;
    }

    /// Sets the pre-encoded raw byte companion for `name` (§4.7
    /// "enhanced setter"), replacing normal value serialization for
    /// that header. A no-op if `name` is not registered with
    /// `enhanced_setter` in this direction.
    pub(crate) fn set_raw(&mut self, name: &str, raw: Bytes) -> Result<(), Error> {
        self.check_writable()?;
        if let Some(entry) = self.matcher.match_name(name.as_bytes()) {
            if entry.spec.enhanced_setter {
                self.slots[entry.index as usize].raw = Some(raw);
                self.bits |= 1 << entry.index;
            }
        }
        Ok(())
    }

    /// A read-only view of one slot's contents, for the serializer.
    pub(crate) fn slot_snapshot(&self, index: u8) -> Option<SlotSnapshot<'_>> {
        if self.bits & (1 << index) == 0 {
            return None;
        }
        let slot = &self.slots[index as usize];
        Some(SlotSnapshot {
            values: &slot.values,
            raw: slot.raw.as_deref(),
        })
    }

    fn response_layout_invariant_mask(&self) -> u64 {
        if self.direction == RESPONSE {
            self.layout.invalid_h2h3_bits
        } else {
            0
        }
    }

    pub(crate) fn has_invalid_h2h3_headers(&self) -> bool {
        self.bits & self.response_layout_invariant_mask() != 0
    }

    pub(crate) fn clear_invalid_h2h3_headers(&mut self) {
        let mask = self.response_layout_invariant_mask();
        for i in 0..SLOT_COUNT {
            if mask & (1 << i) != 0 && self.bits & (1 << i) != 0 {
                self.bits &= !(1 << i);
                self.slots[i].clear();
            }
        }
    }

    pub(crate) fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub(crate) fn bits(&self) -> u64 {
        self.bits
    }

    #[cfg(test)]
    pub(crate) fn raw_values(&self, name: &str) -> Option<&[Rc<str>]> {
        self.matcher
            .match_name(name.as_bytes())
            .filter(|e| self.bits & (1 << e.index) != 0)
            .map(|e| self.slots[e.index as usize].values.as_slice())
    }

    #[cfg(test)]
    pub(crate) fn seed_previous(&mut self, name: &str, value: &str) {
        let entry = self.matcher.match_name(name.as_bytes()).expect("known header");
        let rc: Rc<str> = Rc::from(value);
        self.previous_single[entry.index as usize] = Some(rc.clone());
        self.previous_bits |= 1 << entry.index;
        self.slots[entry.index as usize].values = vec![rc];
        self.bits |= 1 << entry.index;
    }
}

/// One entry yielded by [`DictCore::iter`].
#[derive(Debug, Clone)]
pub enum DictEntry {
    /// A known header and its stored values.
    Known(KnownHeader, Vec<String>),
    /// The response/trailer pinned `Content-Length` value.
    ContentLength(u64),
    /// An unknown header name and its stored values.
    Unknown(String, Vec<String>),
}

/// Iterator produced by `DictCore::iter`, implementing the jump-table
/// enumerator spec.md §4.7 describes: known headers by ascending index,
/// then Content-Length, then `unknown` in insertion order.
#[derive(Debug)]
pub struct DictIter<'a> {
    core: &'a DictCore,
    known_cursor: usize,
    content_length_done: bool,
    unknown_cursor: usize,
}

impl<'a> Iterator for DictIter<'a> {
    type Item = DictEntry;

    fn next(&mut self) -> Option<DictEntry> {
        while self.known_cursor < self.core.layout.entries.len() {
            let entry = &self.core.layout.entries[self.known_cursor];
            self.known_cursor += 1;
            if entry.index == crate::layout::CONTENT_LENGTH_PINNED_INDEX {
                continue;
            }
            if self.core.bits & (1 << entry.index) != 0 {
                let known = KnownHeader::from_wire_name(entry.spec.name).unwrap_or(KnownHeader::Unknown);
                let values = self.core.slots[entry.index as usize]
                    .values
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                return Some(DictEntry::Known(known, values));
            }
        }

        if !self.content_length_done {
            self.content_length_done = true;
            if let Some(n) = self.core.content_length {
                return Some(DictEntry::ContentLength(n));
            }
        }

        let unknown: Vec<_> = self.core.unknown.iter().collect();
        if self.unknown_cursor < unknown.len() {
            let (name, values) = unknown[self.unknown_cursor];
            self.unknown_cursor += 1;
            return Some(DictEntry::Unknown(name.to_string(), values.to_vec()));
        }

        None
    }
}

pub mod request;
pub mod response;
pub mod trailer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{REQUEST, RESPONSE};

    fn core(direction: u8) -> DictCore {
        let layout = crate::layout::for_direction(direction);
        let matcher = match direction {
            REQUEST => crate::matcher::request(),
            RESPONSE => crate::matcher::response(),
            _ => crate::matcher::trailer(),
        };
        let hpack = match direction {
            REQUEST => crate::hpack::request(),
            _ => crate::hpack::response(),
        };
        DictCore::new(direction, layout, matcher, hpack, direction != REQUEST)
    }

    #[test]
    fn set_then_get_known_header() {
        let mut dict = core(REQUEST);
        dict.set("Host", "example.com".to_string()).unwrap();
        assert_eq!(dict.get("host"), Some(vec!["example.com".to_string()]));
    }

    #[test]
    fn set_readonly_dictionary_fails() {
        let mut dict = core(REQUEST);
        dict.freeze();
        let err = dict.set("Host", "x".to_string()).unwrap_err();
        assert!(err.is_read_only());
    }

    #[test]
    fn add_fails_if_already_present() {
        let mut dict = core(REQUEST);
        dict.add("Host", "a".to_string()).unwrap();
        let err = dict.add("Host", "b".to_string()).unwrap_err();
        assert!(err.is_already_present());
    }

    #[test]
    fn remove_reports_whether_something_was_removed() {
        let mut dict = core(REQUEST);
        dict.set("Host", "a".to_string()).unwrap();
        assert!(dict.remove("Host").unwrap());
        assert!(!dict.remove("Host").unwrap());
    }

    #[test]
    fn try_append_accumulates_repeated_known_header_values() {
        let mut dict = core(REQUEST);
        dict.try_append(b"Accept-Encoding", b"gzip");
        dict.try_append(b"Accept-Encoding", b"br");
        assert_eq!(dict.get("Accept-Encoding"), Some(vec!["gzip".to_string(), "br".to_string()]));
    }

    #[test]
    fn try_append_unknown_header_lands_in_unknown_map() {
        let mut dict = core(REQUEST);
        dict.try_append(b"X-Custom", b"value");
        assert_eq!(dict.get("X-Custom"), Some(vec!["value".to_string()]));
    }

    #[test]
    fn content_length_is_not_tracked_in_bits_for_requests() {
        let mut dict = core(REQUEST);
        dict.try_append(b"Content-Length", b"42");
        assert_eq!(dict.content_length(), Some(42));
        assert_eq!(dict.bits(), 0);
    }

    #[test]
    fn content_length_is_tracked_in_bits_for_responses() {
        let mut dict = core(RESPONSE);
        let bit = 1u64 << crate::layout::CONTENT_LENGTH_PINNED_INDEX;

        dict.set("Content-Length", "42".to_string()).unwrap();
        assert_eq!(dict.bits() & bit, bit);

        dict.remove("Content-Length").unwrap();
        assert_eq!(dict.bits() & bit, 0);
    }

    #[test]
    fn value_reuse_rewrites_reference_equal_string() {
        let mut dict = core(REQUEST);
        dict.seed_previous("Host", "example.com");
        dict.clear();
        assert_ne!(dict.previous_bits, 0);

        dict.try_append(b"Host", b"example.com");
        let values = dict.raw_values("Host").expect("host should be set");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn invalid_value_rejected_for_response_direction() {
        let mut dict = core(RESPONSE);
        let err = dict.set("ETag", "\u{1}bad".to_string()).unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn clear_resets_bits_and_unknown() {
        let mut dict = core(REQUEST);
        dict.set("Host", "a".to_string()).unwrap();
        dict.try_append(b"X-Custom", b"value");
        dict.clear();
        assert_eq!(dict.bits(), 0);
        assert_eq!(dict.get("X-Custom"), None);
    }
}

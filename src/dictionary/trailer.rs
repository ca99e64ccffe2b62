//! The trailer-direction header dictionary.

use super::{DictCore, DictEntry};
use crate::dictionary::response::serialize_direction;
use crate::error::Result;
use crate::registry::TRAILER;
use bytes::Bytes;

/// A trailer section's known+unknown header dictionary.
#[derive(Debug)]
pub struct TrailerHeaders {
    core: DictCore,
}

impl Default for TrailerHeaders {
    fn default() -> Self {
        TrailerHeaders::new()
    }
}

impl TrailerHeaders {
    /// An empty, writable trailer dictionary.
    pub fn new() -> TrailerHeaders {
        TrailerHeaders {
            core: DictCore::new(
                TRAILER,
                crate::layout::trailer(),
                crate::matcher::trailer(),
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
    /// configured encoding (trailer direction).
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

    /// §4.7 "enhanced setter".
    pub fn set_raw(&mut self, name: &str, raw: Bytes) -> Result<()> {
        self.core.set_raw(name, raw)
    }

    /// Freezes the dictionary.
    pub fn freeze(&mut self) {
        self.core.freeze()
    }

    /// Whether [`TrailerHeaders::freeze`] has been called.
    pub fn is_readonly(&self) -> bool {
        self.core.is_readonly()
    }

    /// Copies known/unknown headers into `target`.
    pub fn copy_to(&self, target: &mut TrailerHeaders) {
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
    pub fn serialize(&self) -> Bytes {
        serialize_direction(&self.core, crate::wire::trailer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grpc_status_roundtrips() {
        let mut trailers = TrailerHeaders::new();
        trailers.set("Grpc-Status", "0").unwrap();
        assert_eq!(trailers.get("grpc-status"), Some(vec!["0".to_string()]));
        assert_eq!(&trailers.serialize()[..], b"\r\nGrpc-Status: 0");
    }

    #[test]
    fn unknown_trailer_falls_back_to_unknown_map() {
        let mut trailers = TrailerHeaders::new();
        trailers.set("X-Checksum", "abc123").unwrap();
        assert_eq!(trailers.get("X-Checksum"), Some(vec!["abc123".to_string()]));
    }
}

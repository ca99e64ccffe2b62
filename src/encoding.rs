//! Per-header value-byte validation (§4.7, response/trailer `set`).
//!
//! Response and trailer directions validate that a value's bytes are
//! legal under a configured per-header encoding before accepting them.
//! This crate implements the two encodings spec.md's scenarios exercise:
//! plain ASCII (the default — printable ASCII plus horizontal tab, per
//! RFC 7230's `field-content`) and a permissive UTF-8 encoding for
//! headers whose values are documented to carry non-ASCII text (none in
//! the default registry, but the hook exists for callers extending it).

use crate::error::{Error, ErrorKind};

/// A configured value-byte validator for one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// RFC 7230 `field-content`: printable ASCII (`0x20..=0x7E`) plus
    /// horizontal tab (`0x09`). This is the default for every known
    /// response/trailer header.
    Ascii,
    /// Any valid UTF-8 byte sequence.
    Utf8,
}

impl Encoding {
    /// The encoding this crate selects for a given header name. Every
    /// known header defaults to [`Encoding::Ascii`]; this is the seam a
    /// fork would widen to carry a per-header table if it needed one.
    pub fn for_header(_name: &str) -> Encoding {
        Encoding::Ascii
    }

    /// Validate `value` against this encoding, returning
    /// [`ErrorKind::InvalidValue`] on the first illegal byte/sequence.
    pub fn validate(self, value: &[u8]) -> Result<(), Error> {
        match self {
            Encoding::Ascii => {
                if value.iter().all(|&b| b == 0x09 || (0x20..=0x7E).contains(&b)) {
                    Ok(())
                } else {
                    Err(Error::new(ErrorKind::InvalidValue))
                }
            }
            Encoding::Utf8 => std::str::from_utf8(value)
                .map(|_| ())
                .map_err(|_| Error::new(ErrorKind::InvalidValue)),
        }
    }
}

//! Error and Result types for dictionary mutators (§6 "Errors surface").
//!
//! Mirrors the teacher's `Error`/private-`Kind` split (opaque public
//! struct wrapping a hidden enum, manual `Display`/`std::error::Error`)
//! but scoped down: every error here is a contract error a caller can
//! hit by mutating a dictionary the wrong way, not a boxed dynamic
//! cause. Invariant violations (§7) are `debug_assert!`/`panic!`, never
//! `Error` values — they indicate a bug in this crate, not bad caller
//! input.

use std::error::Error as StdError;
use std::fmt;

/// Result type returned from dictionary mutators.
pub type Result<T> = std::result::Result<T, Error>;

/// An error mutating or reading a header dictionary.
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// Attempted to mutate a dictionary after it was frozen read-only.
    ReadOnly,
    /// A response/trailer value contained a byte illegal under the
    /// header's configured encoding.
    InvalidValue,
    /// `add` was called for a header that already holds a value.
    AlreadyPresent,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind }
    }

    /// Whether this is a [`ErrorKind::ReadOnly`] error.
    pub fn is_read_only(&self) -> bool {
        self.kind == ErrorKind::ReadOnly
    }

    /// Whether this is a [`ErrorKind::InvalidValue`] error.
    pub fn is_invalid_value(&self) -> bool {
        self.kind == ErrorKind::InvalidValue
    }

    /// Whether this is a [`ErrorKind::AlreadyPresent`] error.
    pub fn is_already_present(&self) -> bool {
        self.kind == ErrorKind::AlreadyPresent
    }

    fn description(&self) -> &'static str {
        match self.kind {
            ErrorKind::ReadOnly => "dictionary is read-only",
            ErrorKind::InvalidValue => "header value contains a byte illegal for its encoding",
            ErrorKind::AlreadyPresent => "header already has a value",
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("httpdict::Error")
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl StdError for Error {}

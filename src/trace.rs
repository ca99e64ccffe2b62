#![allow(unused_macros)]

//! Thin wrappers around `tracing`'s macros.
//!
//! Unlike the teacher, which hides `tracing` behind an unstable opt-in
//! feature, this crate takes it as an ordinary dependency: header
//! dictionary construction and matching run on every request, so the
//! logging is cheap enough to always compile in and let `tracing`'s own
//! level filter decide what gets emitted.

macro_rules! trace {
    ($($arg:tt)+) => { tracing::trace!($($arg)+) }
}

macro_rules! debug {
    ($($arg:tt)+) => { tracing::debug!($($arg)+) }
}

macro_rules! warn {
    ($($arg:tt)+) => { tracing::warn!($($arg)+) }
}

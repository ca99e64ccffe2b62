#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(rust_2018_idioms))]

//! # httpdict
//!
//! `httpdict` is the header-dictionary core of a high-performance HTTP
//! server: a declarative registry of known HTTP headers and the
//! generated, bitflag-backed dictionary types derived from it — one per
//! HTTP direction (request, response, response trailers) — with
//! length-bucketed SWAR name matching, HPACK static-table dispatch, and
//! pre-encoded wire-name byte tables.
//!
//! ## Layout
//!
//! - [`registry`] — the compile-time table of known headers.
//! - [`identifier`] — wire name → stable accessor identifier.
//! - [`ordering`] — the primary-first-then-alphabetical total order.
//! - [`layout`] — bit index assignment per direction.
//! - [`wire`] — pre-encoded `"\r\nName: "` byte tables.
//! - [`hpack`] — HTTP/2 static-table dispatch.
//! - [`matcher`] — the SWAR name matcher.
//! - [`known`] — the closed `KnownHeader` enumeration.
//! - [`dictionary`] — the three generated runtime dictionary types.
//! - [`codegen`] — renders the generator's text artifact.
//!
//! ## Optional Features
//!
//! - `http1`: enables [`parse`], an `httparse`-based HTTP/1 request
//!   tokenizer that feeds [`dictionary::request::RequestHeaders::try_append`].
//! - `http2`: reserved for HTTP/2-transport-specific HPACK wiring (frame
//!   decoding, dynamic-table updates); the static-table dispatch itself
//!   ([`hpack`]) is always compiled in, since every direction's
//!   dictionary needs it for `try_hpack_append` regardless of which
//!   transport delivered the index.
//!
//! Both are enabled by default.

#[macro_use]
mod trace;

pub use crate::error::{Error, Result};

pub mod codegen;
pub mod dictionary;
pub mod encoding;
mod error;
pub mod hpack;
pub mod identifier;
pub mod known;
pub mod layout;
pub mod matcher;
pub mod ordering;
#[cfg(feature = "http1")]
#[cfg_attr(docsrs, doc(cfg(feature = "http1")))]
pub mod parse;
pub mod registry;
pub mod wire;

pub use crate::dictionary::request::RequestHeaders;
pub use crate::dictionary::response::ResponseHeaders;
pub use crate::dictionary::trailer::TrailerHeaders;
pub use crate::known::KnownHeader;

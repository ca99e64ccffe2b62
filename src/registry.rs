//! Compile-time registry of known HTTP headers.
//!
//! This is the single source of truth §4.1 describes: one flat table of
//! [`HeaderSpec`]s tagged with the directions they belong to, plus the
//! flag sets (`primary`, `existence_check`, `fast_count`, `enhanced_setter`)
//! that the rest of the generator reads back out of it. Nothing here is
//! computed; it is all `const` data, matching the teacher's own
//! `header/common/mod.rs` approach of one declaration per well-known
//! header rather than a runtime-built collection.

/// Membership bit for the request direction.
pub const REQUEST: u8 = 0b001;
/// Membership bit for the response direction.
pub const RESPONSE: u8 = 0b010;
/// Membership bit for the trailer direction.
pub const TRAILER: u8 = 0b100;

/// A single entry in the header registry.
#[derive(Debug, Clone, Copy)]
pub struct HeaderSpec {
    /// Canonical wire spelling, e.g. `"Content-Length"`.
    pub name: &'static str,
    /// OR of [`REQUEST`] / [`RESPONSE`] / [`TRAILER`].
    pub directions: u8,
    /// Whether this header is hoisted to the front of its direction's
    /// ordering (see [`crate::ordering`]).
    pub primary: bool,
    /// Whether a dedicated `has_<name>()` fast predicate is emitted.
    pub existence_check: bool,
    /// Whether a dedicated cached value-count accessor is emitted.
    pub fast_count: bool,
    /// Whether this header accepts a pre-encoded raw byte replacement
    /// for its serialized form (see §4.7 "Serialization").
    pub enhanced_setter: bool,
}

impl HeaderSpec {
    /// Whether this header is a member of `direction`.
    pub const fn is_in(&self, direction: u8) -> bool {
        self.directions & direction != 0
    }

    /// Whether [`HeaderSpec::name`] denotes the response/request
    /// `Content-Length` header, which gets pinned bit-layout treatment
    /// (§4.4) and numeric (not string) storage.
    pub fn is_content_length(&self) -> bool {
        self.name.eq_ignore_ascii_case("content-length")
    }

    const fn new(name: &'static str, directions: u8) -> Self {
        HeaderSpec {
            name,
            directions,
            primary: false,
            existence_check: false,
            fast_count: false,
            enhanced_setter: false,
        }
    }

    const fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    const fn existence_check(mut self) -> Self {
        self.existence_check = true;
        self
    }

    const fn fast_count(mut self) -> Self {
        self.fast_count = true;
        self
    }

    const fn enhanced(mut self) -> Self {
        self.enhanced_setter = true;
        self
    }
}

/// Headers shared between request and response directions
/// (`commonHeaders` in §4.1).
const COMMON: &[HeaderSpec] = &[
    HeaderSpec::new("Content-Length", REQUEST | RESPONSE).primary().existence_check(),
    HeaderSpec::new("Cache-Control", REQUEST | RESPONSE | TRAILER).primary(),
    HeaderSpec::new("Connection", REQUEST | RESPONSE).primary().existence_check(),
    HeaderSpec::new("Date", REQUEST | RESPONSE).primary().enhanced(),
    HeaderSpec::new("Pragma", REQUEST | RESPONSE),
    HeaderSpec::new("Trailer", REQUEST | RESPONSE),
    HeaderSpec::new("Transfer-Encoding", REQUEST | RESPONSE).primary().existence_check(),
    HeaderSpec::new("Upgrade", REQUEST | RESPONSE).existence_check(),
    HeaderSpec::new("Via", REQUEST | RESPONSE),
    HeaderSpec::new("Warning", REQUEST | RESPONSE),
    HeaderSpec::new("Content-Encoding", REQUEST | RESPONSE | TRAILER).enhanced(),
    HeaderSpec::new("Content-Language", REQUEST | RESPONSE | TRAILER).enhanced(),
    HeaderSpec::new("Content-Location", REQUEST | RESPONSE | TRAILER).enhanced(),
    HeaderSpec::new("Content-MD5", REQUEST | RESPONSE | TRAILER),
    HeaderSpec::new("Content-Range", REQUEST | RESPONSE | TRAILER),
    HeaderSpec::new("Content-Type", REQUEST | RESPONSE | TRAILER).primary().enhanced(),
    HeaderSpec::new("Keep-Alive", REQUEST | RESPONSE).existence_check(),
    HeaderSpec::new("Proxy-Connection", REQUEST | RESPONSE).existence_check(),
    HeaderSpec::new("Baggage", REQUEST | RESPONSE),
    HeaderSpec::new("Traceparent", REQUEST | RESPONSE),
    HeaderSpec::new("Tracestate", REQUEST | RESPONSE),
];

/// Headers found only in requests.
const REQUEST_ONLY: &[HeaderSpec] = &[
    HeaderSpec::new("Host", REQUEST).primary().existence_check(),
    HeaderSpec::new("Accept", REQUEST).primary(),
    HeaderSpec::new("Accept-Charset", REQUEST),
    HeaderSpec::new("Accept-Encoding", REQUEST).primary(),
    HeaderSpec::new("Accept-Language", REQUEST),
    HeaderSpec::new("Authorization", REQUEST),
    HeaderSpec::new("Cookie", REQUEST).primary().fast_count(),
    HeaderSpec::new("Expect", REQUEST),
    HeaderSpec::new("From", REQUEST),
    HeaderSpec::new("If-Match", REQUEST),
    HeaderSpec::new("If-Modified-Since", REQUEST),
    HeaderSpec::new("If-None-Match", REQUEST),
    HeaderSpec::new("If-Range", REQUEST),
    HeaderSpec::new("If-Unmodified-Since", REQUEST),
    HeaderSpec::new("Max-Forwards", REQUEST),
    HeaderSpec::new("Origin", REQUEST),
    HeaderSpec::new("Proxy-Authorization", REQUEST),
    HeaderSpec::new("Range", REQUEST),
    HeaderSpec::new("Referer", REQUEST),
    HeaderSpec::new("TE", REQUEST),
    HeaderSpec::new("User-Agent", REQUEST).primary(),
    HeaderSpec::new("Upgrade-Insecure-Requests", REQUEST),
    HeaderSpec::new("X-Forwarded-For", REQUEST),
    HeaderSpec::new("X-Forwarded-Host", REQUEST),
    HeaderSpec::new("X-Forwarded-Proto", REQUEST),
    HeaderSpec::new("X-Requested-With", REQUEST),
];

/// Headers found only in responses.
const RESPONSE_ONLY: &[HeaderSpec] = &[
    HeaderSpec::new("Server", RESPONSE).primary().enhanced(),
    HeaderSpec::new("ETag", RESPONSE),
    HeaderSpec::new("Location", RESPONSE),
    HeaderSpec::new("Last-Modified", RESPONSE),
    HeaderSpec::new("Expires", RESPONSE),
    HeaderSpec::new("Accept-Ranges", RESPONSE),
    HeaderSpec::new("Age", RESPONSE),
    HeaderSpec::new("Allow", RESPONSE),
    HeaderSpec::new("Retry-After", RESPONSE),
    HeaderSpec::new("Set-Cookie", RESPONSE).primary().fast_count(),
    HeaderSpec::new("Vary", RESPONSE),
    HeaderSpec::new("WWW-Authenticate", RESPONSE),
    HeaderSpec::new("Proxy-Authenticate", RESPONSE),
    HeaderSpec::new("Strict-Transport-Security", RESPONSE),
    HeaderSpec::new("X-Content-Type-Options", RESPONSE),
    HeaderSpec::new("X-Frame-Options", RESPONSE),
    HeaderSpec::new("X-XSS-Protection", RESPONSE),
    HeaderSpec::new("Access-Control-Allow-Origin", RESPONSE),
    HeaderSpec::new("Access-Control-Allow-Credentials", RESPONSE),
];

/// Headers found only in trailers.
const TRAILER_ONLY: &[HeaderSpec] = &[
    HeaderSpec::new("Grpc-Status", TRAILER).primary(),
    HeaderSpec::new("Grpc-Message", TRAILER),
    HeaderSpec::new("Expires", TRAILER),
];

/// Content-Length, as it exists only as a response header and gets a
/// pinned bit index (§4.4); split out of `RESPONSE_ONLY` purely for
/// documentation clarity, membership is unchanged.
pub fn is_pinned_content_length(spec: &HeaderSpec) -> bool {
    spec.directions & RESPONSE != 0 && spec.is_content_length()
}

/// HTTP/2 pseudo-headers. Excluded from the public dictionary surface
/// (§4.1) but retained here for the identifier mapper and any HTTP/2
/// internal handling that needs to recognize them.
pub const PSEUDO_HEADERS: &[&str] = &[":authority", ":method", ":path", ":scheme", ":status"];

/// Headers whose presence is illegal under HTTP/2 and HTTP/3 because
/// they are HTTP/1 connection-level, hop-by-hop headers (§4.4).
pub const INVALID_H2H3_NAMES: &[&str] = &[
    "Connection",
    "Transfer-Encoding",
    "Keep-Alive",
    "Upgrade",
    "Proxy-Connection",
];

/// Every known header in the registry, common headers first, then each
/// direction's exclusive set. Order here is declaration order; it plays
/// no role in the emitted dictionary (see [`crate::ordering`] for that).
pub fn all() -> impl Iterator<Item = &'static HeaderSpec> {
    COMMON
        .iter()
        .chain(REQUEST_ONLY.iter())
        .chain(RESPONSE_ONLY.iter())
        .chain(TRAILER_ONLY.iter())
}

/// All registry headers that are members of `direction`, including
/// Content-Length for `RESPONSE` (the bit layout planner is responsible
/// for re-pinning it to index 63, not the registry).
pub fn for_direction(direction: u8) -> impl Iterator<Item = &'static HeaderSpec> {
    all().filter(move |h| h.is_in(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_has_at_most_64_headers() {
        assert!(for_direction(REQUEST).count() <= 64);
    }

    #[test]
    fn response_has_at_most_64_headers_including_pinned() {
        assert!(for_direction(RESPONSE).count() <= 64);
    }

    #[test]
    fn exactly_one_content_length_in_response() {
        let count = for_direction(RESPONSE)
            .filter(|h| h.is_content_length())
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn pseudo_headers_are_not_in_registry() {
        for pseudo in PSEUDO_HEADERS {
            assert!(all().find(|h| h.name.eq_ignore_ascii_case(pseudo)).is_none());
        }
    }

    #[test]
    fn invalid_h2h3_names_are_all_registered() {
        for name in INVALID_H2H3_NAMES {
            assert!(all().any(|h| h.name.eq_ignore_ascii_case(name)));
        }
    }
}

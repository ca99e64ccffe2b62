//! The closed enumeration of known header types (§6 "Generator output").
//!
//! One variant per unique identifier across every direction, plus
//! `Unknown`. This is the "known-typed fast accessor" key of §6's
//! runtime dictionary surface: rather than emit one uniquely-named Rust
//! method per header (which would make the public API balloon to ~90
//! near-identical `get_x`/`set_x` pairs), the generator emits this
//! single enum and the dictionary exposes `get_known`/`set_known`/etc.
//! keyed by it — the fast, non-string-matching path §4.7 describes,
//! realized as one generic family of methods instead of N generated
//! ones.
//!
//! `Unknown` is listed first (variant discriminant 0) rather than
//! appended after the alphabetical run; spec.md §6 only requires it be
//! present alongside one entry per identifier; invariant-culture
//! ordering is documented here to apply to the named variants, with
//! `Unknown` as the sentinel "not a known header" case (see
//! `DESIGN.md`, Open Question decisions).

macro_rules! known_headers {
    ($($variant:ident => $wire:expr),* $(,)?) => {
        /// A known header identifier, stable across directions (§4.2).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum KnownHeader {
            /// Not a member of the registry; see the dictionary's
            /// `unknown` side table.
            Unknown,
            $(
                #[allow(missing_docs)]
                $variant,
            )*
        }

        impl KnownHeader {
            /// The canonical wire spelling for this header, or `""` for
            /// [`KnownHeader::Unknown`].
            pub fn wire_name(self) -> &'static str {
                match self {
                    KnownHeader::Unknown => "",
                    $(KnownHeader::$variant => $wire,)*
                }
            }

            /// Look up the known header whose wire name equals `name`
            /// case-insensitively, across the full merged registry
            /// (irrespective of direction membership).
            pub fn from_wire_name(name: &str) -> Option<KnownHeader> {
                $(if name.eq_ignore_ascii_case($wire) {
                    return Some(KnownHeader::$variant);
                })*
                None
            }
        }
    };
}

known_headers! {
    CacheControl => "Cache-Control",
    Connection => "Connection",
    ContentLength => "Content-Length",
    Date => "Date",
    Pragma => "Pragma",
    Trailer => "Trailer",
    TransferEncoding => "Transfer-Encoding",
    Upgrade => "Upgrade",
    Via => "Via",
    Warning => "Warning",
    ContentEncoding => "Content-Encoding",
    ContentLanguage => "Content-Language",
    ContentLocation => "Content-Location",
    ContentMD5 => "Content-MD5",
    ContentRange => "Content-Range",
    ContentType => "Content-Type",
    KeepAlive => "Keep-Alive",
    ProxyConnection => "Proxy-Connection",
    Baggage => "Baggage",
    TraceParent => "Traceparent",
    TraceState => "Tracestate",
    Host => "Host",
    Accept => "Accept",
    AcceptCharset => "Accept-Charset",
    AcceptEncoding => "Accept-Encoding",
    AcceptLanguage => "Accept-Language",
    Authorization => "Authorization",
    Cookie => "Cookie",
    Expect => "Expect",
    From => "From",
    IfMatch => "If-Match",
    IfModifiedSince => "If-Modified-Since",
    IfNoneMatch => "If-None-Match",
    IfRange => "If-Range",
    IfUnmodifiedSince => "If-Unmodified-Since",
    MaxForwards => "Max-Forwards",
    Origin => "Origin",
    ProxyAuthorization => "Proxy-Authorization",
    Range => "Range",
    Referer => "Referer",
    TE => "TE",
    UserAgent => "User-Agent",
    UpgradeInsecureRequests => "Upgrade-Insecure-Requests",
    XForwardedFor => "X-Forwarded-For",
    XForwardedHost => "X-Forwarded-Host",
    XForwardedProto => "X-Forwarded-Proto",
    XRequestedWith => "X-Requested-With",
    Server => "Server",
    ETag => "ETag",
    Location => "Location",
    LastModified => "Last-Modified",
    Expires => "Expires",
    AcceptRanges => "Accept-Ranges",
    Age => "Age",
    Allow => "Allow",
    RetryAfter => "Retry-After",
    SetCookie => "Set-Cookie",
    Vary => "Vary",
    WWWAuthenticate => "WWW-Authenticate",
    ProxyAuthenticate => "Proxy-Authenticate",
    StrictTransportSecurity => "Strict-Transport-Security",
    XContentTypeOptions => "X-Content-Type-Options",
    XFrameOptions => "X-Frame-Options",
    XXSSProtection => "X-XSS-Protection",
    AccessControlAllowOrigin => "Access-Control-Allow-Origin",
    AccessControlAllowCredentials => "Access-Control-Allow-Credentials",
    GrpcStatus => "Grpc-Status",
    GrpcMessage => "Grpc-Message",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::identifier_for;
    use crate::registry;

    #[test]
    fn every_registry_header_resolves_to_a_known_variant() {
        for spec in registry::all() {
            assert!(
                KnownHeader::from_wire_name(spec.name).is_some(),
                "{} has no KnownHeader variant",
                spec.name
            );
        }
    }

    #[test]
    fn wire_name_round_trips_through_from_wire_name() {
        let ct = KnownHeader::from_wire_name("content-type").unwrap();
        assert_eq!(ct.wire_name(), "Content-Type");
    }

    #[test]
    fn identifiers_only_collide_for_case_insensitively_equal_names() {
        let specs: Vec<_> = registry::all().collect();
        for a in &specs {
            for b in &specs {
                if identifier_for(a.name) == identifier_for(b.name) {
                    assert!(a.name.eq_ignore_ascii_case(b.name), "{} vs {}", a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn unknown_is_not_returned_for_registered_names() {
        assert_ne!(KnownHeader::from_wire_name("Host"), Some(KnownHeader::Unknown));
    }
}

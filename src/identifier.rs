//! Wire name → stable identifier mapping (§4.2).
//!
//! The identifier is the key the emitted dictionary uses for per-header
//! accessor names (`headers.content_type()`, `headers.set_host(..)`, and
//! so on) and must be stable across directions: the same wire name always
//! produces the same identifier no matter which direction table it
//! appears in.

/// Explicit lowercase-preserving overrides. These three identifiers are
/// not derivable from the general stripping/upper-casing rule below; the
/// source registry hard-codes them and a reimplementation must keep the
/// override list explicit rather than attempt to generalize it away
/// (spec.md §9, Open Questions).
const OVERRIDES: &[(&str, &str)] = &[
    ("baggage", "Baggage"),
    ("traceparent", "TraceParent"),
    ("tracestate", "TraceState"),
];

/// Map a registry wire name to its stable identifier.
///
/// Rules, applied in order:
/// 1. three hard-coded overrides (case-insensitive match on the whole name),
/// 2. strip every `-`,
/// 3. if what remains begins with `:`, drop the colon and upper-case the
///    next character (HTTP/2 pseudo-headers),
/// 4. otherwise the name is preserved exactly as written in the registry.
pub fn identifier_for(name: &str) -> String {
    if let Some((_, id)) = OVERRIDES.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        return (*id).to_string();
    }

    let stripped: String = name.chars().filter(|&c| c != '-').collect();

    if let Some(rest) = stripped.strip_prefix(':') {
        let mut chars = rest.chars();
        match chars.next() {
            Some(first) => {
                let mut out = String::with_capacity(rest.len());
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
                out
            }
            None => String::new(),
        }
    } else {
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_hyphens() {
        assert_eq!(identifier_for("Content-Type"), "ContentType");
        assert_eq!(identifier_for("X-Forwarded-For"), "XForwardedFor");
    }

    #[test]
    fn applies_lowercase_overrides_case_insensitively() {
        assert_eq!(identifier_for("baggage"), "Baggage");
        assert_eq!(identifier_for("Baggage"), "Baggage");
        assert_eq!(identifier_for("traceparent"), "TraceParent");
        assert_eq!(identifier_for("tracestate"), "TraceState");
    }

    #[test]
    fn pseudo_header_drops_colon_and_upper_cases() {
        assert_eq!(identifier_for(":authority"), "Authority");
        assert_eq!(identifier_for(":method"), "Method");
        assert_eq!(identifier_for(":path"), "Path");
        assert_eq!(identifier_for(":scheme"), "Scheme");
        assert_eq!(identifier_for(":status"), "Status");
    }

    #[test]
    fn stable_across_repeated_calls() {
        assert_eq!(identifier_for("Host"), identifier_for("Host"));
    }

    #[test]
    fn plain_name_preserves_case() {
        assert_eq!(identifier_for("ETag"), "ETag");
        assert_eq!(identifier_for("Host"), "Host");
    }
}

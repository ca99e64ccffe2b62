//! Generator output (§6): prints a deterministic text artifact
//! describing one direction's compiled-in dictionary — the closed
//! known-header enumeration, the bit layout, the matcher cascade
//! (as pseudocode, since this crate's matcher is a runtime-built
//! program rather than textually generated Rust source), the wire-bytes
//! table, the HPACK dispatch table, and `InvalidH2H3ResponseHeadersBits`.
//!
//! Two dictionaries populated with the same known headers under the
//! same values must serialize to byte-identical output (§5); this
//! artifact is likewise required to be byte-identical across runs for
//! the same compiled-in registry, which is trivially true here since it
//! only reads `const`/lazily-built-once data and performs no I/O.

use crate::hpack;
use crate::known::KnownHeader;
use crate::layout::{self, Layout};
use crate::ordering;
use crate::registry::{self, REQUEST, RESPONSE, TRAILER};
use std::fmt::Write as _;

fn direction_name(direction: u8) -> &'static str {
    match direction {
        REQUEST => "request",
        RESPONSE => "response",
        TRAILER => "trailer",
        _ => "unknown",
    }
}

fn write_layout(out: &mut String, layout: &Layout) {
    writeln!(out, "## bit layout ({})", direction_name(layout.direction)).unwrap();
    let mut entries: Vec<_> = layout.entries.iter().collect();
    entries.sort_by_key(|e| e.index);
    for entry in entries {
        writeln!(
            out,
            "  [{:>2}] {} (identifier={}, primary={}, enhanced_setter={})",
            entry.index,
            entry.spec.name,
            crate::identifier::identifier_for(entry.spec.name),
            entry.spec.primary,
            entry.spec.enhanced_setter,
        )
        .unwrap();
    }
    writeln!(out, "  InvalidH2H3ResponseHeadersBits = {:#018x}", layout.invalid_h2h3_bits).unwrap();
}

fn write_matcher_cascade(out: &mut String, layout: &Layout) {
    writeln!(out, "## matcher cascade ({})", direction_name(layout.direction)).unwrap();
    let mut by_len: std::collections::BTreeMap<usize, Vec<_>> = std::collections::BTreeMap::new();
    for entry in &layout.entries {
        by_len.entry(entry.spec.name.len()).or_default().push(entry.spec);
    }
    for (len, mut specs) in by_len {
        ordering::sort(&mut specs);
        writeln!(out, "  bucket(len={len}):").unwrap();
        for spec in specs {
            writeln!(out, "    if nameStart matches \"{}\" (case-insensitive) => hit", spec.name).unwrap();
        }
    }
}

fn write_wire_table(out: &mut String, direction: u8) {
    let table = match direction {
        RESPONSE => crate::wire::response(),
        TRAILER => crate::wire::trailer(),
        _ => crate::wire::request(),
    };
    writeln!(out, "## wire-bytes table ({}), {} bytes", direction_name(direction), table.blob.len()).unwrap();
}

fn write_hpack(out: &mut String, layout: &'static Layout) {
    writeln!(out, "## HPACK dispatch ({})", direction_name(layout.direction)).unwrap();
    for group in hpack::groups(layout) {
        let target = group
            .entry
            .map(|e| e.spec.name)
            .unwrap_or("<no known-header target>");
        writeln!(out, "  {:?} -> {}", group.indices, target).unwrap();
    }
}

fn write_known_enum(out: &mut String) {
    writeln!(out, "## known header enum").unwrap();
    writeln!(out, "  Unknown").unwrap();
    let mut names: Vec<&str> = registry::all().map(|h| h.name).collect();
    names.sort();
    names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    for name in names {
        let id = crate::identifier::identifier_for(name);
        let known = KnownHeader::from_wire_name(name);
        writeln!(out, "  {id} (wire=\"{name}\", resolves={known:?})").unwrap();
    }
}

/// Renders the full generator artifact for every direction.
pub fn render() -> String {
    let mut out = String::new();
    write_known_enum(&mut out);
    for direction in [REQUEST, RESPONSE, TRAILER] {
        let layout = layout::for_direction(direction);
        write_layout(&mut out, layout);
        write_matcher_cascade(&mut out, layout);
        write_wire_table(&mut out, direction);
        write_hpack(&mut out, layout);
    }
    out
}

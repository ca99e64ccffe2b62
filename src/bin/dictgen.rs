//! The generator binary (§6 "Generator output").
//!
//! Reads no input beyond the registry compiled into `httpdict` and
//! writes the generated text artifact to stdout.

fn main() {
    print!("{}", httpdict::codegen::render());
}

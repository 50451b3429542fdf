//! Frame decoder fuzz target: arbitrary method and header payloads against the
//! test fixture schema. Decoding must fail cleanly, never panic.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let schema = match amqp_codegen::schema::load_str(include_str!("../../tests/fixtures/mini.json")) {
        Ok(s) => s,
        Err(_) => return,
    };
    let codec = match amqp_codegen::Codec::new(&schema) {
        Ok(c) => c,
        Err(_) => return,
    };
    let _ = codec.decode_method(data);
    let _ = codec.decode_header(data);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}

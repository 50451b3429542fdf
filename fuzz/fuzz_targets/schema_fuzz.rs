//! Schema loader fuzz target: arbitrary bytes in, `Ok(Schema)` or `Err(GenError)` out.
//! A schema that loads must also render without error.
//! Build with: cargo fuzz run schema_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(schema) = amqp_codegen::schema::load_str(s) {
        let _ = amqp_codegen::generate::render(&schema, &amqp_codegen::GenOptions::default());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run schema_fuzz");
}

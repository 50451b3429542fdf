//! Generate Rust protocol bindings from a JSON schema.
//!
//! Usage:
//!   amqp-codegen [OPTIONS] SCHEMA.json
//!
//! Without `--output` the generated source is printed to stdout.
//!
//! Options:
//!   -o, --output FILE      Write generated source to FILE
//!   --runtime-path PATH    Module path generated code imports the field codec from
//!   --no-constants         Skip schema constants
//!   --check                Validate the schema and print a summary; generate nothing
//!
//! Logging goes to stderr; set `RUST_LOG=debug` to trace each synthesized item.

use amqp_codegen::{generate, schema, GenOptions};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "amqp-codegen", version, about = "Generate typed codecs from a protocol schema")]
struct Args {
    /// JSON schema document.
    schema: PathBuf,
    /// Output file (stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Module path of the field codec used by generated code.
    #[arg(long, default_value = "amqp_codegen::wire")]
    runtime_path: String,
    /// Do not emit schema constants.
    #[arg(long)]
    no_constants: bool,
    /// Validate only.
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let schema = schema::load_path(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;

    if args.check {
        println!(
            "{}: {} classes, {} methods, {} domains, {} constants",
            args.schema.display(),
            schema.classes().len(),
            schema.method_count(),
            schema.domains().len(),
            schema.constants().len()
        );
        return Ok(());
    }

    let options = GenOptions {
        runtime_path: args.runtime_path,
        emit_constants: !args.no_constants,
        ..GenOptions::default()
    };
    match &args.output {
        Some(path) => generate::write_to(&schema, &options, path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let source = generate::render(&schema, &options).context("generating source")?;
            std::io::stdout().write_all(source.as_bytes())?;
        }
    }
    Ok(())
}

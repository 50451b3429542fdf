//! Generation driver: run every synthesizer over a schema and render the result.

use crate::error::GenError;
use crate::ir::Module;
use crate::schema::Schema;
use crate::{constants, decoder, encoder, interface, printer};
use std::path::Path;
use tracing::info;

/// Knobs for generated output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenOptions {
    /// Module path of the field codec the generated file imports.
    pub runtime_path: String,
    /// Derives placed on generated structs (`Default` is dropped for unions).
    pub derives: Vec<String>,
    pub emit_constants: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions {
            runtime_path: "amqp_codegen::wire".to_string(),
            derives: ["Debug", "Clone", "Default", "PartialEq"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            emit_constants: true,
        }
    }
}

/// Build the declaration module: constants, interfaces, encoders, decoders.
pub fn generate(schema: &Schema, options: &GenOptions) -> Result<Module, GenError> {
    let mut items = Vec::new();
    if options.emit_constants {
        items.extend(constants::synthesize(schema));
    }
    items.extend(interface::synthesize(schema, options)?);
    items.extend(encoder::synthesize(schema)?);
    items.extend(decoder::synthesize(schema)?);
    info!(
        classes = schema.classes().len(),
        methods = schema.method_count(),
        constants = schema.constants().len(),
        items = items.len(),
        "generated module"
    );
    Ok(Module {
        runtime_path: options.runtime_path.clone(),
        items,
    })
}

/// Generate and render source text.
pub fn render(schema: &Schema, options: &GenOptions) -> Result<String, GenError> {
    Ok(printer::render(&generate(schema, options)?))
}

/// Generate, render and write to `path`.
pub fn write_to(schema: &Schema, options: &GenOptions, path: &Path) -> Result<(), GenError> {
    let source = render(schema, options)?;
    std::fs::write(path, source)?;
    info!(path = %path.display(), "wrote generated source");
    Ok(())
}

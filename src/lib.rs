//! # amqp-codegen: schema-driven protocol code generator
//!
//! Reads a declarative description of an AMQP-style binary protocol (classes
//! with methods and header properties, shared argument domains, named
//! constants) and generates Rust source with typed declarations and paired
//! encode/decode functions for every message shape.
//!
//! ## Pipeline
//!
//! - **Schema**: [`schema::load_str`] parses the JSON document and validates it
//!   into an immutable [`Schema`].
//! - **Synthesis**: [`constants`], [`interface`], [`encoder`] and [`decoder`]
//!   each map the schema onto [`ir`] nodes. Field order for every method comes
//!   from one shared [`layout`], so encoders and decoders agree by construction.
//! - **Printing**: [`printer`] renders the IR as Rust source.
//!
//! Generated code calls the field codec in [`wire`]. The same layouts also
//! drive [`Codec`], a dispatch-table codec that encodes and decodes frames
//! directly from a loaded schema.
//!
//! ## Example schema
//!
//! ```text
//! {
//!   "domains": [["queue-name", "shortstr"], ["bit", "bit"]],
//!   "constants": [{"name": "frame-end", "value": 206}],
//!   "classes": [{
//!     "id": 50, "name": "queue",
//!     "methods": [{
//!       "id": 10, "name": "declare", "synchronous": true, "response": "declare-ok",
//!       "arguments": [
//!         {"name": "queue", "domain": "queue-name", "default-value": ""},
//!         {"name": "durable", "domain": "bit", "default-value": false}
//!       ]
//!     }, {"id": 11, "name": "declare-ok", "arguments": []}]
//!   }]
//! }
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use amqp_codegen::{generate, schema, GenOptions};
//!
//! let schema = schema::load_path(std::path::Path::new("amqp.json"))?;
//! let source = generate::render(&schema, &GenOptions::default())?;
//! println!("{}", source);
//! # Ok::<(), amqp_codegen::GenError>(())
//! ```

pub mod codec;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod generate;
pub mod interface;
pub mod ir;
pub mod layout;
pub mod naming;
pub mod printer;
pub mod schema;
pub mod types;
pub mod wire;

pub use codec::{Arguments, Codec, CodecError, ReceivedHeader, ReceivedMessage};
pub use error::GenError;
pub use generate::GenOptions;
pub use ir::Module;
pub use schema::Schema;
pub use types::{PrimitiveType, StorageType};
pub use wire::{FieldTable, FieldValue, WireError};

//! Encode functions: one per method, one header encoder per class.

use crate::error::GenError;
use crate::interface;
use crate::ir::{EncodeField, FunctionDecl, FunctionKind, Item};
use crate::layout::{self, FieldLayout, HeaderLayout, MethodLayout};
use crate::schema::Schema;
use tracing::debug;

pub fn method_fn_name(method: &MethodLayout) -> String {
    format!("encode_{}", method.fn_suffix())
}

pub fn header_fn_name(header: &HeaderLayout) -> String {
    format!("encode_{}", header.fn_suffix())
}

fn encode_field(f: &FieldLayout) -> EncodeField {
    EncodeField {
        ident: f.ident(),
        primitive: f.primitive,
        default: f.default.clone(),
    }
}

pub fn method_encoder(method: &MethodLayout) -> FunctionDecl {
    FunctionDecl {
        name: method_fn_name(method),
        doc: vec![format!(
            "Encode `{}` (class {}, method {}), substituting defaults for absent arguments.",
            method.display_name(),
            method.class_id,
            method.method_id
        )],
        kind: FunctionKind::EncodeMethod {
            args_type: interface::args_name(method),
            class_id: method.class_id,
            method_id: method.method_id,
            fields: method.fields.iter().map(encode_field).collect(),
        },
    }
}

pub fn header_encoder(header: &HeaderLayout) -> FunctionDecl {
    FunctionDecl {
        name: header_fn_name(header),
        doc: vec![format!(
            "Encode a `{}` header frame (class {}) for a body of `body_size` bytes.",
            header.class_name, header.class_id
        )],
        kind: FunctionKind::EncodeHeader {
            properties_type: interface::properties_name(header),
            class_id: header.class_id,
            fields: header.fields.iter().map(encode_field).collect(),
        },
    }
}

pub fn synthesize(schema: &Schema) -> Result<Vec<Item>, GenError> {
    let mut items = Vec::new();
    for method in layout::method_layouts(schema)? {
        debug!(method = %method.display_name(), "encoder");
        items.push(Item::Function(method_encoder(&method)));
    }
    for header in layout::header_layouts(schema) {
        debug!(class = %header.class_name, "header encoder");
        items.push(Item::Function(header_encoder(&header)));
    }
    Ok(items)
}

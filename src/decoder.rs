//! Decode functions and the two dispatchers.
//!
//! Method decoders read exactly the primitive list the matching encoder writes
//! (both come from the same [`MethodLayout`]) and map positions back to named
//! fields. Decoding never substitutes defaults.

use crate::error::GenError;
use crate::interface;
use crate::ir::{ClassRoute, DecodeField, FunctionDecl, FunctionKind, Item, Route};
use crate::layout::{self, FieldLayout, HeaderLayout, MethodLayout};
use crate::schema::Schema;
use tracing::debug;

pub const DISPATCH_METHOD: &str = "decode_method";
pub const DISPATCH_HEADER: &str = "decode_header";

pub fn method_fn_name(method: &MethodLayout) -> String {
    format!("decode_{}", method.fn_suffix())
}

pub fn header_fn_name(header: &HeaderLayout) -> String {
    format!("decode_{}", header.fn_suffix())
}

fn decode_field(f: &FieldLayout) -> DecodeField {
    DecodeField {
        ident: f.ident(),
        primitive: f.primitive,
    }
}

pub fn method_decoder(method: &MethodLayout) -> FunctionDecl {
    FunctionDecl {
        name: method_fn_name(method),
        doc: vec![format!(
            "Decode the body of `{}`; class and method ids are already consumed.",
            method.display_name()
        )],
        kind: FunctionKind::DecodeMethod {
            value_type: interface::value_name(method),
            fields: method.fields.iter().map(decode_field).collect(),
        },
    }
}

pub fn header_decoder(header: &HeaderLayout) -> FunctionDecl {
    FunctionDecl {
        name: header_fn_name(header),
        doc: vec![format!(
            "Decode a `{}` header frame; the class id is already consumed.",
            header.class_name
        )],
        kind: FunctionKind::DecodeHeader {
            header_type: interface::header_name(header),
            properties_type: interface::properties_name(header),
            fields: header.fields.iter().map(decode_field).collect(),
        },
    }
}

/// Route on class id, then method id. Classes keep schema order.
pub fn method_dispatcher(schema: &Schema, methods: &[MethodLayout]) -> FunctionDecl {
    let classes = schema
        .classes()
        .iter()
        .map(|class| ClassRoute {
            class_id: class.id,
            methods: methods
                .iter()
                .filter(|m| m.class_id == class.id)
                .map(|m| Route {
                    id: m.method_id,
                    decoder: method_fn_name(m),
                    variant: m.type_name(),
                })
                .collect(),
        })
        .collect();
    FunctionDecl {
        name: DISPATCH_METHOD.to_string(),
        doc: vec![
            "Decode a method frame payload, routing on class id then method id.".to_string(),
            "Fails with `UnknownClass` or `UnknownMethod` for ids the schema does not define.".to_string(),
        ],
        kind: FunctionKind::DispatchMethod {
            union: interface::RECEIVED_MESSAGE.to_string(),
            classes,
        },
    }
}

pub fn header_dispatcher(headers: &[HeaderLayout]) -> FunctionDecl {
    FunctionDecl {
        name: DISPATCH_HEADER.to_string(),
        doc: vec!["Decode a header frame payload, routing on class id.".to_string()],
        kind: FunctionKind::DispatchHeader {
            union: interface::RECEIVED_HEADER.to_string(),
            routes: headers
                .iter()
                .map(|h| Route {
                    id: h.class_id,
                    decoder: header_fn_name(h),
                    variant: h.class_type_name(),
                })
                .collect(),
        },
    }
}

pub fn synthesize(schema: &Schema) -> Result<Vec<Item>, GenError> {
    let methods = layout::method_layouts(schema)?;
    let headers = layout::header_layouts(schema);
    let mut items = Vec::with_capacity(methods.len() + headers.len() + 2);
    for method in &methods {
        debug!(method = %method.display_name(), "decoder");
        items.push(Item::Function(method_decoder(method)));
    }
    for header in &headers {
        debug!(class = %header.class_name, "header decoder");
        items.push(Item::Function(header_decoder(header)));
    }
    items.push(Item::Function(method_dispatcher(schema, &methods)));
    items.push(Item::Function(header_dispatcher(&headers)));
    Ok(items)
}

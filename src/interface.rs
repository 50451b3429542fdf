//! Typed declarations: properties, arguments, full values, headers and the two
//! received-frame unions.

use crate::error::GenError;
use crate::generate::GenOptions;
use crate::ir::*;
use crate::layout::{self, FieldLayout, HeaderLayout, MethodLayout};
use crate::schema::Schema;
use tracing::debug;

pub const RECEIVED_MESSAGE: &str = "ReceivedMessage";
pub const RECEIVED_HEADER: &str = "ReceivedHeader";

pub fn args_name(method: &MethodLayout) -> String {
    format!("{}Args", method.type_name())
}

pub fn value_name(method: &MethodLayout) -> String {
    method.type_name()
}

pub fn properties_name(header: &HeaderLayout) -> String {
    format!("{}Properties", header.class_type_name())
}

pub fn header_name(header: &HeaderLayout) -> String {
    format!("{}Header", header.class_type_name())
}

/// Emit every declaration: per class properties and header, per method
/// arguments, full value and conversion, then both unions.
pub fn synthesize(schema: &Schema, options: &GenOptions) -> Result<Vec<Item>, GenError> {
    let methods = layout::method_layouts(schema)?;
    let headers = layout::header_layouts(schema);
    let mut items = Vec::new();

    for header in &headers {
        debug!(class = %header.class_name, properties = header.fields.len(), "header declarations");
        items.push(Item::Struct(properties_struct(header, options)));
        items.push(Item::Struct(header_struct(header, options)));
    }

    for method in &methods {
        debug!(method = %method.display_name(), fields = method.fields.len(), "method declarations");
        items.push(Item::Struct(args_struct(method, options)));
        items.push(Item::Struct(value_struct(method, options)));
        items.push(Item::Conversion(ConversionDecl {
            from: value_name(method),
            to: args_name(method),
            fields: method
                .fields
                .iter()
                .map(|f| (f.ident(), f.default.is_some()))
                .collect(),
        }));
    }

    items.push(Item::Union(UnionDecl {
        name: RECEIVED_MESSAGE.to_string(),
        doc: vec!["Every method frame the protocol defines, as returned by `decode_method`.".to_string()],
        derives: union_derives(options),
        variants: methods
            .iter()
            .map(|m| VariantDecl {
                name: m.type_name(),
                payload: value_name(m),
                class_id: m.class_id,
                method_id: Some(m.method_id),
                label: m.display_name(),
            })
            .collect(),
        has_method_id: true,
    }));
    items.push(Item::Union(UnionDecl {
        name: RECEIVED_HEADER.to_string(),
        doc: vec!["Every header frame the protocol defines, as returned by `decode_header`.".to_string()],
        derives: union_derives(options),
        variants: headers
            .iter()
            .map(|h| VariantDecl {
                name: h.class_type_name(),
                payload: header_name(h),
                class_id: h.class_id,
                method_id: None,
                label: h.class_name.clone(),
            })
            .collect(),
        has_method_id: false,
    }));

    Ok(items)
}

fn union_derives(options: &GenOptions) -> Vec<String> {
    options
        .derives
        .iter()
        .filter(|d| d.as_str() != "Default")
        .cloned()
        .collect()
}

fn field(f: &FieldLayout, optional: bool) -> FieldDecl {
    FieldDecl {
        name: f.ident(),
        ty: FieldType::Storage(f.primitive.storage()),
        optional,
        default: if optional { f.default.clone() } else { None },
    }
}

fn properties_struct(header: &HeaderLayout, options: &GenOptions) -> StructDecl {
    StructDecl {
        name: properties_name(header),
        doc: vec![format!(
            "Properties carried in a `{}` header frame. Absent properties are not sent.",
            header.class_name
        )],
        derives: options.derives.clone(),
        fields: header.fields.iter().map(|f| field(f, true)).collect(),
        consts: Vec::new(),
    }
}

fn header_struct(header: &HeaderLayout, options: &GenOptions) -> StructDecl {
    StructDecl {
        name: header_name(header),
        doc: vec![format!("Header frame of class `{}`.", header.class_name)],
        derives: options.derives.clone(),
        fields: vec![
            FieldDecl {
                name: "body_size".to_string(),
                ty: FieldType::Storage(crate::types::StorageType::U64),
                optional: false,
                default: None,
            },
            FieldDecl {
                name: "properties".to_string(),
                ty: FieldType::Named(properties_name(header)),
                optional: false,
                default: None,
            },
        ],
        consts: vec![AssocConst {
            name: "CLASS_ID".to_string(),
            value: ConstValue::U16(header.class_id),
        }],
    }
}

fn args_struct(method: &MethodLayout, options: &GenOptions) -> StructDecl {
    StructDecl {
        name: args_name(method),
        doc: vec![format!(
            "Arguments of `{}`. Fields with a default may be left as `None`.",
            method.display_name()
        )],
        derives: options.derives.clone(),
        fields: method
            .fields
            .iter()
            .map(|f| field(f, f.default.is_some()))
            .collect(),
        consts: Vec::new(),
    }
}

fn value_struct(method: &MethodLayout, options: &GenOptions) -> StructDecl {
    let mut doc = vec![format!(
        "`{}` (class {}, method {}) with every field present.",
        method.display_name(),
        method.class_id,
        method.method_id
    )];
    if let Some(response) = &method.response {
        doc.push(format!("Answered by `{}.{}`.", method.class_name, response));
    }
    StructDecl {
        name: value_name(method),
        doc,
        derives: options.derives.clone(),
        fields: method.fields.iter().map(|f| field(f, false)).collect(),
        consts: vec![
            AssocConst {
                name: "CLASS_ID".to_string(),
                value: ConstValue::U16(method.class_id),
            },
            AssocConst {
                name: "METHOD_ID".to_string(),
                value: ConstValue::U16(method.method_id),
            },
            AssocConst {
                name: "SYNCHRONOUS".to_string(),
                value: ConstValue::Bool(method.synchronous),
            },
            AssocConst {
                name: "HAS_CONTENT".to_string(),
                value: ConstValue::Bool(method.content),
            },
        ],
    }
}

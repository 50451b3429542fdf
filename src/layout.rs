//! Resolved field layouts shared by the synthesizers and the runtime codec.
//!
//! Field position is the only key on the wire. Every consumer that writes or
//! reads a method or header body goes through the same [`MethodLayout`] /
//! [`HeaderLayout`], so encoder and decoder agree on order by construction.

use crate::error::GenError;
use crate::naming;
use crate::schema::{Class, DefaultValue, Method, Schema};
use crate::types::{self, PrimitiveType};

/// One positional field of a method or header body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    /// Schema identifier (`queue-name`).
    pub name: String,
    pub primitive: PrimitiveType,
    pub default: Option<DefaultValue>,
}

impl FieldLayout {
    /// Lower-camel key used by the runtime codec.
    pub fn key(&self) -> String {
        naming::lower_camel(&self.name)
    }

    /// Rust field identifier.
    pub fn ident(&self) -> String {
        naming::snake(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodLayout {
    pub class_id: u16,
    pub method_id: u16,
    pub class_name: String,
    pub method_name: String,
    pub synchronous: bool,
    pub content: bool,
    pub response: Option<String>,
    pub fields: Vec<FieldLayout>,
}

impl MethodLayout {
    pub fn build(schema: &Schema, class: &Class, method: &Method) -> Result<Self, GenError> {
        let mut fields = Vec::with_capacity(method.arguments.len());
        for arg in &method.arguments {
            fields.push(FieldLayout {
                name: arg.name.clone(),
                primitive: types::resolve(schema, arg)?,
                default: arg.default.clone(),
            });
        }
        Ok(MethodLayout {
            class_id: class.id,
            method_id: method.id,
            class_name: class.name.clone(),
            method_name: method.name.clone(),
            synchronous: method.synchronous,
            content: method.content,
            response: method.response.clone(),
            fields,
        })
    }

    /// Ordered primitive list handed to the field codec.
    pub fn types(&self) -> Vec<PrimitiveType> {
        self.fields.iter().map(|f| f.primitive).collect()
    }

    /// `ConnectionStartOk`
    pub fn type_name(&self) -> String {
        naming::method_type_name(&self.class_name, &self.method_name)
    }

    /// `connection_start_ok`
    pub fn fn_suffix(&self) -> String {
        naming::method_fn_stem(&self.class_name, &self.method_name)
    }

    /// `connection.start-ok`
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.class_name, self.method_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub class_id: u16,
    pub class_name: String,
    pub fields: Vec<FieldLayout>,
}

impl HeaderLayout {
    pub fn build(class: &Class) -> Self {
        HeaderLayout {
            class_id: class.id,
            class_name: class.name.clone(),
            fields: class
                .properties
                .iter()
                .map(|p| FieldLayout {
                    name: p.name.clone(),
                    primitive: p.primitive,
                    default: None,
                })
                .collect(),
        }
    }

    pub fn types(&self) -> Vec<PrimitiveType> {
        self.fields.iter().map(|f| f.primitive).collect()
    }

    /// `Basic`
    pub fn class_type_name(&self) -> String {
        naming::type_name(&self.class_name)
    }

    /// `basic_header`
    pub fn fn_suffix(&self) -> String {
        naming::header_fn_stem(&self.class_name)
    }
}

/// Layouts for every method in schema order.
pub fn method_layouts(schema: &Schema) -> Result<Vec<MethodLayout>, GenError> {
    let mut out = Vec::with_capacity(schema.method_count());
    for class in schema.classes() {
        for method in &class.methods {
            out.push(MethodLayout::build(schema, class, method)?);
        }
    }
    Ok(out)
}

/// Header layouts for every class in schema order.
pub fn header_layouts(schema: &Schema) -> Vec<HeaderLayout> {
    schema.classes().iter().map(HeaderLayout::build).collect()
}

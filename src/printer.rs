//! Render a [`Module`] as Rust source.

use crate::ir::*;
use crate::schema::DefaultValue;
use crate::types::PrimitiveType;

/// First line of every generated file.
pub const DISCLAIMER: &str = "// Code generated by amqp-codegen. DO NOT EDIT.";

const INDENT: &str = "    ";

pub fn render(module: &Module) -> String {
    let mut out = String::new();
    out.push_str(DISCLAIMER);
    out.push('\n');
    out.push_str("// Changes are lost when the file is regenerated from its schema.\n\n");
    out.push_str("#[allow(unused_imports)]\n");
    out.push_str(&format!(
        "use {}::{{self as wire, FieldTable, FieldValue, PrimitiveType, Reader, WireError}};\n",
        module.runtime_path
    ));
    for item in &module.items {
        out.push('\n');
        render_item(&mut out, item);
    }
    out
}

pub fn render_item(out: &mut String, item: &Item) {
    match item {
        Item::Struct(s) => render_struct(out, s),
        Item::Union(u) => render_union(out, u),
        Item::Conversion(c) => render_conversion(out, c),
        Item::Function(f) => render_function(out, f),
        Item::Constant(c) => render_constant(out, c),
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn doc(out: &mut String, depth: usize, lines: &[String]) {
    for l in lines {
        line(out, depth, &format!("/// {}", l));
    }
}

fn derives(out: &mut String, list: &[String]) {
    if !list.is_empty() {
        line(out, 0, &format!("#[derive({})]", list.join(", ")));
    }
}

fn render_constant(out: &mut String, c: &ConstantDecl) {
    if let Some(class) = &c.class {
        line(out, 0, &format!("/// Class: `{}`.", class));
    }
    let ty = if u32::try_from(c.value).is_ok() { "u32" } else { "i64" };
    line(out, 0, &format!("pub const {}: {} = {};", c.name, ty, c.value));
}

fn field_type(f: &FieldDecl) -> String {
    let base = match &f.ty {
        FieldType::Storage(s) => s.rust_type().to_string(),
        FieldType::Named(n) => n.clone(),
    };
    if f.optional {
        format!("Option<{}>", base)
    } else {
        base
    }
}

fn default_doc(d: &DefaultValue) -> String {
    match d {
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Bool(b) => b.to_string(),
        DefaultValue::Str(s) => format!("{:?}", s),
        DefaultValue::EmptyTable => "{}".to_string(),
    }
}

fn render_struct(out: &mut String, s: &StructDecl) {
    doc(out, 0, &s.doc);
    derives(out, &s.derives);
    if s.fields.is_empty() {
        line(out, 0, &format!("pub struct {} {{}}", s.name));
    } else {
        line(out, 0, &format!("pub struct {} {{", s.name));
        for f in &s.fields {
            if let Some(d) = &f.default {
                line(out, 1, &format!("/// Default: `{}`.", default_doc(d)));
            }
            line(out, 1, &format!("pub {}: {},", f.name, field_type(f)));
        }
        line(out, 0, "}");
    }
    if !s.consts.is_empty() {
        out.push('\n');
        line(out, 0, &format!("impl {} {{", s.name));
        for c in &s.consts {
            let (ty, value) = match c.value {
                ConstValue::U16(v) => ("u16", v.to_string()),
                ConstValue::Bool(b) => ("bool", b.to_string()),
            };
            line(out, 1, &format!("pub const {}: {} = {};", c.name, ty, value));
        }
        line(out, 0, "}");
    }
}

fn render_union(out: &mut String, u: &UnionDecl) {
    doc(out, 0, &u.doc);
    derives(out, &u.derives);
    line(out, 0, &format!("pub enum {} {{", u.name));
    for v in &u.variants {
        line(out, 1, &format!("{}({}),", v.name, v.payload));
    }
    line(out, 0, "}");
    out.push('\n');
    line(out, 0, &format!("impl {} {{", u.name));
    accessor(out, u, "class_id", "u16", |v| v.class_id.to_string());
    if u.has_method_id {
        out.push('\n');
        accessor(out, u, "method_id", "u16", |v| v.method_id.unwrap_or(0).to_string());
    }
    out.push('\n');
    accessor(out, u, "name", "&'static str", |v| format!("{:?}", v.label));
    line(out, 0, "}");
}

fn accessor(out: &mut String, u: &UnionDecl, name: &str, ty: &str, value: impl Fn(&VariantDecl) -> String) {
    line(out, 1, &format!("pub fn {}(&self) -> {} {{", name, ty));
    line(out, 2, "match *self {");
    for v in &u.variants {
        line(out, 3, &format!("{}::{}(_) => {},", u.name, v.name, value(v)));
    }
    line(out, 2, "}");
    line(out, 1, "}");
}

fn render_conversion(out: &mut String, c: &ConversionDecl) {
    line(out, 0, &format!("impl From<{}> for {} {{", c.from, c.to));
    if c.fields.is_empty() {
        line(out, 1, &format!("fn from(_value: {}) -> Self {{", c.from));
        line(out, 2, &format!("{} {{}}", c.to));
    } else {
        line(out, 1, &format!("fn from(value: {}) -> Self {{", c.from));
        line(out, 2, &format!("{} {{", c.to));
        for (name, optional) in &c.fields {
            if *optional {
                line(out, 3, &format!("{}: Some(value.{}),", name, name));
            } else {
                line(out, 3, &format!("{}: value.{},", name, name));
            }
        }
        line(out, 2, "}");
    }
    line(out, 1, "}");
    line(out, 0, "}");
}

fn render_function(out: &mut String, f: &FunctionDecl) {
    doc(out, 0, &f.doc);
    match &f.kind {
        FunctionKind::EncodeMethod {
            args_type,
            class_id,
            method_id,
            fields,
        } => {
            line(
                out,
                0,
                &format!(
                    "pub fn {}({}: &{}) -> Result<Vec<u8>, WireError> {{",
                    f.name,
                    if fields.is_empty() { "_args" } else { "args" },
                    args_type
                ),
            );
            line(out, 1, "let mut buf = Vec::new();");
            line(out, 1, &format!("wire::write_short(&mut buf, {})?;", class_id));
            line(out, 1, &format!("wire::write_short(&mut buf, {})?;", method_id));
            let values: Vec<String> = fields.iter().map(|e| encode_expr("args", e)).collect();
            value_list(out, "wire::write_fields", &values);
            line(out, 1, "Ok(buf)");
            line(out, 0, "}");
        }
        FunctionKind::EncodeHeader {
            properties_type,
            class_id,
            fields,
        } => {
            line(
                out,
                0,
                &format!(
                    "pub fn {}(body_size: u64, {}: &{}) -> Result<Vec<u8>, WireError> {{",
                    f.name,
                    if fields.is_empty() { "_properties" } else { "properties" },
                    properties_type
                ),
            );
            line(out, 1, "let mut buf = Vec::new();");
            line(out, 1, &format!("wire::write_short(&mut buf, {})?;", class_id));
            line(out, 1, "wire::write_short(&mut buf, 0)?;");
            line(out, 1, "wire::write_longlong(&mut buf, body_size)?;");
            let values: Vec<String> = fields.iter().map(optional_expr).collect();
            value_list(out, "wire::write_optional_fields", &values);
            line(out, 1, "Ok(buf)");
            line(out, 0, "}");
        }
        FunctionKind::DecodeMethod { value_type, fields } => {
            line(
                out,
                0,
                &format!(
                    "pub fn {}(reader: &mut Reader<'_>) -> Result<{}, WireError> {{",
                    f.name, value_type
                ),
            );
            if fields.is_empty() {
                line(out, 1, "reader.read_fields(&[])?;");
                line(out, 1, &format!("Ok({} {{}})", value_type));
            } else {
                type_list(out, "reader.read_fields", fields);
                line(out, 1, &format!("Ok({} {{", value_type));
                for d in fields {
                    line(out, 2, &format!("{}: fields.take()?,", d.ident));
                }
                line(out, 1, "})");
            }
            line(out, 0, "}");
        }
        FunctionKind::DecodeHeader {
            header_type,
            properties_type,
            fields,
        } => {
            line(
                out,
                0,
                &format!(
                    "pub fn {}(reader: &mut Reader<'_>) -> Result<{}, WireError> {{",
                    f.name, header_type
                ),
            );
            line(out, 1, "let _weight = reader.read_short()?;");
            line(out, 1, "let body_size = reader.read_longlong()?;");
            if fields.is_empty() {
                line(out, 1, "reader.read_optional_fields(&[])?;");
                line(out, 1, &format!("Ok({} {{", header_type));
                line(out, 2, "body_size,");
                line(out, 2, &format!("properties: {} {{}},", properties_type));
            } else {
                type_list(out, "reader.read_optional_fields", fields);
                line(out, 1, &format!("Ok({} {{", header_type));
                line(out, 2, "body_size,");
                line(out, 2, &format!("properties: {} {{", properties_type));
                for d in fields {
                    line(out, 3, &format!("{}: fields.take_optional()?,", d.ident));
                }
                line(out, 2, "},");
            }
            line(out, 1, "})");
            line(out, 0, "}");
        }
        FunctionKind::DispatchMethod { union, classes } => {
            line(
                out,
                0,
                &format!("pub fn {}(bytes: &[u8]) -> Result<{}, WireError> {{", f.name, union),
            );
            line(out, 1, "let mut reader = Reader::new(bytes);");
            line(out, 1, "let class_id = reader.read_short()?;");
            line(out, 1, "let method_id = reader.read_short()?;");
            line(out, 1, "match class_id {");
            for class in classes {
                if class.methods.is_empty() {
                    line(
                        out,
                        2,
                        &format!("{} => Err(WireError::UnknownMethod(class_id, method_id)),", class.class_id),
                    );
                    continue;
                }
                line(out, 2, &format!("{} => match method_id {{", class.class_id));
                for r in &class.methods {
                    line(
                        out,
                        3,
                        &format!("{} => Ok({}::{}({}(&mut reader)?)),", r.id, union, r.variant, r.decoder),
                    );
                }
                line(out, 3, "_ => Err(WireError::UnknownMethod(class_id, method_id)),");
                line(out, 2, "},");
            }
            line(out, 2, "_ => Err(WireError::UnknownClass(class_id)),");
            line(out, 1, "}");
            line(out, 0, "}");
        }
        FunctionKind::DispatchHeader { union, routes } => {
            line(
                out,
                0,
                &format!("pub fn {}(bytes: &[u8]) -> Result<{}, WireError> {{", f.name, union),
            );
            line(out, 1, "let mut reader = Reader::new(bytes);");
            line(out, 1, "let class_id = reader.read_short()?;");
            line(out, 1, "match class_id {");
            for r in routes {
                line(
                    out,
                    2,
                    &format!("{} => Ok({}::{}({}(&mut reader)?)),", r.id, union, r.variant, r.decoder),
                );
            }
            line(out, 2, "_ => Err(WireError::UnknownClass(class_id)),");
            line(out, 1, "}");
            line(out, 0, "}");
        }
    }
}

/// `call(&mut buf, &[ ... ])?;`
fn value_list(out: &mut String, call: &str, values: &[String]) {
    if values.is_empty() {
        line(out, 1, &format!("{}(&mut buf, &[])?;", call));
        return;
    }
    line(out, 1, &format!("{}(", call));
    line(out, 2, "&mut buf,");
    line(out, 2, "&[");
    for v in values {
        line(out, 3, &format!("{},", v));
    }
    line(out, 2, "],");
    line(out, 1, ")?;");
}

/// `let mut fields = call(&[PrimitiveType::..., ...])?;`
fn type_list(out: &mut String, call: &str, fields: &[DecodeField]) {
    line(out, 1, &format!("let mut fields = {}(&[", call));
    for d in fields {
        line(out, 2, &format!("PrimitiveType::{},", d.primitive.variant()));
    }
    line(out, 1, "])?;");
}

/// Value expression for one positional field, with the default applied.
pub fn encode_expr(owner: &str, f: &EncodeField) -> String {
    let clone = f.primitive.storage().needs_clone();
    let access = if clone {
        format!("{}.{}.clone()", owner, f.ident)
    } else {
        format!("{}.{}", owner, f.ident)
    };
    let value = match &f.default {
        None => access,
        Some(d) => match default_expr(d, f.primitive) {
            Some(lit) if clone => format!("{}.unwrap_or_else(|| {})", access, lit),
            Some(lit) => format!("{}.unwrap_or({})", access, lit),
            None => format!("{}.unwrap_or_default()", access),
        },
    };
    format!("FieldValue::{}({})", f.primitive.variant(), value)
}

fn optional_expr(f: &EncodeField) -> String {
    let clone = if f.primitive.storage().needs_clone() {
        ".clone()"
    } else {
        ""
    };
    format!(
        "properties.{}{}.map(FieldValue::{})",
        f.ident,
        clone,
        f.primitive.variant()
    )
}

/// Rust literal for a default; `None` means the type's own `Default`.
fn default_expr(d: &DefaultValue, primitive: PrimitiveType) -> Option<String> {
    match (d, primitive) {
        (DefaultValue::Int(v), PrimitiveType::Bit) => Some((*v != 0).to_string()),
        (DefaultValue::Int(v), _) => Some(v.to_string()),
        (DefaultValue::Bool(b), _) => Some(b.to_string()),
        (DefaultValue::Str(s), _) if s.is_empty() => None,
        (DefaultValue::Str(s), _) => Some(format!("String::from({:?})", s)),
        (DefaultValue::EmptyTable, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(ident: &str, primitive: PrimitiveType, default: Option<DefaultValue>) -> EncodeField {
        EncodeField {
            ident: ident.to_string(),
            primitive,
            default,
        }
    }

    #[test]
    fn defaults_are_applied_in_encode_expressions() {
        assert_eq!(
            encode_expr("args", &field("ticket", PrimitiveType::Short, Some(DefaultValue::Int(0)))),
            "FieldValue::Short(args.ticket.unwrap_or(0))"
        );
        assert_eq!(
            encode_expr("args", &field("mechanism", PrimitiveType::ShortStr, Some(DefaultValue::Str("PLAIN".into())))),
            "FieldValue::ShortStr(args.mechanism.clone().unwrap_or_else(|| String::from(\"PLAIN\")))"
        );
        assert_eq!(
            encode_expr("args", &field("arguments", PrimitiveType::Table, Some(DefaultValue::EmptyTable))),
            "FieldValue::Table(args.arguments.clone().unwrap_or_default())"
        );
        assert_eq!(
            encode_expr("args", &field("no_wait", PrimitiveType::Bit, Some(DefaultValue::Int(1)))),
            "FieldValue::Bit(args.no_wait.unwrap_or(true))"
        );
        assert_eq!(
            encode_expr("args", &field("queue", PrimitiveType::ShortStr, None)),
            "FieldValue::ShortStr(args.queue.clone())"
        );
    }

    #[test]
    fn constant_type_widens_for_negative_values() {
        let mut out = String::new();
        render_item(
            &mut out,
            &Item::Constant(ConstantDecl {
                name: "FRAME_END".into(),
                value: 206,
                class: None,
            }),
        );
        assert_eq!(out, "pub const FRAME_END: u32 = 206;\n");
        out.clear();
        render_item(
            &mut out,
            &Item::Constant(ConstantDecl {
                name: "OFFSET".into(),
                value: -1,
                class: Some("frame".into()),
            }),
        );
        assert_eq!(out, "/// Class: `frame`.\npub const OFFSET: i64 = -1;\n");
    }

    #[test]
    fn empty_union_still_renders_accessors() {
        let mut out = String::new();
        render_item(
            &mut out,
            &Item::Union(UnionDecl {
                name: "ReceivedHeader".into(),
                doc: Vec::new(),
                derives: vec!["Debug".into()],
                variants: Vec::new(),
                has_method_id: false,
            }),
        );
        assert!(out.contains("pub enum ReceivedHeader {\n}"));
        assert!(out.contains("pub fn class_id(&self) -> u16 {"));
        assert!(!out.contains("method_id"));
    }
}

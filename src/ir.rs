//! Intermediate representation of generated declarations.
//!
//! Synthesizers map the schema onto these nodes; the [`printer`](crate::printer)
//! turns them into source text. Function bodies are semantic nodes
//! ([`FunctionKind`]) rather than text, so tests can inspect field order and
//! routing without parsing output.

use crate::schema::DefaultValue;
use crate::types::{PrimitiveType, StorageType};

/// A complete generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Path of the field codec module generated code imports.
    pub runtime_path: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Struct(StructDecl),
    Union(UnionDecl),
    Conversion(ConversionDecl),
    Function(FunctionDecl),
    Constant(ConstantDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub doc: Vec<String>,
    pub derives: Vec<String>,
    pub fields: Vec<FieldDecl>,
    /// Associated constants (`CLASS_ID`, `METHOD_ID`, ...).
    pub consts: Vec<AssocConst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: FieldType,
    /// Wrapped in `Option`.
    pub optional: bool,
    /// Documented default of an optional argument.
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Storage(StorageType),
    Named(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssocConst {
    pub name: String,
    pub value: ConstValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    U16(u16),
    Bool(bool),
}

/// Exhaustive sum over received shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDecl {
    pub name: String,
    pub doc: Vec<String>,
    pub derives: Vec<String>,
    pub variants: Vec<VariantDecl>,
    /// Emit a `method_id()` accessor.
    pub has_method_id: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDecl {
    pub name: String,
    pub payload: String,
    pub class_id: u16,
    pub method_id: Option<u16>,
    /// Schema name (`queue.declare`).
    pub label: String,
}

/// `impl From<full> for args`, wrapping optional fields in `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDecl {
    pub from: String,
    pub to: String,
    pub fields: Vec<(String, bool)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub doc: Vec<String>,
    pub kind: FunctionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    EncodeMethod {
        args_type: String,
        class_id: u16,
        method_id: u16,
        fields: Vec<EncodeField>,
    },
    EncodeHeader {
        properties_type: String,
        class_id: u16,
        fields: Vec<EncodeField>,
    },
    DecodeMethod {
        value_type: String,
        fields: Vec<DecodeField>,
    },
    DecodeHeader {
        header_type: String,
        properties_type: String,
        fields: Vec<DecodeField>,
    },
    DispatchMethod {
        union: String,
        classes: Vec<ClassRoute>,
    },
    DispatchHeader {
        union: String,
        routes: Vec<Route>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodeField {
    pub ident: String,
    pub primitive: PrimitiveType,
    /// Substituted when the argument is absent.
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeField {
    pub ident: String,
    pub primitive: PrimitiveType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassRoute {
    pub class_id: u16,
    pub methods: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: u16,
    pub decoder: String,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDecl {
    pub name: String,
    pub value: i64,
    pub class: Option<String>,
}

impl Module {
    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.items.iter().find_map(|item| match item {
            Item::Struct(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    pub fn find_union(&self, name: &str) -> Option<&UnionDecl> {
        self.items.iter().find_map(|item| match item {
            Item::Union(u) if u.name == name => Some(u),
            _ => None,
        })
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionDecl> {
        self.items.iter().find_map(|item| match item {
            Item::Function(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Constant(c) => Some(c),
            _ => None,
        })
    }
}

impl FunctionKind {
    /// Ordered primitive list a function writes or reads, if it has one.
    pub fn field_types(&self) -> Option<Vec<PrimitiveType>> {
        match self {
            FunctionKind::EncodeMethod { fields, .. } | FunctionKind::EncodeHeader { fields, .. } => {
                Some(fields.iter().map(|f| f.primitive).collect())
            }
            FunctionKind::DecodeMethod { fields, .. } | FunctionKind::DecodeHeader { fields, .. } => {
                Some(fields.iter().map(|f| f.primitive).collect())
            }
            FunctionKind::DispatchMethod { .. } | FunctionKind::DispatchHeader { .. } => None,
        }
    }
}

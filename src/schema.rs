//! Schema model: domains, classes, methods, properties and constants.
//!
//! The JSON document is first deserialized into raw records (every field
//! optional, as written by hand) and then validated into the typed model. After
//! [`Schema::new`] succeeds the model is immutable for the rest of the run.

use crate::error::GenError;
use crate::naming;
use crate::types::{self, PrimitiveType};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Named alias for a primitive wire type.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub primitive: PrimitiveType,
}

/// Named numeric literal; `class` is informational only.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub value: i64,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: u16,
    pub name: String,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub id: u16,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub synchronous: bool,
    pub response: Option<String>,
    /// Method is followed by a content header and body.
    pub content: bool,
}

/// Optional field carried in a class's header frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub primitive: PrimitiveType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: ArgumentType,
    pub default: Option<DefaultValue>,
}

/// How an argument names its type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentType {
    Explicit(PrimitiveType),
    ByDomain(String),
}

/// Literal default of an optional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Int(i64),
    Bool(bool),
    Str(String),
    EmptyTable,
}

impl DefaultValue {
    /// Whether this literal can stand in for a value of `primitive`.
    pub fn fits(&self, primitive: PrimitiveType) -> bool {
        match (self, primitive) {
            (DefaultValue::Int(v), PrimitiveType::Octet) => u8::try_from(*v).is_ok(),
            (DefaultValue::Int(v), PrimitiveType::Short) => u16::try_from(*v).is_ok(),
            (DefaultValue::Int(v), PrimitiveType::Long) => u32::try_from(*v).is_ok(),
            (DefaultValue::Int(v), PrimitiveType::LongLong | PrimitiveType::Timestamp) => *v >= 0,
            (DefaultValue::Int(v), PrimitiveType::Bit) => *v == 0 || *v == 1,
            (DefaultValue::Bool(_), PrimitiveType::Bit) => true,
            (DefaultValue::Str(s), PrimitiveType::ShortStr) => s.len() <= 255,
            (DefaultValue::Str(_), PrimitiveType::LongStr) => true,
            (DefaultValue::EmptyTable, PrimitiveType::Table) => true,
            _ => false,
        }
    }
}

/// Immutable, validated protocol schema.
#[derive(Debug, Clone)]
pub struct Schema {
    classes: Vec<Class>,
    domains: Vec<Domain>,
    constants: Vec<Constant>,
    domains_by_name: HashMap<String, PrimitiveType>,
}

impl Schema {
    /// Validate and freeze a schema. Checks id uniqueness, response targets and
    /// that every argument resolves to a primitive compatible with its default.
    pub fn new(
        classes: Vec<Class>,
        domains: Vec<Domain>,
        constants: Vec<Constant>,
    ) -> Result<Self, GenError> {
        let mut domains_by_name = HashMap::new();
        for d in &domains {
            if domains_by_name.insert(d.name.clone(), d.primitive).is_some() {
                return Err(GenError::DuplicateDomain(d.name.clone()));
            }
        }
        let schema = Schema {
            classes,
            domains,
            constants,
            domains_by_name,
        };
        schema.check_names()?;
        schema.check_collisions()?;
        schema.check_ids()?;
        schema.check_arguments()?;
        Ok(schema)
    }

    /// Names become Rust identifiers; they need at least one alphanumeric
    /// character and no characters outside `[A-Za-z0-9_.-]`.
    fn check_names(&self) -> Result<(), GenError> {
        let mut names: Vec<&str> = Vec::new();
        for class in &self.classes {
            names.push(&class.name);
            names.extend(class.properties.iter().map(|p| p.name.as_str()));
            for method in &class.methods {
                names.push(&method.name);
                names.extend(method.arguments.iter().map(|a| a.name.as_str()));
            }
        }
        names.extend(self.constants.iter().map(|c| c.name.as_str()));
        for name in names {
            let valid_chars = name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
            if !valid_chars || !name.chars().any(|c| c.is_ascii_alphanumeric()) {
                return Err(GenError::InvalidIdentifier(name.to_string()));
            }
        }
        Ok(())
    }

    /// Distinct schema names must stay distinct once canonicalized, and no
    /// synthesized type or function may shadow another or a fixed name of
    /// the generated module.
    fn check_collisions(&self) -> Result<(), GenError> {
        let mut types = NameSet::new("type");
        for reserved in RESERVED_TYPES {
            types.insert(reserved.to_string(), "the generated module")?;
        }
        let mut functions = NameSet::new("function");
        for reserved in ["method", "header"] {
            functions.insert(reserved.to_string(), "the dispatchers")?;
        }
        let mut constants = NameSet::new("constant");
        for c in &self.constants {
            constants.insert(naming::constant(&c.name), &c.name)?;
        }

        for class in &self.classes {
            let class_type = naming::type_name(&class.name);
            types.insert(format!("{}Properties", class_type), &class.name)?;
            types.insert(format!("{}Header", class_type), &class.name)?;
            functions.insert(naming::header_fn_stem(&class.name), &class.name)?;
            check_fields(&class.name, class.properties.iter().map(|p| p.name.as_str()))?;

            for method in &class.methods {
                let origin = format!("{}.{}", class.name, method.name);
                let method_type = naming::method_type_name(&class.name, &method.name);
                types.insert(format!("{}Args", method_type), &origin)?;
                types.insert(method_type, &origin)?;
                functions.insert(naming::method_fn_stem(&class.name, &method.name), &origin)?;
                check_fields(&origin, method.arguments.iter().map(|a| a.name.as_str()))?;
            }
        }
        Ok(())
    }

    fn check_ids(&self) -> Result<(), GenError> {
        let mut class_ids: HashMap<u16, &str> = HashMap::new();
        for class in &self.classes {
            if let Some(first) = class_ids.insert(class.id, &class.name) {
                return Err(GenError::DuplicateClassId {
                    id: class.id,
                    first: first.to_string(),
                    second: class.name.clone(),
                });
            }
            let mut method_ids: HashMap<u16, &str> = HashMap::new();
            for method in &class.methods {
                if let Some(first) = method_ids.insert(method.id, &method.name) {
                    return Err(GenError::DuplicateMethodId {
                        class: class.name.clone(),
                        id: method.id,
                        first: first.to_string(),
                        second: method.name.clone(),
                    });
                }
            }
            for method in &class.methods {
                if let Some(response) = &method.response {
                    if !class.methods.iter().any(|m| &m.name == response) {
                        return Err(GenError::UnknownResponse {
                            class: class.name.clone(),
                            method: method.name.clone(),
                            response: response.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_arguments(&self) -> Result<(), GenError> {
        for class in &self.classes {
            for method in &class.methods {
                for arg in &method.arguments {
                    let primitive = types::resolve(self, arg)?;
                    if let Some(default) = &arg.default {
                        if !default.fits(primitive) {
                            return Err(GenError::IncompatibleDefault {
                                argument: format!("{}.{}.{}", class.name, method.name, arg.name),
                                primitive: primitive.to_string(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Primitive type a domain maps to.
    pub fn domain(&self, name: &str) -> Option<PrimitiveType> {
        self.domains_by_name.get(name).copied()
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn class_by_id(&self, id: u16) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Total number of methods across all classes.
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

impl Class {
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_by_id(&self, id: u16) -> Option<&Method> {
        self.methods.iter().find(|m| m.id == id)
    }
}

// ==================== Name checks ====================

/// Names the generated module declares or imports itself.
const RESERVED_TYPES: &[&str] = &[
    "ReceivedMessage",
    "ReceivedHeader",
    "FieldTable",
    "FieldValue",
    "PrimitiveType",
    "Reader",
    "WireError",
];

/// Canonical names seen so far in one namespace, with the schema name that
/// produced each.
struct NameSet {
    kind: &'static str,
    seen: HashMap<String, String>,
}

impl NameSet {
    fn new(kind: &'static str) -> Self {
        NameSet {
            kind,
            seen: HashMap::new(),
        }
    }

    fn insert(&mut self, name: String, origin: &str) -> Result<(), GenError> {
        if let Some(first) = self.seen.get(&name) {
            return Err(GenError::DuplicateName {
                kind: self.kind,
                name,
                first: first.clone(),
                second: origin.to_string(),
            });
        }
        self.seen.insert(name, origin.to_string());
        Ok(())
    }
}

/// Field identifiers and runtime keys of one struct must be unique.
fn check_fields<'a>(owner: &str, names: impl Iterator<Item = &'a str>) -> Result<(), GenError> {
    let mut idents = NameSet::new("field");
    let mut keys = NameSet::new("field key");
    for name in names {
        let origin = format!("{}.{}", owner, name);
        idents.insert(naming::snake(name), &origin)?;
        keys.insert(naming::lower_camel(name), &origin)?;
    }
    Ok(())
}

// ==================== Raw document ====================

#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    classes: Vec<RawClass>,
    #[serde(default)]
    domains: RawDomains,
    #[serde(default)]
    constants: Vec<RawConstant>,
}

/// Either a list of `[name, primitive]` pairs or a single pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDomains {
    Many(Vec<(String, String)>),
    One((String, String)),
}

impl Default for RawDomains {
    fn default() -> Self {
        RawDomains::Many(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct RawConstant {
    name: String,
    value: i64,
    #[serde(default)]
    class: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    id: u16,
    name: String,
    #[serde(default)]
    methods: Vec<RawMethod>,
    #[serde(default)]
    properties: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    id: u16,
    name: String,
    #[serde(default)]
    arguments: Vec<RawField>,
    #[serde(default)]
    synchronous: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    content: bool,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default, rename = "default-value")]
    default: Option<serde_json::Value>,
}

/// Parse and validate a JSON schema document.
pub fn load_str(source: &str) -> Result<Schema, GenError> {
    let raw: RawSchema = serde_json::from_str(source)?;
    build_schema(raw)
}

/// Read, parse and validate a JSON schema file.
pub fn load_path(path: &Path) -> Result<Schema, GenError> {
    let source = std::fs::read_to_string(path)?;
    load_str(&source)
}

fn build_schema(raw: RawSchema) -> Result<Schema, GenError> {
    let pairs = match raw.domains {
        RawDomains::Many(pairs) => pairs,
        RawDomains::One(pair) => vec![pair],
    };
    let mut domains = Vec::with_capacity(pairs.len());
    for (name, primitive) in pairs {
        domains.push(Domain {
            primitive: primitive.parse()?,
            name,
        });
    }
    let domain_lookup: HashMap<&str, PrimitiveType> =
        domains.iter().map(|d| (d.name.as_str(), d.primitive)).collect();

    let mut classes = Vec::with_capacity(raw.classes.len());
    for rc in raw.classes {
        let mut properties = Vec::with_capacity(rc.properties.len());
        for rp in rc.properties {
            let primitive: PrimitiveType = match (&rp.ty, &rp.domain) {
                (Some(ty), _) => ty.parse()?,
                (None, Some(domain)) => *domain_lookup.get(domain.as_str()).ok_or_else(|| {
                    GenError::UnknownDomain {
                        domain: domain.clone(),
                        argument: rp.name.clone(),
                    }
                })?,
                (None, None) => {
                    return Err(GenError::UnresolvedType {
                        class: rc.name.clone(),
                        method: "properties".to_string(),
                        argument: rp.name,
                    })
                }
            };
            properties.push(Property {
                name: rp.name,
                primitive,
            });
        }
        let mut methods = Vec::with_capacity(rc.methods.len());
        for rm in rc.methods {
            let mut arguments = Vec::with_capacity(rm.arguments.len());
            for ra in rm.arguments {
                arguments.push(build_argument(&rc.name, &rm.name, ra)?);
            }
            methods.push(Method {
                id: rm.id,
                name: rm.name,
                arguments,
                synchronous: rm.synchronous,
                response: rm.response,
                content: rm.content,
            });
        }
        classes.push(Class {
            id: rc.id,
            name: rc.name,
            methods,
            properties,
        });
    }

    let constants = raw
        .constants
        .into_iter()
        .map(|c| Constant {
            name: c.name,
            value: c.value,
            class: c.class,
        })
        .collect();

    Schema::new(classes, domains, constants)
}

fn build_argument(class: &str, method: &str, raw: RawField) -> Result<Argument, GenError> {
    let ty = match (raw.ty, raw.domain) {
        (Some(ty), _) => ArgumentType::Explicit(ty.parse()?),
        (None, Some(domain)) => ArgumentType::ByDomain(domain),
        (None, None) => {
            return Err(GenError::UnresolvedType {
                class: class.to_string(),
                method: method.to_string(),
                argument: raw.name,
            })
        }
    };
    let default = match raw.default {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(build_default(&raw.name, v)?),
    };
    Ok(Argument {
        name: raw.name,
        ty,
        default,
    })
}

fn build_default(argument: &str, v: serde_json::Value) -> Result<DefaultValue, GenError> {
    let incompatible = |kind: &str| GenError::IncompatibleDefault {
        argument: argument.to_string(),
        primitive: kind.to_string(),
    };
    match v {
        serde_json::Value::Bool(b) => Ok(DefaultValue::Bool(b)),
        serde_json::Value::Number(n) => n.as_i64().map(DefaultValue::Int).ok_or_else(|| incompatible("integer")),
        serde_json::Value::String(s) => Ok(DefaultValue::Str(s)),
        serde_json::Value::Object(m) if m.is_empty() => Ok(DefaultValue::EmptyTable),
        _ => Err(incompatible("literal")),
    }
}

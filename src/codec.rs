//! Runtime codec: encode/decode method and header frames straight from a schema.
//!
//! The dispatch table maps `(class id, method id)` to a [`MethodLayout`] and
//! `class id` to a [`HeaderLayout`], built once in [`Codec::new`]. It uses the
//! same layouts and field codec as generated code, so the two produce identical
//! bytes. Values are keyed by the lower-camel field name (`queueName`).

use crate::error::GenError;
use crate::layout::{self, HeaderLayout, MethodLayout};
use crate::schema::{DefaultValue, Schema};
use crate::types::PrimitiveType;
use crate::wire::{self, FieldTable, FieldValue, Reader, WireError};
use std::collections::HashMap;
use tracing::warn;

/// Named field values keyed by lower-camel name.
pub type Arguments = HashMap<String, FieldValue>;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("Unknown method: {0}")]
    UnknownMethodName(String),
    #[error("Missing argument: {0}")]
    MissingArgument(String),
    #[error("Field {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: PrimitiveType,
        found: PrimitiveType,
    },
}

/// A decoded method frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    pub class_id: u16,
    pub method_id: u16,
    /// `class.method`
    pub name: String,
    pub values: Arguments,
}

/// A decoded header frame. Absent properties are absent from `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedHeader {
    pub class_id: u16,
    pub body_size: u64,
    pub properties: Arguments,
}

#[derive(Debug)]
pub struct Codec {
    methods: HashMap<(u16, u16), MethodLayout>,
    methods_by_name: HashMap<String, (u16, u16)>,
    headers: HashMap<u16, HeaderLayout>,
}

impl Codec {
    pub fn new(schema: &Schema) -> Result<Self, GenError> {
        let mut methods = HashMap::new();
        let mut methods_by_name = HashMap::new();
        for m in layout::method_layouts(schema)? {
            let key = (m.class_id, m.method_id);
            methods_by_name.insert(m.display_name(), key);
            methods.insert(key, m);
        }
        let headers = layout::header_layouts(schema)
            .into_iter()
            .map(|h| (h.class_id, h))
            .collect();
        Ok(Codec {
            methods,
            methods_by_name,
            headers,
        })
    }

    pub fn method(&self, class_id: u16, method_id: u16) -> Option<&MethodLayout> {
        self.methods.get(&(class_id, method_id))
    }

    /// Layout by schema name, e.g. `queue.declare`.
    pub fn method_by_name(&self, name: &str) -> Option<&MethodLayout> {
        self.methods_by_name.get(name).and_then(|k| self.methods.get(k))
    }

    /// Encode a method frame payload by schema name (`queue.declare`).
    pub fn encode_method(&self, name: &str, args: &Arguments) -> Result<Vec<u8>, CodecError> {
        let m = self
            .method_by_name(name)
            .ok_or_else(|| CodecError::UnknownMethodName(name.to_string()))?;
        encode_with_layout(m, args)
    }

    /// Encode a method frame payload by wire ids.
    pub fn encode_method_by_id(
        &self,
        class_id: u16,
        method_id: u16,
        args: &Arguments,
    ) -> Result<Vec<u8>, CodecError> {
        let m = self.method(class_id, method_id).ok_or_else(|| {
            if self.headers.contains_key(&class_id) {
                WireError::UnknownMethod(class_id, method_id)
            } else {
                WireError::UnknownClass(class_id)
            }
        })?;
        encode_with_layout(m, args)
    }

    /// Decode a method frame payload. Absent defaults are not reconstructed:
    /// the values are exactly what was on the wire.
    pub fn decode_method(&self, bytes: &[u8]) -> Result<ReceivedMessage, CodecError> {
        let mut r = Reader::new(bytes);
        let class_id = r.read_short()?;
        let method_id = r.read_short()?;
        let m = match self.methods.get(&(class_id, method_id)) {
            Some(m) => m,
            None if self.headers.contains_key(&class_id) => {
                return Err(WireError::UnknownMethod(class_id, method_id).into())
            }
            None => return Err(WireError::UnknownClass(class_id).into()),
        };
        let values = r.read_fields(&m.types())?.into_values();
        Ok(ReceivedMessage {
            class_id,
            method_id,
            name: m.display_name(),
            values: m.fields.iter().map(|f| f.key()).zip(values).collect(),
        })
    }

    /// Encode a header frame payload: class id, zero weight, body size, properties.
    pub fn encode_header(
        &self,
        class_id: u16,
        body_size: u64,
        properties: &Arguments,
    ) -> Result<Vec<u8>, CodecError> {
        let h = self
            .headers
            .get(&class_id)
            .ok_or(WireError::UnknownClass(class_id))?;
        warn_unknown_keys(h.fields.iter().map(|f| f.key()), properties, &h.class_name);
        let mut values = Vec::with_capacity(h.fields.len());
        for f in &h.fields {
            let key = f.key();
            let v = match properties.get(&key) {
                Some(v) => Some(checked(&key, f.primitive, v)?),
                None => None,
            };
            values.push(v);
        }
        let mut buf = Vec::new();
        wire::write_short(&mut buf, class_id)?;
        wire::write_short(&mut buf, 0)?;
        wire::write_longlong(&mut buf, body_size)?;
        wire::write_optional_fields(&mut buf, &values)?;
        Ok(buf)
    }

    pub fn decode_header(&self, bytes: &[u8]) -> Result<ReceivedHeader, CodecError> {
        let mut r = Reader::new(bytes);
        let class_id = r.read_short()?;
        let h = self
            .headers
            .get(&class_id)
            .ok_or(WireError::UnknownClass(class_id))?;
        let _weight = r.read_short()?;
        let body_size = r.read_longlong()?;
        let values = r.read_optional_fields(&h.types())?.into_values();
        let properties = h
            .fields
            .iter()
            .zip(values)
            .filter_map(|(f, v)| v.map(|v| (f.key(), v)))
            .collect();
        Ok(ReceivedHeader {
            class_id,
            body_size,
            properties,
        })
    }
}

fn encode_with_layout(m: &MethodLayout, args: &Arguments) -> Result<Vec<u8>, CodecError> {
    warn_unknown_keys(m.fields.iter().map(|f| f.key()), args, &m.display_name());
    let mut values = Vec::with_capacity(m.fields.len());
    for f in &m.fields {
        let key = f.key();
        let v = match (args.get(&key), &f.default) {
            (Some(v), _) => checked(&key, f.primitive, v)?,
            (None, Some(d)) => default_value(d, f.primitive),
            (None, None) => {
                return Err(CodecError::MissingArgument(format!("{}.{}", m.display_name(), key)))
            }
        };
        values.push(v);
    }
    let mut buf = Vec::new();
    wire::write_short(&mut buf, m.class_id)?;
    wire::write_short(&mut buf, m.method_id)?;
    wire::write_fields(&mut buf, &values)?;
    Ok(buf)
}

fn checked(key: &str, expected: PrimitiveType, v: &FieldValue) -> Result<FieldValue, CodecError> {
    if v.primitive() == expected {
        Ok(v.clone())
    } else {
        Err(CodecError::TypeMismatch {
            field: key.to_string(),
            expected,
            found: v.primitive(),
        })
    }
}

fn warn_unknown_keys(known: impl Iterator<Item = String>, given: &Arguments, owner: &str) {
    let known: Vec<String> = known.collect();
    for key in given.keys() {
        if !known.contains(key) {
            warn!(owner, key = %key, "ignoring unknown field");
        }
    }
}

/// Wire value a declared default stands for.
pub fn default_value(d: &DefaultValue, primitive: PrimitiveType) -> FieldValue {
    match (d, primitive) {
        (DefaultValue::Int(v), PrimitiveType::Octet) => FieldValue::Octet(*v as u8),
        (DefaultValue::Int(v), PrimitiveType::Short) => FieldValue::Short(*v as u16),
        (DefaultValue::Int(v), PrimitiveType::Long) => FieldValue::Long(*v as u32),
        (DefaultValue::Int(v), PrimitiveType::LongLong) => FieldValue::LongLong(*v as u64),
        (DefaultValue::Int(v), PrimitiveType::Timestamp) => FieldValue::Timestamp(*v as u64),
        (DefaultValue::Int(v), PrimitiveType::Bit) => FieldValue::Bit(*v != 0),
        (DefaultValue::Bool(b), PrimitiveType::Bit) => FieldValue::Bit(*b),
        (DefaultValue::Str(s), PrimitiveType::ShortStr) => FieldValue::ShortStr(s.clone()),
        (DefaultValue::Str(s), PrimitiveType::LongStr) => FieldValue::LongStr(s.clone()),
        (DefaultValue::EmptyTable, PrimitiveType::Table) => FieldValue::Table(FieldTable::new()),
        // Schema::new rejects defaults that do not fit their primitive.
        (_, p) => FieldValue::zero(p),
    }
}

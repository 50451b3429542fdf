// Code generated by amqp-codegen. DO NOT EDIT.
// Changes are lost when the file is regenerated from its schema.

#[allow(unused_imports)]
use amqp_codegen::wire::{self as wire, FieldTable, FieldValue, PrimitiveType, Reader, WireError};

/// Every method frame the protocol defines, as returned by `decode_method`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedMessage {
}

impl ReceivedMessage {
    pub fn class_id(&self) -> u16 {
        match *self {
        }
    }

    pub fn method_id(&self) -> u16 {
        match *self {
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
        }
    }
}

/// Every header frame the protocol defines, as returned by `decode_header`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedHeader {
}

impl ReceivedHeader {
    pub fn class_id(&self) -> u16 {
        match *self {
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
        }
    }
}

/// Decode a method frame payload, routing on class id then method id.
/// Fails with `UnknownClass` or `UnknownMethod` for ids the schema does not define.
pub fn decode_method(bytes: &[u8]) -> Result<ReceivedMessage, WireError> {
    let mut reader = Reader::new(bytes);
    let class_id = reader.read_short()?;
    let method_id = reader.read_short()?;
    match class_id {
        _ => Err(WireError::UnknownClass(class_id)),
    }
}

/// Decode a header frame payload, routing on class id.
pub fn decode_header(bytes: &[u8]) -> Result<ReceivedHeader, WireError> {
    let mut reader = Reader::new(bytes);
    let class_id = reader.read_short()?;
    match class_id {
        _ => Err(WireError::UnknownClass(class_id)),
    }
}

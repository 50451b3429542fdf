//! Primitive wire types and their resolution from schema arguments.

use crate::error::GenError;
use crate::schema::{Argument, ArgumentType, Schema};
use std::fmt;
use std::str::FromStr;

/// The closed set of wire-level value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Octet,
    Short,
    Long,
    LongLong,
    Bit,
    ShortStr,
    LongStr,
    Table,
    Timestamp,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Octet,
        PrimitiveType::Short,
        PrimitiveType::Long,
        PrimitiveType::LongLong,
        PrimitiveType::Bit,
        PrimitiveType::ShortStr,
        PrimitiveType::LongStr,
        PrimitiveType::Table,
        PrimitiveType::Timestamp,
    ];

    /// Schema name of the primitive.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Octet => "octet",
            PrimitiveType::Short => "short",
            PrimitiveType::Long => "long",
            PrimitiveType::LongLong => "longlong",
            PrimitiveType::Bit => "bit",
            PrimitiveType::ShortStr => "shortstr",
            PrimitiveType::LongStr => "longstr",
            PrimitiveType::Table => "table",
            PrimitiveType::Timestamp => "timestamp",
        }
    }

    /// Variant name shared by `PrimitiveType` and `FieldValue` in generated code.
    pub fn variant(self) -> &'static str {
        match self {
            PrimitiveType::Octet => "Octet",
            PrimitiveType::Short => "Short",
            PrimitiveType::Long => "Long",
            PrimitiveType::LongLong => "LongLong",
            PrimitiveType::Bit => "Bit",
            PrimitiveType::ShortStr => "ShortStr",
            PrimitiveType::LongStr => "LongStr",
            PrimitiveType::Table => "Table",
            PrimitiveType::Timestamp => "Timestamp",
        }
    }

    /// Target-language storage type.
    pub fn storage(self) -> StorageType {
        match self {
            PrimitiveType::Octet => StorageType::U8,
            PrimitiveType::Short => StorageType::U16,
            PrimitiveType::Long => StorageType::U32,
            PrimitiveType::LongLong | PrimitiveType::Timestamp => StorageType::U64,
            PrimitiveType::Bit => StorageType::Bool,
            PrimitiveType::ShortStr | PrimitiveType::LongStr => StorageType::Text,
            PrimitiveType::Table => StorageType::Table,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveType::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| GenError::UnknownPrimitiveType(s.to_string()))
    }
}

/// Rust type a primitive is stored as in generated declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    U8,
    U16,
    U32,
    U64,
    Bool,
    Text,
    Table,
}

impl StorageType {
    pub fn rust_type(self) -> &'static str {
        match self {
            StorageType::U8 => "u8",
            StorageType::U16 => "u16",
            StorageType::U32 => "u32",
            StorageType::U64 => "u64",
            StorageType::Bool => "bool",
            StorageType::Text => "String",
            StorageType::Table => "FieldTable",
        }
    }

    /// True for types that are moved rather than copied out of a borrowed struct.
    pub fn needs_clone(self) -> bool {
        matches!(self, StorageType::Text | StorageType::Table)
    }
}

/// Map a primitive type name to its storage type.
pub fn storage_type(primitive: &str) -> Result<StorageType, GenError> {
    Ok(primitive.parse::<PrimitiveType>()?.storage())
}

/// Resolve an argument's effective primitive type: explicit type wins, otherwise
/// the domain table is consulted.
pub fn resolve(schema: &Schema, argument: &Argument) -> Result<PrimitiveType, GenError> {
    match &argument.ty {
        ArgumentType::Explicit(p) => Ok(*p),
        ArgumentType::ByDomain(domain) => {
            schema
                .domain(domain)
                .ok_or_else(|| GenError::UnknownDomain {
                    domain: domain.clone(),
                    argument: argument.name.clone(),
                })
        }
    }
}

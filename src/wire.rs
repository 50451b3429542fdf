//! Binary field codec used by generated code and by the runtime [`Codec`](crate::codec::Codec).
//!
//! All integers are big-endian (network order).
//!
//! | Primitive   | Encoding                                              |
//! |-------------|-------------------------------------------------------|
//! | `octet`     | 1 byte                                                |
//! | `short`     | u16                                                   |
//! | `long`      | u32                                                   |
//! | `longlong`  | u64                                                   |
//! | `timestamp` | u64 (seconds)                                         |
//! | `bit`       | consecutive bits packed LSB-first into one octet      |
//! | `shortstr`  | u8 length + UTF-8 bytes (max 255)                     |
//! | `longstr`   | u32 length + UTF-8 bytes                              |
//! | `table`     | u32 byte length + (shortstr key, tag, value)*         |
//!
//! Optional field lists start with one or more 16-bit flag words: bit 15 is the
//! first field, bit 1 the fifteenth, and bit 0 set means another word follows.
//! Only present values are written after the flags, each unpacked.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

pub use crate::types::PrimitiveType;

/// String-keyed field table.
pub type FieldTable = BTreeMap<String, FieldValue>;

/// A single typed wire value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Octet(u8),
    Short(u16),
    Long(u32),
    LongLong(u64),
    Bit(bool),
    ShortStr(String),
    LongStr(String),
    Table(FieldTable),
    Timestamp(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Short string too long: {0} bytes")]
    ShortStringTooLong(usize),
    #[error("Long string too long: {0} bytes")]
    LongStringTooLong(usize),
    #[error("Table too long: {0} bytes")]
    TableTooLong(usize),
    #[error("Tables nested deeper than {0} levels")]
    TableTooDeep(usize),
    #[error("Table entry runs past the declared table length")]
    TableOverrun,
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: PrimitiveType,
    },
    #[error("Missing field at position {0}")]
    MissingField(usize),
    #[error("Unknown table value tag: {0:#04x}")]
    UnknownTableTag(u8),
    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8,
    #[error("Unknown class: {0}")]
    UnknownClass(u16),
    #[error("Unknown method: class {0}, method {1}")]
    UnknownMethod(u16, u16),
}

impl FieldValue {
    pub fn primitive(&self) -> PrimitiveType {
        match self {
            FieldValue::Octet(_) => PrimitiveType::Octet,
            FieldValue::Short(_) => PrimitiveType::Short,
            FieldValue::Long(_) => PrimitiveType::Long,
            FieldValue::LongLong(_) => PrimitiveType::LongLong,
            FieldValue::Bit(_) => PrimitiveType::Bit,
            FieldValue::ShortStr(_) => PrimitiveType::ShortStr,
            FieldValue::LongStr(_) => PrimitiveType::LongStr,
            FieldValue::Table(_) => PrimitiveType::Table,
            FieldValue::Timestamp(_) => PrimitiveType::Timestamp,
        }
    }

    /// Zero value of a primitive (empty string, empty table, false).
    pub fn zero(primitive: PrimitiveType) -> FieldValue {
        match primitive {
            PrimitiveType::Octet => FieldValue::Octet(0),
            PrimitiveType::Short => FieldValue::Short(0),
            PrimitiveType::Long => FieldValue::Long(0),
            PrimitiveType::LongLong => FieldValue::LongLong(0),
            PrimitiveType::Bit => FieldValue::Bit(false),
            PrimitiveType::ShortStr => FieldValue::ShortStr(String::new()),
            PrimitiveType::LongStr => FieldValue::LongStr(String::new()),
            PrimitiveType::Table => FieldValue::Table(FieldTable::new()),
            PrimitiveType::Timestamp => FieldValue::Timestamp(0),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            FieldValue::Octet(_) => b'B',
            FieldValue::Short(_) => b'u',
            FieldValue::Long(_) => b'i',
            FieldValue::LongLong(_) => b'l',
            FieldValue::Bit(_) => b't',
            FieldValue::ShortStr(_) => b's',
            FieldValue::LongStr(_) => b'S',
            FieldValue::Table(_) => b'F',
            FieldValue::Timestamp(_) => b'T',
        }
    }
}

fn primitive_for_tag(tag: u8) -> Result<PrimitiveType, WireError> {
    Ok(match tag {
        b'B' => PrimitiveType::Octet,
        b'u' => PrimitiveType::Short,
        b'i' => PrimitiveType::Long,
        b'l' => PrimitiveType::LongLong,
        b't' => PrimitiveType::Bit,
        b's' => PrimitiveType::ShortStr,
        b'S' => PrimitiveType::LongStr,
        b'F' => PrimitiveType::Table,
        b'T' => PrimitiveType::Timestamp,
        other => return Err(WireError::UnknownTableTag(other)),
    })
}

/// Nesting limit for tables inside tables.
pub const MAX_TABLE_DEPTH: usize = 64;

// ==================== Writer ====================

pub fn write_short(w: &mut Vec<u8>, v: u16) -> Result<(), WireError> {
    w.write_u16::<BigEndian>(v)?;
    Ok(())
}

pub fn write_longlong(w: &mut Vec<u8>, v: u64) -> Result<(), WireError> {
    w.write_u64::<BigEndian>(v)?;
    Ok(())
}

/// Write an ordered field list. Adjacent bits share octets.
pub fn write_fields(w: &mut Vec<u8>, values: &[FieldValue]) -> Result<(), WireError> {
    let mut bits = BitWriter::default();
    for v in values {
        match v {
            FieldValue::Bit(b) => bits.push(w, *b),
            other => {
                bits.flush(w);
                write_value(w, other)?;
            }
        }
    }
    bits.flush(w);
    Ok(())
}

/// Write presence flags followed by the present values.
pub fn write_optional_fields(w: &mut Vec<u8>, values: &[Option<FieldValue>]) -> Result<(), WireError> {
    for flags in presence_flags(values.iter().map(Option::is_some)) {
        write_short(w, flags)?;
    }
    for v in values.iter().flatten() {
        match v {
            FieldValue::Bit(b) => w.write_u8(u8::from(*b))?,
            other => write_value(w, other)?,
        }
    }
    Ok(())
}

fn presence_flags(present: impl Iterator<Item = bool>) -> Vec<u16> {
    let present: Vec<bool> = present.collect();
    let mut words = Vec::new();
    for (chunk_index, chunk) in present.chunks(15).enumerate() {
        let mut word = 0u16;
        for (i, &p) in chunk.iter().enumerate() {
            if p {
                word |= 1 << (15 - i);
            }
        }
        if (chunk_index + 1) * 15 < present.len() {
            word |= 1;
        }
        words.push(word);
    }
    if words.is_empty() {
        words.push(0);
    }
    words
}

fn write_value(w: &mut Vec<u8>, v: &FieldValue) -> Result<(), WireError> {
    match v {
        FieldValue::Octet(x) => w.write_u8(*x)?,
        FieldValue::Short(x) => w.write_u16::<BigEndian>(*x)?,
        FieldValue::Long(x) => w.write_u32::<BigEndian>(*x)?,
        FieldValue::LongLong(x) | FieldValue::Timestamp(x) => w.write_u64::<BigEndian>(*x)?,
        FieldValue::Bit(b) => w.write_u8(u8::from(*b))?,
        FieldValue::ShortStr(s) => write_shortstr(w, s)?,
        FieldValue::LongStr(s) => {
            w.write_u32::<BigEndian>(long_len(s.len(), WireError::LongStringTooLong)?)?;
            w.write_all(s.as_bytes())?;
        }
        FieldValue::Table(t) => write_table(w, t)?,
    }
    Ok(())
}

fn write_shortstr(w: &mut Vec<u8>, s: &str) -> Result<(), WireError> {
    let len = u8::try_from(s.len()).map_err(|_| WireError::ShortStringTooLong(s.len()))?;
    w.write_u8(len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_table(w: &mut Vec<u8>, table: &FieldTable) -> Result<(), WireError> {
    let mut body = Vec::new();
    for (key, value) in table {
        write_shortstr(&mut body, key)?;
        body.write_u8(value.tag())?;
        write_value(&mut body, value)?;
    }
    w.write_u32::<BigEndian>(long_len(body.len(), WireError::TableTooLong)?)?;
    w.write_all(&body)?;
    Ok(())
}

fn long_len(len: usize, too_long: fn(usize) -> WireError) -> Result<u32, WireError> {
    u32::try_from(len).map_err(|_| too_long(len))
}

#[derive(Default)]
struct BitWriter {
    byte: u8,
    count: u8,
}

impl BitWriter {
    fn push(&mut self, w: &mut Vec<u8>, bit: bool) {
        if self.count == 8 {
            self.flush(w);
        }
        if bit {
            self.byte |= 1 << self.count;
        }
        self.count += 1;
    }

    fn flush(&mut self, w: &mut Vec<u8>) {
        if self.count > 0 {
            w.push(self.byte);
            self.byte = 0;
            self.count = 0;
        }
    }
}

// ==================== Reader ====================

/// Byte cursor over an incoming frame payload.
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    pub fn read_octet(&mut self) -> Result<u8, WireError> {
        Ok(self.cursor.read_u8()?)
    }

    pub fn read_short(&mut self) -> Result<u16, WireError> {
        Ok(self.cursor.read_u16::<BigEndian>()?)
    }

    pub fn read_long(&mut self) -> Result<u32, WireError> {
        Ok(self.cursor.read_u32::<BigEndian>()?)
    }

    pub fn read_longlong(&mut self) -> Result<u64, WireError> {
        Ok(self.cursor.read_u64::<BigEndian>()?)
    }

    /// Read values for `types` in order; mirror of [`write_fields`].
    pub fn read_fields(&mut self, types: &[PrimitiveType]) -> Result<Fields, WireError> {
        let mut values = Vec::with_capacity(types.len());
        let mut bits = BitReader::default();
        for &ty in types {
            if ty == PrimitiveType::Bit {
                values.push(FieldValue::Bit(bits.next(self)?));
            } else {
                bits.reset();
                values.push(self.read_value(ty)?);
            }
        }
        Ok(Fields::new(values))
    }

    /// Read presence flags then the present values; mirror of [`write_optional_fields`].
    pub fn read_optional_fields(&mut self, types: &[PrimitiveType]) -> Result<OptionalFields, WireError> {
        let mut present = Vec::with_capacity(types.len());
        loop {
            let word = self.read_short()?;
            for i in 0..15 {
                present.push(word & (1 << (15 - i)) != 0);
            }
            if word & 1 == 0 {
                break;
            }
        }
        let mut values = Vec::with_capacity(types.len());
        for (i, &ty) in types.iter().enumerate() {
            if present.get(i).copied().unwrap_or(false) {
                values.push(Some(self.read_value(ty)?));
            } else {
                values.push(None);
            }
        }
        Ok(OptionalFields::new(values))
    }

    fn read_value(&mut self, ty: PrimitiveType) -> Result<FieldValue, WireError> {
        self.read_nested_value(ty, 0)
    }

    /// `depth` counts the tables enclosing this value.
    fn read_nested_value(&mut self, ty: PrimitiveType, depth: usize) -> Result<FieldValue, WireError> {
        Ok(match ty {
            PrimitiveType::Octet => FieldValue::Octet(self.read_octet()?),
            PrimitiveType::Short => FieldValue::Short(self.read_short()?),
            PrimitiveType::Long => FieldValue::Long(self.read_long()?),
            PrimitiveType::LongLong => FieldValue::LongLong(self.read_longlong()?),
            PrimitiveType::Timestamp => FieldValue::Timestamp(self.read_longlong()?),
            PrimitiveType::Bit => FieldValue::Bit(self.read_octet()? != 0),
            PrimitiveType::ShortStr => {
                let len = self.read_octet()? as usize;
                FieldValue::ShortStr(self.read_string(len)?)
            }
            PrimitiveType::LongStr => {
                let len = self.read_long()? as usize;
                FieldValue::LongStr(self.read_string(len)?)
            }
            PrimitiveType::Table => FieldValue::Table(self.read_table(depth)?),
        })
    }

    fn ensure_remaining(&self, len: usize) -> Result<(), WireError> {
        if len > self.remaining() {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Ok(())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        // Length prefixes come off the wire; never allocate past the input.
        self.ensure_remaining(len)?;
        let mut buf = vec![0u8; len];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_string(&mut self, len: usize) -> Result<String, WireError> {
        String::from_utf8(self.read_bytes(len)?).map_err(|_| WireError::InvalidUtf8)
    }

    /// Entries are read in place, bounded by the declared byte length.
    fn read_table(&mut self, depth: usize) -> Result<FieldTable, WireError> {
        if depth >= MAX_TABLE_DEPTH {
            return Err(WireError::TableTooDeep(MAX_TABLE_DEPTH));
        }
        let len = self.read_long()? as usize;
        self.ensure_remaining(len)?;
        let end = self.position() + len;
        let mut table = FieldTable::new();
        while self.position() < end {
            let key_len = self.read_octet()? as usize;
            let key = self.read_string(key_len)?;
            let ty = primitive_for_tag(self.read_octet()?)?;
            let value = self.read_nested_value(ty, depth + 1)?;
            table.insert(key, value);
        }
        if self.position() != end {
            return Err(WireError::TableOverrun);
        }
        Ok(table)
    }
}

#[derive(Default)]
struct BitReader {
    byte: u8,
    count: u8,
}

impl BitReader {
    fn next(&mut self, r: &mut Reader<'_>) -> Result<bool, WireError> {
        if self.count == 0 || self.count == 8 {
            self.byte = r.read_octet()?;
            self.count = 0;
        }
        let bit = self.byte & (1 << self.count) != 0;
        self.count += 1;
        Ok(bit)
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// Conversion from a decoded [`FieldValue`] into a declared field type.
pub trait FromField: Sized {
    fn from_field(v: FieldValue) -> Result<Self, WireError>;
}

macro_rules! from_field {
    ($ty:ty, $expected:literal, $($variant:ident),+) => {
        impl FromField for $ty {
            fn from_field(v: FieldValue) -> Result<Self, WireError> {
                match v {
                    $(FieldValue::$variant(x) => Ok(x),)+
                    other => Err(WireError::TypeMismatch {
                        expected: $expected,
                        found: other.primitive(),
                    }),
                }
            }
        }
    };
}

from_field!(u8, "octet", Octet);
from_field!(u16, "short", Short);
from_field!(u32, "long", Long);
from_field!(u64, "longlong or timestamp", LongLong, Timestamp);
from_field!(bool, "bit", Bit);
from_field!(String, "shortstr or longstr", ShortStr, LongStr);
from_field!(FieldTable, "table", Table);

impl FromField for FieldValue {
    fn from_field(v: FieldValue) -> Result<Self, WireError> {
        Ok(v)
    }
}

/// Positionally ordered values from [`Reader::read_fields`].
pub struct Fields {
    values: std::vec::IntoIter<FieldValue>,
    index: usize,
}

impl Fields {
    fn new(values: Vec<FieldValue>) -> Self {
        Fields {
            values: values.into_iter(),
            index: 0,
        }
    }

    /// Next value, converted to the declared field type.
    pub fn take<T: FromField>(&mut self) -> Result<T, WireError> {
        let v = self.values.next().ok_or(WireError::MissingField(self.index))?;
        self.index += 1;
        T::from_field(v)
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values.collect()
    }
}

/// Positionally ordered optional values from [`Reader::read_optional_fields`].
pub struct OptionalFields {
    values: std::vec::IntoIter<Option<FieldValue>>,
    index: usize,
}

impl OptionalFields {
    fn new(values: Vec<Option<FieldValue>>) -> Self {
        OptionalFields {
            values: values.into_iter(),
            index: 0,
        }
    }

    pub fn take_optional<T: FromField>(&mut self) -> Result<Option<T>, WireError> {
        let v = self.values.next().ok_or(WireError::MissingField(self.index))?;
        self.index += 1;
        v.map(T::from_field).transpose()
    }

    pub fn into_values(self) -> Vec<Option<FieldValue>> {
        self.values.collect()
    }
}

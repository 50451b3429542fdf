// Code generated by amqp-codegen. DO NOT EDIT.
// Changes are lost when the file is regenerated from its schema.

#[allow(unused_imports)]
use amqp_codegen::wire::{self as wire, FieldTable, FieldValue, PrimitiveType, Reader, WireError};

pub const FRAME_END: u32 = 206;

pub const FRAME_MIN_SIZE: u32 = 4096;

/// Class: `soft-error`.
pub const NOT_FOUND: u32 = 404;

/// Properties carried in a `connection` header frame. Absent properties are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionProperties {}

/// Header frame of class `connection`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionHeader {
    pub body_size: u64,
    pub properties: ConnectionProperties,
}

impl ConnectionHeader {
    pub const CLASS_ID: u16 = 10;
}

/// Properties carried in a `queue` header frame. Absent properties are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueProperties {}

/// Header frame of class `queue`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueHeader {
    pub body_size: u64,
    pub properties: QueueProperties,
}

impl QueueHeader {
    pub const CLASS_ID: u16 = 50;
}

/// Properties carried in a `basic` header frame. Absent properties are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicProperties {
    pub content_type: Option<String>,
    pub delivery_mode: Option<u8>,
    pub timestamp: Option<u64>,
    pub headers: Option<FieldTable>,
}

/// Header frame of class `basic`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicHeader {
    pub body_size: u64,
    pub properties: BasicProperties,
}

impl BasicHeader {
    pub const CLASS_ID: u16 = 60;
}

/// Arguments of `connection.open`. Fields with a default may be left as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOpenArgs {
    pub virtual_host: String,
}

/// `connection.open` (class 10, method 40) with every field present.
/// Answered by `connection.open-ok`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOpen {
    pub virtual_host: String,
}

impl ConnectionOpen {
    pub const CLASS_ID: u16 = 10;
    pub const METHOD_ID: u16 = 40;
    pub const SYNCHRONOUS: bool = true;
    pub const HAS_CONTENT: bool = false;
}

impl From<ConnectionOpen> for ConnectionOpenArgs {
    fn from(value: ConnectionOpen) -> Self {
        ConnectionOpenArgs {
            virtual_host: value.virtual_host,
        }
    }
}

/// Arguments of `connection.open-ok`. Fields with a default may be left as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOpenOkArgs {}

/// `connection.open-ok` (class 10, method 41) with every field present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOpenOk {}

impl ConnectionOpenOk {
    pub const CLASS_ID: u16 = 10;
    pub const METHOD_ID: u16 = 41;
    pub const SYNCHRONOUS: bool = false;
    pub const HAS_CONTENT: bool = false;
}

impl From<ConnectionOpenOk> for ConnectionOpenOkArgs {
    fn from(_value: ConnectionOpenOk) -> Self {
        ConnectionOpenOkArgs {}
    }
}

/// Arguments of `queue.declare`. Fields with a default may be left as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueDeclareArgs {
    /// Default: `0`.
    pub ticket: Option<u16>,
    /// Default: `""`.
    pub queue: Option<String>,
    /// Default: `false`.
    pub passive: Option<bool>,
    /// Default: `true`.
    pub durable: Option<bool>,
    /// Default: `{}`.
    pub arguments: Option<FieldTable>,
}

/// `queue.declare` (class 50, method 10) with every field present.
/// Answered by `queue.declare-ok`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueDeclare {
    pub ticket: u16,
    pub queue: String,
    pub passive: bool,
    pub durable: bool,
    pub arguments: FieldTable,
}

impl QueueDeclare {
    pub const CLASS_ID: u16 = 50;
    pub const METHOD_ID: u16 = 10;
    pub const SYNCHRONOUS: bool = true;
    pub const HAS_CONTENT: bool = false;
}

impl From<QueueDeclare> for QueueDeclareArgs {
    fn from(value: QueueDeclare) -> Self {
        QueueDeclareArgs {
            ticket: Some(value.ticket),
            queue: Some(value.queue),
            passive: Some(value.passive),
            durable: Some(value.durable),
            arguments: Some(value.arguments),
        }
    }
}

/// Arguments of `queue.declare-ok`. Fields with a default may be left as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueDeclareOkArgs {
    pub queue: String,
    pub message_count: u32,
    pub consumer_count: u32,
}

/// `queue.declare-ok` (class 50, method 11) with every field present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueDeclareOk {
    pub queue: String,
    pub message_count: u32,
    pub consumer_count: u32,
}

impl QueueDeclareOk {
    pub const CLASS_ID: u16 = 50;
    pub const METHOD_ID: u16 = 11;
    pub const SYNCHRONOUS: bool = false;
    pub const HAS_CONTENT: bool = false;
}

impl From<QueueDeclareOk> for QueueDeclareOkArgs {
    fn from(value: QueueDeclareOk) -> Self {
        QueueDeclareOkArgs {
            queue: value.queue,
            message_count: value.message_count,
            consumer_count: value.consumer_count,
        }
    }
}

/// Arguments of `basic.publish`. Fields with a default may be left as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicPublishArgs {
    /// Default: `"amq.direct"`.
    pub exchange: Option<String>,
    pub routing_key: String,
    /// Default: `false`.
    pub mandatory: Option<bool>,
    pub sequence: u64,
    /// Default: `""`.
    pub note: Option<String>,
}

/// `basic.publish` (class 60, method 40) with every field present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicPublish {
    pub exchange: String,
    pub routing_key: String,
    pub mandatory: bool,
    pub sequence: u64,
    pub note: String,
}

impl BasicPublish {
    pub const CLASS_ID: u16 = 60;
    pub const METHOD_ID: u16 = 40;
    pub const SYNCHRONOUS: bool = false;
    pub const HAS_CONTENT: bool = true;
}

impl From<BasicPublish> for BasicPublishArgs {
    fn from(value: BasicPublish) -> Self {
        BasicPublishArgs {
            exchange: Some(value.exchange),
            routing_key: value.routing_key,
            mandatory: Some(value.mandatory),
            sequence: value.sequence,
            note: Some(value.note),
        }
    }
}

/// Every method frame the protocol defines, as returned by `decode_method`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedMessage {
    ConnectionOpen(ConnectionOpen),
    ConnectionOpenOk(ConnectionOpenOk),
    QueueDeclare(QueueDeclare),
    QueueDeclareOk(QueueDeclareOk),
    BasicPublish(BasicPublish),
}

impl ReceivedMessage {
    pub fn class_id(&self) -> u16 {
        match *self {
            ReceivedMessage::ConnectionOpen(_) => 10,
            ReceivedMessage::ConnectionOpenOk(_) => 10,
            ReceivedMessage::QueueDeclare(_) => 50,
            ReceivedMessage::QueueDeclareOk(_) => 50,
            ReceivedMessage::BasicPublish(_) => 60,
        }
    }

    pub fn method_id(&self) -> u16 {
        match *self {
            ReceivedMessage::ConnectionOpen(_) => 40,
            ReceivedMessage::ConnectionOpenOk(_) => 41,
            ReceivedMessage::QueueDeclare(_) => 10,
            ReceivedMessage::QueueDeclareOk(_) => 11,
            ReceivedMessage::BasicPublish(_) => 40,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            ReceivedMessage::ConnectionOpen(_) => "connection.open",
            ReceivedMessage::ConnectionOpenOk(_) => "connection.open-ok",
            ReceivedMessage::QueueDeclare(_) => "queue.declare",
            ReceivedMessage::QueueDeclareOk(_) => "queue.declare-ok",
            ReceivedMessage::BasicPublish(_) => "basic.publish",
        }
    }
}

/// Every header frame the protocol defines, as returned by `decode_header`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedHeader {
    Connection(ConnectionHeader),
    Queue(QueueHeader),
    Basic(BasicHeader),
}

impl ReceivedHeader {
    pub fn class_id(&self) -> u16 {
        match *self {
            ReceivedHeader::Connection(_) => 10,
            ReceivedHeader::Queue(_) => 50,
            ReceivedHeader::Basic(_) => 60,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            ReceivedHeader::Connection(_) => "connection",
            ReceivedHeader::Queue(_) => "queue",
            ReceivedHeader::Basic(_) => "basic",
        }
    }
}

/// Encode `connection.open` (class 10, method 40), substituting defaults for absent arguments.
pub fn encode_connection_open(args: &ConnectionOpenArgs) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 10)?;
    wire::write_short(&mut buf, 40)?;
    wire::write_fields(
        &mut buf,
        &[
            FieldValue::ShortStr(args.virtual_host.clone()),
        ],
    )?;
    Ok(buf)
}

/// Encode `connection.open-ok` (class 10, method 41), substituting defaults for absent arguments.
pub fn encode_connection_open_ok(_args: &ConnectionOpenOkArgs) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 10)?;
    wire::write_short(&mut buf, 41)?;
    wire::write_fields(&mut buf, &[])?;
    Ok(buf)
}

/// Encode `queue.declare` (class 50, method 10), substituting defaults for absent arguments.
pub fn encode_queue_declare(args: &QueueDeclareArgs) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 50)?;
    wire::write_short(&mut buf, 10)?;
    wire::write_fields(
        &mut buf,
        &[
            FieldValue::Short(args.ticket.unwrap_or(0)),
            FieldValue::ShortStr(args.queue.clone().unwrap_or_default()),
            FieldValue::Bit(args.passive.unwrap_or(false)),
            FieldValue::Bit(args.durable.unwrap_or(true)),
            FieldValue::Table(args.arguments.clone().unwrap_or_default()),
        ],
    )?;
    Ok(buf)
}

/// Encode `queue.declare-ok` (class 50, method 11), substituting defaults for absent arguments.
pub fn encode_queue_declare_ok(args: &QueueDeclareOkArgs) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 50)?;
    wire::write_short(&mut buf, 11)?;
    wire::write_fields(
        &mut buf,
        &[
            FieldValue::ShortStr(args.queue.clone()),
            FieldValue::Long(args.message_count),
            FieldValue::Long(args.consumer_count),
        ],
    )?;
    Ok(buf)
}

/// Encode `basic.publish` (class 60, method 40), substituting defaults for absent arguments.
pub fn encode_basic_publish(args: &BasicPublishArgs) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 60)?;
    wire::write_short(&mut buf, 40)?;
    wire::write_fields(
        &mut buf,
        &[
            FieldValue::ShortStr(args.exchange.clone().unwrap_or_else(|| String::from("amq.direct"))),
            FieldValue::ShortStr(args.routing_key.clone()),
            FieldValue::Bit(args.mandatory.unwrap_or(false)),
            FieldValue::LongLong(args.sequence),
            FieldValue::LongStr(args.note.clone().unwrap_or_default()),
        ],
    )?;
    Ok(buf)
}

/// Encode a `connection` header frame (class 10) for a body of `body_size` bytes.
pub fn encode_connection_header(body_size: u64, _properties: &ConnectionProperties) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 10)?;
    wire::write_short(&mut buf, 0)?;
    wire::write_longlong(&mut buf, body_size)?;
    wire::write_optional_fields(&mut buf, &[])?;
    Ok(buf)
}

/// Encode a `queue` header frame (class 50) for a body of `body_size` bytes.
pub fn encode_queue_header(body_size: u64, _properties: &QueueProperties) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 50)?;
    wire::write_short(&mut buf, 0)?;
    wire::write_longlong(&mut buf, body_size)?;
    wire::write_optional_fields(&mut buf, &[])?;
    Ok(buf)
}

/// Encode a `basic` header frame (class 60) for a body of `body_size` bytes.
pub fn encode_basic_header(body_size: u64, properties: &BasicProperties) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    wire::write_short(&mut buf, 60)?;
    wire::write_short(&mut buf, 0)?;
    wire::write_longlong(&mut buf, body_size)?;
    wire::write_optional_fields(
        &mut buf,
        &[
            properties.content_type.clone().map(FieldValue::ShortStr),
            properties.delivery_mode.map(FieldValue::Octet),
            properties.timestamp.map(FieldValue::Timestamp),
            properties.headers.clone().map(FieldValue::Table),
        ],
    )?;
    Ok(buf)
}

/// Decode the body of `connection.open`; class and method ids are already consumed.
pub fn decode_connection_open(reader: &mut Reader<'_>) -> Result<ConnectionOpen, WireError> {
    let mut fields = reader.read_fields(&[
        PrimitiveType::ShortStr,
    ])?;
    Ok(ConnectionOpen {
        virtual_host: fields.take()?,
    })
}

/// Decode the body of `connection.open-ok`; class and method ids are already consumed.
pub fn decode_connection_open_ok(reader: &mut Reader<'_>) -> Result<ConnectionOpenOk, WireError> {
    reader.read_fields(&[])?;
    Ok(ConnectionOpenOk {})
}

/// Decode the body of `queue.declare`; class and method ids are already consumed.
pub fn decode_queue_declare(reader: &mut Reader<'_>) -> Result<QueueDeclare, WireError> {
    let mut fields = reader.read_fields(&[
        PrimitiveType::Short,
        PrimitiveType::ShortStr,
        PrimitiveType::Bit,
        PrimitiveType::Bit,
        PrimitiveType::Table,
    ])?;
    Ok(QueueDeclare {
        ticket: fields.take()?,
        queue: fields.take()?,
        passive: fields.take()?,
        durable: fields.take()?,
        arguments: fields.take()?,
    })
}

/// Decode the body of `queue.declare-ok`; class and method ids are already consumed.
pub fn decode_queue_declare_ok(reader: &mut Reader<'_>) -> Result<QueueDeclareOk, WireError> {
    let mut fields = reader.read_fields(&[
        PrimitiveType::ShortStr,
        PrimitiveType::Long,
        PrimitiveType::Long,
    ])?;
    Ok(QueueDeclareOk {
        queue: fields.take()?,
        message_count: fields.take()?,
        consumer_count: fields.take()?,
    })
}

/// Decode the body of `basic.publish`; class and method ids are already consumed.
pub fn decode_basic_publish(reader: &mut Reader<'_>) -> Result<BasicPublish, WireError> {
    let mut fields = reader.read_fields(&[
        PrimitiveType::ShortStr,
        PrimitiveType::ShortStr,
        PrimitiveType::Bit,
        PrimitiveType::LongLong,
        PrimitiveType::LongStr,
    ])?;
    Ok(BasicPublish {
        exchange: fields.take()?,
        routing_key: fields.take()?,
        mandatory: fields.take()?,
        sequence: fields.take()?,
        note: fields.take()?,
    })
}

/// Decode a `connection` header frame; the class id is already consumed.
pub fn decode_connection_header(reader: &mut Reader<'_>) -> Result<ConnectionHeader, WireError> {
    let _weight = reader.read_short()?;
    let body_size = reader.read_longlong()?;
    reader.read_optional_fields(&[])?;
    Ok(ConnectionHeader {
        body_size,
        properties: ConnectionProperties {},
    })
}

/// Decode a `queue` header frame; the class id is already consumed.
pub fn decode_queue_header(reader: &mut Reader<'_>) -> Result<QueueHeader, WireError> {
    let _weight = reader.read_short()?;
    let body_size = reader.read_longlong()?;
    reader.read_optional_fields(&[])?;
    Ok(QueueHeader {
        body_size,
        properties: QueueProperties {},
    })
}

/// Decode a `basic` header frame; the class id is already consumed.
pub fn decode_basic_header(reader: &mut Reader<'_>) -> Result<BasicHeader, WireError> {
    let _weight = reader.read_short()?;
    let body_size = reader.read_longlong()?;
    let mut fields = reader.read_optional_fields(&[
        PrimitiveType::ShortStr,
        PrimitiveType::Octet,
        PrimitiveType::Timestamp,
        PrimitiveType::Table,
    ])?;
    Ok(BasicHeader {
        body_size,
        properties: BasicProperties {
            content_type: fields.take_optional()?,
            delivery_mode: fields.take_optional()?,
            timestamp: fields.take_optional()?,
            headers: fields.take_optional()?,
        },
    })
}

/// Decode a method frame payload, routing on class id then method id.
/// Fails with `UnknownClass` or `UnknownMethod` for ids the schema does not define.
pub fn decode_method(bytes: &[u8]) -> Result<ReceivedMessage, WireError> {
    let mut reader = Reader::new(bytes);
    let class_id = reader.read_short()?;
    let method_id = reader.read_short()?;
    match class_id {
        10 => match method_id {
            40 => Ok(ReceivedMessage::ConnectionOpen(decode_connection_open(&mut reader)?)),
            41 => Ok(ReceivedMessage::ConnectionOpenOk(decode_connection_open_ok(&mut reader)?)),
            _ => Err(WireError::UnknownMethod(class_id, method_id)),
        },
        50 => match method_id {
            10 => Ok(ReceivedMessage::QueueDeclare(decode_queue_declare(&mut reader)?)),
            11 => Ok(ReceivedMessage::QueueDeclareOk(decode_queue_declare_ok(&mut reader)?)),
            _ => Err(WireError::UnknownMethod(class_id, method_id)),
        },
        60 => match method_id {
            40 => Ok(ReceivedMessage::BasicPublish(decode_basic_publish(&mut reader)?)),
            _ => Err(WireError::UnknownMethod(class_id, method_id)),
        },
        _ => Err(WireError::UnknownClass(class_id)),
    }
}

/// Decode a header frame payload, routing on class id.
pub fn decode_header(bytes: &[u8]) -> Result<ReceivedHeader, WireError> {
    let mut reader = Reader::new(bytes);
    let class_id = reader.read_short()?;
    match class_id {
        10 => Ok(ReceivedHeader::Connection(decode_connection_header(&mut reader)?)),
        50 => Ok(ReceivedHeader::Queue(decode_queue_header(&mut reader)?)),
        60 => Ok(ReceivedHeader::Basic(decode_basic_header(&mut reader)?)),
        _ => Err(WireError::UnknownClass(class_id)),
    }
}

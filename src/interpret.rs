//! Interpretation of raw field records as typed values.
//!
//! Integers and booleans are read from varints. The 64-bit varint value is truncated to the
//! requested width as is; zig-zag encoding is not supported.

use crate::decode::MessageValue;
use crate::error::*;
use crate::message::{DecodedMessage, FieldRecord, RawValue};
use crate::scan::scan;
use crate::wire::WireType;
use bytes::Bytes;
use snafu::ResultExt;

/// The kind of value a field is interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind
{
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `u8`
    UInt8,
    /// `u16`
    UInt16,
    /// `uint32`
    UInt32,
    /// `uint64`
    UInt64,
    /// `bool`
    Bool,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// Nested message.
    Message,
}

impl TargetKind
{
    /// The wire type a field must have to be interpreted as this kind.
    pub fn wire_type(self) -> WireType
    {
        match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::UInt8
            | Self::UInt16
            | Self::UInt32
            | Self::UInt64
            | Self::Bool => WireType::Varint,
            Self::Float => WireType::Fixed32,
            Self::Double => WireType::Fixed64,
            Self::String | Self::Bytes | Self::Message => WireType::LengthDelimited,
        }
    }
}

/// Interpreted field value.
#[derive(Debug, PartialEq, Clone)]
pub enum Value
{
    /// `i8` value.
    Int8(i8),
    /// `i16` value.
    Int16(i16),
    /// `int32` value.
    Int32(i32),
    /// `int64` value.
    Int64(i64),
    /// `u8` value.
    UInt8(u8),
    /// `u16` value.
    UInt16(u16),
    /// `uint32` value.
    UInt32(u32),
    /// `uint64` value.
    UInt64(u64),
    /// `bool` value.
    Bool(bool),
    /// `float` value.
    Float(f32),
    /// `double` value.
    Double(f64),
    /// `string` value.
    String(String),
    /// `bytes` value.
    Bytes(Bytes),

    /// Nested message without a schema.
    Message(Box<DecodedMessage>),

    /// Nested message decoded with a schema.
    Object(Box<MessageValue>),
}

/// Types that can be read from a single field.
pub trait FromField: Sized
{
    /// Kind the field is interpreted as.
    const KIND: TargetKind;

    /// Converts the record.
    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>;
}

impl FieldRecord
{
    /// Interprets the field as a host type.
    pub fn decode<T: FromField>(&self) -> Result<T, DecodeError>
    {
        T::from_field(self)
    }

    /// Interprets the field as the given kind.
    pub fn interpret(&self, kind: TargetKind) -> Result<Value, DecodeError>
    {
        Ok(match kind {
            TargetKind::Int8 => Value::Int8(self.decode()?),
            TargetKind::Int16 => Value::Int16(self.decode()?),
            TargetKind::Int32 => Value::Int32(self.decode()?),
            TargetKind::Int64 => Value::Int64(self.decode()?),
            TargetKind::UInt8 => Value::UInt8(self.decode()?),
            TargetKind::UInt16 => Value::UInt16(self.decode()?),
            TargetKind::UInt32 => Value::UInt32(self.decode()?),
            TargetKind::UInt64 => Value::UInt64(self.decode()?),
            TargetKind::Bool => Value::Bool(self.decode()?),
            TargetKind::Float => Value::Float(self.decode()?),
            TargetKind::Double => Value::Double(self.decode()?),
            TargetKind::String => Value::String(self.decode()?),
            TargetKind::Bytes => Value::Bytes(self.decode()?),
            TargetKind::Message => Value::Message(Box::new(self.decode()?)),
        })
    }

    /// Scans the payload of a length-delimited field as a nested message.
    ///
    /// The nested message inherits the options of the containing message and is one level
    /// deeper.
    pub fn nested(&self) -> Result<DecodedMessage, DecodeError>
    {
        let payload = self.payload(TargetKind::Message)?;
        let scope = self.scope.nested()?;
        scan(payload, scope)
    }

    fn varint(&self, kind: TargetKind) -> Result<u64, DecodeError>
    {
        match &self.value {
            RawValue::Varint(v) => Ok(*v),
            other => self.mismatch(kind, other),
        }
    }

    fn payload(&self, kind: TargetKind) -> Result<&Bytes, DecodeError>
    {
        match &self.value {
            RawValue::LengthDelimited(b) => Ok(b),
            other => self.mismatch(kind, other),
        }
    }

    fn mismatch<T>(&self, kind: TargetKind, actual: &RawValue) -> Result<T, DecodeError>
    {
        TypeMismatch {
            number: self.number,
            expected: kind.wire_type(),
            actual: actual.wire_type(),
        }
        .fail()
    }
}

// Varint values are truncated to the target width. Negative int32 values are encoded as 10 byte
// varints so the truncation restores them.
macro_rules! varint_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FromField for $ty
            {
                const KIND: TargetKind = TargetKind::$kind;

                fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
                {
                    record.varint(Self::KIND).map(|v| v as $ty)
                }
            }
        )*
    };
}

varint_field! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

impl FromField for bool
{
    const KIND: TargetKind = TargetKind::Bool;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        record.varint(Self::KIND).map(|v| v != 0)
    }
}

impl FromField for f32
{
    const KIND: TargetKind = TargetKind::Float;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        match &record.value {
            RawValue::Fixed32(b) => Ok(f32::from_le_bytes(*b)),
            other => record.mismatch(Self::KIND, other),
        }
    }
}

impl FromField for f64
{
    const KIND: TargetKind = TargetKind::Double;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        match &record.value {
            RawValue::Fixed64(b) => Ok(f64::from_le_bytes(*b)),
            other => record.mismatch(Self::KIND, other),
        }
    }
}

impl FromField for String
{
    const KIND: TargetKind = TargetKind::String;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        let payload = record.payload(Self::KIND)?;
        std::str::from_utf8(payload)
            .map(str::to_owned)
            .context(InvalidUtf8 {
                number: record.number,
            })
    }
}

impl FromField for Bytes
{
    const KIND: TargetKind = TargetKind::Bytes;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        record.payload(Self::KIND).map(Bytes::clone)
    }
}

impl FromField for Vec<u8>
{
    const KIND: TargetKind = TargetKind::Bytes;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        record.payload(Self::KIND).map(|b| b.to_vec())
    }
}

impl FromField for DecodedMessage
{
    const KIND: TargetKind = TargetKind::Message;

    fn from_field(record: &FieldRecord) -> Result<Self, DecodeError>
    {
        record.nested()
    }
}

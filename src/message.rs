//! Scanned messages and their field records.

use crate::container::{KeyedContainer, UnkeyedContainer};
use crate::error::*;
use crate::options::{DecodeOptions, RepeatedFields};
use crate::wire::WireType;
use bytes::Bytes;
use snafu::ensure;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Raw field value as it was read from the wire.
#[derive(Debug, PartialEq, Clone)]
pub enum RawValue
{
    /// Reconstructed varint value.
    Varint(u64),

    /// The 8 bytes of a 64-bit value, in wire (little-endian) order.
    Fixed64([u8; 8]),

    /// The payload of a length-delimited value.
    LengthDelimited(Bytes),

    /// The 4 bytes of a 32-bit value, in wire (little-endian) order.
    Fixed32([u8; 4]),
}

impl RawValue
{
    /// Wire type the value was encoded with.
    pub fn wire_type(&self) -> WireType
    {
        match self {
            RawValue::Varint(..) => WireType::Varint,
            RawValue::Fixed64(..) => WireType::Fixed64,
            RawValue::LengthDelimited(..) => WireType::LengthDelimited,
            RawValue::Fixed32(..) => WireType::Fixed32,
        }
    }

    /// The value as a byte sequence.
    ///
    /// Varints are returned as their 64-bit value in little-endian order.
    pub fn to_bytes(&self) -> Bytes
    {
        match self {
            RawValue::Varint(v) => Bytes::copy_from_slice(&v.to_le_bytes()),
            RawValue::Fixed64(b) => Bytes::copy_from_slice(b),
            RawValue::LengthDelimited(b) => b.clone(),
            RawValue::Fixed32(b) => Bytes::copy_from_slice(b),
        }
    }
}

/// Options and nesting depth of a scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scope
{
    pub(crate) options: DecodeOptions,
    pub(crate) depth: usize,
}

impl Scope
{
    pub(crate) fn top(options: DecodeOptions) -> Self
    {
        Scope { options, depth: 0 }
    }

    pub(crate) fn nested(self) -> Result<Self, DecodeError>
    {
        let depth = self.depth + 1;
        ensure!(
            depth <= self.options.max_depth,
            DepthLimitExceeded {
                limit: self.options.max_depth
            }
        );

        Ok(Scope {
            options: self.options,
            depth,
        })
    }
}

/// A single field read from the payload.
#[derive(Debug, PartialEq, Clone)]
pub struct FieldRecord
{
    /// Field number.
    pub number: u64,

    /// Offset of the field tag within the scanned buffer.
    pub offset: usize,

    /// Raw value.
    pub value: RawValue,

    pub(crate) scope: Scope,
}

impl FieldRecord
{
    /// Wire type of the field.
    pub fn wire_type(&self) -> WireType
    {
        self.value.wire_type()
    }

    /// Nesting depth of the message containing this field.
    pub fn depth(&self) -> usize
    {
        self.scope.depth
    }
}

/// Fields of a single scanned buffer.
///
/// Fields are kept in the order they were encountered. With [`RepeatedFields::LastWins`] a field
/// number maps to exactly one record. With [`RepeatedFields::Accumulate`] every occurrence is
/// retained.
#[derive(Debug, PartialEq, Clone)]
pub struct DecodedMessage
{
    records: Vec<FieldRecord>,
    index: HashMap<u64, Vec<usize>>,
    scope: Scope,
}

impl DecodedMessage
{
    pub(crate) fn new(scope: Scope) -> Self
    {
        DecodedMessage {
            records: vec![],
            index: HashMap::new(),
            scope,
        }
    }

    pub(crate) fn insert(&mut self, record: FieldRecord)
    {
        match self.index.entry(record.number) {
            Entry::Vacant(vacant) => {
                vacant.insert(vec![self.records.len()]);
                self.records.push(record);
            }
            Entry::Occupied(mut occupied) => match self.scope.options.repeated {
                RepeatedFields::LastWins => {
                    let position = occupied.get()[0];
                    self.records[position] = record;
                }
                RepeatedFields::Accumulate => {
                    occupied.get_mut().push(self.records.len());
                    self.records.push(record);
                }
            },
        }
    }

    /// Gets the last occurrence of a field.
    pub fn get(&self, number: u64) -> Option<&FieldRecord>
    {
        self.index
            .get(&number)
            .and_then(|positions| positions.last())
            .map(|position| &self.records[*position])
    }

    /// Iterates all retained occurrences of a field in scan order.
    pub fn get_all(&self, number: u64) -> impl Iterator<Item = &FieldRecord>
    {
        self.index
            .get(&number)
            .into_iter()
            .flatten()
            .map(move |position| &self.records[*position])
    }

    /// True, if the message contains the field.
    pub fn contains(&self, number: u64) -> bool
    {
        self.index.contains_key(&number)
    }

    /// Iterates all retained records in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRecord>
    {
        self.records.iter()
    }

    /// Distinct field numbers in the order of their first occurrence.
    pub fn field_numbers(&self) -> impl Iterator<Item = u64> + '_
    {
        self.records
            .iter()
            .enumerate()
            .filter(move |(position, record)| {
                self.index
                    .get(&record.number)
                    .map_or(false, |positions| positions[0] == *position)
            })
            .map(|(_, record)| record.number)
    }

    /// Number of retained records.
    pub fn len(&self) -> usize
    {
        self.records.len()
    }

    /// True, if the message has no fields.
    pub fn is_empty(&self) -> bool
    {
        self.records.is_empty()
    }

    /// Nesting depth of the message. The top level message is at depth 0.
    pub fn depth(&self) -> usize
    {
        self.scope.depth
    }

    /// Options the message was decoded with.
    pub fn options(&self) -> DecodeOptions
    {
        self.scope.options
    }

    /// Access fields by field number.
    pub fn keyed(&self) -> KeyedContainer<'_>
    {
        KeyedContainer::new(self)
    }

    /// Access fields sequentially in scan order.
    pub fn unkeyed(&self) -> UnkeyedContainer<'_>
    {
        UnkeyedContainer::new(self)
    }

    pub(crate) fn records(&self) -> &[FieldRecord]
    {
        &self.records
    }
}

//! Wire scanner splitting a buffer into field records.
//!
//! The scanner has no knowledge of target types. It retains every field it encounters and leaves
//! the interpretation of the raw values to [`FieldRecord`](crate::message::FieldRecord).

use crate::error::*;
use crate::message::{DecodedMessage, FieldRecord, RawValue, Scope};
use crate::options::{DecodeOptions, Framing};
use crate::wire::{read_fixed, read_varint, WireType};
use bytes::Bytes;
use std::convert::TryFrom;
use tracing::{debug, trace};

/// Decodes a payload with the default options.
///
/// ```
/// let msg = protowire::decode_message(b"\x0a\x06Moritz\x10\x17").unwrap();
/// let fields = msg.keyed();
/// assert_eq!(fields.decode::<String>(1).unwrap(), "Moritz");
/// assert_eq!(fields.decode::<i32>(2).unwrap(), 23);
/// ```
pub fn decode_message(data: &[u8]) -> Result<DecodedMessage, DecodeError>
{
    decode_message_with(data, DecodeOptions::default())
}

/// Decodes a payload with specific options.
pub fn decode_message_with(
    data: &[u8],
    options: DecodeOptions,
) -> Result<DecodedMessage, DecodeError>
{
    decode_bytes(Bytes::copy_from_slice(data), options)
}

/// Decodes a payload that is already held in `Bytes`.
///
/// The length-delimited values of the resulting message share the buffer with `data`.
pub fn decode_bytes(data: Bytes, options: DecodeOptions) -> Result<DecodedMessage, DecodeError>
{
    scan(&data, Scope::top(options))
}

pub(crate) fn scan(data: &Bytes, scope: Scope) -> Result<DecodedMessage, DecodeError>
{
    scan_fields(data, scope).map_err(|e| {
        debug!(error = %e, depth = scope.depth, len = data.len(), "Failed to scan message");
        e
    })
}

fn scan_fields(data: &Bytes, scope: Scope) -> Result<DecodedMessage, DecodeError>
{
    let framing = scope.options.framing;
    let buf: &[u8] = data;
    let mut msg = DecodedMessage::new(scope);
    let mut pos = 0;

    while pos < buf.len() {
        let offset = pos;
        let (number, bits) = read_tag(buf, &mut pos, framing)?;

        let value = match WireType::from_bits(bits) {
            Some(WireType::Varint) => RawValue::Varint(read_varint(buf, &mut pos, offset)?),
            Some(WireType::Fixed64) => RawValue::Fixed64(read_fixed(buf, &mut pos, offset)?),
            Some(WireType::Fixed32) => RawValue::Fixed32(read_fixed(buf, &mut pos, offset)?),
            Some(WireType::LengthDelimited) => {
                let length = read_length(buf, &mut pos, offset, framing)?;
                let end = match pos.checked_add(length) {
                    Some(end) if end <= buf.len() => end,
                    _ => return Truncated { offset }.fail(),
                };
                let payload = data.slice(pos..end);
                pos = end;
                RawValue::LengthDelimited(payload)
            }
            Some(WireType::StartGroup) | Some(WireType::EndGroup) => {
                return UnsupportedWireType {
                    wire_type: bits,
                    offset,
                }
                .fail()
            }
            None => {
                return UnknownWireType {
                    wire_type: bits,
                    offset,
                }
                .fail()
            }
        };

        trace!(
            number,
            wire_type = %value.wire_type(),
            offset,
            size = pos - offset,
            depth = scope.depth,
            "Scanned field"
        );

        msg.insert(FieldRecord {
            number,
            offset,
            value,
            scope,
        });
    }

    Ok(msg)
}

/// Reads the field number and the wire type bits.
fn read_tag(data: &[u8], pos: &mut usize, framing: Framing) -> Result<(u64, u8), DecodeError>
{
    let offset = *pos;
    let tag = match framing {
        Framing::Compact => match data.get(offset) {
            Some(b) => {
                *pos += 1;
                u64::from(*b)
            }
            None => return Truncated { offset }.fail(),
        },
        Framing::Standard => read_varint(data, pos, offset)?,
    };

    Ok((tag >> 3, (tag & 0x07) as u8))
}

fn read_length(
    data: &[u8],
    pos: &mut usize,
    tag_offset: usize,
    framing: Framing,
) -> Result<usize, DecodeError>
{
    match framing {
        Framing::Compact => match data.get(*pos) {
            Some(b) => {
                *pos += 1;
                Ok(usize::from(*b))
            }
            None => Truncated { offset: tag_offset }.fail(),
        },
        Framing::Standard => {
            let length = read_varint(data, pos, tag_offset)?;
            match usize::try_from(length) {
                Ok(length) => Ok(length),
                Err(_) => LengthOverflow {
                    length,
                    offset: tag_offset,
                }
                .fail(),
            }
        }
    }
}

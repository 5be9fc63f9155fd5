//! Wire level primitives: wire types, varints and fixed width values.

use crate::error::*;
use std::convert::TryInto;
use std::fmt;

/// Longest varint that still fits 64 bits.
pub const MAX_VARINT_LEN: usize = 10;

/// The 3-bit code in a tag that describes how the field value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType
{
    /// Variable length integer (wire type 0).
    Varint,

    /// 64-bit fixed width value (wire type 1).
    Fixed64,

    /// Length prefixed byte string (wire type 2).
    LengthDelimited,

    /// Group start (wire type 3). Deprecated, never produced by the scanner.
    StartGroup,

    /// Group end (wire type 4). Deprecated, never produced by the scanner.
    EndGroup,

    /// 32-bit fixed width value (wire type 5).
    Fixed32,
}

impl WireType
{
    /// Resolves the low 3 bits of a tag.
    pub fn from_bits(bits: u8) -> Option<Self>
    {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    /// The raw 3-bit code.
    pub fn bits(self) -> u8
    {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::StartGroup => 3,
            WireType::EndGroup => 4,
            WireType::Fixed32 => 5,
        }
    }
}

impl fmt::Display for WireType
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        let name = match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        };
        write!(f, "{} ({})", name, self.bits())
    }
}

/// Reads a varint starting at `*pos`, advancing `*pos` past it.
///
/// `tag_offset` is reported in `Truncated` errors so the failure points at the field rather than
/// the middle of its value.
pub(crate) fn read_varint(
    data: &[u8],
    pos: &mut usize,
    tag_offset: usize,
) -> Result<u64, DecodeError>
{
    let start = *pos;
    let mut result = 0u64;
    let mut idx = 0;
    loop {
        if idx >= MAX_VARINT_LEN {
            return MalformedVarint { offset: start }.fail();
        }

        let b = match data.get(start + idx) {
            Some(b) => *b,
            None => return Truncated { offset: tag_offset }.fail(),
        };

        // The last byte only has room for bit 63.
        if idx == MAX_VARINT_LEN - 1 && b > 1 {
            return MalformedVarint { offset: start }.fail();
        }
        result |= u64::from(b & 0x7f) << (idx * 7);

        idx += 1;
        if b & 0x80 == 0 {
            break;
        }
    }

    *pos = start + idx;
    Ok(result)
}

/// Takes `N` bytes starting at `*pos`.
pub(crate) fn read_fixed<const N: usize>(
    data: &[u8],
    pos: &mut usize,
    tag_offset: usize,
) -> Result<[u8; N], DecodeError>
{
    let end = match pos.checked_add(N) {
        Some(end) if end <= data.len() => end,
        _ => return Truncated { offset: tag_offset }.fail(),
    };

    match data[*pos..end].try_into() {
        Ok(v) => {
            *pos = end;
            Ok(v)
        }
        Err(_) => Truncated { offset: tag_offset }.fail(),
    }
}

#[cfg(test)]
mod test
{
    use super::*;

    #[test]
    fn single_byte_varints()
    {
        for v in 0u8..=127 {
            let mut pos = 0;
            assert_eq!(read_varint(&[v], &mut pos, 0), Ok(u64::from(v)));
            assert_eq!(pos, 1);
        }
    }

    #[test]
    fn multi_byte_varint()
    {
        let mut pos = 0;
        assert_eq!(read_varint(b"\xac\x02\xff", &mut pos, 0), Ok(300));
        assert_eq!(pos, 2);
    }

    #[test]
    fn max_varint()
    {
        let mut pos = 0;
        let data = b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\x01";
        assert_eq!(read_varint(data, &mut pos, 0), Ok(u64::MAX));
        assert_eq!(pos, 10);
    }

    #[test]
    fn unterminated_varint()
    {
        let mut pos = 1;
        assert_eq!(
            read_varint(b"\x08\x80\x80", &mut pos, 0),
            Err(DecodeError::Truncated { offset: 0 })
        );
        assert_eq!(pos, 1);
    }

    #[test]
    fn overlong_varint()
    {
        let mut pos = 0;
        assert_eq!(
            read_varint(&[0x80; 11], &mut pos, 0),
            Err(DecodeError::MalformedVarint { offset: 0 })
        );
    }

    #[test]
    fn varint_beyond_64_bits()
    {
        let mut pos = 1;
        assert_eq!(
            read_varint(b"\x08\x80\x80\x80\x80\x80\x80\x80\x80\x80\x02", &mut pos, 0),
            Err(DecodeError::MalformedVarint { offset: 1 })
        );
        assert_eq!(pos, 1);

        let mut pos = 0;
        assert_eq!(
            read_varint(b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\x7f", &mut pos, 0),
            Err(DecodeError::MalformedVarint { offset: 0 })
        );
    }

    #[test]
    fn fixed()
    {
        let mut pos = 1;
        let data = b"\x0d\x01\x02\x03\x04\x05";
        assert_eq!(read_fixed::<4>(data, &mut pos, 0), Ok([1, 2, 3, 4]));
        assert_eq!(pos, 5);
        assert_eq!(
            read_fixed::<4>(data, &mut pos, 0),
            Err(DecodeError::Truncated { offset: 0 })
        );
        assert_eq!(pos, 5);
    }

    #[test]
    fn wire_type_bits()
    {
        for bits in 0..8 {
            match WireType::from_bits(bits) {
                Some(wt) => assert_eq!(wt.bits(), bits),
                None => assert!(bits > 5),
            }
        }
    }
}

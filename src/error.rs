//! Decoding errors.

use crate::wire::WireType;
use snafu::Snafu;

/// Error decoding a protocol buffer payload.
///
/// Every error is terminal for the operation that produced it. A failed scan never yields a
/// partially populated message.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum DecodeError
{
    /// The buffer ended before a tag, varint, fixed width value or length-delimited payload was
    /// complete.
    #[snafu(display("Payload truncated at offset {}", offset))]
    Truncated
    {
        /// Offset of the tag of the incomplete field.
        offset: usize,
    },

    /// Group wire types (3 and 4) are deprecated and not supported.
    #[snafu(display("Unsupported wire type {} at offset {}", wire_type, offset))]
    UnsupportedWireType
    {
        /// The raw wire type bits.
        wire_type: u8,
        /// Offset of the tag.
        offset: usize,
    },

    /// A wire type outside of the recognized codes.
    #[snafu(display("Unknown wire type {} at offset {}", wire_type, offset))]
    UnknownWireType
    {
        /// The raw wire type bits.
        wire_type: u8,
        /// Offset of the tag.
        offset: usize,
    },

    /// A varint did not terminate within 10 bytes or does not fit 64 bits.
    #[snafu(display("Malformed varint at offset {}", offset))]
    MalformedVarint
    {
        /// Offset of the first byte of the varint.
        offset: usize,
    },

    /// A declared length does not fit the address space.
    #[snafu(display("Length {} at offset {} is too large", length, offset))]
    LengthOverflow
    {
        /// The declared length.
        length: u64,
        /// Offset of the tag.
        offset: usize,
    },

    /// The requested interpretation does not match the wire type of the field.
    #[snafu(display(
        "Field {} has wire type {}, expected {}",
        number,
        actual,
        expected
    ))]
    TypeMismatch
    {
        /// Field number.
        number: u64,
        /// Wire type the requested interpretation needs.
        expected: WireType,
        /// Wire type present in the payload.
        actual: WireType,
    },

    /// A string field contained invalid UTF-8.
    #[snafu(display("Field {} is not valid UTF-8: {}", number, source))]
    InvalidUtf8
    {
        /// Field number.
        number: u64,
        /// Source error.
        source: std::str::Utf8Error,
    },

    /// Nested messages went deeper than the configured ceiling.
    #[snafu(display("Nested message depth exceeds the limit of {}", limit))]
    DepthLimitExceeded
    {
        /// The configured limit.
        limit: usize,
    },

    /// A required field was not present in the message.
    #[snafu(display("Field {} is missing", number))]
    MissingField
    {
        /// Field number.
        number: u64,
    },
}

//! Keyed and sequential access to message fields for host type decoding.
//!
//! Host types implement [`FromMessage`] and pull their fields through a [`KeyedContainer`] when
//! the field numbers are known or through an [`UnkeyedContainer`] when the fields are consumed in
//! scan order.
//!
//! ```
//! use protowire::{DecodeError, DecodedMessage, FromMessage, ProtoDecoder};
//!
//! struct Greeting
//! {
//!     name: String,
//!     age: i32,
//!     nickname: Option<String>,
//! }
//!
//! impl FromMessage for Greeting
//! {
//!     fn from_message(msg: &DecodedMessage) -> Result<Self, DecodeError>
//!     {
//!         let fields = msg.keyed();
//!         Ok(Greeting {
//!             name: fields.decode(1)?,
//!             age: fields.decode(2)?,
//!             nickname: fields.decode_if_present(3)?,
//!         })
//!     }
//! }
//!
//! let greeting: Greeting = ProtoDecoder::new().decode(b"\x0a\x06Moritz\x10\x17").unwrap();
//! assert_eq!(greeting.name, "Moritz");
//! assert_eq!(greeting.age, 23);
//! assert_eq!(greeting.nickname, None);
//! ```

use crate::error::*;
use crate::interpret::FromField;
use crate::message::{DecodedMessage, FieldRecord};
use crate::options::DecodeOptions;
use crate::scan::decode_message_with;
use crate::wire::WireType;

/// Types that can be built from a decoded message.
pub trait FromMessage: Sized
{
    /// Builds the value from the message fields.
    fn from_message(msg: &DecodedMessage) -> Result<Self, DecodeError>;
}

/// Top level decoder for host types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtoDecoder
{
    options: DecodeOptions,
}

impl ProtoDecoder
{
    /// Creates a decoder with default options.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Creates a decoder with specific options.
    pub fn with_options(options: DecodeOptions) -> Self
    {
        ProtoDecoder { options }
    }

    /// Options used by this decoder.
    pub fn options(&self) -> DecodeOptions
    {
        self.options
    }

    /// Decodes a payload into a host type.
    pub fn decode<T: FromMessage>(&self, data: &[u8]) -> Result<T, DecodeError>
    {
        let msg = decode_message_with(data, self.options)?;
        T::from_message(&msg)
    }
}

/// Access to message fields by field number.
#[derive(Debug, Clone, Copy)]
pub struct KeyedContainer<'a>
{
    msg: &'a DecodedMessage,
}

impl<'a> KeyedContainer<'a>
{
    pub(crate) fn new(msg: &'a DecodedMessage) -> Self
    {
        KeyedContainer { msg }
    }

    /// True, if the field is present.
    pub fn contains(&self, number: u64) -> bool
    {
        self.msg.contains(number)
    }

    /// Field numbers present in the message, in order of first occurrence.
    pub fn keys(&self) -> Vec<u64>
    {
        self.msg.field_numbers().collect()
    }

    /// Decodes a field that must be present.
    pub fn decode<T: FromField>(&self, number: u64) -> Result<T, DecodeError>
    {
        match self.msg.get(number) {
            Some(record) => record.decode(),
            None => MissingField { number }.fail(),
        }
    }

    /// Decodes a field if it is present.
    pub fn decode_if_present<T: FromField>(&self, number: u64) -> Result<Option<T>, DecodeError>
    {
        self.msg.get(number).map(FieldRecord::decode).transpose()
    }

    /// Decodes every retained occurrence of a field.
    ///
    /// Only returns more than one value if the message was decoded with
    /// [`RepeatedFields::Accumulate`](crate::RepeatedFields::Accumulate).
    pub fn decode_all<T: FromField>(&self, number: u64) -> Result<Vec<T>, DecodeError>
    {
        self.msg.get_all(number).map(FieldRecord::decode).collect()
    }

    /// Decodes a nested message field into a host type.
    pub fn decode_message<T: FromMessage>(&self, number: u64) -> Result<T, DecodeError>
    {
        let nested: DecodedMessage = self.decode(number)?;
        T::from_message(&nested)
    }

    /// Decodes a nested message field into a host type if it is present.
    pub fn decode_message_if_present<T: FromMessage>(
        &self,
        number: u64,
    ) -> Result<Option<T>, DecodeError>
    {
        match self.decode_if_present::<DecodedMessage>(number)? {
            Some(nested) => T::from_message(&nested).map(Some),
            None => Ok(None),
        }
    }
}

/// Access to message fields in scan order.
#[derive(Debug, Clone)]
pub struct UnkeyedContainer<'a>
{
    records: &'a [FieldRecord],
    current: usize,
}

impl<'a> UnkeyedContainer<'a>
{
    pub(crate) fn new(msg: &'a DecodedMessage) -> Self
    {
        UnkeyedContainer {
            records: msg.records(),
            current: 0,
        }
    }

    /// Total number of fields.
    pub fn count(&self) -> usize
    {
        self.records.len()
    }

    /// Index of the next field.
    pub fn current_index(&self) -> usize
    {
        self.current
    }

    /// True, if all fields have been consumed.
    pub fn is_at_end(&self) -> bool
    {
        self.current >= self.records.len()
    }

    /// Field number and wire type of the next field without consuming it.
    pub fn peek(&self) -> Option<(u64, WireType)>
    {
        self.records
            .get(self.current)
            .map(|r| (r.number, r.wire_type()))
    }

    /// Consumes the next field without decoding it.
    pub fn next_record(&mut self) -> Option<&'a FieldRecord>
    {
        let record = self.records.get(self.current)?;
        self.current += 1;
        Some(record)
    }

    /// Decodes the next field.
    ///
    /// The field is only consumed if decoding succeeds. Returns `None` at the end.
    pub fn decode_next<T: FromField>(&mut self) -> Option<Result<T, DecodeError>>
    {
        let record = self.records.get(self.current)?;
        let result = record.decode();
        if result.is_ok() {
            self.current += 1;
        }
        Some(result)
    }

    /// Skips the next field.
    pub fn skip(&mut self) -> bool
    {
        self.next_record().is_some()
    }
}

#[cfg(test)]
mod test
{
    use super::*;
    use crate::options::RepeatedFields;
    use crate::scan::decode_message;

    #[derive(Debug, PartialEq)]
    struct Inner
    {
        value: u32,
    }

    impl FromMessage for Inner
    {
        fn from_message(msg: &DecodedMessage) -> Result<Self, DecodeError>
        {
            Ok(Inner {
                value: msg.keyed().decode(1)?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct Outer
    {
        name: String,
        inner: Inner,
        missing: Option<Inner>,
    }

    impl FromMessage for Outer
    {
        fn from_message(msg: &DecodedMessage) -> Result<Self, DecodeError>
        {
            let fields = msg.keyed();
            Ok(Outer {
                name: fields.decode(1)?,
                inner: fields.decode_message(2)?,
                missing: fields.decode_message_if_present(3)?,
            })
        }
    }

    #[test]
    fn keyed()
    {
        let msg = decode_message(b"\x0a\x06Moritz\x10\x17").unwrap();
        let fields = msg.keyed();
        assert!(fields.contains(1));
        assert!(!fields.contains(3));
        assert_eq!(fields.keys(), vec![1, 2]);
        assert_eq!(fields.decode::<String>(1), Ok("Moritz".to_string()));
        assert_eq!(fields.decode::<u16>(2), Ok(23));
        assert_eq!(fields.decode_if_present::<u16>(3), Ok(None));
        assert_eq!(
            fields.decode::<u16>(3),
            Err(DecodeError::MissingField { number: 3 })
        );
    }

    #[test]
    fn nested_host_types()
    {
        let outer: Outer = ProtoDecoder::new()
            .decode(b"\x0a\x03abc\x12\x02\x08\x07")
            .unwrap();
        assert_eq!(
            outer,
            Outer {
                name: "abc".to_string(),
                inner: Inner { value: 7 },
                missing: None,
            }
        );
    }

    #[test]
    fn nested_host_type_errors()
    {
        let result: Result<Outer, _> = ProtoDecoder::new().decode(b"\x0a\x03abc\x12\x02\x0a\x00");
        assert_eq!(
            result,
            Err(DecodeError::TypeMismatch {
                number: 1,
                expected: WireType::Varint,
                actual: WireType::LengthDelimited,
            })
        );
    }

    #[test]
    fn decode_all()
    {
        let payload = b"\x08\x01\x10\x02\x08\x03";
        let msg = decode_message(payload).unwrap();
        assert_eq!(msg.keyed().decode_all::<u32>(1), Ok(vec![3]));

        let options = DecodeOptions::default().with_repeated(RepeatedFields::Accumulate);
        let msg = decode_message_with(payload, options).unwrap();
        assert_eq!(msg.keyed().decode_all::<u32>(1), Ok(vec![1, 3]));
        assert_eq!(msg.keyed().decode::<u32>(1), Ok(3));
        assert_eq!(msg.keyed().decode_all::<u32>(5), Ok(vec![]));
    }

    #[test]
    fn unkeyed()
    {
        let msg = decode_message(b"\x0a\x06Moritz\x10\x17").unwrap();
        let mut fields = msg.unkeyed();

        assert_eq!(fields.count(), 2);
        assert_eq!(fields.peek(), Some((1, WireType::LengthDelimited)));

        // A failed decode leaves the field in place.
        assert!(matches!(
            fields.decode_next::<u32>(),
            Some(Err(DecodeError::TypeMismatch { .. }))
        ));
        assert_eq!(fields.current_index(), 0);

        assert_eq!(fields.decode_next::<String>(), Some(Ok("Moritz".to_string())));
        assert_eq!(fields.current_index(), 1);
        assert_eq!(fields.peek(), Some((2, WireType::Varint)));
        assert!(fields.skip());
        assert!(fields.is_at_end());
        assert_eq!(fields.peek(), None);
        assert_eq!(fields.decode_next::<u32>(), None);
        assert!(!fields.skip());
    }
}

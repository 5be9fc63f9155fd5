//!
//! Protowire is a reader for protocol buffer wire format payloads that does not need a compiled
//! `.proto` schema. A payload is scanned once into field records which are then interpreted on
//! demand, either by field number, in scan order or through an explicit schema.
//!
//! ```
//! use protowire::{decode_message, SchemaSet, Value, WireType};
//!
//! let msg = decode_message(b"\x0a\x06Moritz\x10\x17").unwrap();
//!
//! // Keyed access.
//! let fields = msg.keyed();
//! assert_eq!(fields.decode::<String>(1).unwrap(), "Moritz");
//! assert_eq!(fields.decode::<u32>(2).unwrap(), 23);
//!
//! // Ordered access.
//! let mut fields = msg.unkeyed();
//! assert_eq!(fields.peek(), Some((1, WireType::LengthDelimited)));
//! assert!(fields.skip());
//! assert_eq!(fields.peek(), Some((2, WireType::Varint)));
//!
//! // Schema access.
//! let schemas = SchemaSet::parse(&[r#"
//!   message Person { string name = 1; int32 age = 2; }
//! "#]).unwrap();
//! let person = schemas.get_message("Person").unwrap();
//! let value = person.decode_fields(&msg, &schemas).unwrap();
//! assert_eq!(value.get("age"), Some(&Value::Int32(23)));
//! ```
//!
//! By default tags and lengths are read as single bytes, which limits field numbers to 31 and
//! length-delimited values to 255 bytes. [`DecodeOptions::standard`] switches to the varint
//! framing used by regular protobuf encoders.
#![warn(missing_docs)]

pub mod container;
pub mod decode;
pub mod error;
pub mod interpret;
pub mod message;
pub mod options;
pub mod scan;
pub mod schema;
pub mod wire;

pub use container::{FromMessage, KeyedContainer, ProtoDecoder, UnkeyedContainer};
pub use decode::{MessageValue, PropertyValue};
pub use error::DecodeError;
pub use interpret::{FromField, TargetKind, Value};
pub use message::{DecodedMessage, FieldRecord, RawValue};
pub use options::{DecodeOptions, Framing, RepeatedFields};
pub use scan::{decode_bytes, decode_message, decode_message_with};
pub use schema::{FieldType, MessageSchema, SchemaError, SchemaField, SchemaRef, SchemaSet};
pub use wire::WireType;

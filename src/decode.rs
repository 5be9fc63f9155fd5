//! Schema driven decoding.
//!
//! Decoding with a schema turns every field known to the schema into a named property. Fields
//! that the schema does not describe are skipped.
//!
//! ```
//! use protowire::{SchemaSet, Value};
//!
//! let schemas = SchemaSet::parse(&[r#"
//!   syntax = "proto3";
//!   message Request { string name = 1; int32 age = 2; }
//! "#]).unwrap();
//!
//! let request = schemas.get_message("Request").unwrap();
//! let value = request.decode(b"\x0a\x06Moritz\x10\x17", &schemas).unwrap();
//! assert_eq!(value.get("name"), Some(&Value::String("Moritz".to_string())));
//! assert_eq!(value.get("age"), Some(&Value::Int32(23)));
//! ```

use crate::error::DecodeError;
use crate::interpret::Value;
use crate::message::DecodedMessage;
use crate::options::DecodeOptions;
use crate::scan::decode_message_with;
use crate::schema::*;
use tracing::trace;

/// Message value decoded with a schema.
#[derive(Debug, PartialEq, Clone)]
pub struct MessageValue
{
    /// Reference to the message schema.
    pub schema: SchemaRef,

    /// Properties in scan order.
    pub fields: Vec<PropertyValue>,
}

/// A single named property.
#[derive(Debug, PartialEq, Clone)]
pub struct PropertyValue
{
    /// Field number.
    pub number: u64,

    /// Property name from the schema.
    pub name: String,

    /// Property value.
    pub value: Value,
}

impl MessageValue
{
    /// Gets the last value of a property.
    pub fn get(&self, name: &str) -> Option<&Value>
    {
        self.fields
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Iterates all values of a property in scan order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a
    {
        self.fields
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| &p.value)
    }
}

impl SchemaRef
{
    /// Decode a message.
    ///
    /// Will **panic** if the message defined by the `SchemaRef` does not exist in this set.
    pub fn decode(self, data: &[u8], schemas: &SchemaSet) -> Result<MessageValue, DecodeError>
    {
        schemas.resolve_message(self).decode(data, schemas)
    }
}

impl MessageSchema
{
    /// Decode a message with the default options.
    pub fn decode(&self, data: &[u8], schemas: &SchemaSet) -> Result<MessageValue, DecodeError>
    {
        self.decode_with(data, schemas, DecodeOptions::default())
    }

    /// Decode a message with specific options.
    pub fn decode_with(
        &self,
        data: &[u8],
        schemas: &SchemaSet,
        options: DecodeOptions,
    ) -> Result<MessageValue, DecodeError>
    {
        let msg = decode_message_with(data, options)?;
        self.decode_fields(&msg, schemas)
    }

    /// Interpret the fields of an already scanned message.
    ///
    /// Nested messages referring to other schemas are resolved through `schemas` and will
    /// **panic** if the reference does not exist in the set.
    pub fn decode_fields(
        &self,
        msg: &DecodedMessage,
        schemas: &SchemaSet,
    ) -> Result<MessageValue, DecodeError>
    {
        let mut fields = vec![];
        for record in msg.iter() {
            let field = match self.get_field(record.number) {
                Some(field) => field,
                None => {
                    trace!(
                        message = %self.name,
                        number = record.number,
                        "Skipping field not in schema"
                    );
                    continue;
                }
            };

            let value = match field.field_type {
                FieldType::Kind(kind) => record.interpret(kind)?,
                FieldType::Message(schema_ref) => {
                    let nested = record.nested()?;
                    let value = schemas
                        .resolve_message(schema_ref)
                        .decode_fields(&nested, schemas)?;
                    Value::Object(Box::new(value))
                }
            };

            fields.push(PropertyValue {
                number: record.number,
                name: field.name.clone(),
                value,
            });
        }

        Ok(MessageValue {
            schema: self.self_ref,
            fields,
        })
    }
}

//! Explicit message schemas mapping field numbers to named properties.
//!
//! A schema replaces runtime type reflection: each field number is paired with a property name
//! and the kind the field is interpreted as. Schemas can be built by hand or parsed from
//! proto3 style message declarations.

use crate::interpret::TargetKind;
use snafu::Snafu;
use std::collections::{BTreeMap, HashMap};

mod api;
mod builder;
mod modify_api;
mod parse;

/// A reference to a message schema. Can be resolved to `MessageSchema` through a `SchemaSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaRef(usize);

/// Error building a schema set from declarations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum SchemaError
{
    /// Syntax error in the input.
    #[snafu(display("Parsing error: {}", source))]
    SyntaxError
    {
        /// Source error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Two messages share a name.
    #[snafu(display("Duplicate message: {}", name))]
    DuplicateMessage
    {
        /// Message name.
        name: String,
    },

    /// Two fields of a message share a name or a number.
    #[snafu(display("Duplicate field '{}' in '{}'", field, message))]
    DuplicateField
    {
        /// Field name.
        field: String,
        /// Message containing the field.
        message: String,
    },

    /// Field number is zero or does not fit 64 bits.
    #[snafu(display("Invalid field number {} in '{}'", number, message))]
    InvalidFieldNumber
    {
        /// Field number as written.
        number: String,
        /// Message containing the field.
        message: String,
    },

    /// Unknown type reference.
    #[snafu(display("Unknown type '{}' in '{}'", name, context))]
    TypeNotFound
    {
        /// Type name.
        name: String,
        /// Message that referred to the unknown type.
        context: String,
    },

    /// A protobuf type that needs an encoding this decoder does not implement.
    #[snafu(display("Unsupported type '{}' in '{}'", name, context))]
    UnsupportedType
    {
        /// Type name.
        name: String,
        /// Message that used the type.
        context: String,
    },
}

/// Error inserting a message into a schema set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InsertError
{
    /// A message with the same name already exists.
    MessageExists
    {
        /// The previous message that conflicts with the new one.
        original: SchemaRef,
    },
}

/// Error adding a field to a message schema.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum MemberInsertError
{
    /// A field with the same number already exists.
    NumberConflict,

    /// A field with the same name already exists.
    NameConflict,
}

/// A set of message schemas that may refer to each other.
#[derive(Default, Debug, PartialEq)]
pub struct SchemaSet
{
    messages: Vec<MessageSchema>,
    messages_by_name: HashMap<String, usize>,
}

/// Schema of a single message.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub struct MessageSchema
{
    /// Message name.
    pub name: String,

    /// `SchemaRef` that references this message.
    pub self_ref: SchemaRef,

    // Using BTreeMap here to ensure ordering.
    fields: BTreeMap<u64, SchemaField>,
    fields_by_name: BTreeMap<String, u64>,
}

/// A single property of a message.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub struct SchemaField
{
    /// Property name.
    pub name: String,

    /// Field number.
    pub number: u64,

    /// How the field value is interpreted.
    pub field_type: FieldType,
}

/// Field value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType
{
    /// A scalar, string, bytes or a schema-less nested message.
    Kind(TargetKind),

    /// A nested message described by another schema in the same set.
    Message(SchemaRef),
}

#[cfg(test)]
mod test
{
    use super::*;

    #[test]
    fn references()
    {
        let set = SchemaSet::parse(&[r#"
            syntax = "proto3";
            message Outer { Inner inner = 1; }
            message Inner { Outer outer = 1; }
        "#])
        .unwrap();

        let outer = set.get_message("Outer").unwrap();
        let inner = set.get_message("Inner").unwrap();
        assert_eq!(outer.self_ref, SchemaRef(0));
        assert_eq!(inner.self_ref, SchemaRef(1));
        assert_eq!(
            outer.get_field(1).unwrap().field_type,
            FieldType::Message(inner.self_ref)
        );
        assert_eq!(
            inner.get_field_by_name("outer").unwrap().field_type,
            FieldType::Message(outer.self_ref)
        );
        assert_eq!(set.resolve_message(inner.self_ref).name, "Inner");
    }

    #[test]
    fn multiple_files()
    {
        let set = SchemaSet::parse(&[
            "message First { Second second = 1; }",
            "message Second { string name = 1; }",
        ])
        .unwrap();

        assert_eq!(
            set.iter_messages().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["First", "Second"]
        );
    }
}

#[test]
fn create_schema_by_hand()
{
    use protowire::schema::{FieldType, MessageSchema, SchemaField, SchemaSet};
    use protowire::TargetKind;

    let parsed_schemas = SchemaSet::parse(&[r#"
        syntax = "proto3";

        message Message {
            bool immediate = 1;
            Inner inner = 2;
            string label = 10;
        }

        message Inner {
            uint16 value = 1;
            Message parent = 2;
        }
    "#])
    .unwrap();

    let mut handbuilt_schemas = SchemaSet::new();

    let mut message = MessageSchema::new("Message".to_string());
    message
        .add_field(SchemaField::new(
            "immediate".to_string(),
            1,
            FieldType::Kind(TargetKind::Bool),
        ))
        .unwrap();
    message
        .add_field(SchemaField::new(
            "label".to_string(),
            10,
            FieldType::Kind(TargetKind::String),
        ))
        .unwrap();
    let message_ref = handbuilt_schemas.insert_message(message).unwrap();

    let mut inner = MessageSchema::new("Inner".to_string());
    inner
        .add_field(SchemaField::new(
            "value".to_string(),
            1,
            FieldType::Kind(TargetKind::UInt16),
        ))
        .unwrap();
    inner
        .add_field(SchemaField::new(
            "parent".to_string(),
            2,
            FieldType::Message(message_ref),
        ))
        .unwrap();
    let inner_ref = handbuilt_schemas.insert_message(inner).unwrap();

    // Message and Inner refer to each other so one of the references is added after insertion.
    handbuilt_schemas
        .resolve_message_mut(message_ref)
        .add_field(SchemaField::new(
            "inner".to_string(),
            2,
            FieldType::Message(inner_ref),
        ))
        .unwrap();

    assert_eq!(parsed_schemas, handbuilt_schemas);
}

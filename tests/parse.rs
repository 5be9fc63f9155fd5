#[test]
fn parse()
{
    use protowire::schema::{FieldType, MessageSchema, SchemaField, SchemaSet};
    use protowire::TargetKind;

    let schemas = SchemaSet::parse(&[r#"
      syntax = "proto3";
      message Message {
          string s = 1;
          bytes b = 2;
          int64 large = 3;
          int8 tiny = 4;
          float f = 5;
          double d = 6;
          Message child = 10;
      }
    "#])
    .unwrap();

    let mut expected = SchemaSet::new();
    let mut message = MessageSchema::new("Message".to_string());

    let fields = vec![
        ("s", 1, FieldType::Kind(TargetKind::String)),
        ("b", 2, FieldType::Kind(TargetKind::Bytes)),
        ("large", 3, FieldType::Kind(TargetKind::Int64)),
        ("tiny", 4, FieldType::Kind(TargetKind::Int8)),
        ("f", 5, FieldType::Kind(TargetKind::Float)),
        ("d", 6, FieldType::Kind(TargetKind::Double)),
        ("child", 10, FieldType::Message(expected.next_ref())),
    ];
    for (name, number, field_type) in fields {
        message
            .add_field(SchemaField::new(name.to_string(), number, field_type))
            .unwrap();
    }

    expected.insert_message(message).unwrap();

    assert_eq!(expected, schemas);
}

#[test]
fn parse_errors()
{
    use protowire::schema::{SchemaError, SchemaSet};

    match SchemaSet::parse(&["message A { B b = 1; }"]) {
        Err(SchemaError::TypeNotFound { name, context }) => {
            assert_eq!(name, "B");
            assert_eq!(context, "A");
        }
        other => panic!("Unexpected result: {:?}", other),
    }

    match SchemaSet::parse(&["message A { fixed32 f = 1; }"]) {
        Err(SchemaError::UnsupportedType { name, .. }) => assert_eq!(name, "fixed32"),
        other => panic!("Unexpected result: {:?}", other),
    }

    match SchemaSet::parse(&["message A {}", "message A {}"]) {
        Err(SchemaError::DuplicateMessage { name }) => assert_eq!(name, "A"),
        other => panic!("Unexpected result: {:?}", other),
    }

    match SchemaSet::parse(&["message A { bool a = 1; bool a = 2; }"]) {
        Err(SchemaError::DuplicateField { field, message }) => {
            assert_eq!(field, "a");
            assert_eq!(message, "A");
        }
        other => panic!("Unexpected result: {:?}", other),
    }

    match SchemaSet::parse(&["message A { bool a = 1 }"]) {
        Err(SchemaError::SyntaxError { .. }) => {}
        other => panic!("Unexpected result: {:?}", other),
    }
}

use super::*;

#[derive(Default, Debug, PartialEq)]
pub(crate) struct SchemaBuilder
{
    pub(crate) messages: Vec<MessageBuilder>,
}

#[derive(Default, Debug, PartialEq, Clone)]
pub(crate) struct MessageBuilder
{
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldBuilder>,
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct FieldBuilder
{
    pub(crate) field_type: FieldTypeBuilder,
    pub(crate) name: String,
    pub(crate) number: u64,
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum FieldTypeBuilder
{
    Builtin(TargetKind),
    Unsupported(String),
    Named(String),
}

impl SchemaBuilder
{
    pub fn build(self) -> Result<SchemaSet, SchemaError>
    {
        // Messages may refer to messages declared after them so the references are assigned
        // before any of the fields are resolved.
        let mut refs = HashMap::new();
        for (idx, msg) in self.messages.iter().enumerate() {
            if refs.insert(msg.name.as_str(), SchemaRef(idx)).is_some() {
                return DuplicateMessage {
                    name: msg.name.clone(),
                }
                .fail();
            }
        }

        let mut set = SchemaSet::new();
        for msg in &self.messages {
            let schema = msg.build(&refs)?;
            if set.insert_message(schema).is_err() {
                return DuplicateMessage {
                    name: msg.name.clone(),
                }
                .fail();
            }
        }

        Ok(set)
    }
}

impl MessageBuilder
{
    fn build(&self, refs: &HashMap<&str, SchemaRef>) -> Result<MessageSchema, SchemaError>
    {
        let mut schema = MessageSchema::new(self.name.clone());
        for field in &self.fields {
            let field_type = field.field_type.resolve(refs, &self.name)?;
            let result = schema.add_field(SchemaField::new(
                field.name.clone(),
                field.number,
                field_type,
            ));

            if result.is_err() {
                return DuplicateField {
                    field: field.name.clone(),
                    message: self.name.clone(),
                }
                .fail();
            }
        }

        Ok(schema)
    }
}

impl FieldTypeBuilder
{
    fn resolve(
        &self,
        refs: &HashMap<&str, SchemaRef>,
        context: &str,
    ) -> Result<FieldType, SchemaError>
    {
        match self {
            FieldTypeBuilder::Builtin(kind) => Ok(FieldType::Kind(*kind)),
            FieldTypeBuilder::Unsupported(name) => UnsupportedType {
                name: name.clone(),
                context,
            }
            .fail(),
            FieldTypeBuilder::Named(name) => match refs.get(name.as_str()) {
                Some(schema_ref) => Ok(FieldType::Message(*schema_ref)),
                None => TypeNotFound {
                    name: name.clone(),
                    context,
                }
                .fail(),
            },
        }
    }
}

#[cfg(test)]
mod test
{
    use super::*;

    fn field(field_type: FieldTypeBuilder, name: &str, number: u64) -> FieldBuilder
    {
        FieldBuilder {
            field_type,
            name: name.to_string(),
            number,
        }
    }

    #[test]
    fn forward_reference()
    {
        let set = SchemaBuilder {
            messages: vec![
                MessageBuilder {
                    name: "A".to_string(),
                    fields: vec![field(FieldTypeBuilder::Named("B".to_string()), "b", 1)],
                },
                MessageBuilder {
                    name: "B".to_string(),
                    fields: vec![],
                },
            ],
        }
        .build()
        .unwrap();

        assert_eq!(
            set.get_message("A").unwrap().get_field(1).unwrap().field_type,
            FieldType::Message(SchemaRef(1))
        );
    }

    #[test]
    fn errors()
    {
        let build = |fields: Vec<FieldBuilder>| {
            SchemaBuilder {
                messages: vec![MessageBuilder {
                    name: "M".to_string(),
                    fields,
                }],
            }
            .build()
        };

        match build(vec![field(FieldTypeBuilder::Named("X".to_string()), "x", 1)]) {
            Err(SchemaError::TypeNotFound { name, context }) => {
                assert_eq!(name, "X");
                assert_eq!(context, "M");
            }
            other => panic!("Unexpected result: {:?}", other),
        }

        match build(vec![field(
            FieldTypeBuilder::Unsupported("sint32".to_string()),
            "x",
            1,
        )]) {
            Err(SchemaError::UnsupportedType { name, .. }) => assert_eq!(name, "sint32"),
            other => panic!("Unexpected result: {:?}", other),
        }

        let kind = FieldTypeBuilder::Builtin(TargetKind::Bool);
        match build(vec![field(kind.clone(), "x", 1), field(kind, "y", 1)]) {
            Err(SchemaError::DuplicateField { field, message }) => {
                assert_eq!(field, "y");
                assert_eq!(message, "M");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn duplicate_message()
    {
        let result = SchemaBuilder {
            messages: vec![MessageBuilder::default(), MessageBuilder::default()],
        }
        .build();

        match result {
            Err(SchemaError::DuplicateMessage { name }) => assert_eq!(name, ""),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}

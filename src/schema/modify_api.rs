use super::*;

impl SchemaSet
{
    /// Insert a new message schema to the set.
    ///
    /// The message receives the next free `SchemaRef`. Fields referring to messages that are
    /// inserted later must use the reference those messages will receive.
    pub fn insert_message(&mut self, mut msg: MessageSchema) -> Result<SchemaRef, InsertError>
    {
        use std::collections::hash_map::Entry;

        let schema_ref = SchemaRef(self.messages.len());
        let vacant = match self.messages_by_name.entry(msg.name.clone()) {
            Entry::Occupied(occupied) => {
                return Err(InsertError::MessageExists {
                    original: SchemaRef(*occupied.get()),
                })
            }
            Entry::Vacant(vacant) => vacant,
        };

        msg.self_ref = schema_ref;
        vacant.insert(schema_ref.0);
        self.messages.push(msg);

        Ok(schema_ref)
    }

    /// The reference the next inserted message will receive.
    pub fn next_ref(&self) -> SchemaRef
    {
        SchemaRef(self.messages.len())
    }

    /// Resolves a message reference for modification.
    ///
    /// Will **panic** if the message defined by the `SchemaRef` does not exist in this set.
    pub fn resolve_message_mut(&mut self, schema_ref: SchemaRef) -> &mut MessageSchema
    {
        match self.messages.get_mut(schema_ref.0) {
            Some(msg) => msg,
            None => panic!("Message did not exist in this schema set"),
        }
    }
}

impl MessageSchema
{
    /// Create a new message schema.
    pub fn new(name: String) -> Self
    {
        MessageSchema {
            name,
            self_ref: SchemaRef(0),
            fields: Default::default(),
            fields_by_name: Default::default(),
        }
    }

    /// Add a field to the message.
    pub fn add_field(&mut self, field: SchemaField) -> Result<(), MemberInsertError>
    {
        if self.fields.contains_key(&field.number) {
            return Err(MemberInsertError::NumberConflict);
        }

        if self.fields_by_name.contains_key(&field.name) {
            return Err(MemberInsertError::NameConflict);
        }

        self.fields_by_name.insert(field.name.clone(), field.number);
        self.fields.insert(field.number, field);
        Ok(())
    }
}

impl SchemaField
{
    /// Create a new field.
    pub fn new(name: String, number: u64, field_type: FieldType) -> Self
    {
        SchemaField {
            name,
            number,
            field_type,
        }
    }
}

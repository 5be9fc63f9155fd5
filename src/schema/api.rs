use super::*;

impl SchemaSet
{
    /// Create a new, empty schema set.
    pub fn new() -> Self
    {
        SchemaSet {
            messages: Default::default(),
            messages_by_name: Default::default(),
        }
    }

    /// Gets a message schema by name.
    pub fn get_message(&self, name: &str) -> Option<&MessageSchema>
    {
        self.messages_by_name
            .get(name)
            .map(|idx| &self.messages[*idx])
    }

    /// Resolves a message reference.
    ///
    /// Will **panic** if the message defined by the `SchemaRef` does not exist in this set.
    /// Such panic means the `SchemaRef` came from a different set. The panic is not guaranteed,
    /// as a message with an equal `SchemaRef` may exist in multiple sets.
    pub fn resolve_message(&self, schema_ref: SchemaRef) -> &MessageSchema
    {
        match self.messages.get(schema_ref.0) {
            Some(msg) => msg,
            None => panic!("Message did not exist in this schema set"),
        }
    }

    /// Iterates all message schemas in insertion order.
    pub fn iter_messages(&self) -> impl Iterator<Item = &MessageSchema>
    {
        self.messages.iter()
    }
}

impl MessageSchema
{
    /// Iterates all fields in field number order.
    pub fn iter_fields(&self) -> impl Iterator<Item = &SchemaField>
    {
        self.fields.values()
    }

    /// Get a field by its number.
    pub fn get_field(&self, number: u64) -> Option<&SchemaField>
    {
        self.fields.get(&number)
    }

    /// Get a field by its name.
    pub fn get_field_by_name(&self, name: &str) -> Option<&SchemaField>
    {
        self.fields_by_name
            .get(name)
            .and_then(|number| self.get_field(*number))
    }
}

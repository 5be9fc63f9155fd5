use pest::{iterators::Pair, Parser};
use snafu::ResultExt;

use super::builder::*;
use super::*;

#[derive(pest_derive::Parser)]
#[grammar = "schema.pest"]
struct SchemaParser;

impl SchemaSet
{
    /// Parses message declarations and creates a schema set.
    ///
    /// Messages may refer to messages declared in any of the inputs.
    pub fn parse<T, S>(files: T) -> Result<Self, SchemaError>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = SchemaBuilder::default();
        for f in files {
            builder
                .messages
                .extend(SchemaBuilder::parse_str(f.as_ref())?.messages);
        }

        builder.build()
    }
}

impl SchemaBuilder
{
    pub fn parse_str(input: &str) -> Result<Self, SchemaError>
    {
        let pairs = SchemaParser::parse(Rule::schema, input)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
            .context(SyntaxError {})?;

        let mut schema = SchemaBuilder::default();
        for pair in pairs {
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::syntax => {}
                    Rule::message => schema.messages.push(MessageBuilder::parse(inner)?),
                    Rule::emptyStatement => {}
                    Rule::EOI => {}
                    r => unreachable!("{:?}: {:?}", r, inner),
                }
            }
        }

        Ok(schema)
    }
}

impl MessageBuilder
{
    pub fn parse(p: Pair<Rule>) -> Result<Self, SchemaError>
    {
        let mut inner = p.into_inner();
        let name = inner.next().unwrap().as_str().to_string();

        let mut fields = vec![];
        let body = inner.next().unwrap();
        for p in body.into_inner() {
            match p.as_rule() {
                Rule::field => fields.push(FieldBuilder::parse(p, &name)?),
                Rule::emptyStatement => {}
                r => unreachable!("{:?}: {:?}", r, p),
            }
        }

        Ok(MessageBuilder { name, fields })
    }
}

impl FieldBuilder
{
    pub fn parse(p: Pair<Rule>, message: &str) -> Result<Self, SchemaError>
    {
        let mut inner = p.into_inner();
        let field_type = parse_field_type(inner.next().unwrap().as_str());
        let name = inner.next().unwrap().as_str().to_string();
        let number = parse_field_number(inner.next().unwrap(), message)?;

        Ok(FieldBuilder {
            field_type,
            name,
            number,
        })
    }
}

fn parse_field_type(t: &str) -> FieldTypeBuilder
{
    FieldTypeBuilder::Builtin(match t {
        "int8" => TargetKind::Int8,
        "int16" => TargetKind::Int16,
        "int32" => TargetKind::Int32,
        "int64" => TargetKind::Int64,
        "uint8" => TargetKind::UInt8,
        "uint16" => TargetKind::UInt16,
        "uint32" => TargetKind::UInt32,
        "uint64" => TargetKind::UInt64,
        "bool" => TargetKind::Bool,
        "float" => TargetKind::Float,
        "double" => TargetKind::Double,
        "string" => TargetKind::String,
        "bytes" => TargetKind::Bytes,

        // Zig-zag and fixed width integers.
        "sint32" | "sint64" | "fixed32" | "fixed64" | "sfixed32" | "sfixed64" => {
            return FieldTypeBuilder::Unsupported(t.to_string())
        }
        _ => return FieldTypeBuilder::Named(t.to_string()),
    })
}

fn parse_field_number(p: Pair<Rule>, message: &str) -> Result<u64, SchemaError>
{
    match p.as_str().parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => InvalidFieldNumber {
            number: p.as_str(),
            message,
        }
        .fail(),
    }
}

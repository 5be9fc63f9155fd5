use protowire::{
    decode_message_with, DecodeOptions, FieldRecord, Framing, RawValue, RepeatedFields, SchemaSet,
};
use std::env;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: protowire [--standard] [--accumulate] <payload-file> [<schema-file> <message>]";

fn main() -> Result<(), Box<dyn std::error::Error>>
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut options = DecodeOptions::default();
    let mut paths = vec![];
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--standard" => options = options.with_framing(Framing::Standard),
            "--accumulate" => options = options.with_repeated(RepeatedFields::Accumulate),
            _ => paths.push(arg),
        }
    }

    let (payload, schema) = match paths.as_slice() {
        [payload] => (payload, None),
        [payload, schema, message] => (payload, Some((schema, message))),
        _ => return Err(USAGE.into()),
    };

    let data = std::fs::read(payload)?;
    match schema {
        None => {
            let msg = decode_message_with(&data, options)?;
            for record in msg.iter() {
                println!("{}", describe(record));
            }
        }
        Some((schema, message)) => {
            let schemas = SchemaSet::parse(&[std::fs::read_to_string(schema)?])?;
            let msg = schemas
                .get_message(message)
                .ok_or_else(|| format!("Message '{}' not found in {}", message, schema))?;
            let value = msg.decode_with(&data, &schemas, options)?;
            println!("{:#?}", value);
        }
    }

    Ok(())
}

fn describe(record: &FieldRecord) -> String
{
    let value = match &record.value {
        RawValue::Varint(v) => v.to_string(),
        RawValue::Fixed64(b) => format!("{} ({})", u64::from_le_bytes(*b), f64::from_le_bytes(*b)),
        RawValue::Fixed32(b) => format!("{} ({})", u32::from_le_bytes(*b), f32::from_le_bytes(*b)),
        RawValue::LengthDelimited(b) => match std::str::from_utf8(b) {
            Ok(s) if !s.chars().any(char::is_control) => format!("{:?}", s),
            _ => b
                .iter()
                .map(|byte| format!("{:02x}", byte))
                .collect::<Vec<_>>()
                .join(" "),
        },
    };

    format!(
        "{:>6} @{:<6} {:<22} {}",
        record.number,
        record.offset,
        record.wire_type().to_string(),
        value
    )
}

//! Decoder configuration.

/// How tags and lengths are framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing
{
    /// Single byte tags and single byte lengths.
    ///
    /// Field numbers are limited to 0-31 and length-delimited values to 255 bytes. Payloads from
    /// regular protobuf encoders are compatible as long as they stay within those limits.
    Compact,

    /// Varint tags and varint lengths as in regular protocol buffers.
    Standard,
}

/// What to do with a field number that appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatedFields
{
    /// Keep only the last occurrence.
    ///
    /// The field keeps the position of its first occurrence in the scan order.
    LastWins,

    /// Keep every occurrence in scan order.
    Accumulate,
}

/// Options for decoding a payload.
///
/// Nested messages are decoded with the options of the message that contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions
{
    /// Tag and length framing.
    pub framing: Framing,

    /// Handling of repeated field numbers.
    pub repeated: RepeatedFields,

    /// Maximum nesting depth. The top level message is at depth 0.
    pub max_depth: usize,
}

/// Default nesting ceiling, matching the customary protobuf recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 100;

impl Default for DecodeOptions
{
    fn default() -> Self
    {
        DecodeOptions {
            framing: Framing::Compact,
            repeated: RepeatedFields::LastWins,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions
{
    /// Options for payloads from regular protobuf encoders.
    pub fn standard() -> Self
    {
        Self::default().with_framing(Framing::Standard)
    }

    /// Sets the framing.
    pub fn with_framing(mut self, framing: Framing) -> Self
    {
        self.framing = framing;
        self
    }

    /// Sets the handling of repeated field numbers.
    pub fn with_repeated(mut self, repeated: RepeatedFields) -> Self
    {
        self.repeated = repeated;
        self
    }

    /// Sets the nesting ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self
    {
        self.max_depth = max_depth;
        self
    }
}

//! JSON message descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DescriptionError, DescriptionResult};
use crate::limits::EncodeLimits;

/// A message to encode, as a list of field records in emit order.
///
/// ```json
/// { "fields": [
///     { "field": 1, "type": "int32", "value": 150 },
///     { "field": 2, "type": "sint64", "value": [1, -2, 3], "packed": true },
///     { "field": 3, "type": "message", "value": { "fields": [] } }
/// ] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDescription {
    pub fields: Vec<FieldDescription>,
}

/// One field of a [`MessageDescription`].
///
/// An array `value` selects the repeated shape; with `packed` set it selects
/// the packed shape instead. Value encodings per type:
///
/// - integers: JSON numbers, or decimal strings for values JSON can't carry
///   exactly;
/// - `float`/`double`: numbers, or `"NaN"`, `"Infinity"`, `"-Infinity"`;
/// - `bytes`: hex strings (whitespace ignored);
/// - `message`: a nested description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescription {
    pub field: i64,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub value: Value,
    #[serde(default, skip_serializing_if = "is_false")]
    pub packed: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Schema field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Enum,
    Message,
}

impl FieldKind {
    /// Name as written in a `.proto` file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::Message => "message",
        }
    }

    /// Whether repeated fields of this type may use the packed encoding.
    pub const fn is_packable(self) -> bool {
        !matches!(self, Self::String | Self::Bytes | Self::Message)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a message description, enforcing the input size limit.
pub fn parse_description(text: &str, limits: &EncodeLimits) -> DescriptionResult<MessageDescription> {
    if text.len() > limits.max_input_bytes {
        return Err(DescriptionError::InputTooLarge {
            len: text.len(),
            limit: limits.max_input_bytes,
        });
    }
    serde_json::from_str(text).map_err(|err| DescriptionError::Json {
        reason: err.to_string(),
    })
}

/// JSON type name of a value, for error messages.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Errors for message descriptions.

use std::fmt;

use wire::WireError;

use crate::description::FieldKind;

/// Result type for description parsing and encoding.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// A message description that can't be encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionError {
    /// Invalid field number or enum value.
    Wire(WireError),

    /// Input is not a valid description.
    Json { reason: String },

    /// Input exceeds the configured size limit.
    InputTooLarge { len: usize, limit: usize },

    /// Value has the wrong JSON type for the field type.
    TypeMismatch {
        field: i64,
        kind: FieldKind,
        found: &'static str,
    },

    /// Numeric value doesn't fit the field type.
    ValueOutOfRange {
        field: i64,
        kind: FieldKind,
        value: String,
    },

    /// `packed` set on a field type without a packed encoding.
    PackedNotAllowed { field: i64, kind: FieldKind },

    /// `bytes` value is not valid hex.
    InvalidBytes {
        field: i64,
        source: hex::FromHexError,
    },

    /// Submessages nest deeper than allowed.
    NestingTooDeep { depth: usize, limit: usize },
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "{e}"),
            Self::Json { reason } => write!(f, "invalid message description: {reason}"),
            Self::InputTooLarge { len, limit } => {
                write!(f, "input too large: {len} bytes > {limit}")
            }
            Self::TypeMismatch { field, kind, found } => {
                write!(f, "field {field}: {found} is not a valid {kind} value")
            }
            Self::ValueOutOfRange { field, kind, value } => {
                write!(f, "field {field}: {value} is out of range for {kind}")
            }
            Self::PackedNotAllowed { field, kind } => {
                write!(f, "field {field}: {kind} fields can't be packed")
            }
            Self::InvalidBytes { field, source } => {
                write!(f, "field {field}: invalid hex bytes: {source}")
            }
            Self::NestingTooDeep { depth, limit } => {
                write!(f, "message nesting too deep: {depth} > {limit}")
            }
        }
    }
}

impl std::error::Error for DescriptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::InvalidBytes { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<WireError> for DescriptionError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}

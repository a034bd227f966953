//! Error types for wire encoding contracts.

use std::fmt;

use crate::limits::{MAX_FIELD, MIN_FIELD};

/// Result type for wire-level validation.
pub type WireResult<T> = Result<T, WireError>;

/// Contract violations detected by the wire layer.
///
/// The emitting functions treat these as programming errors and panic with
/// the `Display` text. Fallible constructors return them so callers holding
/// untrusted input can validate before emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Field number outside `[MIN_FIELD, MAX_FIELD]`.
    FieldNumberOutOfRange { field: i128 },

    /// Wire type that doesn't exist or isn't supported (groups).
    UnsupportedWireType { value: u8 },

    /// Enum value that doesn't fit into a signed 32-bit integer.
    EnumValueOutOfRange { value: i64 },

    /// Length prefix that can't be represented on the wire.
    LengthOverflow { length: usize },

    /// Packed payload of `count` fixed-width elements whose byte length
    /// doesn't fit in `usize`.
    PackedLengthOverflow { count: usize, width: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNumberOutOfRange { field } => {
                write!(
                    f,
                    "field number {field} is outside of valid range [{MIN_FIELD}, {MAX_FIELD}]"
                )
            }
            Self::UnsupportedWireType { value } if matches!(*value, 3 | 4) => {
                write!(f, "wire type {value} (group) is deprecated and not supported")
            }
            Self::UnsupportedWireType { value } => {
                write!(f, "unknown wire type: {value}")
            }
            Self::EnumValueOutOfRange { value } => {
                write!(f, "enum value {value} has to fit into signed 32-bit integer")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length overflow: {length}")
            }
            Self::PackedLengthOverflow { count, width } => {
                write!(
                    f,
                    "packed length overflow: {count} elements of {width} bytes"
                )
            }
        }
    }
}

impl std::error::Error for WireError {}

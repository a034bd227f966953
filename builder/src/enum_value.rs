//! Values accepted by enum fields.

use wire::{WireError, WireResult};

/// Anything convertible to a protobuf enum value (a signed 32-bit integer).
///
/// Implemented for integers of at most 32 bits. Schema enums implement it
/// directly:
///
/// ```
/// use builder::{Builder, EnumValue};
///
/// #[derive(Clone, Copy)]
/// enum Corpus {
///     Unspecified = 0,
///     Web = 2,
/// }
///
/// impl EnumValue for Corpus {
///     fn enum_value(self) -> i64 {
///         self as i64
///     }
/// }
///
/// let mut builder = Builder::new(Vec::new());
/// builder.emit_enum(4, Corpus::Web);
/// builder.emit_enum(4, Corpus::Unspecified);
/// assert_eq!(builder.into_inner(), [0x20, 0x02, 0x20, 0x00]);
/// ```
///
/// 64-bit integers are rejected at compile time:
///
/// ```compile_fail
/// let mut builder = builder::Builder::new(Vec::new());
/// builder.emit_enum(1, 1i64);
/// ```
pub trait EnumValue: Copy {
    /// The enum's numeric value.
    fn enum_value(self) -> i64;
}

macro_rules! impl_enum_value {
    ($($ty:ty),*) => {
        $(
            impl EnumValue for $ty {
                fn enum_value(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_enum_value!(i8, i16, i32, u8, u16, u32);

impl<T: EnumValue> EnumValue for &T {
    fn enum_value(self) -> i64 {
        (*self).enum_value()
    }
}

/// Validates that an enum value fits into a signed 32-bit integer.
///
/// # Errors
///
/// Returns [`WireError::EnumValueOutOfRange`] otherwise.
pub fn checked_enum_value<E: EnumValue>(value: E) -> WireResult<i32> {
    let value = value.enum_value();
    i32::try_from(value).map_err(|_| WireError::EnumValueOutOfRange { value })
}

/// Wire value of a validated enum; negative values are sign-extended.
#[track_caller]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn enum_wire_value<E: EnumValue>(value: E) -> u64 {
    match checked_enum_value(value) {
        Ok(value) => i64::from(value) as u64,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_accepts_i32_range() {
        assert_eq!(checked_enum_value(0i32), Ok(0));
        assert_eq!(checked_enum_value(i32::MIN), Ok(i32::MIN));
        assert_eq!(checked_enum_value(i32::MAX as u32), Ok(i32::MAX));
        assert_eq!(checked_enum_value(&-3i8), Ok(-3));
    }

    #[test]
    fn checked_rejects_large_unsigned() {
        assert_eq!(
            checked_enum_value(u32::MAX),
            Err(WireError::EnumValueOutOfRange {
                value: 4_294_967_295
            })
        );
    }

    #[test]
    fn wire_value_sign_extends() {
        assert_eq!(enum_wire_value(-1i32), u64::MAX);
        assert_eq!(enum_wire_value(5u8), 5);
    }

    #[test]
    #[should_panic(expected = "has to fit into signed 32-bit integer")]
    fn wire_value_panics_out_of_range() {
        let _ = enum_wire_value(2_147_483_648u32);
    }
}

//! Field numbers, wire types, and tag composition.

use std::fmt;

use crate::error::{WireError, WireResult};
use crate::limits::{MAX_FIELD, MIN_FIELD, WIRE_TYPE_BITS};

/// A validated protobuf field number in `[MIN_FIELD, MAX_FIELD]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldNumber(u32);

impl FieldNumber {
    /// Smallest valid field number.
    pub const MIN: Self = Self(MIN_FIELD);

    /// Largest valid field number.
    pub const MAX: Self = Self(MAX_FIELD);

    /// Validates a field number.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::FieldNumberOutOfRange`] outside `[1, 536_870_911]`.
    pub fn new(field: i64) -> WireResult<Self> {
        Self::from_wide(i128::from(field))
    }

    fn from_wide(field: i128) -> WireResult<Self> {
        match u32::try_from(field) {
            Ok(raw) if (MIN_FIELD..=MAX_FIELD).contains(&raw) => Ok(Self(raw)),
            _ => Err(WireError::FieldNumberOutOfRange { field }),
        }
    }

    /// Creates a field number, panicking when it is out of range.
    ///
    /// Usable in constants, where an invalid number fails the build:
    ///
    /// ```
    /// use wire::FieldNumber;
    ///
    /// const NAME: FieldNumber = FieldNumber::must(1);
    /// assert_eq!(NAME.get(), 1);
    /// ```
    ///
    /// ```compile_fail
    /// use wire::FieldNumber;
    ///
    /// const BAD: FieldNumber = FieldNumber::must(0);
    /// let _ = BAD;
    /// ```
    #[must_use]
    pub const fn must(field: u32) -> Self {
        assert!(
            field >= MIN_FIELD && field <= MAX_FIELD,
            "field number is outside of valid range"
        );
        Self(field)
    }

    /// Returns the raw field number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FieldNumber> for u32 {
    fn from(field: FieldNumber) -> Self {
        field.0
    }
}

/// Anything usable as a field number: plain integers, [`FieldNumber`], or
/// caller-defined field enums.
///
/// Integer conversions panic when the value is out of range.
///
/// ```
/// use wire::{Emitter, FieldNumber, IntoFieldNumber};
///
/// #[derive(Clone, Copy)]
/// enum Person {
///     Name = 1,
///     Id = 2,
/// }
///
/// impl IntoFieldNumber for Person {
///     fn field_number(self) -> FieldNumber {
///         FieldNumber::must(self as u32)
///     }
/// }
///
/// let mut emitter = Emitter::new(Vec::new());
/// emitter.emit_len_str(Person::Name, "ann");
/// emitter.emit_varint(Person::Id, 7);
/// assert_eq!(emitter.into_inner(), [0x0A, 0x03, b'a', b'n', b'n', 0x10, 0x07]);
/// ```
pub trait IntoFieldNumber: Copy {
    /// Converts into a validated field number.
    fn field_number(self) -> FieldNumber;
}

impl IntoFieldNumber for FieldNumber {
    fn field_number(self) -> FieldNumber {
        self
    }
}

macro_rules! impl_into_field_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoFieldNumber for $ty {
                #[track_caller]
                #[allow(clippy::cast_lossless)]
                fn field_number(self) -> FieldNumber {
                    // Every primitive integer up to 64 bits widens exactly.
                    FieldNumber::from_wide(self as i128).unwrap_or_else(|err| panic!("{err}"))
                }
            }
        )*
    };
}

impl_into_field_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Protobuf wire types.
///
/// Groups (`SGROUP = 3`, `EGROUP = 4`) are deprecated and not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// `VARINT`: int32, int64, uint32, uint64, sint32, sint64, bool, enum.
    VarInt = 0,
    /// `I64`: fixed64, sfixed64, double.
    I64 = 1,
    /// `LEN`: string, bytes, embedded messages, packed repeated fields.
    LengthDelimited = 2,
    /// `I32`: fixed32, sfixed32, float.
    I32 = 5,
}

impl WireType {
    /// Returns the 3-bit wire type value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = WireError;

    fn try_from(value: u8) -> WireResult<Self> {
        match value {
            0 => Ok(Self::VarInt),
            1 => Ok(Self::I64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::I32),
            _ => Err(WireError::UnsupportedWireType { value }),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VarInt => "VARINT",
            Self::I64 => "I64",
            Self::LengthDelimited => "LEN",
            Self::I32 => "I32",
        };
        write!(f, "{name}")
    }
}

/// Composes a tag: `(field << 3) | wire_type`.
#[must_use]
pub const fn tag_value(field: FieldNumber, wire_type: WireType) -> u32 {
    (field.get() << WIRE_TYPE_BITS) | wire_type as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_number_bounds() {
        assert_eq!(FieldNumber::new(1).unwrap(), FieldNumber::MIN);
        assert_eq!(FieldNumber::new(536_870_911).unwrap(), FieldNumber::MAX);
        assert!(matches!(
            FieldNumber::new(0),
            Err(WireError::FieldNumberOutOfRange { field: 0 })
        ));
        assert!(matches!(
            FieldNumber::new(-1),
            Err(WireError::FieldNumberOutOfRange { field: -1 })
        ));
        assert!(FieldNumber::new(536_870_912).is_err());
        assert!(FieldNumber::new(1_000_000_000).is_err());
        assert!(FieldNumber::new(i64::MAX).is_err());
    }

    #[test]
    fn must_accepts_valid() {
        const FIELD: FieldNumber = FieldNumber::must(100_000);
        assert_eq!(FIELD.get(), 100_000);
    }

    #[test]
    #[should_panic(expected = "outside of valid range")]
    fn must_rejects_zero() {
        let _ = FieldNumber::must(0);
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(1u8.field_number().get(), 1);
        assert_eq!(100_000i32.field_number().get(), 100_000);
        assert_eq!(536_870_911u64.field_number(), FieldNumber::MAX);
    }

    #[test]
    #[should_panic(expected = "field number -1")]
    fn negative_integer_panics() {
        let _ = (-1i32).field_number();
    }

    #[test]
    #[should_panic(expected = "field number 18446744073709551615 is outside")]
    fn huge_unsigned_panics_with_its_own_value() {
        let _ = u64::MAX.field_number();
    }

    #[test]
    #[should_panic(expected = "field number 9223372036854775808 is outside")]
    fn unsigned_just_past_i64_panics_with_its_own_value() {
        let _ = (1u64 << 63).field_number();
    }

    #[test]
    fn wire_type_values() {
        assert_eq!(WireType::VarInt.as_u8(), 0);
        assert_eq!(WireType::I64.as_u8(), 1);
        assert_eq!(WireType::LengthDelimited.as_u8(), 2);
        assert_eq!(WireType::I32.as_u8(), 5);
    }

    #[test]
    fn wire_type_parse() {
        for wire_type in [
            WireType::VarInt,
            WireType::I64,
            WireType::LengthDelimited,
            WireType::I32,
        ] {
            assert_eq!(WireType::try_from(wire_type.as_u8()), Ok(wire_type));
        }
        for value in [3u8, 4, 6, 7, 255] {
            assert_eq!(
                WireType::try_from(value),
                Err(WireError::UnsupportedWireType { value })
            );
        }
    }

    #[test]
    fn tags_for_field_one() {
        let one = FieldNumber::MIN;
        assert_eq!(tag_value(one, WireType::VarInt), 0x08);
        assert_eq!(tag_value(one, WireType::I64), 0x09);
        assert_eq!(tag_value(one, WireType::LengthDelimited), 0x0A);
        assert_eq!(tag_value(one, WireType::I32), 0x0D);
    }

    #[test]
    fn tag_for_max_field_fits_u32() {
        assert_eq!(tag_value(FieldNumber::MAX, WireType::I32), 0xFFFF_FFFD);
    }
}

//! Fixed limits of the protobuf wire format.

/// Smallest valid field number.
pub const MIN_FIELD: u32 = 1;

/// Largest valid field number.
///
/// Out of 32 bits of a tag, 29 are reserved for the field number.
pub const MAX_FIELD: u32 = 536_870_911;

/// Number of low tag bits holding the wire type.
pub const WIRE_TYPE_BITS: u32 = 3;

/// Longest possible varint encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Payload size of the `I32` wire type.
pub const FIXED32_LEN: usize = 4;

/// Payload size of the `I64` wire type.
pub const FIXED64_LEN: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_field_uses_29_bits() {
        assert_eq!(MAX_FIELD, (1 << (32 - WIRE_TYPE_BITS)) - 1);
    }

    #[test]
    fn max_varint_covers_u64() {
        // 7 payload bits per byte
        assert!(MAX_VARINT_LEN * 7 >= 64);
        assert!((MAX_VARINT_LEN - 1) * 7 < 64);
    }

    #[test]
    fn fixed_lengths_match_types() {
        assert_eq!(FIXED32_LEN, std::mem::size_of::<u32>());
        assert_eq!(FIXED64_LEN, std::mem::size_of::<u64>());
    }
}

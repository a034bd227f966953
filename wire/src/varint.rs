//! Varint and ZigZag primitives.

use crate::item::{SignedVarIntItem, VarIntItem};
use crate::limits::MAX_VARINT_LEN;
use crate::sink::ByteSink;

/// Maps a two's complement integer onto ZigZag encoding.
///
/// Equivalent to `(n << 1) ^ (n >> 63)`: non-negative values become
/// `n << 1`, negative values become `!(n << 1)`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Returns the number of bytes the varint encoding of `value` takes (1..=10).
#[must_use]
pub const fn varint_len(value: u64) -> usize {
    let significant_bits = (u64::BITS - (value | 1).leading_zeros()) as usize;
    (significant_bits + 6) / 7
}

/// Writes `value` as a base-128 little-endian varint.
pub fn encode_varint<S: ByteSink + ?Sized>(mut value: u64, sink: &mut S) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf[len] = byte;
        len += 1;
        if value == 0 {
            break;
        }
    }
    debug_assert!(
        buf[len - 1] & 0x80 == 0,
        "last varint byte carries a continuation flag"
    );
    sink.put_slice(&buf[..len]);
}

/// Total byte count of the varints of `values`, as written by a packed field.
#[must_use]
pub fn packed_varint_len<T: VarIntItem>(values: &[T]) -> usize {
    values
        .iter()
        .map(|value| varint_len(value.to_varint()))
        .sum()
}

/// Total byte count of the ZigZag varints of `values`.
#[must_use]
pub fn packed_signed_varint_len<T: SignedVarIntItem>(values: &[T]) -> usize {
    values
        .iter()
        .map(|value| varint_len(zigzag_encode(value.to_signed())))
        .sum()
}

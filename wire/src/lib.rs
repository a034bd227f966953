//! Protocol Buffers wire-format primitives for pbemit.
//!
//! This crate emits the four supported wire types (`VARINT`, `I64`, `LEN`,
//! `I32`), composes tags from field numbers, and writes packed records. It
//! knows wire types and bit widths, not schema types; the `builder` crate
//! maps schema types onto it.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Bit reinterpretation goes through `to_bits`/`to_le_bytes`.
//! - **No storage** - Bytes go straight into a caller-supplied [`ByteSink`].
//! - **Static width checks** - Packed element types are bounded by sealed traits.
//! - **Fail fast** - Contract violations panic before a record's first byte.
//!
//! Groups (`SGROUP`/`EGROUP`) are deprecated and not supported.
//!
//! # Example
//!
//! ```
//! use wire::Emitter;
//!
//! let mut emitter = Emitter::new(Vec::new());
//! emitter.emit_varint(1, 150);
//! emitter.emit_signed_varint_packed(2, &[0i32, -1, 1]);
//!
//! assert_eq!(
//!     emitter.into_inner(),
//!     [0x08, 0x96, 0x01, 0x12, 0x03, 0x00, 0x01, 0x02]
//! );
//! ```
//!
//! See <https://protobuf.dev/programming-guides/encoding> for the format.

mod emitter;
mod error;
mod field;
mod item;
mod limits;
mod sink;
mod varint;

pub use emitter::{len_record_len, tag_len, Emitter};
pub use error::{WireError, WireResult};
pub use field::{tag_value, FieldNumber, IntoFieldNumber, WireType};
pub use item::{Fixed32Item, Fixed64Item, SignedVarIntItem, VarIntItem};
pub use limits::{FIXED32_LEN, FIXED64_LEN, MAX_FIELD, MAX_VARINT_LEN, MIN_FIELD, WIRE_TYPE_BITS};
pub use sink::{ByteSink, IoSink, LenCounter};
pub use varint::{
    encode_varint, packed_signed_varint_len, packed_varint_len, varint_len, zigzag_encode,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = MIN_FIELD;
        let _ = MAX_FIELD;
        let _ = MAX_VARINT_LEN;
        let _ = FieldNumber::MIN;
        let _ = WireType::VarInt;
        let _ = LenCounter::new();
        let _ = Emitter::new(Vec::<u8>::new());

        // Error types
        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn counter_matches_vec_sink() {
        let mut counted = Emitter::new(LenCounter::new());
        let mut stored = Emitter::new(Vec::new());
        for value in [0u64, 1, 300, u64::MAX] {
            counted.emit_varint(7, value);
            stored.emit_varint(7, value);
        }
        counted.emit_len_str(8, "hello");
        stored.emit_len_str(8, "hello");
        counted.emit_i64_packed(9, &[1.5f64, 2.5]);
        stored.emit_i64_packed(9, &[1.5f64, 2.5]);

        assert_eq!(counted.sink().len(), stored.sink().len());
    }

    #[test]
    fn len_record_len_matches_emitted() {
        let payload = [0u8; 300];
        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_len(FieldNumber::must(20), &payload);
        assert_eq!(
            emitter.sink().len(),
            len_record_len(FieldNumber::must(20), payload.len())
        );
    }

    #[test]
    fn io_sink_matches_vec_sink() {
        let mut via_io = Emitter::new(IoSink::new(Vec::new()));
        let mut via_vec = Emitter::new(Vec::new());
        via_io.emit_signed_varint(3, -300);
        via_vec.emit_signed_varint(3, -300);
        via_io.emit_f32(4, 0.5);
        via_vec.emit_f32(4, 0.5);

        let written = via_io.into_inner().finish().unwrap();
        assert_eq!(written, via_vec.into_inner());
    }
}

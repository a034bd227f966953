//! Wire-type level emitter.

use crate::error::{WireError, WireResult};
use crate::field::{tag_value, FieldNumber, IntoFieldNumber, WireType};
use crate::item::{Fixed32Item, Fixed64Item, SignedVarIntItem, VarIntItem};
use crate::limits::{FIXED32_LEN, FIXED64_LEN};
use crate::sink::ByteSink;
use crate::varint::{encode_varint, packed_signed_varint_len, varint_len, zigzag_encode};

/// Protocol Buffers wire (binary) format emitter.
///
/// Each call appends one complete record (tag followed by payload) to the
/// sink. Nothing is buffered: packed records compute their length prefix from
/// the element values before the first element byte is written.
///
/// Contract violations (field number out of range) panic before any byte of
/// the record is appended.
///
/// ```
/// use wire::Emitter;
///
/// let mut emitter = Emitter::new(Vec::new());
/// emitter.emit_varint(1, 150);
/// emitter.emit_len_str(2, "testing");
/// assert_eq!(&emitter.sink()[..3], &[0x08, 0x96, 0x01]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Emitter<S> {
    sink: S,
}

impl<S: ByteSink> Emitter<S> {
    /// Creates an emitter appending into `sink`.
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns a reference to the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the emitter and returns the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Emits a two's complement varint up to 64 bits wide.
    ///
    /// Matches `uint32`, `uint64`, `int32`, `int64`, `bool` and enums. Negative
    /// `int32`/`int64` values are passed sign-extended and take 10 bytes.
    #[track_caller]
    pub fn emit_varint<F: IntoFieldNumber>(&mut self, field: F, value: u64) {
        self.emit_tag(field.field_number(), WireType::VarInt);
        encode_varint(value, &mut self.sink);
    }

    /// Emits a ZigZag-encoded varint. Matches `sint32`, `sint64`.
    #[track_caller]
    pub fn emit_signed_varint<F: IntoFieldNumber>(&mut self, field: F, value: i64) {
        self.emit_tag(field.field_number(), WireType::VarInt);
        encode_varint(zigzag_encode(value), &mut self.sink);
    }

    /// Emits a length-delimited record.
    ///
    /// Matches `string`, `bytes` and embedded messages. Packed repeated
    /// fields have dedicated `*_packed` functions.
    #[track_caller]
    pub fn emit_len<F: IntoFieldNumber>(&mut self, field: F, value: &[u8]) {
        let field = field.field_number();
        let len = wire_len(value.len());
        self.emit_tag(field, WireType::LengthDelimited);
        encode_varint(len, &mut self.sink);
        self.sink.put_slice(value);
    }

    /// Emits a length-delimited record from text.
    ///
    /// Protobuf mandates UTF-8 for strings; `&str` already guarantees it.
    #[track_caller]
    pub fn emit_len_str<F: IntoFieldNumber>(&mut self, field: F, value: &str) {
        self.emit_len(field, value.as_bytes());
    }

    /// Emits a fixed 32-bit number. Matches `fixed32`, `sfixed32`.
    #[track_caller]
    pub fn emit_i32<F: IntoFieldNumber>(&mut self, field: F, value: u32) {
        self.emit_tag(field.field_number(), WireType::I32);
        self.sink.put_slice(&value.to_le_bytes());
    }

    /// Emits a `float` as its IEEE-754 bit pattern.
    #[track_caller]
    pub fn emit_f32<F: IntoFieldNumber>(&mut self, field: F, value: f32) {
        self.emit_i32(field, value.to_bits());
    }

    /// Emits a fixed 64-bit number. Matches `fixed64`, `sfixed64`.
    #[track_caller]
    pub fn emit_i64<F: IntoFieldNumber>(&mut self, field: F, value: u64) {
        self.emit_tag(field.field_number(), WireType::I64);
        self.sink.put_slice(&value.to_le_bytes());
    }

    /// Emits a `double` as its IEEE-754 bit pattern.
    #[track_caller]
    pub fn emit_f64<F: IntoFieldNumber>(&mut self, field: F, value: f64) {
        self.emit_i64(field, value.to_bits());
    }

    /// Emits two's complement varints as one packed record.
    ///
    /// Matches `repeated` packed `uint32`, `uint64`, `int32`, `int64`, `bool`.
    /// An empty slice still produces a record with a zero length.
    #[track_caller]
    pub fn emit_varint_packed<F: IntoFieldNumber, T: VarIntItem>(
        &mut self,
        field: F,
        values: &[T],
    ) {
        self.emit_varint_packed_iter(field, values.iter().map(|value| value.to_varint()));
    }

    /// Emits varints from a re-iterable source as one packed record.
    ///
    /// The source is walked twice: once to size the length prefix, once to
    /// write the elements.
    #[track_caller]
    pub fn emit_varint_packed_iter<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator<Item = u64>,
        I::IntoIter: Clone,
    {
        let field = field.field_number();
        let values = values.into_iter();
        let len = wire_len(values.clone().map(varint_len).sum());
        self.emit_tag(field, WireType::LengthDelimited);
        encode_varint(len, &mut self.sink);
        for value in values {
            encode_varint(value, &mut self.sink);
        }
    }

    /// Emits ZigZag varints as one packed record. Matches packed `sint32`,
    /// `sint64`.
    #[track_caller]
    pub fn emit_signed_varint_packed<F: IntoFieldNumber, T: SignedVarIntItem>(
        &mut self,
        field: F,
        values: &[T],
    ) {
        let field = field.field_number();
        let len = wire_len(packed_signed_varint_len(values));
        self.emit_tag(field, WireType::LengthDelimited);
        encode_varint(len, &mut self.sink);
        for value in values {
            encode_varint(zigzag_encode(value.to_signed()), &mut self.sink);
        }
    }

    /// Emits fixed 32-bit numbers as one packed record. Matches packed
    /// `fixed32`, `sfixed32`, `float`.
    #[track_caller]
    pub fn emit_i32_packed<F: IntoFieldNumber, T: Fixed32Item>(
        &mut self,
        field: F,
        values: &[T],
    ) {
        let field = field.field_number();
        let len = wire_len(fixed_payload_len(values.len(), FIXED32_LEN));
        self.emit_tag(field, WireType::LengthDelimited);
        encode_varint(len, &mut self.sink);
        for value in values {
            self.sink.put_slice(&value.to_fixed32().to_le_bytes());
        }
    }

    /// Emits fixed 64-bit numbers as one packed record. Matches packed
    /// `fixed64`, `sfixed64`, `double`.
    #[track_caller]
    pub fn emit_i64_packed<F: IntoFieldNumber, T: Fixed64Item>(
        &mut self,
        field: F,
        values: &[T],
    ) {
        let field = field.field_number();
        let len = wire_len(fixed_payload_len(values.len(), FIXED64_LEN));
        self.emit_tag(field, WireType::LengthDelimited);
        encode_varint(len, &mut self.sink);
        for value in values {
            self.sink.put_slice(&value.to_fixed64().to_le_bytes());
        }
    }

    fn emit_tag(&mut self, field: FieldNumber, wire_type: WireType) {
        encode_varint(u64::from(tag_value(field, wire_type)), &mut self.sink);
    }
}

/// Number of bytes the tag of `field` takes.
#[must_use]
pub const fn tag_len(field: FieldNumber) -> usize {
    // The wire type never changes the varint length of a tag.
    varint_len(tag_value(field, WireType::VarInt) as u64)
}

/// Size of a complete length-delimited record with a payload of
/// `payload_len` bytes: tag, length prefix, and payload.
#[must_use]
pub const fn len_record_len(field: FieldNumber, payload_len: usize) -> usize {
    tag_len(field) + varint_len(payload_len as u64) + payload_len
}

#[track_caller]
fn wire_len(length: usize) -> u64 {
    u64::try_from(length).unwrap_or_else(|_| panic!("{}", WireError::LengthOverflow { length }))
}

#[track_caller]
fn fixed_payload_len(count: usize, width: usize) -> usize {
    checked_fixed_payload_len(count, width).unwrap_or_else(|err| panic!("{err}"))
}

fn checked_fixed_payload_len(count: usize, width: usize) -> WireResult<usize> {
    count
        .checked_mul(width)
        .ok_or(WireError::PackedLengthOverflow { count, width })
}

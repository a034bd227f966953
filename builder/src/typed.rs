//! Schema-typed emitting functions.

use wire::{
    ByteSink, Emitter, Fixed32Item, Fixed64Item, IntoFieldNumber, SignedVarIntItem, VarIntItem,
};

use crate::enum_value::{enum_wire_value, EnumValue};
use crate::fits::FitsIn;

/// Protobuf builder with one method per schema field type.
///
/// Every scalar type comes in three shapes:
///
/// - `emit_<type>`: a singular field;
/// - `emit_<type>_repeated`: one tagged record per element, in order
///   (proto2 default, or `[packed = false]`);
/// - `emit_<type>_packed`: one length-delimited record holding all elements
///   untagged (proto3 default for scalar numeric types).
///
/// `string`, `bytes` and submessages have no packed shape.
///
/// Repeated and packed calls only accept element types whose range fits the
/// schema type ([`FitsIn`]), checked at compile time.
///
/// ```
/// use builder::Builder;
///
/// let mut out = Vec::new();
/// let mut builder = Builder::new(&mut out);
/// builder.emit_int32_repeated(1, [0, -1, 65537]);
/// builder.emit_int32_packed(2, &[0, -1, 65537]);
///
/// assert_eq!(out[0..2], [0x08, 0x00]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Builder<S> {
    emitter: Emitter<S>,
}

impl<S: ByteSink> Builder<S> {
    /// Creates a builder appending into `sink`.
    pub const fn new(sink: S) -> Self {
        Self {
            emitter: Emitter::new(sink),
        }
    }

    /// Low-level emitter, for records the typed surface doesn't cover.
    pub fn emitter(&mut self) -> &mut Emitter<S> {
        &mut self.emitter
    }

    /// Returns a reference to the sink.
    pub const fn sink(&self) -> &S {
        self.emitter.sink()
    }

    /// Consumes the builder and returns the sink.
    pub fn into_inner(self) -> S {
        self.emitter.into_inner()
    }

    //
    // double / float
    //

    /// Emits a `double` as little-endian `I64`.
    #[track_caller]
    pub fn emit_double<F: IntoFieldNumber>(&mut self, field: F, value: f64) {
        self.emitter.emit_f64(field, value);
    }

    /// Emits one `double` record per element.
    #[track_caller]
    pub fn emit_double_repeated<F: IntoFieldNumber>(&mut self, field: F, values: &[f64]) {
        for value in values {
            self.emitter.emit_f64(field, *value);
        }
    }

    /// Emits `double` values as one packed record, 8 bytes each.
    #[track_caller]
    pub fn emit_double_packed<F: IntoFieldNumber>(&mut self, field: F, values: &[f64]) {
        self.emitter.emit_i64_packed(field, values);
    }

    /// Emits a `float` as little-endian `I32`.
    #[track_caller]
    pub fn emit_float<F: IntoFieldNumber>(&mut self, field: F, value: f32) {
        self.emitter.emit_f32(field, value);
    }

    /// Emits one `float` record per element.
    #[track_caller]
    pub fn emit_float_repeated<F: IntoFieldNumber>(&mut self, field: F, values: &[f32]) {
        for value in values {
            self.emitter.emit_f32(field, *value);
        }
    }

    /// Emits `float` values as one packed record, 4 bytes each.
    #[track_caller]
    pub fn emit_float_packed<F: IntoFieldNumber>(&mut self, field: F, values: &[f32]) {
        self.emitter.emit_i32_packed(field, values);
    }

    //
    // int32 / int64: two's complement varints
    //

    /// Emits an `int32`. Negative values take 10 bytes on the wire.
    #[track_caller]
    pub fn emit_int32<F: IntoFieldNumber>(&mut self, field: F, value: i32) {
        self.emit_int64(field, i64::from(value));
    }

    /// Emits one `int32` record per element.
    #[track_caller]
    pub fn emit_int32_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i32>,
    {
        for value in values {
            self.emit_int32(field, value.widen());
        }
    }

    /// Emits `int32` values as one packed record of sign-extended varints.
    #[track_caller]
    pub fn emit_int32_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i32> + VarIntItem,
    {
        self.emitter.emit_varint_packed(field, values);
    }

    /// Emits an `int64`. Negative values take 10 bytes on the wire.
    #[track_caller]
    #[allow(clippy::cast_sign_loss)]
    pub fn emit_int64<F: IntoFieldNumber>(&mut self, field: F, value: i64) {
        self.emitter.emit_varint(field, value as u64);
    }

    /// Emits one `int64` record per element.
    #[track_caller]
    pub fn emit_int64_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i64>,
    {
        for value in values {
            self.emit_int64(field, value.widen());
        }
    }

    /// Emits `int64` values as one packed record of two's complement varints.
    #[track_caller]
    pub fn emit_int64_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i64> + VarIntItem,
    {
        self.emitter.emit_varint_packed(field, values);
    }

    //
    // uint32 / uint64
    //

    /// Emits a `uint32` as a `VARINT`.
    #[track_caller]
    pub fn emit_uint32<F: IntoFieldNumber>(&mut self, field: F, value: u32) {
        self.emitter.emit_varint(field, u64::from(value));
    }

    /// Emits one `uint32` record per element.
    #[track_caller]
    pub fn emit_uint32_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<u32>,
    {
        for value in values {
            self.emit_uint32(field, value.widen());
        }
    }

    /// Emits `uint32` values as one packed record of varints.
    #[track_caller]
    pub fn emit_uint32_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<u32> + VarIntItem,
    {
        self.emitter.emit_varint_packed(field, values);
    }

    /// Emits a `uint64` as a `VARINT`.
    #[track_caller]
    pub fn emit_uint64<F: IntoFieldNumber>(&mut self, field: F, value: u64) {
        self.emitter.emit_varint(field, value);
    }

    /// Emits one `uint64` record per element.
    #[track_caller]
    pub fn emit_uint64_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<u64>,
    {
        for value in values {
            self.emit_uint64(field, value.widen());
        }
    }

    /// Emits `uint64` values as one packed record of varints.
    #[track_caller]
    pub fn emit_uint64_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<u64> + VarIntItem,
    {
        self.emitter.emit_varint_packed(field, values);
    }

    //
    // sint32 / sint64: ZigZag varints
    //

    /// Emits a `sint32` as a ZigZag `VARINT`, so small negatives stay short.
    #[track_caller]
    pub fn emit_sint32<F: IntoFieldNumber>(&mut self, field: F, value: i32) {
        self.emitter.emit_signed_varint(field, i64::from(value));
    }

    /// Emits one `sint32` record per element.
    #[track_caller]
    pub fn emit_sint32_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i32>,
    {
        for value in values {
            self.emit_sint32(field, value.widen());
        }
    }

    /// Emits `sint32` values as one packed record of ZigZag varints.
    #[track_caller]
    pub fn emit_sint32_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i32> + SignedVarIntItem,
    {
        self.emitter.emit_signed_varint_packed(field, values);
    }

    /// Emits a `sint64` as a ZigZag `VARINT`.
    #[track_caller]
    pub fn emit_sint64<F: IntoFieldNumber>(&mut self, field: F, value: i64) {
        self.emitter.emit_signed_varint(field, value);
    }

    /// Emits one `sint64` record per element.
    #[track_caller]
    pub fn emit_sint64_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i64>,
    {
        for value in values {
            self.emit_sint64(field, value.widen());
        }
    }

    /// Emits `sint64` values as one packed record of ZigZag varints.
    #[track_caller]
    pub fn emit_sint64_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i64> + SignedVarIntItem,
    {
        self.emitter.emit_signed_varint_packed(field, values);
    }

    //
    // fixed32 / fixed64 / sfixed32 / sfixed64
    //

    /// Emits a `fixed32` as little-endian `I32`.
    #[track_caller]
    pub fn emit_fixed32<F: IntoFieldNumber>(&mut self, field: F, value: u32) {
        self.emitter.emit_i32(field, value);
    }

    /// Emits one `fixed32` record per element.
    #[track_caller]
    pub fn emit_fixed32_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<u32>,
    {
        for value in values {
            self.emit_fixed32(field, value.widen());
        }
    }

    /// Emits `fixed32` values as one packed record, 4 bytes each.
    #[track_caller]
    pub fn emit_fixed32_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<u32> + Fixed32Item,
    {
        self.emitter.emit_i32_packed(field, values);
    }

    /// Emits a `fixed64` as little-endian `I64`.
    #[track_caller]
    pub fn emit_fixed64<F: IntoFieldNumber>(&mut self, field: F, value: u64) {
        self.emitter.emit_i64(field, value);
    }

    /// Emits one `fixed64` record per element.
    #[track_caller]
    pub fn emit_fixed64_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<u64>,
    {
        for value in values {
            self.emit_fixed64(field, value.widen());
        }
    }

    /// Emits `fixed64` values as one packed record, 8 bytes each.
    #[track_caller]
    pub fn emit_fixed64_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<u64> + Fixed64Item,
    {
        self.emitter.emit_i64_packed(field, values);
    }

    /// Emits an `sfixed32` as its two's complement bits in little-endian `I32`.
    #[track_caller]
    #[allow(clippy::cast_sign_loss)]
    pub fn emit_sfixed32<F: IntoFieldNumber>(&mut self, field: F, value: i32) {
        self.emitter.emit_i32(field, value as u32);
    }

    /// Emits one `sfixed32` record per element.
    #[track_caller]
    pub fn emit_sfixed32_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i32>,
    {
        for value in values {
            self.emit_sfixed32(field, value.widen());
        }
    }

    /// Emits `sfixed32` values as one packed record, 4 bytes each.
    #[track_caller]
    pub fn emit_sfixed32_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i32> + Fixed32Item,
    {
        self.emitter.emit_i32_packed(field, values);
    }

    /// Emits an `sfixed64` as its two's complement bits in little-endian `I64`.
    #[track_caller]
    #[allow(clippy::cast_sign_loss)]
    pub fn emit_sfixed64<F: IntoFieldNumber>(&mut self, field: F, value: i64) {
        self.emitter.emit_i64(field, value as u64);
    }

    /// Emits one `sfixed64` record per element.
    #[track_caller]
    pub fn emit_sfixed64_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: FitsIn<i64>,
    {
        for value in values {
            self.emit_sfixed64(field, value.widen());
        }
    }

    /// Emits `sfixed64` values as one packed record, 8 bytes each.
    #[track_caller]
    pub fn emit_sfixed64_packed<F, T>(&mut self, field: F, values: &[T])
    where
        F: IntoFieldNumber,
        T: FitsIn<i64> + Fixed64Item,
    {
        self.emitter.emit_i64_packed(field, values);
    }

    //
    // bool
    //

    /// Emits a `bool` as a one-byte `VARINT` (`0` or `1`).
    #[track_caller]
    pub fn emit_bool<F: IntoFieldNumber>(&mut self, field: F, value: bool) {
        self.emitter.emit_varint(field, u64::from(value));
    }

    /// Emits one `bool` record per element.
    #[track_caller]
    pub fn emit_bool_repeated<F: IntoFieldNumber>(&mut self, field: F, values: &[bool]) {
        for value in values {
            self.emit_bool(field, *value);
        }
    }

    /// Emits `bool` values as one packed record, one byte each.
    #[track_caller]
    pub fn emit_bool_packed<F: IntoFieldNumber>(&mut self, field: F, values: &[bool]) {
        self.emitter.emit_varint_packed(field, values);
    }

    //
    // string / bytes / submessages: length-delimited, never packed
    //

    /// Emits a `string`. The UTF-8 contract is carried by `&str`.
    #[track_caller]
    pub fn emit_string<F: IntoFieldNumber>(&mut self, field: F, value: &str) {
        self.emitter.emit_len_str(field, value);
    }

    /// Emits one `string` record per element.
    #[track_caller]
    pub fn emit_string_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for value in values {
            self.emit_string(field, value.as_ref());
        }
    }

    /// Emits `bytes` from any contiguous byte sequence (slices, arrays,
    /// vectors, and text).
    #[track_caller]
    pub fn emit_bytes<F: IntoFieldNumber, B: AsRef<[u8]>>(&mut self, field: F, value: B) {
        self.emitter.emit_len(field, value.as_ref());
    }

    /// Emits one `bytes` record per element.
    #[track_caller]
    pub fn emit_bytes_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for value in values {
            self.emit_bytes(field, value);
        }
    }

    /// Emits an embedded message that the caller has already encoded.
    ///
    /// Maps are repeated submessages with `key = 1` and `value = 2`.
    #[track_caller]
    pub fn emit_submessage<F: IntoFieldNumber>(&mut self, field: F, encoded: &[u8]) {
        self.emitter.emit_len(field, encoded);
    }

    /// Emits one pre-encoded submessage record per element.
    #[track_caller]
    pub fn emit_submessage_repeated<F, I>(&mut self, field: F, messages: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for message in messages {
            self.emit_submessage(field, message.as_ref());
        }
    }

    /// Encodes an embedded message with a nested builder, then emits it.
    ///
    /// The nested body is buffered in a scratch vector because its length
    /// prefix comes first on the wire.
    ///
    /// ```
    /// use builder::Builder;
    ///
    /// let mut builder = Builder::new(Vec::new());
    /// builder.emit_submessage_with(3, |nested| nested.emit_int32(1, 150));
    /// assert_eq!(builder.into_inner(), [0x1A, 0x03, 0x08, 0x96, 0x01]);
    /// ```
    #[track_caller]
    pub fn emit_submessage_with<F, E>(&mut self, field: F, encode: E)
    where
        F: IntoFieldNumber,
        E: FnOnce(&mut Builder<Vec<u8>>),
    {
        let field = field.field_number();
        let mut nested = Builder::new(Vec::new());
        encode(&mut nested);
        self.emitter.emit_len(field, nested.sink());
    }

    //
    // enums
    //

    /// Emits an enum value.
    ///
    /// Panics if the value doesn't fit into a signed 32-bit integer.
    #[track_caller]
    pub fn emit_enum<F: IntoFieldNumber, E: EnumValue>(&mut self, field: F, value: E) {
        let value = enum_wire_value(value);
        self.emitter.emit_varint(field, value);
    }

    /// Emits one enum record per element, validating each as it goes.
    #[track_caller]
    pub fn emit_enum_repeated<F, I>(&mut self, field: F, values: I)
    where
        F: IntoFieldNumber,
        I: IntoIterator,
        I::Item: EnumValue,
    {
        for value in values {
            self.emit_enum(field, value);
        }
    }

    /// Emits enum values as one packed record.
    ///
    /// Every element is validated before the tag is written.
    #[track_caller]
    pub fn emit_enum_packed<F: IntoFieldNumber, E: EnumValue>(&mut self, field: F, values: &[E]) {
        let field = field.field_number();
        for value in values {
            enum_wire_value(*value);
        }
        self.emitter
            .emit_varint_packed_iter(field, values.iter().map(|value| enum_wire_value(*value)));
    }
}

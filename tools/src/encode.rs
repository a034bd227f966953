//! Encoding descriptions with the typed builder.

use builder::{checked_enum_value, Builder, ByteSink, EnumValue, FieldNumber};
use serde::Deserialize;
use serde_json::Value;
use wire::{encode_varint, tag_value, zigzag_encode, WireResult, WireType};

use crate::description::{
    json_type, parse_description, FieldDescription, FieldKind, MessageDescription,
};
use crate::error::{DescriptionError, DescriptionResult};
use crate::limits::EncodeLimits;

/// Parses and encodes a JSON message description.
pub fn encode_json(text: &str, limits: &EncodeLimits) -> DescriptionResult<Vec<u8>> {
    let message = parse_description(text, limits)?;
    encode_description(&message, limits)
}

/// Encodes a message description to wire bytes.
///
/// Every value is validated before its record is emitted, so no builder
/// contract can be violated by the description. On error the partial output
/// is dropped.
pub fn encode_description(
    message: &MessageDescription,
    limits: &EncodeLimits,
) -> DescriptionResult<Vec<u8>> {
    let mut builder = Builder::new(Vec::new());
    encode_message(&mut builder, message, limits, 0)?;
    Ok(builder.into_inner())
}

/// Bytes of `value` as a varint.
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    encode_varint(value, &mut out);
    out
}

/// Bytes of `value` as a ZigZag varint.
pub fn signed_varint_bytes(value: i64) -> Vec<u8> {
    varint_bytes(zigzag_encode(value))
}

/// Bytes of the tag for `field` and the raw wire type `wire_type`.
pub fn tag_bytes(field: i64, wire_type: u8) -> WireResult<Vec<u8>> {
    let field = FieldNumber::new(field)?;
    let wire_type = WireType::try_from(wire_type)?;
    Ok(varint_bytes(u64::from(tag_value(field, wire_type))))
}

fn encode_message<S: ByteSink>(
    builder: &mut Builder<S>,
    message: &MessageDescription,
    limits: &EncodeLimits,
    depth: usize,
) -> DescriptionResult<()> {
    if depth > limits.max_depth {
        return Err(DescriptionError::NestingTooDeep {
            depth,
            limit: limits.max_depth,
        });
    }
    for entry in &message.fields {
        encode_field(builder, entry, limits, depth)?;
    }
    Ok(())
}

/// Converts all values of a field, then emits them in the requested shape.
macro_rules! emit_scalars {
    ($builder:ident, $field:ident, $values:ident, $packed:ident, $convert:ident, $repeated:ident, $packed_fn:ident) => {{
        let converted = $values
            .iter()
            .map(|value| $field.$convert(value))
            .collect::<DescriptionResult<Vec<_>>>()?;
        if $packed {
            $builder.$packed_fn($field.number, &converted);
        } else {
            $builder.$repeated($field.number, &converted);
        }
    }};
}

fn encode_field<S: ByteSink>(
    builder: &mut Builder<S>,
    entry: &FieldDescription,
    limits: &EncodeLimits,
    depth: usize,
) -> DescriptionResult<()> {
    let field = FieldContext {
        number: FieldNumber::new(entry.field)?,
        raw: entry.field,
        kind: entry.kind,
    };
    if entry.packed && !entry.kind.is_packable() {
        return Err(DescriptionError::PackedNotAllowed {
            field: entry.field,
            kind: entry.kind,
        });
    }

    // A single value encodes exactly like a repeated field with one element.
    let (values, packed) = match &entry.value {
        Value::Array(items) => (items.as_slice(), entry.packed),
        value if entry.packed => return Err(field.mismatch(value)),
        value => (std::slice::from_ref(value), false),
    };

    match entry.kind {
        FieldKind::Double => emit_scalars!(
            builder, field, values, packed, double, emit_double_repeated, emit_double_packed
        ),
        FieldKind::Float => emit_scalars!(
            builder, field, values, packed, float, emit_float_repeated, emit_float_packed
        ),
        FieldKind::Int32 => emit_scalars!(
            builder, field, values, packed, int32, emit_int32_repeated, emit_int32_packed
        ),
        FieldKind::Int64 => emit_scalars!(
            builder, field, values, packed, int64, emit_int64_repeated, emit_int64_packed
        ),
        FieldKind::Uint32 => emit_scalars!(
            builder, field, values, packed, uint32, emit_uint32_repeated, emit_uint32_packed
        ),
        FieldKind::Uint64 => emit_scalars!(
            builder, field, values, packed, uint64, emit_uint64_repeated, emit_uint64_packed
        ),
        FieldKind::Sint32 => emit_scalars!(
            builder, field, values, packed, int32, emit_sint32_repeated, emit_sint32_packed
        ),
        FieldKind::Sint64 => emit_scalars!(
            builder, field, values, packed, int64, emit_sint64_repeated, emit_sint64_packed
        ),
        FieldKind::Fixed32 => emit_scalars!(
            builder, field, values, packed, uint32, emit_fixed32_repeated, emit_fixed32_packed
        ),
        FieldKind::Fixed64 => emit_scalars!(
            builder, field, values, packed, uint64, emit_fixed64_repeated, emit_fixed64_packed
        ),
        FieldKind::Sfixed32 => emit_scalars!(
            builder, field, values, packed, int32, emit_sfixed32_repeated, emit_sfixed32_packed
        ),
        FieldKind::Sfixed64 => emit_scalars!(
            builder, field, values, packed, int64, emit_sfixed64_repeated, emit_sfixed64_packed
        ),
        FieldKind::Bool => emit_scalars!(
            builder, field, values, packed, boolean, emit_bool_repeated, emit_bool_packed
        ),
        FieldKind::Enum => emit_scalars!(
            builder, field, values, packed, enumeration, emit_enum_repeated, emit_enum_packed
        ),
        FieldKind::String => {
            let texts = values
                .iter()
                .map(|value| field.text(value))
                .collect::<DescriptionResult<Vec<_>>>()?;
            builder.emit_string_repeated(field.number, texts);
        }
        FieldKind::Bytes => {
            let blobs = values
                .iter()
                .map(|value| field.bytes(value))
                .collect::<DescriptionResult<Vec<_>>>()?;
            builder.emit_bytes_repeated(field.number, &blobs);
        }
        FieldKind::Message => {
            for value in values {
                let nested = field.message(value)?;
                let mut result = Ok(());
                builder.emit_submessage_with(field.number, |nested_builder| {
                    result = encode_message(nested_builder, &nested, limits, depth + 1);
                });
                result?;
            }
        }
    }
    Ok(())
}

/// Enum number read from JSON, range-checked by the builder.
#[derive(Debug, Clone, Copy)]
struct JsonEnum(i64);

impl EnumValue for JsonEnum {
    fn enum_value(self) -> i64 {
        self.0
    }
}

/// Field being encoded, used to convert and attribute its values.
#[derive(Debug, Clone, Copy)]
struct FieldContext {
    number: FieldNumber,
    raw: i64,
    kind: FieldKind,
}

impl FieldContext {
    fn mismatch(self, value: &Value) -> DescriptionError {
        DescriptionError::TypeMismatch {
            field: self.raw,
            kind: self.kind,
            found: json_type(value),
        }
    }

    fn out_of_range(self, value: &Value) -> DescriptionError {
        DescriptionError::ValueOutOfRange {
            field: self.raw,
            kind: self.kind,
            value: value.to_string(),
        }
    }

    fn integer<T: TryFrom<i128>>(self, value: &Value) -> DescriptionResult<T> {
        let wide = match value {
            Value::Number(number) => number
                .as_i64()
                .map(i128::from)
                .or_else(|| number.as_u64().map(i128::from)),
            Value::String(text) => text.trim().parse::<i128>().ok(),
            _ => None,
        };
        let wide = wide.ok_or_else(|| self.mismatch(value))?;
        T::try_from(wide).map_err(|_| self.out_of_range(value))
    }

    fn int32(self, value: &Value) -> DescriptionResult<i32> {
        self.integer(value)
    }

    fn int64(self, value: &Value) -> DescriptionResult<i64> {
        self.integer(value)
    }

    fn uint32(self, value: &Value) -> DescriptionResult<u32> {
        self.integer(value)
    }

    fn uint64(self, value: &Value) -> DescriptionResult<u64> {
        self.integer(value)
    }

    fn enumeration(self, value: &Value) -> DescriptionResult<i32> {
        let number = self.int64(value)?;
        Ok(checked_enum_value(JsonEnum(number))?)
    }

    fn double(self, value: &Value) -> DescriptionResult<f64> {
        match value {
            Value::Number(number) => number.as_f64().ok_or_else(|| self.mismatch(value)),
            Value::String(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(self.mismatch(value)),
            },
            _ => Err(self.mismatch(value)),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn float(self, value: &Value) -> DescriptionResult<f32> {
        let wide = self.double(value)?;
        let narrow = wide as f32;
        if narrow.is_infinite() && wide.is_finite() {
            return Err(self.out_of_range(value));
        }
        Ok(narrow)
    }

    fn boolean(self, value: &Value) -> DescriptionResult<bool> {
        value.as_bool().ok_or_else(|| self.mismatch(value))
    }

    fn text(self, value: &Value) -> DescriptionResult<&str> {
        value.as_str().ok_or_else(|| self.mismatch(value))
    }

    fn bytes(self, value: &Value) -> DescriptionResult<Vec<u8>> {
        let text = self.text(value)?;
        let compact: String = text.split_whitespace().collect();
        hex::decode(compact).map_err(|source| DescriptionError::InvalidBytes {
            field: self.raw,
            source,
        })
    }

    fn message(self, value: &Value) -> DescriptionResult<MessageDescription> {
        if !value.is_object() {
            return Err(self.mismatch(value));
        }
        MessageDescription::deserialize(value).map_err(|err| DescriptionError::Json {
            reason: format!("field {}: {err}", self.raw),
        })
    }
}

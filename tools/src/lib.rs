//! Command-line tooling for pbemit.
//!
//! This crate encodes Protocol Buffers messages described in JSON, so wire
//! bytes can be produced and inspected without generated code:
//!
//! - Encode a message description to hex or raw bytes
//! - Show the varint or ZigZag encoding of a value
//! - Show the tag bytes for a field number and wire type
//!
//! # Design Principles
//!
//! - **Validate, then emit** - Untrusted input goes through the fallible
//!   validators, so the builder's contract checks never fire.
//! - **Same bytes as the library** - Descriptions are encoded by the typed
//!   builder, one call per field.

mod description;
mod encode;
mod error;
mod limits;

pub use description::{parse_description, FieldDescription, FieldKind, MessageDescription};
pub use encode::{encode_description, encode_json, signed_varint_bytes, tag_bytes, varint_bytes};
pub use error::{DescriptionError, DescriptionResult};
pub use limits::EncodeLimits;

/// Formats bytes as space-separated uppercase hex pairs.
pub fn format_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode_upper(bytes);
    let mut out = String::with_capacity(encoded.len() + bytes.len());
    for (idx, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.extend(pair.iter().map(|&digit| char::from(digit)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = EncodeLimits::default();
        let _ = MessageDescription::default();
        let _ = FieldKind::Int32;
        let _: DescriptionResult<Vec<u8>> = Ok(varint_bytes(1));
    }

    #[test]
    fn hex_pairs() {
        assert_eq!(format_hex(&[]), "");
        assert_eq!(format_hex(&[0x0A]), "0A");
        assert_eq!(format_hex(&[0x08, 0x96, 0x01]), "08 96 01");
    }
}

use proptest::prelude::*;
use wire::{
    encode_varint, packed_signed_varint_len, packed_varint_len, varint_len, zigzag_encode,
    Emitter, MAX_VARINT_LEN,
};

fn decode_varint(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (idx, byte) in bytes.iter().enumerate().take(MAX_VARINT_LEN) {
        value |= u64::from(byte & 0x7F) << (7 * idx);
        if byte & 0x80 == 0 {
            return Some((value, idx + 1));
        }
    }
    None
}

#[allow(clippy::cast_possible_wrap)]
fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

proptest! {
    #[test]
    fn prop_varint_roundtrip(value in any::<u64>()) {
        let mut out = Vec::new();
        encode_varint(value, &mut out);

        prop_assert_eq!(out.len(), varint_len(value));
        prop_assert!((1..=MAX_VARINT_LEN).contains(&out.len()));
        prop_assert_eq!(out.last().copied().unwrap() & 0x80, 0);
        prop_assert!(out[..out.len() - 1].iter().all(|byte| byte & 0x80 != 0));
        prop_assert_eq!(decode_varint(&out), Some((value, out.len())));
    }

    #[test]
    fn prop_varint_len_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(varint_len(lo) <= varint_len(hi));
    }

    #[test]
    fn prop_zigzag_inverse(value in any::<i64>()) {
        prop_assert_eq!(zigzag_decode(zigzag_encode(value)), value);
    }

    #[test]
    fn prop_zigzag_keeps_small_values_short(value in -64i64..64) {
        prop_assert_eq!(varint_len(zigzag_encode(value)), 1);
    }

    #[test]
    fn prop_packed_prefix_matches_body(values in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_varint_packed(1, &values);
        let out = emitter.into_inner();

        prop_assert_eq!(out[0], 0x0A);
        let (len, prefix_len) = decode_varint(&out[1..]).unwrap();
        let body = &out[1 + prefix_len..];
        prop_assert_eq!(usize::try_from(len).unwrap(), body.len());
        prop_assert_eq!(body.len(), packed_varint_len(&values));

        let mut offset = 0;
        for value in &values {
            let (decoded, used) = decode_varint(&body[offset..]).unwrap();
            #[allow(clippy::cast_sign_loss)]
            let expected = *value as u64;
            prop_assert_eq!(decoded, expected);
            offset += used;
        }
        prop_assert_eq!(offset, body.len());
    }

    #[test]
    fn prop_packed_signed_prefix_matches_body(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_signed_varint_packed(3, &values);
        let out = emitter.into_inner();

        prop_assert_eq!(out[0], 0x1A);
        let (len, prefix_len) = decode_varint(&out[1..]).unwrap();
        let body = &out[1 + prefix_len..];
        prop_assert_eq!(usize::try_from(len).unwrap(), body.len());
        prop_assert_eq!(body.len(), packed_signed_varint_len(&values));

        let mut offset = 0;
        for value in &values {
            let (decoded, used) = decode_varint(&body[offset..]).unwrap();
            prop_assert_eq!(zigzag_decode(decoded), i64::from(*value));
            offset += used;
        }
    }

    #[test]
    fn prop_packed_fixed_len_is_count_times_width(
        narrow in prop::collection::vec(any::<u32>(), 0..64),
        wide in prop::collection::vec(any::<u64>(), 0..64),
    ) {
        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_i32_packed(1, &narrow);
        let out = emitter.into_inner();
        let (len, prefix_len) = decode_varint(&out[1..]).unwrap();
        prop_assert_eq!(usize::try_from(len).unwrap(), narrow.len() * 4);
        prop_assert_eq!(out.len(), 1 + prefix_len + narrow.len() * 4);

        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_i64_packed(1, &wide);
        let out = emitter.into_inner();
        let (len, prefix_len) = decode_varint(&out[1..]).unwrap();
        prop_assert_eq!(usize::try_from(len).unwrap(), wide.len() * 8);
        for (chunk, value) in out[1 + prefix_len..].chunks_exact(8).zip(&wide) {
            prop_assert_eq!(u64::from_le_bytes(chunk.try_into().unwrap()), *value);
        }
    }

    #[test]
    fn prop_tag_decodes_to_field_and_type(field in 1u32..=536_870_911) {
        let mut emitter = Emitter::new(Vec::new());
        emitter.emit_i32(field, 0);
        let out = emitter.into_inner();
        let (tag, tag_len) = decode_varint(&out).unwrap();
        prop_assert_eq!(tag >> 3, u64::from(field));
        prop_assert_eq!(tag & 0b111, 5);
        prop_assert_eq!(out.len(), tag_len + 4);
    }
}

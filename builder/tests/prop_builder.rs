use builder::{checked_enum_value, Builder, LenCounter};
use proptest::prelude::*;

fn decode_varint(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (idx, byte) in bytes.iter().enumerate().take(10) {
        value |= u64::from(byte & 0x7F) << (7 * idx);
        if byte & 0x80 == 0 {
            return Some((value, idx + 1));
        }
    }
    None
}

/// Strips the tag and length prefix of a single packed record.
fn packed_body(record: &[u8]) -> &[u8] {
    let (_, tag_len) = decode_varint(record).unwrap();
    let (len, len_len) = decode_varint(&record[tag_len..]).unwrap();
    let body = &record[tag_len + len_len..];
    assert_eq!(usize::try_from(len).unwrap(), body.len());
    body
}

/// Concatenated payloads of repeated records, tags removed.
fn repeated_payloads(mut records: &[u8], width: Option<usize>) -> Vec<u8> {
    let mut payloads = Vec::new();
    while !records.is_empty() {
        let (_, tag_len) = decode_varint(records).unwrap();
        records = &records[tag_len..];
        let used = match width {
            Some(width) => width,
            None => decode_varint(records).unwrap().1,
        };
        payloads.extend_from_slice(&records[..used]);
        records = &records[used..];
    }
    payloads
}

proptest! {
    #[test]
    fn prop_int32_packed_matches_repeated(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let mut repeated = Builder::new(Vec::new());
        repeated.emit_int32_repeated(5, &values);
        let mut packed = Builder::new(Vec::new());
        packed.emit_int32_packed(5, &values);

        let packed = packed.into_inner();
        prop_assert_eq!(repeated_payloads(&repeated.into_inner(), None), packed_body(&packed));
    }

    #[test]
    fn prop_sint64_packed_matches_repeated(values in prop::collection::vec(any::<i64>(), 0..32)) {
        let mut repeated = Builder::new(Vec::new());
        repeated.emit_sint64_repeated(7, &values);
        let mut packed = Builder::new(Vec::new());
        packed.emit_sint64_packed(7, &values);

        let packed = packed.into_inner();
        prop_assert_eq!(repeated_payloads(&repeated.into_inner(), None), packed_body(&packed));
    }

    #[test]
    fn prop_sfixed32_packed_matches_repeated(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let mut repeated = Builder::new(Vec::new());
        repeated.emit_sfixed32_repeated(2, &values);
        let mut packed = Builder::new(Vec::new());
        packed.emit_sfixed32_packed(2, &values);

        let packed = packed.into_inner();
        prop_assert_eq!(repeated_payloads(&repeated.into_inner(), Some(4)), packed_body(&packed));
    }

    #[test]
    fn prop_double_packed_matches_repeated(values in prop::collection::vec(any::<f64>(), 0..32)) {
        let mut repeated = Builder::new(Vec::new());
        repeated.emit_double_repeated(9, &values);
        let mut packed = Builder::new(Vec::new());
        packed.emit_double_packed(9, &values);

        let packed = packed.into_inner();
        prop_assert_eq!(repeated_payloads(&repeated.into_inner(), Some(8)), packed_body(&packed));
    }

    #[test]
    fn prop_enum_packed_matches_repeated(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let mut repeated = Builder::new(Vec::new());
        repeated.emit_enum_repeated(3, &values);
        let mut packed = Builder::new(Vec::new());
        packed.emit_enum_packed(3, &values);

        let packed = packed.into_inner();
        prop_assert_eq!(repeated_payloads(&repeated.into_inner(), None), packed_body(&packed));
    }

    #[test]
    fn prop_narrow_elements_encode_like_widened(values in prop::collection::vec(any::<i16>(), 0..32)) {
        let widened: Vec<i32> = values.iter().map(|value| i32::from(*value)).collect();

        let mut narrow = Builder::new(Vec::new());
        narrow.emit_int32_packed(1, &values);
        narrow.emit_sint32_packed(2, &values);
        narrow.emit_sfixed32_packed(3, &values);
        let mut wide = Builder::new(Vec::new());
        wide.emit_int32_packed(1, &widened);
        wide.emit_sint32_packed(2, &widened);
        wide.emit_sfixed32_packed(3, &widened);

        prop_assert_eq!(narrow.into_inner(), wide.into_inner());
    }

    #[test]
    fn prop_checked_enum_value_matches_i32_range(value in any::<u32>()) {
        prop_assert_eq!(checked_enum_value(value).is_ok(), i32::try_from(value).is_ok());
    }

    #[test]
    fn prop_counter_agrees_with_vec(
        strings in prop::collection::vec(".{0,40}", 0..8),
        numbers in prop::collection::vec(any::<u64>(), 0..16),
    ) {
        let mut sized = Builder::new(LenCounter::new());
        let mut stored = Builder::new(Vec::new());
        sized.emit_string_repeated(1, &strings);
        stored.emit_string_repeated(1, &strings);
        sized.emit_uint64_packed(2, &numbers);
        stored.emit_uint64_packed(2, &numbers);
        sized.emit_fixed64_repeated(3, &numbers);
        stored.emit_fixed64_repeated(3, &numbers);

        prop_assert_eq!(sized.sink().len(), stored.sink().len());
    }
}

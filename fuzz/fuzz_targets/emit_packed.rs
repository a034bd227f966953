#![no_main]

use builder::{Builder, LenCounter};
use libfuzzer_sys::fuzz_target;

fn read_varint(bytes: &[u8]) -> (u64, usize) {
    let mut value = 0u64;
    for (idx, byte) in bytes.iter().enumerate().take(10) {
        value |= u64::from(byte & 0x7F) << (7 * idx);
        if byte & 0x80 == 0 {
            return (value, idx + 1);
        }
    }
    panic!("unterminated varint");
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let values: Vec<i64> = rest
        .chunks_exact(8)
        .take(512)
        .map(|chunk| i64::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    let field = u32::from(selector) % 64 + 1;

    let mut builder = Builder::new(Vec::new());
    let mut counter = Builder::new(LenCounter::new());
    match selector % 4 {
        0 => {
            builder.emit_int64_packed(field, &values);
            counter.emit_int64_packed(field, &values);
        }
        1 => {
            builder.emit_sint64_packed(field, &values);
            counter.emit_sint64_packed(field, &values);
        }
        2 => {
            builder.emit_sfixed64_packed(field, &values);
            counter.emit_sfixed64_packed(field, &values);
        }
        _ => {
            let enums: Vec<i32> = values.iter().map(|&value| value as i32).collect();
            builder.emit_enum_packed(field, &enums);
            counter.emit_enum_packed(field, &enums);
        }
    }
    let out = builder.into_inner();
    assert_eq!(out.len(), counter.sink().len());

    let (_, tag_len) = read_varint(&out);
    let (len, len_len) = read_varint(&out[tag_len..]);
    assert_eq!(len as usize, out.len() - tag_len - len_len);
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use pbemit_tools::{encode_json, EncodeLimits};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = encode_json(text, &EncodeLimits::for_testing());
    }
});

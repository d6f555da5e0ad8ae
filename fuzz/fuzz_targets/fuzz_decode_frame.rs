#![no_main]

use jt808_rs::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte string must decode without panicking
    let result = decode_frame(data);
    if !data.is_empty() {
        let body_end = result.body_offset + result.body.len();
        assert!(body_end <= result.payload.len().max(result.body_offset));
    }

    // Wrapped in flags, the same bytes go through unstuffing and header decode
    let mut framed = Vec::with_capacity(data.len() + 2);
    framed.push(0x7E);
    framed.extend_from_slice(data);
    framed.push(0x7E);
    let framed_result = decode_frame(&framed);
    assert!(framed_result.has_start_flag && framed_result.has_end_flag);

    // Flip the check code
    if framed.len() > 3 {
        let idx = framed.len() - 2;
        framed[idx] = framed[idx].wrapping_add(1);
        let _ = decode_frame(&framed);
    }
});

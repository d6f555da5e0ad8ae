#![no_main]

use jt808_rs::{parse_param_list, Registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte is the declared count, the rest the entries
    let count = usize::from(data[0]);
    let result = parse_param_list(data, 1, count, 13, Registry::builtin());
    assert!(result.entries.len() <= count);
    assert!(result.cursor <= data.len());
    assert_eq!(result.lines.len() % 3, 0);
});

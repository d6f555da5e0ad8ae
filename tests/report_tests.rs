//! Report rendering for valid, degraded and broken frames.

mod common;

use common::{build_frame, content, wrap};
use jt808_rs::report::{render_text, rows, rows_covering, status_text, summary, Status};
use jt808_rs::{decode_frame, decode_hex_str, ByteRange, Registry};

#[test]
fn test_status_levels() {
    let valid = decode_frame(&build_frame(0x0002, 1, &[]));
    assert_eq!(Status::of(&valid), Status::Valid);

    let warned = decode_frame(&wrap(&content(0x0102, 1, 1, b"AB")));
    assert_eq!(Status::of(&warned), Status::Warning);
    assert_eq!(status_text(&warned), "Warnings found (1).");

    let broken = decode_frame(&[0x7E, 0x7E]);
    assert_eq!(Status::of(&broken), Status::Invalid);
    assert_eq!(Status::Invalid.to_string(), "Invalid");
}

#[test]
fn test_summary_reports_encryption_and_sub_package() {
    let c = content(0x0900, 0x2400, 1, &[0x00, 0x01, 0x00, 0x01]);
    let result = decode_frame(&wrap(&c));
    assert_eq!(
        summary(&result),
        "Message ID: 0x0900 | Body length: 0 bytes | Encryption mode: 1 (RSA) | Sub-package: yes | Checksum: valid"
    );
}

#[test]
fn test_summary_invalid_checksum() {
    let mut frame = build_frame(0x0002, 1, &[]);
    let last = frame.len() - 2;
    frame[last] ^= 0x01;
    let text = summary(&decode_frame(&frame));
    assert!(text.ends_with("Checksum: invalid"), "{text}");
}

#[test]
fn test_sub_package_and_extra_rows() {
    let c = content(0x0102, 0x2002, 1, &[0x00, 0x02, 0x00, 0x01, b'O', b'K', 0xEE]);
    let result = decode_frame(&wrap(&c));
    let table = rows(&result, Registry::builtin());
    let labels: Vec<&str> = table.iter().map(|r| r.label.as_str()).collect();
    assert!(labels.contains(&"Sub-package total"));
    assert!(labels.contains(&"Sub-package index"));

    let extra = table.iter().find(|r| r.label == "Extra bytes").unwrap();
    assert_eq!(extra.hex, "EE");
    assert_eq!(extra.range, Some(ByteRange { start: 18, end: 18 }));

    let body = table.iter().find(|r| r.label == "Message Body").unwrap();
    assert_eq!(body.hex, "4F4B");
    assert_eq!(body.range, Some(ByteRange { start: 16, end: 17 }));
}

#[test]
fn test_unknown_message_row() {
    let result = decode_frame(&build_frame(0x0704, 1, &[]));
    let table = rows(&result, Registry::builtin());
    assert_eq!(
        table[1].meaning,
        "Message identifier. No description registered for this message ID."
    );

    let registry = Registry::with_overrides_json(
        r#"{ "messages": [ { "id": "0x0704", "name": "Bulk Location Upload", "flow": "Batch of reports." } ] }"#,
    )
    .unwrap();
    let table = rows(&result, &registry);
    assert!(table[1].meaning.contains("Bulk Location Upload"));
}

#[test]
fn test_body_lines_found_by_range() {
    let result = decode_frame(&build_frame(0x8001, 1, &[0x00, 0x05, 0x02, 0x00, 0x00]));
    let table = rows(&result, Registry::builtin());
    let hits = rows_covering(&table, ByteRange { start: 14, end: 14 });
    assert_eq!(hits, ["Message Body", "Answered message ID"]);
}

#[test]
fn test_render_text_sample() {
    let result = decode_hex_str("7E000200003440500493730104C77E").unwrap();
    let text = render_text(&result, Registry::builtin());
    let expected_lines = [
        "Status: Valid message.",
        "Escaped payload: 00 02 00 00 34 40 50 04 93 73 01 04 C7",
        "Device ID (BCD[6]) [4-9] | 344050049373 | Last 12 IMEI digits: 344050049373",
        "Sequence Number [10-11] | 260 | Message sequence number",
        "    - | Heartbeat without payload.",
        "Checksum [12] | C7 | Computed: C7 (OK)",
        "End flag | 7E | Frame end",
    ];
    for line in expected_lines {
        assert!(text.lines().any(|l| l == line), "missing line {line:?} in\n{text}");
    }
    assert!(!text.contains("Warning:"));
}

#[test]
fn test_report_serializes() {
    let result = decode_hex_str("7E000200003440500493730104C77E").unwrap();
    let json = serde_json::to_value(rows(&result, Registry::builtin())).unwrap();
    assert_eq!(json[0]["label"], "Start flag");
    assert!(json[0].get("lines").is_none());
    assert_eq!(json[6]["lines"][0]["label"], "Heartbeat without payload.");
}

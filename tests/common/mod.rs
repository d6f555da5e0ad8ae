// Frame construction helpers shared by the integration tests
#![allow(dead_code)]

pub const DEVICE: &str = "013912345678";

pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    jt808_rs::util::hex::hex_to_bytes(hex)
}

/// Applies JT808 byte stuffing: 7E -> 7D 02, 7D -> 7D 01.
pub fn stuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len());
    for &b in payload {
        match b {
            0x7E => out.extend_from_slice(&[0x7D, 0x02]),
            0x7D => out.extend_from_slice(&[0x7D, 0x01]),
            other => out.push(other),
        }
    }
    out
}

/// Header + body, without check code.
pub fn content(message_id: u16, props: u16, seq: u16, body: &[u8]) -> Vec<u8> {
    let mut c = Vec::new();
    c.extend_from_slice(&message_id.to_be_bytes());
    c.extend_from_slice(&props.to_be_bytes());
    c.extend_from_slice(&hex_to_bytes(DEVICE));
    c.extend_from_slice(&seq.to_be_bytes());
    c.extend_from_slice(body);
    c
}

/// Complete delimited, stuffed frame with a correct check code.
pub fn build_frame(message_id: u16, seq: u16, body: &[u8]) -> Vec<u8> {
    let props = body.len() as u16;
    wrap(&content(message_id, props, seq, body))
}

/// Appends the check code to `content`, stuffs and delimits it.
pub fn wrap(content: &[u8]) -> Vec<u8> {
    let mut payload = content.to_vec();
    payload.push(content.iter().fold(0u8, |acc, b| acc ^ b));
    let mut frame = vec![0x7E];
    frame.extend(stuff(&payload));
    frame.push(0x7E);
    frame
}

mod answer;
mod decoder;
mod header;
mod message;
mod question;

use crate::error::{DnsError, Result};

pub use answer::Answer;
pub use decoder::{DecodeState, Decoder};
pub use header::{Header, HEADER_LEN, NOT_IMPLEMENTED, NO_ERROR, OPCODE_QUERY, SERVER_FAILURE};
pub use message::Message;
pub use question::Question;

pub const PACKET_SIZE: usize = 512;
pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

const C_FACTOR: u8 = 0xc0;
const DC_FACTOR: u16 = 0x3fff;
const MAX_LABEL_LEN: usize = 63;
const MAX_POINTER_DEPTH: usize = 16;

/// Encodes a dotted name as length prefixed labels closed by a zero byte.
pub fn wrap_name(name: &str) -> Result<Vec<u8>> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    let mut vec = Vec::with_capacity(trimmed.len() + 2);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DnsError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DnsError::LabelTooLong(label.to_string()));
            }
            vec.push(label.len() as u8);
            vec.extend(label.bytes());
        }
    }
    vec.push(0);
    Ok(vec)
}

/// Decodes the name at `start`, returning it with the number of bytes it
/// occupies at `start`. Bytes reached through a compression pointer lie
/// elsewhere in the packet and are not counted.
pub fn unzip_name(buffer: &[u8], start: usize, follow_pointers: bool) -> Result<(String, usize)> {
    let mut labels = Vec::new();
    let consumed = parse_name(buffer, start, follow_pointers, 0, &mut labels)?;
    Ok((labels.join("."), consumed))
}

fn parse_name(
    buffer: &[u8],
    start: usize,
    follow_pointers: bool,
    depth: usize,
    labels: &mut Vec<String>,
) -> Result<usize> {
    let mut pos = start;
    loop {
        let len = *buffer.get(pos).ok_or(DnsError::ShortPacket)?;
        if len & C_FACTOR == C_FACTOR {
            let low = *buffer
                .get(pos + 1)
                .ok_or(DnsError::MalformedPointer { offset: pos })?;
            let target = (u16::from_be_bytes([len, low]) & DC_FACTOR) as usize;
            // only strictly backward jumps, and a bounded number of them
            if !follow_pointers || target >= pos || depth >= MAX_POINTER_DEPTH {
                return Err(DnsError::MalformedPointer { offset: pos });
            }
            parse_name(buffer, target, true, depth + 1, labels)?;
            return Ok(pos + 2 - start);
        }
        if len & C_FACTOR != 0 {
            return Err(DnsError::InvalidLabel { offset: pos });
        }
        pos += 1;
        if len == 0 {
            return Ok(pos - start);
        }
        let label = buffer
            .get(pos..pos + len as usize)
            .ok_or(DnsError::ShortPacket)?;
        // the label must encode back to the same bytes
        let label = std::str::from_utf8(label)
            .ok()
            .filter(|label| !label.contains('.'))
            .ok_or(DnsError::InvalidLabel { offset: pos - 1 })?;
        labels.push(label.to_string());
        pos += len as usize;
    }
}

use crate::error::{DnsError, Result};

const MAX_WIDTH: u32 = 32;

fn check_span(buffer: &[u8], bit_cursor: usize, bit_count: u32) -> Result<()> {
    if bit_count > MAX_WIDTH {
        return Err(DnsError::InvalidWidth(bit_count));
    }
    let end = bit_cursor
        .checked_add(bit_count as usize)
        .ok_or(DnsError::OutOfBounds)?;
    if end > buffer.len() * 8 {
        return Err(DnsError::OutOfBounds);
    }
    Ok(())
}

/// Packs the low `bit_count` bits of `value` into `buffer` at `bit_cursor`,
/// most significant bit first. Returns the advanced cursor.
pub fn write_bits(buffer: &mut [u8], bit_cursor: usize, value: u32, bit_count: u32) -> Result<usize> {
    check_span(buffer, bit_cursor, bit_count)?;
    let value = value as u64;
    let mut pos = bit_cursor;
    let mut remaining = bit_count;
    while remaining > 0 {
        let room = 8 - (pos % 8) as u32;
        let n = remaining.min(room);
        let shift = room - n;
        let chunk = ((value >> (remaining - n)) & ((1u64 << n) - 1)) as u8;
        let mask = (((1u16 << n) - 1) as u8) << shift;
        let byte = &mut buffer[pos / 8];
        *byte = (*byte & !mask) | (chunk << shift);
        pos += n as usize;
        remaining -= n;
    }
    Ok(pos)
}

/// Mirror of [`write_bits`]: returns the value and the advanced cursor.
pub fn read_bits(buffer: &[u8], bit_cursor: usize, bit_count: u32) -> Result<(u32, usize)> {
    check_span(buffer, bit_cursor, bit_count)?;
    let mut value = 0u64;
    let mut pos = bit_cursor;
    let mut remaining = bit_count;
    while remaining > 0 {
        let room = 8 - (pos % 8) as u32;
        let n = remaining.min(room);
        let shift = room - n;
        let bits = (buffer[pos / 8] >> shift) as u64 & ((1u64 << n) - 1);
        value = (value << n) | bits;
        pos += n as usize;
        remaining -= n;
    }
    Ok((value as u32, pos))
}

pub struct BitWriter {
    buffer: Vec<u8>,
    pos: usize,
}

impl BitWriter {
    pub fn new(size: usize) -> Self {
        BitWriter {
            buffer: vec![0u8; size],
            pos: 0,
        }
    }

    pub fn write(&mut self, value: u32, bit_count: u32) -> Result<()> {
        self.pos = write_bits(&mut self.buffer, self.pos, value, bit_count)?;
        Ok(())
    }

    pub fn write_flag(&mut self, flag: bool) -> Result<()> {
        self.write(flag as u32, 1)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

pub struct BitReader<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        BitReader {
            buffer,
            pos: 0,
        }
    }

    pub fn read(&mut self, bit_count: u32) -> Result<u32> {
        let (value, pos) = read_bits(self.buffer, self.pos, bit_count)?;
        self.pos = pos;
        Ok(value)
    }

    pub fn read_flag(&mut self) -> Result<bool> {
        Ok(self.read(1)? != 0)
    }
}

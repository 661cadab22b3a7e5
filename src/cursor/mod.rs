mod bits;

use crate::error::{DnsError, Result};

pub use bits::{read_bits, write_bits, BitReader, BitWriter};

/// Read cursor over one packet. Every `take` is bounds checked and fails
/// with `ShortPacket` instead of panicking.
pub struct Cursor<'a> {
    buf: &'a [u8],
    current: usize,
}

impl<'a> Cursor<'a> {
    pub fn form(buf: &'a [u8]) -> Self {
        Cursor {
            buf,
            current: 0,
        }
    }

    pub fn at(&mut self, index: usize) {
        self.current = index;
    }

    pub fn move_to(&mut self, step: usize) {
        self.current += step;
    }

    pub fn get_current_index(&self) -> usize {
        self.current
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.current)
    }

    pub fn take(&mut self) -> Result<u8> {
        let result = *self.buf.get(self.current).ok_or(DnsError::ShortPacket)?;
        self.current += 1;
        Ok(result)
    }

    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.current.checked_add(len).ok_or(DnsError::ShortPacket)?;
        let result = self.buf.get(self.current..end).ok_or(DnsError::ShortPacket)?;
        self.current = end;
        Ok(result)
    }

    pub fn take_u16(&mut self) -> Result<u16> {
        let slice = self.take_slice(2)?;
        Ok(u16::from_be_bytes([slice[0], slice[1]]))
    }

    pub fn take_u32(&mut self) -> Result<u32> {
        let slice = self.take_slice(4)?;
        Ok(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::DnsError;

    #[test]
    fn should_return_big_endian_values_when_call_take_given_valid_bytes() {
        let bytes = [0x12, 0x34, 0x00, 0x00, 0x00, 0x3c, 0xff];
        let mut cursor = Cursor::form(&bytes);

        let short = cursor.take_u16().unwrap();
        let long = cursor.take_u32().unwrap();
        let byte = cursor.take().unwrap();

        assert_eq!(0x1234, short);
        assert_eq!(60, long);
        assert_eq!(0xff, byte);
        assert_eq!(0, cursor.remaining());
    }

    #[test]
    fn should_return_short_packet_when_call_take_slice_given_not_enough_bytes() {
        let bytes = [1, 2, 3];
        let mut cursor = Cursor::form(&bytes);
        cursor.at(2);

        let result = cursor.take_slice(2);

        assert!(matches!(result, Err(DnsError::ShortPacket)));
        assert_eq!(2, cursor.get_current_index());
    }

    #[test]
    fn should_return_short_packet_when_call_take_given_cursor_past_end() {
        let bytes = [1];
        let mut cursor = Cursor::form(&bytes);
        cursor.move_to(5);

        let result = cursor.take();

        assert!(matches!(result, Err(DnsError::ShortPacket)));
        assert_eq!(0, cursor.remaining());
    }
}

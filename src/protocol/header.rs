use crate::cursor::{BitReader, BitWriter};
use crate::error::{DnsError, Result};

pub const HEADER_LEN: usize = 12;

pub const OPCODE_QUERY: u8 = 0;

pub const NO_ERROR: u8 = 0;
pub const SERVER_FAILURE: u8 = 2;
pub const NOT_IMPLEMENTED: u8 = 4;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub query_response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub reserved: u8,
    pub response_code: u8,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Outgoing one-question request that reuses the id and opcode of `origin`.
    pub fn query_from(origin: &Header) -> Self {
        Header {
            id: origin.id,
            opcode: origin.opcode,
            recursion_desired: origin.recursion_desired,
            question_count: 1,
            ..Header::default()
        }
    }

    /// Response header for a request handled by a server capable of recursion.
    /// Counts are filled in when the message is encoded.
    pub fn response_to(request: &Header) -> Self {
        Header {
            id: request.id,
            query_response: true,
            opcode: request.opcode,
            recursion_desired: request.recursion_desired,
            recursion_available: true,
            response_code: NO_ERROR,
            ..Header::default()
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = BitWriter::new(HEADER_LEN);
        writer.write(self.id as u32, 16)?;
        writer.write_flag(self.query_response)?;
        writer.write(self.opcode as u32, 4)?;
        writer.write_flag(self.authoritative)?;
        writer.write_flag(self.truncated)?;
        writer.write_flag(self.recursion_desired)?;
        writer.write_flag(self.recursion_available)?;
        writer.write(self.reserved as u32, 3)?;
        writer.write(self.response_code as u32, 4)?;
        writer.write(self.question_count as u32, 16)?;
        writer.write(self.answer_count as u32, 16)?;
        writer.write(self.authority_count as u32, 16)?;
        writer.write(self.additional_count as u32, 16)?;
        Ok(writer.into_bytes())
    }

    pub fn decode(buffer: &[u8]) -> Result<Self> {
        if buffer.len() < HEADER_LEN {
            return Err(DnsError::ShortHeader);
        }
        let mut reader = BitReader::new(&buffer[..HEADER_LEN]);
        Ok(Header {
            id: reader.read(16)? as u16,
            query_response: reader.read_flag()?,
            opcode: reader.read(4)? as u8,
            authoritative: reader.read_flag()?,
            truncated: reader.read_flag()?,
            recursion_desired: reader.read_flag()?,
            recursion_available: reader.read_flag()?,
            reserved: reader.read(3)? as u8,
            response_code: reader.read(4)? as u8,
            question_count: reader.read(16)? as u16,
            answer_count: reader.read(16)? as u16,
            authority_count: reader.read(16)? as u16,
            additional_count: reader.read(16)? as u16,
        })
    }
}

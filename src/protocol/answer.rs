use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::Question;

/// One resource record. Name, type and class live in the embedded question;
/// the wire RDATA length is always derived from `data`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Answer {
    pub question: Question,
    pub ttl: u32,
    pub data: Vec<u8>,
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.ipv4() {
            Some(ip) => write!(f, "({}, {}, {})", self.question.name, self.ttl, ip),
            None => write!(f, "({}, {}, {} bytes)", self.question.name, self.ttl, self.data.len()),
        }
    }
}

impl Answer {
    pub fn new(question: Question, ttl: u32, data: Vec<u8>) -> Self {
        Answer {
            question,
            ttl,
            data,
        }
    }

    pub fn from_ipv4(question: Question, ttl: u32, ip: Ipv4Addr) -> Self {
        Answer::new(question, ttl, ip.octets().to_vec())
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        <[u8; 4]>::try_from(self.data.as_slice()).ok().map(Ipv4Addr::from)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let data_len = u16::try_from(self.data.len())
            .map_err(|_| DnsError::RdataTooLong(self.data.len()))?;
        let mut vec = self.question.encode()?;
        vec.extend(&self.ttl.to_be_bytes());
        vec.extend(&data_len.to_be_bytes());
        vec.extend(&self.data);
        Ok(vec)
    }

    /// Decodes the record at `offset`, returning it with the offset just past it.
    pub fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut cursor = Cursor::form(buffer);
        cursor.at(offset);
        let answer = Answer::read(&mut cursor)?;
        Ok((answer, cursor.get_current_index()))
    }

    pub(crate) fn read(cursor: &mut Cursor) -> Result<Self> {
        let question = Question::read(cursor)?;
        let ttl = cursor.take_u32()?;
        let data_len = cursor.take_u16()?;
        let data = cursor.take_slice(data_len as usize)?.to_vec();
        Ok(Answer {
            question,
            ttl,
            data,
        })
    }
}

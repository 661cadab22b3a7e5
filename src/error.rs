use std::io;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(Error, Debug)]
pub enum DnsError {
    #[error("packet is too short to be decoded")]
    ShortPacket,

    #[error("header needs 12 bytes")]
    ShortHeader,

    #[error("question type/class needs 4 bytes after the name")]
    ShortQuestion,

    #[error("malformed compression pointer at offset {offset}")]
    MalformedPointer { offset: usize },

    #[error("unsupported label type at offset {offset}")]
    InvalidLabel { offset: usize },

    #[error("label longer than 63 bytes: {0}")]
    LabelTooLong(String),

    #[error("empty label in name: {0}")]
    EmptyLabel(String),

    #[error("rdata of {0} bytes does not fit a 16-bit length")]
    RdataTooLong(usize),

    #[error("bit width {0} exceeds 32")]
    InvalidWidth(u32),

    #[error("bit access past the end of the buffer")]
    OutOfBounds,

    #[error("decoder used out of order: {0}")]
    OutOfOrder(&'static str),

    #[error("upstream resolver unavailable: {0}")]
    UpstreamUnavailable(#[source] io::Error),

    #[error("upstream resolver did not answer within {0:?}")]
    UpstreamTimeout(Duration),

    #[error("upstream reply does not answer {0}")]
    UnexpectedReply(String),
}

impl DnsError {
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DnsError::UpstreamUnavailable(_) | DnsError::UpstreamTimeout(_) | DnsError::UnexpectedReply(_)
        )
    }
}

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, UdpSocket};
use tokio::sync::OnceCell;
use tokio::time::timeout;

use crate::error::{DnsError, Result};
use crate::protocol::{Decoder, Header, Question, PACKET_SIZE};
use crate::system::hex_dump;

/// One request/response round trip with the upstream resolver.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>>;
}

/// UDP upstream. The socket is connected on first use and reused afterwards.
pub struct UdpUpstream {
    address: String,
    timeout: Duration,
    socket: OnceCell<UdpSocket>,
}

impl UdpUpstream {
    pub fn from(address: &str, timeout: Duration) -> Self {
        UdpUpstream {
            address: address.to_string(),
            timeout,
            socket: OnceCell::new(),
        }
    }

    async fn connect(&self) -> Result<UdpSocket> {
        let target = lookup_host(self.address.as_str())
            .await
            .map_err(DnsError::UpstreamUnavailable)?
            .next()
            .ok_or_else(|| DnsError::UpstreamUnavailable(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no address for {}", self.address),
            )))?;
        let local: SocketAddr = if target.is_ipv4() {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local).await.map_err(DnsError::UpstreamUnavailable)?;
        socket.connect(target).await.map_err(DnsError::UpstreamUnavailable)?;
        info!("upstream resolver connected: {}", target);
        Ok(socket)
    }

    async fn recv_reply(socket: &UdpSocket, id: u16, questions: &[Question]) -> Result<Vec<u8>> {
        let mut buffer = [0u8; PACKET_SIZE];
        loop {
            let len = socket.recv(&mut buffer).await.map_err(DnsError::UpstreamUnavailable)?;
            match read_questions(&buffer[..len]) {
                Ok((header, received)) if header.id == id && same_questions(questions, &received) => {
                    return Ok(buffer[..len].to_vec());
                }
                Ok((header, received)) => {
                    debug!("drop upstream reply {} for {:?}", header.id, received);
                }
                Err(e) => debug!("drop undecodable upstream reply of {} bytes: {}", len, e),
            }
        }
    }
}

fn read_questions(packet: &[u8]) -> Result<(Header, Vec<Question>)> {
    let mut decoder = Decoder::new(packet);
    let header = decoder.decode_header()?;
    let questions = decoder.decode_questions(header.question_count)?;
    Ok((header, questions))
}

fn same_questions(sent: &[Question], received: &[Question]) -> bool {
    sent.len() == received.len() && sent.iter().zip(received).all(|(a, b)| a.is_same(b))
}

#[async_trait]
impl Upstream for UdpUpstream {
    /// Sends `request` and waits for the reply carrying the same id and the
    /// same questions. Late replies to earlier exchanges are skipped.
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        let (header, questions) = read_questions(request)?;
        let socket = self.socket.get_or_try_init(|| self.connect()).await?;
        trace!("data to resolver:\n{}", hex_dump(request));
        socket.send(request).await.map_err(DnsError::UpstreamUnavailable)?;
        let reply = timeout(self.timeout, UdpUpstream::recv_reply(socket, header.id, &questions))
            .await
            .map_err(|_| DnsError::UpstreamTimeout(self.timeout))??;
        trace!("data from resolver:\n{}", hex_dump(&reply));
        Ok(reply)
    }
}

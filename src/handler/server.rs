use std::net::SocketAddr;

use tokio::net::UdpSocket;

use crate::handler::Resolver;
use crate::protocol::PACKET_SIZE;
use crate::system::{hex_dump, Result};

/// Inbound UDP endpoint. Each datagram is answered before the next one is read.
pub struct DnsServer {
    socket: UdpSocket,
    resolver: Resolver,
}

impl DnsServer {
    pub async fn bind(address: &str, resolver: Resolver) -> Result<Self> {
        let server = DnsServer {
            socket: UdpSocket::bind(address).await?,
            resolver,
        };
        info!("dns server listening on {}", server.local_addr()?);
        Ok(server)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    async fn recv_query(&self) -> Result<(Vec<u8>, SocketAddr)> {
        let mut buffer = [0u8; PACKET_SIZE];
        let (len, src) = self.socket.recv_from(&mut buffer).await?;
        Ok((buffer[..len].to_vec(), src))
    }

    async fn back_to_client(&self, src: SocketAddr, response: &[u8]) -> Result<()> {
        trace!("data to client {}:\n{}", src, hex_dump(response));
        self.socket.send_to(response, src).await?;
        Ok(())
    }

    async fn handle_task(&self, src: SocketAddr, packet: &[u8]) -> Result<()> {
        trace!("data from client {}:\n{}", src, hex_dump(packet));
        match self.resolver.handle_packet(packet).await {
            Ok(response) => self.back_to_client(src, &response).await,
            Err(e) => {
                warn!("drop packet from {}: {}", src, e);
                Ok(())
            }
        }
    }

    pub async fn run(&self) {
        loop {
            let (packet, src) = match self.recv_query().await {
                Ok(received) => received,
                Err(e) => {
                    error!("receive from client failed: {:?}", e);
                    continue;
                }
            };
            if let Err(e) = self.handle_task(src, &packet).await {
                error!("reply to {} failed: {:?}", src, e);
            }
        }
    }
}

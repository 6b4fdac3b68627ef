use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

/// Datagram socket the client talks through. Dropping it closes it.
#[allow(async_fn_in_trait)]
pub trait Transport: Sized {
    async fn bind(local_addr: SocketAddr) -> io::Result<Self>;

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl Transport for UdpSocket {
    async fn bind(local_addr: SocketAddr) -> io::Result<Self> {
        UdpSocket::bind(local_addr).await
    }

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target).await
    }

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        UdpSocket::recv_from(self, buf).await
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        UdpSocket::local_addr(self)
    }
}

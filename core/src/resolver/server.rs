use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use ptrmap_protocols::dns::{self, PacketError};
use thiserror::Error;
use tracing::{debug, info};

use super::ReverseLookup;

const MAX_RESPONSE_LEN: usize = 4096;

#[derive(Debug, Error)]
enum QueryError {
    #[error("timed out")]
    Timeout,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Packet(#[from] PacketError),
}

/// Sends PTR queries straight to one DNS server over UDP.
///
/// The socket is connected, so datagrams from any other source are dropped by
/// the kernel. Stale transaction ids, undecodable datagrams and echoed queries
/// are skipped until the timeout runs out.
pub struct DnsServerResolver {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
}

impl DnsServerResolver {
    pub fn new(server: Ipv4Addr, port: u16, timeout: Duration) -> io::Result<Self> {
        let server: SocketAddr = SocketAddr::from((server, port));
        let socket: UdpSocket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(server)?;

        Ok(Self {
            socket,
            server,
            timeout,
        })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    fn query(&self, ip: Ipv4Addr) -> Result<Option<String>, QueryError> {
        let id: u16 = dns::random_transaction_id();
        let packet: Vec<u8> = dns::create_ptr_packet(&ip, id)?;
        self.socket.send(&packet)?;

        let deadline: Instant = Instant::now() + self.timeout;
        let mut buffer: [u8; MAX_RESPONSE_LEN] = [0u8; MAX_RESPONSE_LEN];

        loop {
            let remaining: Duration = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(QueryError::Timeout);
            }
            self.socket.set_read_timeout(Some(remaining))?;

            let len: usize = match self.socket.recv(&mut buffer) {
                Ok(len) => len,
                Err(e) if is_timeout(&e) => return Err(QueryError::Timeout),
                Err(e) => return Err(e.into()),
            };

            match dns::get_hostname(&buffer[..len], id) {
                Err(PacketError::IdMismatch { got, .. }) => {
                    debug!("Ignoring stale reply {got:#06x} while resolving {ip}");
                }
                Err(e @ (PacketError::Malformed(_) | PacketError::NotAResponse)) => {
                    debug!("Ignoring datagram while resolving {ip}: {e}");
                }
                result => return result.map_err(QueryError::from),
            }
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

impl ReverseLookup for DnsServerResolver {
    fn lookup(&self, ip: Ipv4Addr) -> Option<String> {
        match self.query(ip) {
            Ok(Some(hostname)) => {
                info!(
                    "Reverse DNS lookup on {ip} using DNS server {} returned hostname: {hostname}",
                    self.server.ip()
                );
                Some(hostname)
            }
            Ok(None) => {
                debug!("No PTR record for {ip}");
                None
            }
            Err(e) => {
                debug!("Reverse lookup for {ip} failed: {e}");
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("DNS server {}", self.server)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

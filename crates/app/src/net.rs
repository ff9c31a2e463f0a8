//! Discovery of the address other hosts on the network reach us by.

use std::io;
use std::net::{IpAddr, UdpSocket};

/// Any routable address works; no packet is sent.
const PROBE: &str = "8.8.8.8:80";

/// The local address the OS would use for outbound traffic.
///
/// # Errors
///
/// Returns the socket error if no route exists.
pub fn outbound_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect(PROBE)?;
    Ok(socket.local_addr()?.ip())
}

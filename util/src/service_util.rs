//! Reports which physical instance answered a request.

use std::net::UdpSocket;

/// Builds the `{hostname}/{ip}:{port}` address embedded in read responses.
///
/// The address is computed once at construction; resolution failures fall
/// back to placeholder strings rather than failing startup.
#[derive(Debug, Clone)]
pub struct ServiceUtil {
    address: String,
}

impl ServiceUtil {
    pub fn new(port: u16) -> Self {
        let hostname =
            std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown host name".to_string());
        let ip = local_ip().unwrap_or_else(|| "unknown IP address".to_string());
        Self {
            address: format!("{hostname}/{ip}:{port}"),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Best-effort local IP discovery. Connecting a UDP socket selects the
/// outbound interface without sending any packet.
fn local_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    Some(socket.local_addr().ok()?.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_ends_with_the_port() {
        let util = ServiceUtil::new(7001);
        assert!(util.address().ends_with(":7001"), "{}", util.address());
        assert!(util.address().contains('/'));
    }
}

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use log::debug;
use crate::common::error::HeaderError;
use crate::networking::services::lookup_tcp_port;

/// Address family of an endpoint, as far as the PROXY header cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Inet,
    Inet6,
}

/// A resolved `address:port` pair. Only built by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: IpAddr,
    port: u16,
}

impl Endpoint {
    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn family(&self) -> AddressFamily {
        match self.address {
            IpAddr::V4(_) => AddressFamily::Inet,
            IpAddr::V6(_) => AddressFamily::Inet6,
        }
    }

    pub fn same_family(&self, other: &Endpoint) -> bool {
        self.family() == other.family()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.socket_addr(), f)
    }
}

impl FromStr for Endpoint {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Resolve `host:port` or `[host]:port` into an [`Endpoint`].
///
/// The host must be a numeric IP literal; no DNS lookup is made. The port may
/// be a number or a well-known TCP service name such as `smtp`.
pub fn resolve(text: &str) -> Result<Endpoint, HeaderError> {
    let (host, port) = split_host_port(text)?;

    let address: IpAddr = host
        .parse()
        .map_err(|_| HeaderError::InvalidAddress(host.to_string()))?;
    let port = resolve_port(port)?;

    debug!("Resolved endpoint '{}' to {}", text, SocketAddr::new(address, port));
    Ok(Endpoint { address, port })
}

fn split_host_port(text: &str) -> Result<(&str, &str), HeaderError> {
    let malformed = || HeaderError::MalformedEndpoint(text.to_string());

    let (host, port) = if let Some(rest) = text.strip_prefix('[') {
        let end = rest.find(']').ok_or_else(malformed)?;
        let port = rest[end + 1..].strip_prefix(':').ok_or_else(malformed)?;
        (&rest[..end], port)
    } else {
        let sep = text.rfind(':').ok_or_else(malformed)?;
        let host = &text[..sep];
        // An unbracketed host with a colon is an IPv6 literal missing its brackets
        if host.contains(':') {
            return Err(malformed());
        }
        (host, &text[sep + 1..])
    };

    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return Err(malformed());
    }
    Ok((host, port))
}

fn resolve_port(token: &str) -> Result<u16, HeaderError> {
    let out_of_range = || HeaderError::PortOutOfRange(token.to_string());

    if is_digits(token) {
        // Digits only, so the sole parse failure left is overflow
        let n: u64 = token.parse().map_err(|_| out_of_range())?;
        return u16::try_from(n).map_err(|_| out_of_range());
    }
    if token.strip_prefix('-').is_some_and(is_digits) {
        return Err(out_of_range());
    }

    lookup_tcp_port(token).ok_or_else(|| HeaderError::InvalidPort(token.to_string()))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

use std::fmt::Write as _;
use std::net::IpAddr;
use bytes::{BufMut, BytesMut};
use log::debug;
use crate::common::error::HeaderError;
use crate::core::descriptor::ConnectionDescriptor;
use crate::networking::endpoint::AddressFamily;

// Proxy Protocol V2 signature
pub const V2_SIG: [u8; 12] = [
    0x0D, 0x0A, 0x0D, 0x0A, 0x00, 0x0D, 0x0A, 0x51, 0x55, 0x49, 0x54, 0x0A,
];

// Version & command (byte 13)
pub const V2_VERSION: u8 = 0x2 << 4;
pub const V2_CMD_LOCAL: u8 = 0x0;
pub const V2_CMD_PROXY: u8 = 0x1;

// Address family & transport (byte 14)
pub const V2_AF_INET: u8 = 0x1 << 4;
pub const V2_AF_INET6: u8 = 0x2 << 4;
pub const V2_TRANSPORT_STREAM: u8 = 0x1;

/// Longest legal v1 line, CRLF included.
pub const V1_MAX_LEN: usize = 107;

const V2_FIXED_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyVersion {
    V1,
    #[default]
    V2,
}

pub fn encode(descriptor: &ConnectionDescriptor, version: ProxyVersion) -> Result<Vec<u8>, HeaderError> {
    match version {
        ProxyVersion::V1 => encode_v1(descriptor),
        ProxyVersion::V2 => encode_v2(descriptor),
    }
}

/// Text header, e.g. `PROXY TCP4 10.0.0.1 10.0.0.2 1234 25\r\n`.
/// Version 1 has no datagram form, so the connection is always TCP.
pub fn encode_v1(descriptor: &ConnectionDescriptor) -> Result<Vec<u8>, HeaderError> {
    let (src, dst) = (descriptor.source(), descriptor.dest());
    let proto = match descriptor.family() {
        AddressFamily::Inet => "TCP4",
        AddressFamily::Inet6 => "TCP6",
    };

    let mut line = String::with_capacity(V1_MAX_LEN);
    write!(
        line,
        "PROXY {} {} {} {} {}\r\n",
        proto,
        src.address(),
        dst.address(),
        src.port(),
        dst.port()
    )
    .map_err(|e| HeaderError::Formatting(e.to_string()))?;

    if !line.is_ascii() || line.len() > V1_MAX_LEN || !line.ends_with("\r\n") {
        return Err(HeaderError::Formatting(format!("bad v1 header line {:?}", line)));
    }

    debug!("Encoded v1 header ({} bytes)", line.len());
    Ok(line.into_bytes())
}

/// Binary header: signature, version/command, family/transport, address
/// length, then src addr, dst addr, src port, dst port (all big-endian).
pub fn encode_v2(descriptor: &ConnectionDescriptor) -> Result<Vec<u8>, HeaderError> {
    let (src, dst) = (descriptor.source(), descriptor.dest());

    let mut addrs = BytesMut::with_capacity(36);
    let family = match (src.address(), dst.address()) {
        (IpAddr::V4(s), IpAddr::V4(d)) => {
            addrs.put_slice(&s.octets());
            addrs.put_slice(&d.octets());
            V2_AF_INET
        }
        (IpAddr::V6(s), IpAddr::V6(d)) => {
            addrs.put_slice(&s.octets());
            addrs.put_slice(&d.octets());
            V2_AF_INET6
        }
        // ConnectionDescriptor never lets this through
        _ => {
            return Err(HeaderError::MixedAddressFamily {
                src_addr: src.to_string(),
                dst_addr: dst.to_string(),
            })
        }
    };
    addrs.put_u16(src.port());
    addrs.put_u16(dst.port());

    let addr_len = u16::try_from(addrs.len())
        .map_err(|_| HeaderError::Formatting(format!("address block too long: {} bytes", addrs.len())))?;

    let mut buf = BytesMut::with_capacity(V2_FIXED_LEN + addrs.len());
    buf.put_slice(&V2_SIG);
    buf.put_u8(V2_VERSION | V2_CMD_PROXY);
    buf.put_u8(family | V2_TRANSPORT_STREAM);
    buf.put_u16(addr_len);
    buf.put_slice(&addrs);

    debug!("Encoded v2 header ({} bytes, address block {})", buf.len(), addr_len);
    Ok(buf.to_vec())
}

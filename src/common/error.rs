use std::time::Duration;
use thiserror::Error;

/// Failures while turning endpoint strings into a PROXY header.
/// None of these are transient, so callers should never retry them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Malformed endpoint '{0}': expected host:port or [host]:port")]
    MalformedEndpoint(String),
    #[error("Invalid address '{0}': must be a literal IPv4 or IPv6 address")]
    InvalidAddress(String),
    #[error("Invalid port '{0}': not a number or a known TCP service name")]
    InvalidPort(String),
    #[error("Port number must be 0 .. {max}, got {0}", max = u16::MAX)]
    PortOutOfRange(String),
    #[error("Source {src_addr} and dest {dst_addr} must be both IPv4, or both IPv6 - cannot be mixed")]
    MixedAddressFamily { src_addr: String, dst_addr: String },
    #[error("Header formatting error: {0}")]
    Formatting(String),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Header Error: {0}")]
    Header(#[from] HeaderError),
    #[error("Timed out during {stage} after {after:?}")]
    Timeout { stage: &'static str, after: Duration },
}

pub type Result<T> = std::result::Result<T, ProbeError>;

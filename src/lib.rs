//! Build HAProxy PROXY protocol headers (v1 text, v2 binary) for a proxied
//! TCP connection, and send them to a proxy for testing.
//!
//! See <https://www.haproxy.org/download/2.6/doc/proxy-protocol.txt>.

pub mod common;
pub mod config;
pub mod core;
pub mod networking;

pub use crate::common::error::{HeaderError, ProbeError};
pub use crate::core::descriptor::{build, ConnectionDescriptor};
pub use crate::networking::endpoint::{resolve, AddressFamily, Endpoint};
pub use crate::networking::proxy_protocol::{encode, encode_v1, encode_v2, ProxyVersion};

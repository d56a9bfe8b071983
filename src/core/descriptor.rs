use log::debug;
use crate::common::error::HeaderError;
use crate::networking::endpoint::{resolve, AddressFamily, Endpoint};

/// One proxied connection: where to dial the proxy, and the source/dest pair
/// the proxy should use for its onward connection.
///
/// `source` and `dest` always share an address family. `proxy` is only the
/// dial target and is never written into a header, so its family is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    proxy: Endpoint,
    source: Endpoint,
    dest: Endpoint,
}

impl ConnectionDescriptor {
    pub fn new(proxy: Endpoint, source: Endpoint, dest: Endpoint) -> Result<Self, HeaderError> {
        if !source.same_family(&dest) {
            return Err(HeaderError::MixedAddressFamily {
                src_addr: source.to_string(),
                dst_addr: dest.to_string(),
            });
        }
        Ok(Self { proxy, source, dest })
    }

    pub fn proxy(&self) -> Endpoint {
        self.proxy
    }

    pub fn source(&self) -> Endpoint {
        self.source
    }

    pub fn dest(&self) -> Endpoint {
        self.dest
    }

    /// Family shared by source and dest.
    pub fn family(&self) -> AddressFamily {
        self.source.family()
    }
}

/// Resolve the three endpoint strings and check them as a set.
/// The first resolution failure is returned as is.
pub fn build(proxy: &str, source: &str, dest: &str) -> Result<ConnectionDescriptor, HeaderError> {
    let proxy = resolve(proxy)?;
    let source = resolve(source)?;
    let dest = resolve(dest)?;

    let descriptor = ConnectionDescriptor::new(proxy, source, dest)?;
    debug!(
        "Built descriptor: proxy {} source {} dest {}",
        descriptor.proxy, descriptor.source, descriptor.dest
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_ipv4() {
        let d = build("127.0.0.1:5000", "0.0.0.0:0", "64.233.167.27:smtp").unwrap();
        assert_eq!(d.proxy().to_string(), "127.0.0.1:5000");
        assert_eq!(d.source().port(), 0);
        assert_eq!(d.dest().port(), 25);
        assert_eq!(d.family(), AddressFamily::Inet);
    }

    #[test]
    fn test_build_ipv6() {
        let d = build("[::1]:5000", "[2001:db8::1]:0", "[2001:db8::2]:443").unwrap();
        assert_eq!(d.family(), AddressFamily::Inet6);
    }

    #[test]
    fn test_mixed_family_rejected() {
        let err = build("127.0.0.1:5000", "10.0.0.1:0", "[::1]:80").unwrap_err();
        assert_eq!(
            err,
            HeaderError::MixedAddressFamily {
                src_addr: "10.0.0.1:0".to_string(),
                dst_addr: "[::1]:80".to_string(),
            }
        );
    }

    #[test]
    fn test_proxy_family_is_unconstrained() {
        assert!(build("[::1]:5000", "10.0.0.1:0", "10.0.0.2:25").is_ok());
        assert!(build("127.0.0.1:5000", "[::1]:0", "[::2]:25").is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        // Both proxy and dest are bad; the proxy error is reported
        let err = build("nope", "10.0.0.1:0", "10.0.0.1:70000").unwrap_err();
        assert!(matches!(err, HeaderError::MalformedEndpoint(_)));

        let err = build("127.0.0.1:5000", "10.0.0.1:bogus", "[::1]:80").unwrap_err();
        assert_eq!(err, HeaderError::InvalidPort("bogus".to_string()));
    }

    #[test]
    fn test_new_applies_family_check() {
        let proxy: Endpoint = "127.0.0.1:5000".parse().unwrap();
        let v4: Endpoint = "10.0.0.1:0".parse().unwrap();
        let v6: Endpoint = "[::1]:80".parse().unwrap();
        assert!(ConnectionDescriptor::new(proxy, v6, v4).is_err());
        assert!(ConnectionDescriptor::new(proxy, v4, v4).is_ok());
    }
}

use std::net::SocketAddr;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use log::{debug, info};
use crate::common::error::{ProbeError, Result};
use crate::config::ProbeConfig;

/// Send an encoded header to the proxy and return its first reply buffer.
///
/// One attempt only: connect, write, a single read of at most
/// `reply_buffer_size` bytes. An empty reply means the proxy closed the
/// connection without answering.
pub async fn probe(proxy: SocketAddr, header: &[u8], config: &ProbeConfig) -> Result<Vec<u8>> {
    let start = Instant::now();
    let connect = TcpStream::connect(proxy);
    let mut stream = match tokio::time::timeout(config.timeout, connect).await {
        Ok(res) => res?,
        Err(_) => {
            return Err(ProbeError::Timeout { stage: "connect", after: config.timeout });
        }
    };
    info!("Connected to proxy {} in {:?}", proxy, start.elapsed());

    // Send the header in one segment
    stream.set_nodelay(true)?;
    stream.write_all(header).await?;
    debug!("Wrote {} header bytes to {}", header.len(), proxy);

    let mut reply = vec![0u8; config.reply_buffer_size];
    let n = match tokio::time::timeout(config.timeout, stream.read(&mut reply)).await {
        Ok(res) => res?,
        Err(_) => {
            return Err(ProbeError::Timeout { stage: "read", after: config.timeout });
        }
    };
    reply.truncate(n);
    info!("Read {} reply bytes from {} (took {:?})", n, proxy, start.elapsed());

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_probe_writes_header_and_reads_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(b"220 ready\r\n").await.unwrap();
            buf[..n].to_vec()
        });

        let reply = probe(addr, b"PROXY TCP4 1.2.3.4 5.6.7.8 1 2\r\n", &ProbeConfig::default())
            .await
            .unwrap();
        assert_eq!(reply, b"220 ready\r\n");
        assert_eq!(server.await.unwrap(), b"PROXY TCP4 1.2.3.4 5.6.7.8 1 2\r\n");
    }

    #[tokio::test]
    async fn test_reply_is_capped_at_buffer_size() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(&[b'x'; 100]).await.unwrap();
            // Keep the socket open until the client is done
            let mut buf = [0u8; 64];
            let _ = socket.read(&mut buf).await;
        });

        let config = ProbeConfig { reply_buffer_size: 8, ..Default::default() };
        let reply = probe(addr, b"hdr", &config).await.unwrap();
        assert!(!reply.is_empty());
        assert!(reply.len() <= 8);
    }

    #[tokio::test]
    async fn test_closed_connection_gives_empty_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let _ = socket.read(&mut buf).await;
        });

        let reply = probe(addr, b"hdr", &ProbeConfig::default()).await.unwrap();
        assert!(reply.is_empty());
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
            drop(socket);
        });

        let config = ProbeConfig { timeout: Duration::from_millis(50), ..Default::default() };
        let err = probe(addr, b"hdr", &config).await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { stage: "read", .. }));
        server.abort();
    }

    #[tokio::test]
    async fn test_connection_refused_is_io_error() {
        // Grab a free port, then close the listener so nothing is there
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = probe(addr, b"hdr", &ProbeConfig::default()).await.unwrap_err();
        assert!(matches!(err, ProbeError::Io(_)));
    }
}

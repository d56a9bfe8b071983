use clap::Parser;
use log::{error, info};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use haproxy_tester::common::hexdump::hex_dump;

/// Stand-in proxy: dumps whatever header arrives and answers with a banner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Line sent back to every client
    #[arg(short, long, default_value = "220 mock-proxy ready")]
    banner: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let listener = TcpListener::bind(&args.listen).await?;
    println!("Mock proxy listening on {}", listener.local_addr()?);

    let reply = format!("{}\r\n", args.banner).into_bytes();

    loop {
        let (mut socket, client_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Accept error: {}", e);
                continue;
            }
        };
        let reply = reply.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let n = match socket.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    error!("Read from {} failed: {}", client_addr, e);
                    return;
                }
            };
            println!("Received {} bytes from {}\n{}", n, client_addr, hex_dump(&buf[..n]));

            if let Err(e) = socket.write_all(&reply).await {
                error!("Reply to {} failed: {}", client_addr, e);
                return;
            }
            info!("Answered {}", client_addr);
        });
    }
}

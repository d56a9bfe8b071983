use clap::Parser;
use std::time::Duration;
use log::info;

use haproxy_tester::common::hexdump::hex_dump;
use haproxy_tester::config::ProbeConfig;
use haproxy_tester::networking::client;
use haproxy_tester::{build, encode, ProxyVersion};

const AFTER_HELP: &str = "\
Ports can be names (e.g. smtp) or numbers (e.g. 25). IPv6 addresses go in brackets, e.g. [::1]:5000.

  proxy    Proxy listening for your request, e.g. 127.0.0.1:5000.
  source   Address on the proxy used for the onward connection. Must be an address
           hosted by the proxy itself, otherwise the request will fail.
           Use port 0 to have the proxy choose an ephemeral port.
  dest     The service the proxy should connect to, e.g. 64.233.167.27:smtp.";

/// HAProxy PROXY protocol tester
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Use PROXY protocol v1 (text) header instead of v2 (binary)
    #[arg(long = "v1")]
    v1: bool,

    /// Connect and read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Size of the buffer for the proxy's reply
    #[arg(long, default_value_t = 1024)]
    reply_buffer: usize,

    /// Proxy address, as host:port
    proxy: String,

    /// Source address on the proxy, as host:port
    source: String,

    /// Destination service, as host:port
    dest: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ProbeConfig {
        timeout: Duration::from_millis(args.timeout_ms),
        reply_buffer_size: args.reply_buffer,
    };
    config.validate()?;

    // All validation happens here, before touching the network
    let descriptor = build(&args.proxy, &args.source, &args.dest)?;
    let version = if args.v1 { ProxyVersion::V1 } else { ProxyVersion::V2 };
    let header = encode(&descriptor, version)?;

    match version {
        ProxyVersion::V1 => print!("Sending v1 header {}", String::from_utf8_lossy(&header)),
        ProxyVersion::V2 => println!("Sending v2 header\n{}", hex_dump(&header)),
    }

    let proxy = descriptor.proxy().socket_addr();
    info!("Sending {:?} header to {}", version, proxy);
    let reply = client::probe(proxy, &header, &config).await?;

    println!("Reply: {}", String::from_utf8_lossy(&reply));
    Ok(())
}

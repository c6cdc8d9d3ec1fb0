//! Sends one raw request to a running server and prints the raw reply.
//!
//! Run the `basic` example first, then:
//!   cargo run --example client
//!   cargo run --example client -- 127.0.0.1:6969 /adios

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "localhost:6969".to_owned());
    let path = args.next().unwrap_or_else(|| "/hello".to_owned());

    let mut stream = TcpStream::connect(&addr).await?;
    stream
        .write_all(format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\n\r\n").as_bytes())
        .await?;

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await?;
    println!("{}", String::from_utf8_lossy(&reply));
    Ok(())
}

//! TCP transport for the line protocol
//!
//! The Pi API server listens on a plain TCP port (4711 by default).

use crate::transport::{AsyncLineReader, AsyncLineWriter, LineReader, LineWriter};
use mcpi_core::{McpiError, Result};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, info};

/// TCP read wrapper
pub type TcpLineReader = LineReader<OwnedReadHalf>;

/// TCP write wrapper
pub type TcpLineWriter = LineWriter<OwnedWriteHalf>;

/// Connect to `address:port` and split the stream into line halves
pub async fn connect(address: &str, port: u16) -> Result<(TcpLineReader, TcpLineWriter)> {
    let target = format!("{}:{}", address, port);
    info!("Connecting to {}", target);

    let stream = TcpStream::connect((address, port))
        .await
        .map_err(|e| McpiError::ConnectError(format!("{}: {}", target, e)))?;

    // Requests are tiny and latency bound
    if let Err(e) = stream.set_nodelay(true) {
        debug!("set_nodelay failed on {}: {}", target, e);
    }

    let (read_half, write_half) = stream.into_split();
    Ok((LineReader::new(read_half), LineWriter(write_half)))
}

/// Like [`connect`], boxed for the connection's trait objects
pub async fn connect_boxed(
    address: &str,
    port: u16,
) -> Result<(Box<dyn AsyncLineReader>, Box<dyn AsyncLineWriter>)> {
    let (reader, writer) = connect(address, port).await?;
    Ok((Box::new(reader), Box::new(writer)))
}

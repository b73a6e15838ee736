//! Transport abstractions for the line protocol
//!
//! Provides AsyncLineReader/AsyncLineWriter traits so the connection can run
//! over TCP in production and over in-memory pipes in tests.

use async_trait::async_trait;
use mcpi_core::{McpiError, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Longest response line accepted (16 MiB)
pub const MAX_LINE_LEN: usize = 16 * 1024 * 1024;

const READ_CHUNK: usize = 4096;

/// Trait for async reading of response lines
#[async_trait]
pub trait AsyncLineReader: Send {
    /// Read one line, without its terminator
    ///
    /// Must be cancel safe: dropping the future never loses buffered bytes.
    async fn read_line(&mut self) -> Result<String>;
}

/// Trait for async writing of request lines
#[async_trait]
pub trait AsyncLineWriter: Send {
    /// Write a complete line (terminator included) and flush it
    async fn write_line(&mut self, line: &str) -> Result<()>;

    /// Shut down the write side
    async fn shutdown(&mut self) -> Result<()>;
}

/// Line reader over any byte stream
///
/// The stream carries no message boundaries, so one read may return half a
/// line or a line and a half. Bytes past the first `\n` stay in `buf` and
/// start the next line.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    /// Prefix of `buf` already known to hold no `\n`
    scanned: usize,
}

impl<R: AsyncRead + Unpin + Send> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            scanned: 0,
        }
    }

    /// Bytes received but not yet returned as a line
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    fn take_line(&mut self) -> Result<Option<String>> {
        let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') else {
            self.scanned = self.buf.len();
            return Ok(None);
        };

        let pos = self.scanned + offset;
        self.scanned = 0;
        let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        String::from_utf8(line)
            .map(Some)
            .map_err(|e| McpiError::ProtocolError(format!("Response is not UTF-8: {}", e)))
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> AsyncLineReader for LineReader<R> {
    async fn read_line(&mut self) -> Result<String> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.take_line()? {
                return Ok(line);
            }

            if self.buf.len() > MAX_LINE_LEN {
                return Err(McpiError::ProtocolError(format!(
                    "Response line exceeds {} bytes",
                    MAX_LINE_LEN
                )));
            }

            let n = self
                .inner
                .read(&mut chunk)
                .await
                .map_err(|e| McpiError::ReceiveError(format!("Read failed: {}", e)))?;
            if n == 0 {
                return Err(McpiError::ReceiveError(format!(
                    "Connection closed by peer with {} bytes of a partial line",
                    self.buf.len()
                )));
            }
            debug!("Read {} bytes", n);
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

/// Line writer over any byte stream
pub struct LineWriter<W>(pub W);

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> AsyncLineWriter for LineWriter<W> {
    async fn write_line(&mut self, line: &str) -> Result<()> {
        let send_error = |e: std::io::Error| McpiError::SendError {
            payload: line.to_string(),
            reason: e.to_string(),
        };

        self.0.write_all(line.as_bytes()).await.map_err(send_error)?;

        // Flush to ensure data is sent
        self.0.flush().await.map_err(send_error)?;

        Ok(())
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.0
            .shutdown()
            .await
            .map_err(|e| McpiError::SendError {
                payload: String::new(),
                reason: format!("Shutdown failed: {}", e),
            })
    }
}

/// Split any duplex byte stream into boxed line reader and writer halves
pub fn split<S>(stream: S) -> (Box<dyn AsyncLineReader>, Box<dyn AsyncLineWriter>)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);
    (
        Box::new(LineReader::new(read_half)),
        Box::new(LineWriter(write_half)),
    )
}

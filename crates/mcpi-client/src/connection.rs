//! Line protocol connection to a Pi API server
//!
//! One request is in flight at a time. The connection state sits behind an
//! async mutex that is held across the whole write-then-read exchange, so
//! calls issued from several tasks are serialized and lines never interleave.

use mcpi_core::{McpiError, Result};
use mcpi_wire::protocol::FAIL_RESPONSE;
use mcpi_wire::{Args, AsyncLineReader, AsyncLineWriter, request_line, tcp, transport};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Open socket halves plus the last request, kept for error context
struct Link {
    reader: Box<dyn AsyncLineReader>,
    writer: Box<dyn AsyncLineWriter>,
    peer: String,
    last_sent: Option<String>,
    /// Requests written whose response line has not been read yet
    unanswered: usize,
}

impl Link {
    async fn send(&mut self, method: &str, args: &Args) -> Result<()> {
        let line = request_line(method, args)?;
        debug!("[Rust→{}] {}", self.peer, line.trim_end());
        self.last_sent = Some(line.clone());
        self.writer.write_line(&line).await
    }

    /// Read the response to the newest request
    ///
    /// A call dropped while awaiting its response (for example by a timeout)
    /// leaves that response in the stream. Responses arrive in request order,
    /// so those orphans are read and discarded first. Cancel safe: the count
    /// only drops once a line has been taken off the stream.
    async fn receive(&mut self) -> Result<String> {
        loop {
            let line = self.reader.read_line().await;
            self.unanswered = self.unanswered.saturating_sub(1);
            let line = line?;
            if self.unanswered == 0 {
                return Ok(line);
            }
            warn!(
                "[{}→Rust] Discarding response to an abandoned request: {}",
                self.peer,
                line.chars().take(100).collect::<String>()
            );
        }
    }
}

enum State {
    Unopened,
    Open(Link),
    Closed,
}

/// Connection to a Pi API server
///
/// Lifecycle is `Unopened → Open → Closed`; the last step is one-way. The
/// socket is released by [`Connection::close`] or when the connection is
/// dropped.
pub struct Connection {
    state: Mutex<State>,
    /// Flips to `true` once `close` starts; wakes any parked read
    closing: watch::Sender<bool>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    /// Create an unopened connection
    pub fn new() -> Self {
        let (closing, _) = watch::channel(false);
        Self {
            state: Mutex::new(State::Unopened),
            closing,
        }
    }

    /// Create a connection and open it to `address:port`
    pub async fn connect(address: &str, port: u16) -> Result<Self> {
        let conn = Self::new();
        conn.open(address, port).await?;
        Ok(conn)
    }

    /// Wrap an already-established byte stream as an open connection
    pub fn from_stream<S>(stream: S, peer: impl Into<String>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = transport::split(stream);
        Self::from_halves(reader, writer, peer)
    }

    /// Wrap line reader/writer halves as an open connection
    pub fn from_halves(
        reader: Box<dyn AsyncLineReader>,
        writer: Box<dyn AsyncLineWriter>,
        peer: impl Into<String>,
    ) -> Self {
        let mut conn = Self::new();
        *conn.state.get_mut() = State::Open(Link {
            reader,
            writer,
            peer: peer.into(),
            last_sent: None,
            unanswered: 0,
        });
        conn
    }

    /// Open the stream to `address:port`
    ///
    /// Only valid on an unopened connection; a closed connection cannot be
    /// reopened.
    pub async fn open(&self, address: &str, port: u16) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            State::Unopened => {}
            State::Open(ref link) => {
                return Err(McpiError::ConnectError(format!(
                    "Already connected to {}",
                    link.peer
                )));
            }
            State::Closed => {
                return Err(McpiError::ConnectError(
                    "Connection was closed and cannot be reopened".to_string(),
                ));
            }
        }

        let (reader, writer) = tcp::connect_boxed(address, port).await?;
        let peer = format!("{}:{}", address, port);
        info!("Connected to Pi API server at {}", peer);
        *state = State::Open(Link {
            reader,
            writer,
            peer,
            last_sent: None,
            unanswered: 0,
        });
        Ok(())
    }

    /// Check if the connection is open
    pub async fn is_open(&self) -> bool {
        let closing = *self.closing.borrow();
        !closing && matches!(*self.state.lock().await, State::Open(_))
    }

    /// Last request line written, terminator included
    pub async fn last_sent(&self) -> Option<String> {
        match &*self.state.lock().await {
            State::Open(link) => link.last_sent.clone(),
            _ => None,
        }
    }

    fn link<'a>(&self, state: &'a mut State) -> Result<&'a mut Link> {
        if *self.closing.borrow() {
            return Err(McpiError::NotConnectedError("connection closed".to_string()));
        }
        match state {
            State::Open(link) => Ok(link),
            State::Unopened => Err(McpiError::NotConnectedError(
                "connection not opened".to_string(),
            )),
            State::Closed => Err(McpiError::NotConnectedError("connection closed".to_string())),
        }
    }

    /// Send a request that has no response
    pub async fn send(&self, method: &str, args: Args) -> Result<()> {
        let mut state = self.state.lock().await;
        let link = self.link(&mut state)?;
        link.send(method, &args).await
    }

    /// Send a request and wait for its single response line
    ///
    /// Returns the line without its terminator. A `Fail` response is
    /// reported as [`McpiError::RequestFailed`].
    pub async fn send_receive(&self, method: &str, args: Args) -> Result<String> {
        let closing = self.closing.subscribe();
        let mut state = self.state.lock().await;
        let link = self.link(&mut state)?;
        link.send(method, &args).await?;
        link.unanswered += 1;

        let line = tokio::select! {
            line = link.receive() => line?,
            _ = wait_closed(closing) => {
                return Err(McpiError::ReceiveError(format!(
                    "Connection closed while awaiting response to {}",
                    method
                )));
            }
        };

        debug!(
            "[{}→Rust] {}",
            link.peer,
            line.chars().take(100).collect::<String>()
        );

        if line == FAIL_RESPONSE {
            let request = link.last_sent.as_deref().unwrap_or(method).trim_end();
            warn!("Server reported failure for {}", request);
            return Err(McpiError::RequestFailed(format!("{} failed", request)));
        }

        Ok(line)
    }

    /// Close the connection
    ///
    /// Wakes a `send_receive` parked on a read in another task, which then
    /// fails with a receive error. Calling this more than once is a no-op.
    pub async fn close(&self) {
        self.closing.send_replace(true);

        let mut state = self.state.lock().await;
        if let State::Open(mut link) = std::mem::replace(&mut *state, State::Closed) {
            if let Err(e) = link.writer.shutdown().await {
                debug!("Shutdown of {} failed: {}", link.peer, e);
            }
            info!("Disconnected from {}", link.peer);
        }
    }
}

async fn wait_closed(mut closing: watch::Receiver<bool>) {
    let _ = closing.wait_for(|closed| *closed).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_tracing, scripted};
    use mcpi_core::Vec3;
    use mcpi_wire::args;
    use mcpi_wire::protocol::{parse_int_list, parse_vec3};
    use std::sync::Arc;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, duplex};
    use tokio::time::{Duration, timeout};
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_send_writes_one_line() {
        init_tracing();
        let conn = scripted(Builder::new().write(b"world.setBlock(1,2,3,35,14)\n"));

        conn.send("world.setBlock", args![[1, 2, 3], 35, 14])
            .await
            .unwrap();
        assert_eq!(
            conn.last_sent().await.as_deref(),
            Some("world.setBlock(1,2,3,35,14)\n")
        );
    }

    #[tokio::test]
    async fn test_response_split_across_reads() {
        let conn = scripted(
            Builder::new()
                .write(b"player.getPos()\n")
                .read(b"1,2")
                .read(b",3\n"),
        );

        let line = conn.send_receive("player.getPos", args![]).await.unwrap();
        assert_eq!(parse_vec3(&line).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[tokio::test]
    async fn test_bytes_past_terminator_belong_to_next_response() {
        let conn = scripted(
            Builder::new()
                .write(b"entity.getPos(7)\n")
                .read(b"1.5,2.0,3.0\n4|7")
                .write(b"world.getPlayerIds()\n")
                .read(b"|12\n"),
        );

        let pos = conn.send_receive("entity.getPos", args![7]).await.unwrap();
        assert_eq!(pos, "1.5,2.0,3.0");

        let ids = conn
            .send_receive("world.getPlayerIds", args![])
            .await
            .unwrap();
        assert_eq!(parse_int_list::<i32>(&ids).unwrap(), vec![4, 7, 12]);
    }

    #[tokio::test]
    async fn test_unopened_connection_rejects_calls() {
        let conn = Connection::new();
        assert!(!conn.is_open().await);

        let err = conn.send("chat.post", args!["hi"]).await.unwrap_err();
        assert!(matches!(err, McpiError::NotConnectedError(_)));

        let err = conn
            .send_receive("player.getPos", args![])
            .await
            .unwrap_err();
        assert!(matches!(err, McpiError::NotConnectedError(_)));
    }

    #[tokio::test]
    async fn test_closed_connection_rejects_calls_without_io() {
        // Nothing scripted: a write would surface as a send error, not NotConnected
        let conn = scripted(&mut Builder::new());
        assert!(conn.is_open().await);

        conn.close().await;
        conn.close().await;
        assert!(!conn.is_open().await);

        let err = conn.send("chat.post", args!["hi"]).await.unwrap_err();
        assert!(matches!(err, McpiError::NotConnectedError(_)));
        let err = conn
            .send_receive("player.getPos", args![])
            .await
            .unwrap_err();
        assert!(matches!(err, McpiError::NotConnectedError(_)));
    }

    #[tokio::test]
    async fn test_closed_connection_cannot_reopen() {
        let conn = Connection::new();
        conn.close().await;
        let err = conn.open("127.0.0.1", 4711).await.unwrap_err();
        assert!(matches!(err, McpiError::ConnectError(_)));
    }

    #[tokio::test]
    async fn test_fail_response_is_request_failed() {
        let conn = scripted(
            Builder::new()
                .write(b"world.getBlock(0,0,0)\n")
                .read(b"Fail\n"),
        );

        match conn.send_receive("world.getBlock", args![[0, 0, 0]]).await {
            Err(McpiError::RequestFailed(msg)) => assert!(msg.contains("world.getBlock(0,0,0)")),
            other => panic!("expected request failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_peer_close_before_response() {
        let conn = scripted(Builder::new().write(b"player.getPitch()\n").read(b"12."));

        let err = conn
            .send_receive("player.getPitch", args![])
            .await
            .unwrap_err();
        assert!(matches!(err, McpiError::ReceiveError(_)));
    }

    #[tokio::test]
    async fn test_line_feed_in_argument_is_rejected_before_io() {
        let conn = scripted(&mut Builder::new());
        let err = conn.send("chat.post", args!["a\nb"]).await.unwrap_err();
        assert!(matches!(err, McpiError::InvalidArgument(_)));
        assert!(conn.last_sent().await.is_none());
    }

    #[tokio::test]
    async fn test_close_wakes_pending_receive() {
        let (client, server) = duplex(256);
        let conn = Arc::new(Connection::from_stream(client, "duplex"));

        let pending = {
            let conn = conn.clone();
            tokio::spawn(async move { conn.send_receive("player.getRotation", args![]).await })
        };

        // Wait until the request reached the server, then close instead of answering
        let mut lines = BufReader::new(server).lines();
        assert_eq!(
            lines.next_line().await.unwrap().as_deref(),
            Some("player.getRotation()")
        );
        conn.close().await;

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, McpiError::ReceiveError(_)));
        assert!(!conn.is_open().await);
    }

    #[tokio::test]
    async fn test_late_response_to_timed_out_call_is_discarded() {
        init_tracing();
        let (client, server) = duplex(256);
        let conn = Connection::from_stream(client, "duplex");
        let mut server = BufReader::new(server);

        let timed_out = timeout(
            Duration::from_millis(20),
            conn.send_receive("world.getBlock", args![0, 0, 0]),
        )
        .await;
        assert!(timed_out.is_err());

        let mut request = String::new();
        server.read_line(&mut request).await.unwrap();
        assert_eq!(request, "world.getBlock(0,0,0)\n");

        // The abandoned answer shows up late, ahead of the next ones
        server.get_mut().write_all(b"1\n2\n3\n").await.unwrap();

        let line = conn.send_receive("world.getBlock", args![1, 0, 0]).await.unwrap();
        assert_eq!(line, "2");
        let line = conn.send_receive("world.getBlock", args![2, 0, 0]).await.unwrap();
        assert_eq!(line, "3");

        request.clear();
        server.read_line(&mut request).await.unwrap();
        assert_eq!(request, "world.getBlock(1,0,0)\n");
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_serialized() {
        let (client, server) = duplex(256);
        let conn = Arc::new(Connection::from_stream(client, "duplex"));

        // Echo server: answers each request with its own method name
        let server = tokio::spawn(async move {
            let (read_half, mut write_half) = tokio::io::split(server);
            let mut lines = BufReader::new(read_half).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let method = line.split('(').next().unwrap_or_default().to_string();
                let reply = format!("{}\n", method);
                write_half.write_all(reply.as_bytes()).await.unwrap();
            }
        });

        let mut tasks = Vec::new();
        for i in 0..8 {
            let conn = conn.clone();
            tasks.push(tokio::spawn(async move {
                let method = format!("test.call{}", i);
                let reply = conn.send_receive(&method, args![i]).await.unwrap();
                assert_eq!(reply, method);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        conn.close().await;
        server.await.unwrap();
    }
}

//! Event polling

use crate::connection::Connection;
use mcpi_core::{BlockEvent, Result};
use mcpi_wire::args;
use mcpi_wire::protocol::parse_records;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventCommands {
    conn: Arc<Connection>,
}

impl EventCommands {
    pub(crate) fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }

    /// Drop all events queued on the server
    pub async fn clear_all(&self) -> Result<()> {
        self.conn.send("events.clear", args![]).await
    }

    /// Block hits since the last poll
    ///
    /// Only sword hits are reported by the server.
    pub async fn poll_block_hits(&self) -> Result<Vec<BlockEvent>> {
        let line = self.conn.send_receive("events.block.hits", args![]).await?;
        parse_records::<{ BlockEvent::FIELDS }>(&line)?
            .into_iter()
            .map(BlockEvent::hit_from_fields)
            .collect()
    }
}

//! Camera commands

use crate::connection::Connection;
use mcpi_core::{EntityId, Result, Vec3};
use mcpi_wire::args;
use std::sync::Arc;

#[derive(Clone)]
pub struct CameraCommands {
    conn: Arc<Connection>,
}

impl CameraCommands {
    pub(crate) fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }

    /// Normal first-person view, of `entity` or of the host player
    pub async fn set_normal(&self, entity: Option<EntityId>) -> Result<()> {
        self.conn
            .send("camera.mode.setNormal", args![entity])
            .await
    }

    /// Fixed view at the position given by [`CameraCommands::set_pos`]
    pub async fn set_fixed(&self) -> Result<()> {
        self.conn.send("camera.mode.setFixed", args![]).await
    }

    /// Third-person view following `entity` or the host player
    pub async fn set_follow(&self, entity: Option<EntityId>) -> Result<()> {
        self.conn
            .send("camera.mode.setFollow", args![entity])
            .await
    }

    pub async fn set_pos(&self, pos: impl Into<Vec3>) -> Result<()> {
        let pos: Vec3 = pos.into();
        self.conn.send("camera.setPos", args![pos]).await
    }
}

//! Position, direction and settings commands for entities and players
//!
//! `entity.*` and `player.*` share one command set. Entity calls put the
//! entity id ahead of their arguments; player calls put the player name there
//! when one is configured and leave it out otherwise, which targets the host
//! player.

use crate::connection::Connection;
use mcpi_core::{EntityId, Result, Vec3};
use mcpi_wire::protocol::{parse_real, parse_vec3};
use mcpi_wire::{Arg, Args, args};
use std::sync::Arc;

/// Player setting: jump automatically when walking into a block
pub const AUTOJUMP: &str = "autojump";

/// Shared `<package>.*` command set
#[derive(Clone)]
struct Positioner {
    conn: Arc<Connection>,
    package: &'static str,
}

impl Positioner {
    fn method(&self, name: &str) -> String {
        format!("{}.{}", self.package, name)
    }

    async fn query(&self, name: &str, args: Args) -> Result<String> {
        self.conn.send_receive(&self.method(name), args).await
    }

    async fn get_pos(&self, scope: Arg) -> Result<Vec3> {
        parse_vec3(&self.query("getPos", args![scope]).await?)
    }

    async fn set_pos(&self, scope: Arg, pos: Vec3) -> Result<()> {
        self.conn
            .send(&self.method("setPos"), args![scope, pos])
            .await
    }

    async fn get_tile_pos(&self, scope: Arg) -> Result<Vec3> {
        parse_vec3(&self.query("getTile", args![scope]).await?)
    }

    async fn set_tile_pos(&self, scope: Arg, pos: Vec3) -> Result<()> {
        self.conn
            .send(&self.method("setTile"), args![scope, pos.floor()])
            .await
    }

    async fn get_direction(&self, scope: Arg) -> Result<Vec3> {
        parse_vec3(&self.query("getDirection", args![scope]).await?)
    }

    async fn get_rotation(&self, scope: Arg) -> Result<f64> {
        parse_real(&self.query("getRotation", args![scope]).await?)
    }

    async fn get_pitch(&self, scope: Arg) -> Result<f64> {
        parse_real(&self.query("getPitch", args![scope]).await?)
    }

    async fn setting(&self, key: &str, status: bool) -> Result<()> {
        self.conn
            .send(&self.method("setting"), args![key, status])
            .await
    }
}

/// Commands for any entity, addressed by id
#[derive(Clone)]
pub struct EntityCommands {
    inner: Positioner,
}

impl EntityCommands {
    pub(crate) fn new(conn: Arc<Connection>) -> Self {
        Self {
            inner: Positioner {
                conn,
                package: "entity",
            },
        }
    }

    pub async fn get_pos(&self, id: EntityId) -> Result<Vec3> {
        self.inner.get_pos(id.into()).await
    }

    pub async fn set_pos(&self, id: EntityId, pos: impl Into<Vec3>) -> Result<()> {
        self.inner.set_pos(id.into(), pos.into()).await
    }

    /// Position of the tile the entity stands in
    pub async fn get_tile_pos(&self, id: EntityId) -> Result<Vec3> {
        self.inner.get_tile_pos(id.into()).await
    }

    /// Move to a tile; components are floored
    pub async fn set_tile_pos(&self, id: EntityId, pos: impl Into<Vec3>) -> Result<()> {
        self.inner.set_tile_pos(id.into(), pos.into()).await
    }

    /// Unit vector the entity is facing
    pub async fn get_direction(&self, id: EntityId) -> Result<Vec3> {
        self.inner.get_direction(id.into()).await
    }

    /// Yaw in degrees
    pub async fn get_rotation(&self, id: EntityId) -> Result<f64> {
        self.inner.get_rotation(id.into()).await
    }

    pub async fn get_pitch(&self, id: EntityId) -> Result<f64> {
        self.inner.get_pitch(id.into()).await
    }

    pub async fn setting(&self, key: &str, status: bool) -> Result<()> {
        self.inner.setting(key, status).await
    }
}

/// Commands for the player this client is bound to
#[derive(Clone)]
pub struct PlayerCommands {
    inner: Positioner,
    name: Option<String>,
}

impl PlayerCommands {
    pub(crate) fn new(conn: Arc<Connection>, name: Option<String>) -> Self {
        Self {
            inner: Positioner {
                conn,
                package: "player",
            },
            name,
        }
    }

    /// Player name used as scope token, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn scope(&self) -> Arg {
        self.name.as_ref().into()
    }

    pub async fn get_pos(&self) -> Result<Vec3> {
        self.inner.get_pos(self.scope()).await
    }

    pub async fn set_pos(&self, pos: impl Into<Vec3>) -> Result<()> {
        self.inner.set_pos(self.scope(), pos.into()).await
    }

    pub async fn get_tile_pos(&self) -> Result<Vec3> {
        self.inner.get_tile_pos(self.scope()).await
    }

    pub async fn set_tile_pos(&self, pos: impl Into<Vec3>) -> Result<()> {
        self.inner.set_tile_pos(self.scope(), pos.into()).await
    }

    pub async fn get_direction(&self) -> Result<Vec3> {
        self.inner.get_direction(self.scope()).await
    }

    pub async fn get_rotation(&self) -> Result<f64> {
        self.inner.get_rotation(self.scope()).await
    }

    pub async fn get_pitch(&self) -> Result<f64> {
        self.inner.get_pitch(self.scope()).await
    }

    /// Toggle a player setting such as [`AUTOJUMP`]
    pub async fn setting(&self, key: &str, status: bool) -> Result<()> {
        self.inner.setting(key, status).await
    }
}

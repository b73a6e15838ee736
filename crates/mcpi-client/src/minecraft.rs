//! Top-level client: world commands plus the command groups

use crate::camera::CameraCommands;
use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::events::EventCommands;
use crate::positioner::{EntityCommands, PlayerCommands};
use mcpi_core::{Block, EntityId, Result, Vec3};
use mcpi_wire::args;
use mcpi_wire::protocol::{parse_fixed, parse_int, parse_int_csv, parse_int_list};
use std::sync::Arc;
use tracing::info;

/// World setting: blocks cannot be placed or broken by players
pub const WORLD_IMMUTABLE: &str = "world_immutable";
/// World setting: show player name tags
pub const NAMETAGS_VISIBLE: &str = "nametags_visible";

/// World calls address whole tiles
fn tile(pos: impl Into<Vec3>) -> [i64; 3] {
    let pos: Vec3 = pos.into();
    pos.floor()
}

/// A connected Pi API client
///
/// All command groups share one [`Connection`]; cloning the client is cheap
/// and clones talk over the same socket.
#[derive(Clone)]
pub struct Minecraft {
    conn: Arc<Connection>,
    pub camera: CameraCommands,
    pub entity: EntityCommands,
    pub player: PlayerCommands,
    pub events: EventCommands,
}

impl Minecraft {
    /// Connect to the server at `address:port`, driving the host player
    pub async fn connect(address: &str, port: u16) -> Result<Self> {
        Self::with_config(&ClientConfig::new(address, port)).await
    }

    /// Connect using a [`ClientConfig`]
    pub async fn with_config(config: &ClientConfig) -> Result<Self> {
        let conn = Connection::connect(&config.address, config.port).await?;
        if let Some(name) = &config.player_name {
            info!("Player commands scoped to {}", name);
        }
        Ok(Self::from_connection(
            Arc::new(conn),
            config.player_name.clone(),
        ))
    }

    /// Build a client over an existing connection
    pub fn from_connection(conn: Arc<Connection>, player_name: Option<String>) -> Self {
        Self {
            camera: CameraCommands::new(conn.clone()),
            entity: EntityCommands::new(conn.clone()),
            player: PlayerCommands::new(conn.clone(), player_name),
            events: EventCommands::new(conn.clone()),
            conn,
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.conn
    }

    /// Block id at a position
    pub async fn get_block(&self, pos: impl Into<Vec3>) -> Result<i32> {
        let line = self
            .conn
            .send_receive("world.getBlock", args![tile(pos)])
            .await?;
        parse_int(&line)
    }

    /// Block id and data value at a position
    pub async fn get_block_with_data(&self, pos: impl Into<Vec3>) -> Result<Block> {
        let line = self
            .conn
            .send_receive("world.getBlockWithData", args![tile(pos)])
            .await?;
        let [id, data] = parse_fixed::<i32, 2>(&line)?;
        Ok(Block::with_data(id, data))
    }

    /// Block ids of the cuboid between two corners
    pub async fn get_blocks(
        &self,
        corner0: impl Into<Vec3>,
        corner1: impl Into<Vec3>,
    ) -> Result<Vec<i32>> {
        let line = self
            .conn
            .send_receive("world.getBlocks", args![tile(corner0), tile(corner1)])
            .await?;
        parse_int_csv(&line)
    }

    pub async fn set_block(&self, pos: impl Into<Vec3>, block: impl Into<Block>) -> Result<()> {
        let block: Block = block.into();
        self.conn
            .send("world.setBlock", args![tile(pos), block])
            .await
    }

    /// Fill the cuboid between two corners
    pub async fn set_blocks(
        &self,
        corner0: impl Into<Vec3>,
        corner1: impl Into<Vec3>,
        block: impl Into<Block>,
    ) -> Result<()> {
        let block: Block = block.into();
        self.conn
            .send("world.setBlocks", args![tile(corner0), tile(corner1), block])
            .await
    }

    /// Y of the highest non-air block in column `(x, z)`
    pub async fn get_height(&self, x: f64, z: f64) -> Result<i32> {
        let line = self
            .conn
            .send_receive("world.getHeight", args![x.floor() as i64, z.floor() as i64])
            .await?;
        parse_int(&line)
    }

    /// Alias of [`Minecraft::get_height`]
    pub async fn get_ground_height(&self, x: f64, z: f64) -> Result<i32> {
        self.get_height(x, z).await
    }

    /// Entity ids of the connected players
    pub async fn get_player_entity_ids(&self) -> Result<Vec<EntityId>> {
        let line = self
            .conn
            .send_receive("world.getPlayerIds", args![])
            .await?;
        parse_int_list(&line)
    }

    /// Save a checkpoint that can be used for restoring the world
    pub async fn save_checkpoint(&self) -> Result<()> {
        self.conn.send("world.checkpoint.save", args![]).await
    }

    /// Restore the world state to the checkpoint
    pub async fn restore_checkpoint(&self) -> Result<()> {
        self.conn.send("world.checkpoint.restore", args![]).await
    }

    pub async fn post_to_chat(&self, message: &str) -> Result<()> {
        self.conn.send("chat.post", args![message]).await
    }

    /// Toggle a world setting such as [`WORLD_IMMUTABLE`]
    pub async fn setting(&self, key: &str, status: bool) -> Result<()> {
        self.conn
            .send("world.setting", args![key, status])
            .await
    }

    /// Close the shared connection
    pub async fn close(&self) {
        self.conn.close().await;
    }
}

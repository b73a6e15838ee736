//! Minecraft: Pi Edition API client
//!
//! Talks to a Pi API server (or a compatible plugin) over its line protocol:
//!
//! - **Requests**: `method(arg1,arg2,...)\n`, arguments flattened from
//!   coordinates, blocks, ids and strings
//! - **Responses**: one line per query, parsed by the calling method
//!
//! ```no_run
//! use mcpi_client::{Block, Minecraft, Vec3};
//!
//! # async fn run() -> mcpi_client::Result<()> {
//! let mc = Minecraft::connect("localhost", 4711).await?;
//! mc.post_to_chat("Hello world").await?;
//! let pos = mc.player.get_pos().await?;
//! mc.set_block(pos + Vec3::east(), Block::STONE).await?;
//! # Ok(())
//! # }
//! ```

mod camera;
mod config;
mod connection;
mod events;
mod minecraft;
mod positioner;
#[cfg(test)]
mod testing;

pub use camera::CameraCommands;
pub use config::{ClientConfig, ENV_ADDRESS, ENV_PLAYER, ENV_PORT};
pub use connection::Connection;
pub use events::EventCommands;
pub use minecraft::{Minecraft, NAMETAGS_VISIBLE, WORLD_IMMUTABLE};
pub use positioner::{AUTOJUMP, EntityCommands, PlayerCommands};

pub use mcpi_core::{Block, BlockEvent, BlockEventType, EntityId, McpiError, Result, Vec3};
pub use mcpi_wire::{Arg, Args, args};

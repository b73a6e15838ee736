//! Event records polled from the server

use serde::{Deserialize, Serialize};

use crate::error::{McpiError, Result};
use crate::vec3::Vec3;

/// Entity identifier assigned by the server
pub type EntityId = i32;

/// Kind of block event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockEventType {
    /// Block struck with a sword
    Hit,
}

/// A block event: which tile, which face and which entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockEvent {
    pub kind: BlockEventType,
    pub pos: [i32; 3],
    pub face: i32,
    pub entity_id: EntityId,
}

impl BlockEvent {
    /// Number of integer fields in a `events.block.hits` record
    pub const FIELDS: usize = 5;

    pub fn hit(x: i32, y: i32, z: i32, face: i32, entity_id: EntityId) -> Self {
        Self {
            kind: BlockEventType::Hit,
            pos: [x, y, z],
            face,
            entity_id,
        }
    }

    /// Build a hit from an `x,y,z,face,entityId` record
    pub fn hit_from_fields(fields: [i64; Self::FIELDS]) -> Result<Self> {
        let narrow = |v: i64| {
            i32::try_from(v)
                .map_err(|_| McpiError::ProtocolError(format!("event field out of range: {}", v)))
        };
        Ok(Self::hit(
            narrow(fields[0])?,
            narrow(fields[1])?,
            narrow(fields[2])?,
            narrow(fields[3])?,
            narrow(fields[4])?,
        ))
    }

    /// Tile position as a coordinate
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos[0].into(), self.pos[1].into(), self.pos[2].into())
    }
}

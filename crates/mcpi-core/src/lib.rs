//! # mcpi-core
//!
//! Core types for the Minecraft: Pi Edition API client.
//!
//! This crate provides the value types shared by the wire codec and the client:
//! - Coordinates and real-number rendering
//! - Block identifiers
//! - Block events
//! - Error types

pub mod block;
pub mod error;
pub mod event;
pub mod vec3;

pub use block::Block;
pub use error::{McpiError, Result};
pub use event::{BlockEvent, BlockEventType, EntityId};
pub use vec3::{Vec3, format_real};

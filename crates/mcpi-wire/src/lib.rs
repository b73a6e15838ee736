//! Wire layer for the Minecraft: Pi Edition API
//!
//! This crate provides:
//! - Argument flattening for variable-arity calls
//! - Request line encoding and response line parsing
//! - Line transport abstractions (AsyncLineReader/AsyncLineWriter traits)
//! - TCP transport

pub mod param;
pub mod protocol;
pub mod tcp;
pub mod transport;

pub use param::{Arg, Args, Scalar};
pub use protocol::{DEFAULT_ADDRESS, DEFAULT_PORT, FAIL_RESPONSE, request_line};
pub use transport::{AsyncLineReader, AsyncLineWriter, LineReader, LineWriter};

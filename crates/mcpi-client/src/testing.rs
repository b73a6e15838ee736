//! Shared helpers for unit tests

use crate::connection::Connection;
use std::sync::Arc;
use tokio_test::io::Builder;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber honouring `RUST_LOG`; repeat calls are no-ops
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Open connection over a scripted mock stream
///
/// The mock panics on any write it does not expect, and on drop if scripted
/// reads or writes were left over.
pub(crate) fn scripted(builder: &mut Builder) -> Arc<Connection> {
    init_tracing();
    Arc::new(Connection::from_stream(builder.build(), "mock"))
}

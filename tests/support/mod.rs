#![allow(dead_code)]

pub mod failing_backend;
pub mod order;

use tracing_subscriber::EnvFilter;

/// Route crate logs to the test writer. Set `RUST_LOG=aggregate_repository=trace`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

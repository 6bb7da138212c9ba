//! Logging setup for tests.

/// Routes `log` records to the test output.
///
/// Filtering is controlled with `RUST_LOG`, safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//! Logging setup over `env_logger`
//!
//! Library code logs through the `log` macros directly; binaries and tests
//! install the backend here.

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Call once, from the binary.
pub fn init() {
    env_logger::init();
}

/// Initialize logging for tests, ignoring a logger that is already installed
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

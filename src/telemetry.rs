//! Log output for binaries and manual testing.

/// Installs a plain `fmt` subscriber at `DEBUG`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .try_init()
        .is_ok()
}

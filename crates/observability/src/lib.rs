//! Process-wide log setup for the storeplan binaries.

/// Install the JSON subscriber with `info` as the default level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Subscriber configuration (filter, format, writer).
pub mod tracing;

pub use self::tracing::init as init_with_default;

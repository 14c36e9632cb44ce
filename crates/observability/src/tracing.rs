//! Subscriber initialization.
//!
//! Logs go to stderr as JSON lines: stdout is reserved for the response
//! document written by the `storeplan` binary.

use tracing_subscriber::EnvFilter;

/// Install the subscriber. `RUST_LOG` wins over `default_directive`.
///
/// Returns `false` when a global subscriber was already set.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init("debug");
        assert!(!init("debug"));
    }
}

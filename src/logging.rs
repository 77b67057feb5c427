//! Logging setup for the command-line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary. `RUST_LOG` always wins over the verbosity flag.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Maps a `-v` count to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "domdiff_rs=warn",
        1 => "domdiff_rs=info",
        2 => "domdiff_rs=debug",
        _ => "domdiff_rs=trace",
    }
}

/// Installs a stderr fmt subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "domdiff_rs=warn");
        assert_eq!(default_directive(2), "domdiff_rs=debug");
        assert_eq!(default_directive(9), "domdiff_rs=trace");
    }

    #[test]
    fn test_init_idempotent() {
        init(1);
        init(3);
    }
}

//! Tracing setup for the binaries.
//!
//! The library only emits events. Binaries call `init` once to install a
//! formatting subscriber on stderr, filtered by `RUST_LOG` when it is set.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber.
///
/// `verbosity` picks the default level for this crate when `RUST_LOG` is unset:
/// 0 is `warn`, 1 is `info`, 2 is `debug`, anything higher is `trace`.
/// Safe to call more than once; only the first call has an effect.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("eight_puzzle_solver={}", level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

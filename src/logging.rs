//! Logging setup for hosts embedding the facade
//!
//! The crate logs through the `log` facade. Hosts without a logger of their
//! own can install `env_logger` here; `RUST_LOG` still takes precedence.

use log::LevelFilter;

/// Install `env_logger` at `level` unless a logger is already set.
///
/// Returns `false` when another logger was installed first.
pub fn init_logging(level: &str) -> bool {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init()
        .is_ok()
}

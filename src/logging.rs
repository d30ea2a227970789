//! Logger initialization for the binary.

use env_logger::{Builder, Env};
use log::SetLoggerError;

/// Installs `env_logger` as the `log` backend.
///
/// `RUST_LOG` picks the filter; without it everything at `info` and above is
/// shown. Fails if a logger is already installed.
pub fn init_logging() -> Result<(), SetLoggerError> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init()?;
    log::debug!("logging initialized");
    Ok(())
}

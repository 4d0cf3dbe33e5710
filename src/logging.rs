//! Log output set-up for the binary.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};
use log::info;

/// Sends log records to `path`, truncating it, so they stay out of the terminal interface.
///
/// The level defaults to `info` and can be overridden through `RUST_LOG`.
///
/// # Errors
///
/// This function may return errors if the file cannot be created or a logger is already set.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    info!("logging to {}", path.display());
    Ok(())
}

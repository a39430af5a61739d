//! Locates the files that the mod reads and writes.

use std::path::PathBuf;

use eyre::{Context, Result};

/// Environment variable that overrides the data directory.
const DATA_DIR_VAR: &str = "CINEMA_DATA_DIR";

/// Returns the directory used for settings and logs. This is `$CINEMA_DATA_DIR` if it is set,
/// otherwise the working directory of the game.
pub fn data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_VAR) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => std::env::current_dir().wrap_err("unable to find working directory"),
    }
}

/// Returns the path of a file called `name` in the data directory, creating the directory if
/// needed.
pub fn get_data_path(name: &str) -> Result<PathBuf> {
    let dir = data_dir()?;

    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create data directory {}", dir.display()))?;

    Ok(dir.join(name))
}

pub fn get_log_path() -> Result<PathBuf> {
    get_data_path("cinema.log")
}

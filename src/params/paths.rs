//! Platform-specific parameter file paths.

use crate::constants::{APP_NAME, DEFAULT_PARAMS_FILE};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/radparams/`
/// - macOS: `~/Library/Application Support/radparams/`
/// - Windows: `%APPDATA%\radparams\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Path of the parameter document used when no file is given.
pub fn default_params_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(DEFAULT_PARAMS_FILE))
}

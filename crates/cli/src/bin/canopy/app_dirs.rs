//! Resolve the configuration directory for `canopy`.
//!
//! An environment override wins; otherwise the platform location from the
//! `directories` crate is used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const APPLICATION: &str = "canopy";

const CONFIG_DIR_ENV: &str = "CANOPY_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Return the directory holding the user configuration.
pub(crate) fn config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	ProjectDirs::from("", "", APPLICATION)
		.map(|dirs| dirs.config_dir().to_path_buf())
		.ok_or_else(|| anyhow!("unable to determine config directory"))
}

/// Path of the user configuration file, whether or not it exists.
pub(crate) fn user_config_file() -> Result<PathBuf> {
	Ok(config_dir()?.join(CONFIG_FILE))
}

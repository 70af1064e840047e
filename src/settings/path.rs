use crate::error::{LinkpasteError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the settings file location.
pub const SETTINGS_ENV_VAR: &str = "LINKPASTE_SETTINGS";

const APP_DIR_NAME: &str = "linkpaste";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Get the default settings path under the user's config directory.
pub fn default_settings_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(LinkpasteError::ConfigDirectoryNotFound)?;
	Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Resolve which settings file to use.
///
/// The lookup order is:
/// 1. An explicit path (from `--settings`)
/// 2. `$LINKPASTE_SETTINGS`, if set and non-empty
/// 3. `<config dir>/linkpaste/settings.json`
pub fn resolve_settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return Ok(path.to_path_buf());
	}

	if let Some(path) = env_settings_path(SETTINGS_ENV_VAR) {
		return Ok(path);
	}

	default_settings_path()
}

fn env_settings_path(var_name: &str) -> Option<PathBuf> {
	match std::env::var_os(var_name) {
		Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
		_ => None,
	}
}

use crate::error::{LinkpasteError, Result};
use crate::settings::types::Settings;
use serde_json::Value;
use std::path::Path;

/// On-disk encoding of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
	Json,
	Toml,
}

impl SettingsFormat {
	/// Pick the format from a file extension. Anything but `.toml` is JSON.
	pub fn from_path(path: &Path) -> Self {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
			_ => SettingsFormat::Json,
		}
	}
}

/// Read and parse a settings file into its raw, unmigrated form.
///
/// Returns `Ok(None)` when the file is empty.
pub fn parse_settings_file(path: &Path) -> Result<Option<Value>> {
	let content =
		std::fs::read_to_string(path).map_err(|source| LinkpasteError::SettingsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, SettingsFormat::from_path(path), path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(
	content: &str,
	format: SettingsFormat,
	path: &Path,
) -> Result<Option<Value>> {
	if content.trim().is_empty() {
		return Ok(None);
	}

	let parse_error = |message: String| LinkpasteError::SettingsParseError {
		path: path.to_path_buf(),
		message,
	};

	let raw = match format {
		SettingsFormat::Json => {
			serde_json::from_str::<Value>(content).map_err(|e| parse_error(e.to_string()))?
		}
		SettingsFormat::Toml => {
			toml::from_str::<Value>(content).map_err(|e| parse_error(e.to_string()))?
		}
	};

	Ok(Some(raw))
}

/// Serialize settings for writing to disk.
pub fn serialize_settings(settings: &Settings, format: SettingsFormat) -> Result<String> {
	let serialize_error = |message: String| LinkpasteError::SettingsSerializeError { message };

	match format {
		SettingsFormat::Json => serde_json::to_string_pretty(settings)
			.map(|mut content| {
				content.push('\n');
				content
			})
			.map_err(|e| serialize_error(e.to_string())),
		SettingsFormat::Toml => {
			toml::to_string_pretty(settings).map_err(|e| serialize_error(e.to_string()))
		}
	}
}

use crate::error::{LinkpasteError, Result};
use crate::settings::migrate::migrate;
use crate::settings::parser::{SettingsFormat, parse_settings_file, serialize_settings};
use crate::settings::types::{Pattern, PatternEdit, Settings};
use log::{debug, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where settings are persisted.
///
/// Loading never fails from the caller's point of view: a backend that
/// cannot produce data returns `None` and defaults are used instead.
pub trait SettingsBackend {
	/// Read the raw persisted object, if any.
	fn load_persisted(&self) -> Option<Value>;

	/// Persist the full settings object.
	fn save_persisted(&mut self, settings: &Settings) -> Result<()>;
}

/// Settings stored in a single JSON or TOML file.
#[derive(Debug, Clone)]
pub struct FileBackend {
	path: PathBuf,
	format: SettingsFormat,
}

impl FileBackend {
	/// Create a backend for `path`. The format follows the file extension.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let format = SettingsFormat::from_path(&path);
		FileBackend { path, format }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn format(&self) -> SettingsFormat {
		self.format
	}

	/// Read the file strictly, surfacing read and parse errors.
	///
	/// A missing file is `Ok(None)`.
	pub fn read_raw(&self) -> Result<Option<Value>> {
		if !self.path.exists() {
			return Ok(None);
		}
		parse_settings_file(&self.path)
	}
}

impl SettingsBackend for FileBackend {
	fn load_persisted(&self) -> Option<Value> {
		match self.read_raw() {
			Ok(raw) => raw,
			Err(e) => {
				warn!("{e}; falling back to default settings");
				None
			}
		}
	}

	fn save_persisted(&mut self, settings: &Settings) -> Result<()> {
		let content = serialize_settings(settings, self.format)?;

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|source| {
				LinkpasteError::SettingsWriteError {
					path: self.path.clone(),
					source,
				}
			})?;
		}

		std::fs::write(&self.path, content).map_err(|source| LinkpasteError::SettingsWriteError {
			path: self.path.clone(),
			source,
		})?;

		debug!("Saved settings to {}", self.path.display());
		Ok(())
	}
}

/// Settings kept in memory, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
	data: Option<Value>,
	saves: usize,
}

impl MemoryBackend {
	pub fn new(data: Option<Value>) -> Self {
		MemoryBackend { data, saves: 0 }
	}

	/// The last persisted object.
	pub fn persisted(&self) -> Option<&Value> {
		self.data.as_ref()
	}

	/// How many times settings were saved.
	pub fn save_count(&self) -> usize {
		self.saves
	}
}

impl SettingsBackend for MemoryBackend {
	fn load_persisted(&self) -> Option<Value> {
		self.data.clone()
	}

	fn save_persisted(&mut self, settings: &Settings) -> Result<()> {
		let value = serde_json::to_value(settings).map_err(|e| {
			LinkpasteError::SettingsSerializeError {
				message: e.to_string(),
			}
		})?;
		self.data = Some(value);
		self.saves += 1;
		Ok(())
	}
}

/// The single in-memory copy of the settings, paired with its backend.
///
/// Every mutation edits memory first and then saves. If the save fails the
/// error is returned but the edit stays applied.
#[derive(Debug)]
pub struct PatternStore<B: SettingsBackend> {
	settings: Settings,
	backend: B,
}

impl<B: SettingsBackend> PatternStore<B> {
	/// Load settings from the backend, migrating and merging defaults.
	pub fn load(backend: B) -> Self {
		let settings = match backend.load_persisted() {
			Some(raw) => migrate(&raw),
			None => {
				debug!("No persisted settings, using defaults");
				Settings::default()
			}
		};

		PatternStore { settings, backend }
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn patterns(&self) -> &[Pattern] {
		&self.settings.patterns
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Persist the current settings.
	pub fn save(&mut self) -> Result<()> {
		self.backend.save_persisted(&self.settings)
	}

	/// Append a pattern and return its index.
	pub fn add_pattern(&mut self, pattern: Pattern) -> Result<usize> {
		self.settings.patterns.push(pattern);
		let index = self.settings.patterns.len() - 1;
		self.save()?;
		Ok(index)
	}

	/// Remove the pattern at `index` and return it.
	pub fn remove_pattern(&mut self, index: usize) -> Result<Pattern> {
		self.check_index(index)?;
		let removed = self.settings.patterns.remove(index);
		self.save()?;
		Ok(removed)
	}

	/// Change one field of the pattern at `index`.
	///
	/// Expressions and templates are not validated here; a malformed
	/// expression only shows up when a paste is matched against it.
	pub fn update_pattern(&mut self, index: usize, edit: PatternEdit) -> Result<()> {
		self.check_index(index)?;
		self.settings.patterns[index].apply_edit(edit);
		self.save()
	}

	/// Flip the enabled flag of the pattern at `index`, returning the new value.
	pub fn toggle_pattern(&mut self, index: usize) -> Result<bool> {
		self.check_index(index)?;
		let pattern = &mut self.settings.patterns[index];
		pattern.enabled = !pattern.enabled;
		let enabled = pattern.enabled;
		self.save()?;
		Ok(enabled)
	}

	/// Move the pattern at `from` so it ends up at `to`, shifting the rest.
	pub fn move_pattern(&mut self, from: usize, to: usize) -> Result<()> {
		self.check_index(from)?;
		self.check_index(to)?;
		let pattern = self.settings.patterns.remove(from);
		self.settings.patterns.insert(to, pattern);
		self.save()
	}

	/// Set the global enabled flag.
	pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
		self.settings.enabled = enabled;
		self.save()
	}

	/// Flip the global enabled flag, returning the new value.
	pub fn toggle_enabled(&mut self) -> Result<bool> {
		let enabled = !self.settings.enabled;
		self.set_enabled(enabled)?;
		Ok(enabled)
	}

	fn check_index(&self, index: usize) -> Result<()> {
		let len = self.settings.patterns.len();
		if index >= len {
			return Err(LinkpasteError::PatternIndexOutOfRange { index, len });
		}
		Ok(())
	}
}

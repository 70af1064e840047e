//! Settings persistence and migration for linkpaste.
//!
//! This module handles:
//! - The `Settings` / `Pattern` data model
//! - JSON and TOML settings files
//! - Legacy-schema migration and merging with defaults
//! - The pattern store and its mutation operations

pub mod migrate;
pub mod parser;
pub mod path;
pub mod store;
pub mod types;

pub use migrate::migrate;
pub use parser::{SettingsFormat, parse_settings_file, parse_settings_str, serialize_settings};
pub use path::{SETTINGS_ENV_VAR, default_settings_path, resolve_settings_path};
pub use store::{FileBackend, MemoryBackend, PatternStore, SettingsBackend};
pub use types::{Pattern, PatternEdit, Settings};

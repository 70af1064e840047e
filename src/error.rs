use std::path::PathBuf;

/// Library-level structured errors for linkpaste.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum LinkpasteError {
	#[error("Malformed expression in pattern: {expression}")]
	MalformedExpression {
		expression: String,
		#[source]
		source: regex::Error,
	},

	#[error("Not an absolute URL: {text}")]
	InvalidUrl {
		text: String,
		#[source]
		source: url::ParseError,
	},

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}: {message}")]
	SettingsParseError { path: PathBuf, message: String },

	#[error("Failed to write settings file: {path}")]
	SettingsWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to serialize settings: {message}")]
	SettingsSerializeError { message: String },

	#[error("Pattern index {index} out of range (have {len} patterns)")]
	PatternIndexOutOfRange { index: usize, len: usize },

	#[error("Failed to resolve user config directory")]
	ConfigDirectoryNotFound,
}

/// Result type alias using LinkpasteError.
pub type Result<T> = std::result::Result<T, LinkpasteError>;

//! Turn whatever was persisted into a well-formed [`Settings`].
//!
//! Older releases stored a pattern's label as three fields
//! (`preposition`, `captureGroupIndex`, `postposition`) and the regex under
//! `pattern`. These are folded into `template` / `expression` here.
//! Nothing in this module fails: irregular values fall back to defaults.

use crate::settings::types::{Pattern, Settings};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Build settings from a raw persisted value, merging in defaults.
///
/// Top-level fields are shallow-merged: a persisted `enabled` or `patterns`
/// wins when present and well-typed, otherwise the default is used.
pub fn migrate(raw: &Value) -> Settings {
	let Settings {
		enabled: default_enabled,
		patterns: default_patterns,
	} = Settings::default();

	let Some(object) = raw.as_object() else {
		warn!("Persisted settings are not an object, using defaults");
		return Settings::default();
	};

	let enabled = match object.get("enabled") {
		Some(Value::Bool(enabled)) => *enabled,
		Some(other) => {
			warn!("Ignoring non-boolean `enabled` in settings: {other}");
			default_enabled
		}
		None => default_enabled,
	};

	let patterns = match object.get("patterns") {
		Some(Value::Array(entries)) => entries
			.iter()
			.enumerate()
			.filter_map(|(index, entry)| migrate_pattern(index, entry))
			.collect(),
		Some(_) => {
			warn!("Ignoring non-array `patterns` in settings, using defaults");
			default_patterns
		}
		None => default_patterns,
	};

	Settings { enabled, patterns }
}

/// Migrate one persisted pattern entry. Non-object entries are dropped.
fn migrate_pattern(index: usize, entry: &Value) -> Option<Pattern> {
	let Some(object) = entry.as_object() else {
		warn!("Dropping pattern {index}: not an object");
		return None;
	};

	let expression = string_field(object, "expression")
		.or_else(|| string_field(object, "pattern"))
		.unwrap_or_default();

	let template = match string_field(object, "template") {
		Some(template) => template,
		None => {
			let template = legacy_template(object);
			debug!("Pattern {index}: synthesized template {template:?} from legacy fields");
			template
		}
	};

	Some(Pattern {
		name: string_field(object, "name").unwrap_or_default(),
		expression,
		template,
		// Entries written before the per-pattern switch existed are enabled.
		enabled: object
			.get("enabled")
			.and_then(Value::as_bool)
			.unwrap_or(true),
	})
}

/// `preposition + "$" + captureGroupIndex + postposition`.
fn legacy_template(object: &Map<String, Value>) -> String {
	let preposition = string_field(object, "preposition").unwrap_or_default();
	let postposition = string_field(object, "postposition").unwrap_or_default();
	let index = object
		.get("captureGroupIndex")
		.and_then(capture_group_index)
		.unwrap_or(0);

	format!("{preposition}${index}{postposition}")
}

fn capture_group_index(value: &Value) -> Option<u64> {
	match value {
		Value::Number(number) => number.as_u64().or_else(|| {
			number
				.as_f64()
				.filter(|index| *index >= 0.0 && index.fract() == 0.0)
				.map(|index| index as u64)
		}),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
	object.get(key).and_then(Value::as_str).map(str::to_owned)
}

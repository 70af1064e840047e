use crate::error::{LinkpasteError, Result};
use crate::format::template::render_template;
use crate::format::url::is_url;
use crate::settings::{Pattern, Settings};
use log::{debug, warn};
use regex::Regex;

/// What happened to one pattern while formatting a paste.
#[derive(Debug)]
pub enum PatternOutcome {
	/// The pattern is switched off.
	Disabled,

	/// The expression failed to compile.
	Malformed(LinkpasteError),

	/// The expression compiled but did not match.
	NoMatch,

	/// The expression matched; carries the rendered label.
	Matched(String),

	/// An earlier pattern already matched.
	Skipped,
}

/// Per-pattern report for a pasted text.
#[derive(Debug)]
pub struct Explanation {
	/// Whether the text parsed as an absolute URL.
	pub is_url: bool,

	/// Whether formatting is globally enabled.
	pub enabled: bool,

	/// One outcome per pattern, in stored order.
	pub outcomes: Vec<PatternOutcome>,

	/// The replacement a paste would produce.
	pub replacement: Option<String>,
}

/// Compile a pattern expression.
pub fn compile_expression(expression: &str) -> Result<Regex> {
	Regex::new(expression).map_err(|source| LinkpasteError::MalformedExpression {
		expression: expression.to_string(),
		source,
	})
}

/// Try a single pattern against `url`, returning the rendered label on a match.
///
/// The expression is compiled on every call since patterns are edited at
/// runtime.
pub fn try_pattern(pattern: &Pattern, url: &str) -> Result<Option<String>> {
	let regex = compile_expression(&pattern.expression)?;
	Ok(regex
		.captures(url)
		.map(|captures| render_template(&pattern.template, &captures)))
}

/// Wrap a label and target as a Markdown inline link.
pub fn markdown_link(label: &str, url: &str) -> String {
	format!("[{label}]({url})")
}

/// Format `url` with the first enabled pattern that matches it.
///
/// Returns `None` when formatting is disabled or nothing matches, in which
/// case the paste must be left alone. Malformed expressions are logged and
/// skipped.
pub fn format_url(settings: &Settings, url: &str) -> Option<String> {
	if !settings.enabled {
		debug!("Formatting disabled, leaving paste unchanged");
		return None;
	}

	for (index, pattern) in settings.patterns.iter().enumerate() {
		if !pattern.enabled {
			continue;
		}

		match try_pattern(pattern, url) {
			Ok(Some(label)) => {
				debug!("Pattern {index} ({:?}) matched {url}", pattern.name);
				return Some(markdown_link(&label, url));
			}
			Ok(None) => {}
			Err(e) => warn!("Skipping pattern {index} ({:?}): {e}", pattern.name),
		}
	}

	debug!("No pattern matched {url}");
	None
}

/// Decide what a paste of `pasted` should turn into.
///
/// Text that is not an absolute URL is never formatted.
pub fn decide(settings: &Settings, pasted: &str) -> Option<String> {
	if !is_url(pasted) {
		debug!("Pasted text is not a URL, leaving paste unchanged");
		return None;
	}
	format_url(settings, pasted)
}

/// Evaluate every pattern against `text` and report what each one did.
///
/// Unlike [`decide`], patterns are evaluated even when the text is not a URL
/// or formatting is disabled, so users can debug their expressions. The
/// `replacement` field still reflects what a real paste would produce.
pub fn explain(settings: &Settings, text: &str) -> Explanation {
	let mut matched = false;
	let outcomes = settings
		.patterns
		.iter()
		.map(|pattern| {
			if !pattern.enabled {
				return PatternOutcome::Disabled;
			}
			if matched {
				return PatternOutcome::Skipped;
			}
			match try_pattern(pattern, text) {
				Ok(Some(label)) => {
					matched = true;
					PatternOutcome::Matched(label)
				}
				Ok(None) => PatternOutcome::NoMatch,
				Err(e) => PatternOutcome::Malformed(e),
			}
		})
		.collect();

	Explanation {
		is_url: is_url(text),
		enabled: settings.enabled,
		outcomes,
		replacement: decide(settings, text),
	}
}

use crate::error::LinkpasteError;
use crate::format::compile_expression;
use serde::Serialize;

/// Expression of the built-in example pattern.
pub const EXAMPLE_EXPRESSION: &str = r"https://yourcompany\.atlassian\.net/browse/([A-Z0-9-]+)";

/// Template of the built-in example pattern.
pub const EXAMPLE_TEMPLATE: &str = "Jira: $1";

/// Process-wide settings: the global switch plus the ordered pattern list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
	/// Gates all formatting. When false every paste is left untouched.
	pub enabled: bool,

	/// Rewrite rules in priority order. First matching rule wins.
	pub patterns: Vec<Pattern>,
}

/// A single rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
	/// Display label, free text.
	pub name: String,

	/// Regex source tested against the whole pasted text. Not anchored.
	pub expression: String,

	/// Link label with `$0`..`$N` placeholders.
	pub template: String,

	/// Disabled patterns are kept but never match.
	pub enabled: bool,
}

/// A single-field edit applied to a pattern by the settings UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEdit {
	Name(String),
	Expression(String),
	Template(String),
	Enabled(bool),
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			enabled: true,
			patterns: vec![Pattern::example()],
		}
	}
}

impl Settings {
	/// Compile every pattern's expression and collect the ones that fail.
	///
	/// Disabled patterns are checked too since they may be re-enabled later.
	pub fn malformed_patterns(&self) -> Vec<(usize, LinkpasteError)> {
		self.patterns
			.iter()
			.enumerate()
			.filter_map(|(index, pattern)| pattern.validate().err().map(|e| (index, e)))
			.collect()
	}
}

impl Pattern {
	/// Create an enabled pattern.
	pub fn new(
		name: impl Into<String>,
		expression: impl Into<String>,
		template: impl Into<String>,
	) -> Self {
		Pattern {
			name: name.into(),
			expression: expression.into(),
			template: template.into(),
			enabled: true,
		}
	}

	/// The pattern shipped with fresh settings.
	pub fn example() -> Self {
		Pattern::new("Jira issue", EXAMPLE_EXPRESSION, EXAMPLE_TEMPLATE)
	}

	/// An empty, enabled pattern as appended by "add pattern".
	pub fn blank() -> Self {
		Pattern::new("", "", "")
	}

	/// Check that the expression compiles.
	pub fn validate(&self) -> Result<(), LinkpasteError> {
		compile_expression(&self.expression).map(|_| ())
	}

	/// Apply a single-field edit in place.
	pub fn apply_edit(&mut self, edit: PatternEdit) {
		match edit {
			PatternEdit::Name(name) => self.name = name,
			PatternEdit::Expression(expression) => self.expression = expression,
			PatternEdit::Template(template) => self.template = template,
			PatternEdit::Enabled(enabled) => self.enabled = enabled,
		}
	}
}

//! URL detection and link formatting for linkpaste.
//!
//! This module handles:
//! - Strict absolute-URL detection
//! - First-match-wins pattern evaluation with per-pattern error isolation
//! - Placeholder substitution in link templates

pub mod matcher;
pub mod template;
pub mod url;

pub use matcher::{
	Explanation, PatternOutcome, compile_expression, decide, explain, format_url, markdown_link,
	try_pattern,
};
pub use template::render_template;
pub use self::url::{is_url, parse_url};

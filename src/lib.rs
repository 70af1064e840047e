//! Linkpaste - rewrite pasted URLs into Markdown links.
//!
//! This library provides the core functionality for linkpaste, including:
//! - Settings persistence, defaults, and legacy-schema migration
//! - URL detection and first-match-wins pattern formatting
//! - A thin paste adapter for host editors
//!
//! # Example
//!
//! ```
//! use linkpaste_cli::format::decide;
//! use linkpaste_cli::settings::{Pattern, Settings};
//!
//! let settings = Settings {
//!     enabled: true,
//!     patterns: vec![Pattern::new(
//!         "Jira",
//!         r"https://yourcompany\.atlassian\.net/browse/([A-Z0-9-]+)",
//!         "Jira: $1",
//!     )],
//! };
//!
//! let link = decide(&settings, "https://yourcompany.atlassian.net/browse/PROJ-4567");
//! assert_eq!(
//!     link.as_deref(),
//!     Some("[Jira: PROJ-4567](https://yourcompany.atlassian.net/browse/PROJ-4567)")
//! );
//! ```

pub mod error;
pub mod format;
pub mod paste;
pub mod settings;

pub use error::{LinkpasteError, Result};

//! Paste interception for linkpaste.
//!
//! This module handles:
//! - The editor capability a host must provide
//! - Turning a paste event into a replacement or deferring to default paste
//! - An in-memory `TextBuffer` editor used by the CLI

pub mod buffer;
pub mod handler;

pub use buffer::TextBuffer;
pub use handler::{Editor, PasteEvent, PasteOutcome, handle_paste, insert_at_selection};

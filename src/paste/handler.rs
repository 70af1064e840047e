use crate::format::decide;
use crate::settings::Settings;
use log::debug;
use std::ops::Range;

/// The part of a host editor the paste handler needs.
///
/// Positions are in the editor's native units; `text_len` converts a string
/// into those units.
pub trait Editor {
	/// The current selection, with `start <= end`.
	fn selection(&self) -> Range<usize>;

	/// Replace the current selection with `text`.
	fn replace_selection(&mut self, text: &str);

	/// Collapse the selection to a cursor at `position`.
	fn set_cursor(&mut self, position: usize);

	/// Length of `text` in native position units.
	fn text_len(&self, text: &str) -> usize;
}

/// A paste event as delivered by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasteEvent<'a> {
	/// Plain-text clipboard content, if the clipboard held any.
	pub clipboard_text: Option<&'a str>,
}

/// What the handler did with a paste event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
	/// Nothing was done; the host must run its default paste.
	Default,

	/// The default paste must be suppressed. The link was inserted and the
	/// cursor placed right after it.
	Replaced { cursor: usize },
}

/// Handle one paste event.
///
/// When the clipboard holds a URL matched by an enabled pattern, the current
/// selection is replaced by the Markdown link and the cursor collapsed after
/// it. Otherwise the editor is left untouched.
pub fn handle_paste<E: Editor>(
	settings: &Settings,
	event: &PasteEvent,
	editor: &mut E,
) -> PasteOutcome {
	let Some(text) = event.clipboard_text else {
		debug!("Paste without text content, deferring to default paste");
		return PasteOutcome::Default;
	};

	match decide(settings, text) {
		Some(replacement) => {
			let cursor = insert_at_selection(editor, &replacement);
			PasteOutcome::Replaced { cursor }
		}
		None => PasteOutcome::Default,
	}
}

/// Replace the selection with `text` and collapse the cursor after it.
///
/// This is also what a host's plain paste does. Returns the new cursor.
pub fn insert_at_selection<E: Editor>(editor: &mut E, text: &str) -> usize {
	let start = editor.selection().start;
	editor.replace_selection(text);
	let cursor = start + editor.text_len(text);
	editor.set_cursor(cursor);
	cursor
}

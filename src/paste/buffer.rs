use crate::paste::handler::Editor;
use std::ops::Range;

/// An in-memory text editor whose positions count Unicode scalar values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
	text: String,
	selection: Range<usize>,
}

impl TextBuffer {
	/// Create a buffer with the cursor at the end of `text`.
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let end = text.chars().count();
		TextBuffer {
			text,
			selection: end..end,
		}
	}

	/// Set the selection. Reversed ranges are normalized and both ends are
	/// clamped to the text length.
	pub fn with_selection(mut self, selection: Range<usize>) -> Self {
		let len = self.text.chars().count();
		let (a, b) = (selection.start.min(len), selection.end.min(len));
		self.selection = a.min(b)..a.max(b);
		self
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn into_text(self) -> String {
		self.text
	}

	fn byte_offset(&self, position: usize) -> usize {
		self.text
			.char_indices()
			.nth(position)
			.map_or(self.text.len(), |(offset, _)| offset)
	}
}

impl Editor for TextBuffer {
	fn selection(&self) -> Range<usize> {
		self.selection.clone()
	}

	fn replace_selection(&mut self, text: &str) {
		let start = self.byte_offset(self.selection.start);
		let end = self.byte_offset(self.selection.end);
		self.text.replace_range(start..end, text);

		let cursor = self.selection.start + self.text_len(text);
		self.selection = cursor..cursor;
	}

	fn set_cursor(&mut self, position: usize) {
		let position = position.min(self.text.chars().count());
		self.selection = position..position;
	}

	fn text_len(&self, text: &str) -> usize {
		text.chars().count()
	}
}

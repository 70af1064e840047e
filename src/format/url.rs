use crate::error::{LinkpasteError, Result};
use url::Url;

/// Parse `text` as an absolute URL.
pub fn parse_url(text: &str) -> Result<Url> {
	Url::parse(text).map_err(|source| LinkpasteError::InvalidUrl {
		text: text.to_string(),
		source,
	})
}

/// Whether the whole of `text` is an absolute URL.
///
/// The URL parser strips surrounding spaces and control characters and
/// drops tabs and newlines anywhere, but the pasted text becomes the link
/// target verbatim, so such text is rejected up front.
pub fn is_url(text: &str) -> bool {
	if text.trim_matches(|c: char| c <= ' ') != text {
		return false;
	}
	if text.contains(['\t', '\n', '\r']) {
		return false;
	}
	parse_url(text).is_ok()
}

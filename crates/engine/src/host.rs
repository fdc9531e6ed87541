//! Collaborators the engine talks to: the editor holding the document and
//! the AI provider.

use std::ops::Range;

use async_trait::async_trait;
use quill_settings::AiConfig;
use thiserror::Error;

/// The document the engine reads from and writes back to.
pub trait EditorHost {
	/// Selected text, `None` when nothing is selected.
	fn selection(&self) -> Option<String>;
	fn value(&self) -> String;
	fn set_value(&mut self, text: String);
	/// Replaces the selected range. Without a selection this inserts nothing.
	fn replace_selection(&mut self, text: String);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selection {start}..{end} does not fit a {len}-byte buffer on character boundaries")]
pub struct InvalidSelection {
	pub start: usize,
	pub end: usize,
	pub len: usize,
}

/// In-memory [`EditorHost`] with an optional byte-range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
	text: String,
	selection: Option<Range<usize>>,
}

impl TextBuffer {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			selection: None,
		}
	}

	/// Selects `range`, which must lie on character boundaries.
	pub fn select(&mut self, range: Range<usize>) -> Result<(), InvalidSelection> {
		let valid = range.start <= range.end
			&& self.text.is_char_boundary(range.start)
			&& self.text.is_char_boundary(range.end);
		if !valid {
			return Err(InvalidSelection {
				start: range.start,
				end: range.end,
				len: self.text.len(),
			});
		}
		self.selection = Some(range);
		Ok(())
	}

	pub fn with_selection(mut self, range: Range<usize>) -> Result<Self, InvalidSelection> {
		self.select(range)?;
		Ok(self)
	}

	pub fn text(&self) -> &str {
		&self.text
	}
}

impl EditorHost for TextBuffer {
	fn selection(&self) -> Option<String> {
		let range = self.selection.clone()?;
		self.text.get(range).map(str::to_string)
	}

	fn value(&self) -> String {
		self.text.clone()
	}

	/// Replacing the whole document drops the selection.
	fn set_value(&mut self, text: String) {
		self.text = text;
		self.selection = None;
	}

	/// The selection then covers the inserted text.
	fn replace_selection(&mut self, text: String) {
		let Some(range) = self.selection.clone() else {
			return;
		};
		let start = range.start;
		self.text.replace_range(range, &text);
		self.selection = Some(start..start + text.len());
	}
}

/// Reply from an [`AiClient`]. A non-empty `error` marks the call failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiResponse {
	pub content: String,
	pub error: Option<String>,
}

impl AiResponse {
	pub fn ok(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			error: None,
		}
	}

	pub fn failed(error: impl Into<String>) -> Self {
		Self {
			content: String::new(),
			error: Some(error.into()),
		}
	}

	/// The error message, if this response carries one.
	pub fn failure(&self) -> Option<&str> {
		self.error.as_deref().filter(|e| !e.trim().is_empty())
	}
}

/// One request/response exchange with a language model.
#[async_trait]
pub trait AiClient: Send + Sync {
	async fn send(&self, config: &AiConfig, system_prompt: &str, user_prompt: &str) -> AiResponse;
}

/// Client for hosts without a transport. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTransport;

#[async_trait]
impl AiClient for NoTransport {
	async fn send(
		&self,
		config: &AiConfig,
		_system_prompt: &str,
		_user_prompt: &str,
	) -> AiResponse {
		AiResponse::failed(format!("no transport available for {}", config.endpoint))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn replace_selection_tracks_the_new_range() {
		let mut buffer = TextBuffer::new("one two three").with_selection(4..7).expect("valid");
		assert_eq!(buffer.selection().as_deref(), Some("two"));
		buffer.replace_selection("2".into());
		assert_eq!(buffer.text(), "one 2 three");
		assert_eq!(buffer.selection().as_deref(), Some("2"));
	}

	#[test]
	fn selection_must_sit_on_char_boundaries() {
		let mut buffer = TextBuffer::new("héllo");
		assert!(buffer.select(0..2).is_err());
		assert!(buffer.select(3..1).is_err());
		assert!(buffer.select(0..99).is_err());
		assert!(buffer.select(0..3).is_ok());
		assert_eq!(buffer.selection().as_deref(), Some("hé"));
	}

	#[test]
	fn set_value_drops_selection() {
		let mut buffer = TextBuffer::new("abc").with_selection(0..1).expect("valid");
		buffer.set_value("xyz".into());
		assert_eq!(buffer.selection(), None);
	}

	#[test]
	fn blank_error_is_not_a_failure() {
		assert_eq!(AiResponse { content: "x".into(), error: Some(" ".into()) }.failure(), None);
		assert_eq!(AiResponse::failed("down").failure(), Some("down"));
	}
}

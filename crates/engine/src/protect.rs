//! Frontmatter and header protection.
//!
//! A document may open with a metadata block delimited by `---` lines and a
//! first line the user wants left alone. [`split`] peels those regions off so
//! a transformation only sees the body; [`Split::reassemble`] puts them back
//! in fixed order. Splitting is lossless: concatenating the three parts
//! always yields the input.

use std::borrow::Cow;

use quill_registry::{NotificationKey, NotificationSink, keys};
use quill_settings::{Scope, ToolSettings};

const DELIMITER: &str = "---";

/// The regions of a document as seen by a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
	pub frontmatter: &'a str,
	pub header: &'a str,
	pub body: &'a str,
}

impl Split<'_> {
	/// `frontmatter + header + body`.
	pub fn reassemble(&self, body: &str) -> String {
		let len = self.frontmatter.len() + self.header.len() + body.len();
		let mut out = String::with_capacity(len);
		out.push_str(self.frontmatter);
		out.push_str(self.header);
		out.push_str(body);
		out
	}

	/// The notice describing which regions were held back, if any.
	pub fn shield_notice(&self) -> Option<NotificationKey> {
		match (!self.frontmatter.is_empty(), !self.header.is_empty()) {
			(true, true) => Some(keys::FRONTMATTER_AND_HEADER_SHIELDED),
			(true, false) => Some(keys::FRONTMATTER_SHIELDED),
			(false, true) => Some(keys::HEADER_SHIELDED),
			(false, false) => None,
		}
	}
}

/// Splits `text` according to the two protection flags.
pub fn split(text: &str, preserve_frontmatter: bool, preserve_header: bool) -> Split<'_> {
	let (frontmatter, rest) =
		if preserve_frontmatter { split_frontmatter(text) } else { ("", text) };
	let (header, body) = if preserve_header { split_header(rest) } else { ("", rest) };
	Split { frontmatter, header, body }
}

/// Runs `transform` on the unprotected body of `text`.
///
/// When `announce` is set and a region was held back, the matching shield
/// notice is pushed before the transformation runs.
pub fn protect<F>(
	text: &str,
	settings: &ToolSettings,
	notices: &mut dyn NotificationSink,
	announce: bool,
	transform: F,
) -> String
where
	F: FnOnce(&str, &mut dyn NotificationSink) -> String,
{
	let parts = split(text, settings.preserve_frontmatter, settings.preserve_header);
	if announce && let Some(key) = parts.shield_notice() {
		notices.push(key.emit());
	}
	let body = transform(parts.body, notices);
	parts.reassemble(&body)
}

/// Settings as a step in `scope` sees them. A selection never carries a
/// leading metadata block, so protection is switched off there.
pub fn scoped(settings: &ToolSettings, scope: Scope) -> Cow<'_, ToolSettings> {
	match scope {
		Scope::Document => Cow::Borrowed(settings),
		Scope::Selection => Cow::Owned(settings.without_protection()),
	}
}

fn split_frontmatter(text: &str) -> (&str, &str) {
	let Some(after_open) = text.strip_prefix(DELIMITER) else {
		return ("", text);
	};
	let content = after_open.strip_prefix('\n').or_else(|| after_open.strip_prefix("\r\n"));
	let Some(content) = content else {
		return ("", text);
	};

	let mut offset = text.len() - content.len();
	for line in content.split_inclusive('\n') {
		offset += line.len();
		let bare = line.strip_suffix('\n').unwrap_or(line);
		let bare = bare.strip_suffix('\r').unwrap_or(bare);
		if bare == DELIMITER {
			return text.split_at(offset);
		}
	}
	("", text)
}

fn split_header(body: &str) -> (&str, &str) {
	let end = body.find('\n').map_or(body.len(), |i| i + 1);
	let (first, rest) = body.split_at(end);
	if first.trim().is_empty() { ("", body) } else { (first, rest) }
}

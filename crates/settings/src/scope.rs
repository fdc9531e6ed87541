use std::fmt;

use serde::{Deserialize, Serialize};

/// Region an operation reads from and writes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
	/// The whole document buffer.
	#[default]
	Document,
	/// Only the active selection.
	Selection,
}

impl Scope {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Document => "document",
			Self::Selection => "selection",
		}
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

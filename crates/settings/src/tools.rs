//! Per-tool configuration records.

use serde::{Deserialize, Serialize};

/// Fully populated configuration for every built-in tool.
///
/// Captured whole into each [`ToolOperation`](crate::ToolOperation) at
/// authoring time, so a batch step replays with the values it was saved
/// with rather than whatever the live configuration holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolSettings {
	/// Shield a leading `---` metadata block from transformation.
	pub preserve_frontmatter: bool,
	/// Shield the first line of the body from transformation.
	pub preserve_header: bool,
	pub regex: RegexSettings,
	pub find_replace: FindReplaceSettings,
	pub filter: FilterSettings,
	pub dedupe: DedupeSettings,
	pub sort: SortSettings,
	pub column: ColumnSettings,
	pub wrap: WrapSettings,
	pub case: CaseSettings,
	pub numbering: NumberingSettings,
}

impl Default for ToolSettings {
	fn default() -> Self {
		Self {
			preserve_frontmatter: true,
			preserve_header: false,
			regex: RegexSettings::default(),
			find_replace: FindReplaceSettings::default(),
			filter: FilterSettings::default(),
			dedupe: DedupeSettings::default(),
			sort: SortSettings::default(),
			column: ColumnSettings::default(),
			wrap: WrapSettings::default(),
			case: CaseSettings::default(),
			numbering: NumberingSettings::default(),
		}
	}
}

impl ToolSettings {
	/// Returns a copy with both protection flags cleared.
	///
	/// A selection never starts with a document's metadata block, so
	/// selection-scoped steps run with protection off.
	pub fn without_protection(&self) -> Self {
		Self {
			preserve_frontmatter: false,
			preserve_header: false,
			..self.clone()
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexSettings {
	pub pattern: String,
	/// Replacement text; `$1`/`${name}` expand capture groups.
	pub replacement: String,
	pub case_insensitive: bool,
	pub multiline: bool,
	/// Replace every match instead of only the first.
	pub global: bool,
}

impl Default for RegexSettings {
	fn default() -> Self {
		Self {
			pattern: String::new(),
			replacement: String::new(),
			case_insensitive: false,
			multiline: true,
			global: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindReplaceSettings {
	pub find: String,
	pub replace: String,
	pub case_sensitive: bool,
}

impl Default for FindReplaceSettings {
	fn default() -> Self {
		Self {
			find: String::new(),
			replace: String::new(),
			case_sensitive: true,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
	#[default]
	Keep,
	Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSettings {
	pub pattern: String,
	pub mode: FilterMode,
	pub use_regex: bool,
	pub case_sensitive: bool,
}

impl Default for FilterSettings {
	fn default() -> Self {
		Self {
			pattern: String::new(),
			mode: FilterMode::Keep,
			use_regex: false,
			case_sensitive: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DedupeSettings {
	/// Compare lines after trimming surrounding whitespace.
	pub trim_whitespace: bool,
	pub case_sensitive: bool,
}

impl Default for DedupeSettings {
	fn default() -> Self {
		Self {
			trim_whitespace: false,
			case_sensitive: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortSettings {
	pub descending: bool,
	pub case_sensitive: bool,
	/// Order by leading number when both lines start with one.
	pub numeric: bool,
}

impl Default for SortSettings {
	fn default() -> Self {
		Self {
			descending: false,
			case_sensitive: true,
			numeric: false,
		}
	}
}

/// Column tools address columns 1-based, matching what users see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnSettings {
	pub delimiter: String,
	pub first: usize,
	pub second: usize,
}

impl Default for ColumnSettings {
	fn default() -> Self {
		Self {
			delimiter: ",".to_string(),
			first: 1,
			second: 2,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WrapSettings {
	pub prefix: String,
	pub suffix: String,
	pub skip_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
	#[default]
	Upper,
	Lower,
	Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseSettings {
	pub mode: CaseMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberingSettings {
	pub start: u64,
	pub separator: String,
}

impl Default for NumberingSettings {
	fn default() -> Self {
		Self {
			start: 1,
			separator: ". ".to_string(),
		}
	}
}

//! User-authored script definitions.

use serde::{Deserialize, Serialize};

/// Declared type of a script parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
	#[default]
	Text,
	Number,
	Boolean,
	Select,
	Array,
}

/// One declared script parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParamDef {
	pub key: String,
	#[serde(rename = "type")]
	pub kind: ParamKind,
	pub default: serde_json::Value,
	/// Allowed values for [`ParamKind::Select`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub options: Option<Vec<String>>,
}

/// A user script, referenced by id from batch operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptDefinition {
	pub id: String,
	pub name: String,
	/// Nu source, evaluated as the body of a function.
	pub code: String,
	pub params: Vec<ParamDef>,
}

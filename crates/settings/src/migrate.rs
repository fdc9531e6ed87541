//! One-shot migration from the legacy flat settings layout.
//!
//! Version 1 stored every tool option as a top-level key (`regexPattern`,
//! `wrapPrefix`, ...). Version 2 nests them per tool family under `tools`
//! and the provider options under `ai`. Migration copies legacy values into
//! the nested shape only where the nested key is absent, leaves the legacy
//! keys in place, and stamps `settingsVersion` so it never runs twice.

use serde_json::{Map, Value};
use tracing::debug;

pub const CURRENT_SETTINGS_VERSION: u64 = 2;

const VERSION_KEY: &str = "settingsVersion";

/// Legacy flat key → nested path (section, sub-record, field).
const LEGACY_KEYS: &[(&str, &[&str])] = &[
	("regexPattern", &["tools", "regex", "pattern"]),
	("regexReplacement", &["tools", "regex", "replacement"]),
	("filterPattern", &["tools", "filter", "pattern"]),
	("filterMode", &["tools", "filter", "mode"]),
	("columnDelimiter", &["tools", "column", "delimiter"]),
	("columnA", &["tools", "column", "first"]),
	("columnB", &["tools", "column", "second"]),
	("wrapPrefix", &["tools", "wrap", "prefix"]),
	("wrapSuffix", &["tools", "wrap", "suffix"]),
	("preserveFrontmatter", &["tools", "preserveFrontmatter"]),
	("preserveHeader", &["tools", "preserveHeader"]),
	("apiKey", &["ai", "apiKey"]),
	("model", &["ai", "model"]),
	("endpoint", &["ai", "endpoint"]),
];

/// Migrates `root` in place. Returns `true` if a migration ran.
pub fn migrate_legacy(root: &mut Map<String, Value>) -> bool {
	let version = root.get(VERSION_KEY).and_then(Value::as_u64).unwrap_or(1);
	if version >= CURRENT_SETTINGS_VERSION {
		return false;
	}

	let mut lifted = 0usize;
	for (legacy, path) in LEGACY_KEYS {
		let Some(value) = root.get(*legacy).cloned() else { continue };
		if insert_if_absent(root, path, value) {
			lifted += 1;
		}
	}

	if let Some(flags) = root.get("regexFlags").and_then(Value::as_str).map(str::to_owned) {
		for (flag, field) in [('i', "caseInsensitive"), ('m', "multiline"), ('g', "global")] {
			let enabled = Value::Bool(flags.contains(flag));
			if insert_if_absent(root, &["tools", "regex", field], enabled) {
				lifted += 1;
			}
		}
	}

	root.insert(VERSION_KEY.to_string(), Value::from(CURRENT_SETTINGS_VERSION));
	debug!(from = version, lifted, "migrated legacy settings");
	true
}

fn insert_if_absent(root: &mut Map<String, Value>, path: &[&str], value: Value) -> bool {
	let Some((leaf, parents)) = path.split_last() else { return false };
	let mut cursor = root;
	for segment in parents {
		let entry = cursor.entry(segment.to_string()).or_insert_with(|| Value::Object(Map::new()));
		let Value::Object(next) = entry else { return false };
		cursor = next;
	}
	if cursor.contains_key(*leaf) {
		return false;
	}
	cursor.insert(leaf.to_string(), value);
	true
}

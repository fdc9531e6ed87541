//! Script parameter normalization.
//!
//! Each declared parameter resolves to its runtime override when one is
//! supplied, otherwise to its declared default, and is then coerced to its
//! declared kind. Normalization never fails: values that cannot be coerced
//! fall back to the default, then to the kind's zero value.

use indexmap::IndexMap;
use nu_protocol::{Record, Span, Value};
use quill_settings::{ParamDef, ParamKind};
use serde_json::{Map, Value as Json};

/// A normalized parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	List(Vec<String>),
}

impl ParamValue {
	fn into_nu(self, span: Span) -> Value {
		match self {
			Self::Text(s) => Value::string(s, span),
			Self::Int(n) => Value::int(n, span),
			Self::Float(n) => Value::float(n, span),
			Self::Bool(b) => Value::bool(b, span),
			Self::List(items) => {
				Value::list(items.into_iter().map(|s| Value::string(s, span)).collect(), span)
			}
		}
	}
}

/// Normalized parameters keyed by name, in declaration order.
pub type Params = IndexMap<String, ParamValue>;

pub fn normalize_params(defs: &[ParamDef], overrides: &Map<String, Json>) -> Params {
	defs.iter()
		.map(|def| {
			let raw = overrides.get(&def.key).filter(|v| !v.is_null()).unwrap_or(&def.default);
			(def.key.clone(), normalize(def, raw))
		})
		.collect()
}

pub(crate) fn params_to_nu(params: Params, span: Span) -> Value {
	let mut record = Record::new();
	for (key, value) in params {
		record.push(key, value.into_nu(span));
	}
	Value::record(record, span)
}

fn normalize(def: &ParamDef, raw: &Json) -> ParamValue {
	match def.kind {
		ParamKind::Text => ParamValue::Text(unescape(&json_text(raw))),
		ParamKind::Number => {
			number(raw).or_else(|| number(&def.default)).unwrap_or(ParamValue::Int(0))
		}
		ParamKind::Boolean => {
			ParamValue::Bool(boolean(raw).or_else(|| boolean(&def.default)).unwrap_or(false))
		}
		ParamKind::Select => ParamValue::Text(select(def, raw)),
		ParamKind::Array => ParamValue::List(array(raw)),
	}
}

fn json_text(value: &Json) -> String {
	match value {
		Json::Null => String::new(),
		Json::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Turns literal `\n`, `\t`, `\r`, and `\\` sequences into the characters
/// they name. Other backslashes are kept.
pub fn unescape(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut chars = input.chars().peekable();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		let replacement = match chars.peek() {
			Some('n') => '\n',
			Some('t') => '\t',
			Some('r') => '\r',
			Some('\\') => '\\',
			_ => {
				out.push('\\');
				continue;
			}
		};
		chars.next();
		out.push(replacement);
	}
	out
}

fn number(value: &Json) -> Option<ParamValue> {
	match value {
		Json::Number(n) => {
			n.as_i64().map(ParamValue::Int).or_else(|| n.as_f64().map(ParamValue::Float))
		}
		Json::String(s) => {
			let s = s.trim();
			s.parse::<i64>()
				.map(ParamValue::Int)
				.ok()
				.or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(ParamValue::Float))
		}
		_ => None,
	}
}

fn boolean(value: &Json) -> Option<bool> {
	match value {
		Json::Bool(b) => Some(*b),
		Json::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
		Json::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
		_ => None,
	}
}

fn select(def: &ParamDef, raw: &Json) -> String {
	let chosen = json_text(raw);
	let Some(options) = def.options.as_deref().filter(|o| !o.is_empty()) else {
		return chosen;
	};
	if options.contains(&chosen) {
		return chosen;
	}
	let default = json_text(&def.default);
	if options.contains(&default) {
		return default;
	}
	options[0].clone()
}

fn array(value: &Json) -> Vec<String> {
	match value {
		Json::Null => Vec::new(),
		Json::String(s) => s.lines().map(str::to_string).collect(),
		Json::Array(items) => items.iter().map(json_text).collect(),
		other => vec![json_text(other)],
	}
}

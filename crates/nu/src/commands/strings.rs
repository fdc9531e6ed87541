use nu_engine::command_prelude::*;
use nu_protocol::Spanned;

use super::{collect_list, unsupported};

/// Maps `f` over string input, element-wise for lists.
fn map_strings(
	input: PipelineData,
	head: Span,
	engine_state: &EngineState,
	f: impl Fn(&str) -> Value + Send + 'static,
) -> Result<PipelineData, ShellError> {
	input.map(
		move |value| match &value {
			Value::String { val, .. } => f(val.as_str()),
			Value::Error { .. } => value,
			other => Value::error(unsupported(other, "string", head), head),
		},
		engine_state.signals(),
	)
}

fn string_signature(name: &str) -> Signature {
	Signature::build(name)
		.input_output_types(vec![
			(Type::String, Type::String),
			(Type::List(Box::new(Type::String)), Type::List(Box::new(Type::String))),
		])
		.category(Category::Strings)
}

#[derive(Clone)]
pub struct StrUpcase;

impl Command for StrUpcase {
	fn name(&self) -> &str {
		"str upcase"
	}

	fn signature(&self) -> Signature {
		string_signature("str upcase")
	}

	fn description(&self) -> &str {
		"Make text uppercase."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		map_strings(input, head, engine_state, move |s| Value::string(s.to_uppercase(), head))
	}
}

#[derive(Clone)]
pub struct StrDowncase;

impl Command for StrDowncase {
	fn name(&self) -> &str {
		"str downcase"
	}

	fn signature(&self) -> Signature {
		string_signature("str downcase")
	}

	fn description(&self) -> &str {
		"Make text lowercase."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		map_strings(input, head, engine_state, move |s| Value::string(s.to_lowercase(), head))
	}
}

#[derive(Clone)]
pub struct StrTrim;

impl Command for StrTrim {
	fn name(&self) -> &str {
		"str trim"
	}

	fn signature(&self) -> Signature {
		string_signature("str trim")
			.switch("left", "Trim only the start.", Some('l'))
			.switch("right", "Trim only the end.", Some('r'))
	}

	fn description(&self) -> &str {
		"Trim whitespace from text."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let left = call.has_flag(engine_state, stack, "left")?;
		let right = call.has_flag(engine_state, stack, "right")?;
		map_strings(input, head, engine_state, move |s| {
			let trimmed = match (left, right) {
				(true, false) => s.trim_start(),
				(false, true) => s.trim_end(),
				_ => s.trim(),
			};
			Value::string(trimmed, head)
		})
	}
}

/// Literal-only `str replace`; patterns are never compiled as regex.
#[derive(Clone)]
pub struct StrReplace;

impl Command for StrReplace {
	fn name(&self) -> &str {
		"str replace"
	}

	fn signature(&self) -> Signature {
		string_signature("str replace")
			.required("find", SyntaxShape::String, "The text to find.")
			.required("replace", SyntaxShape::String, "The replacement text.")
			.switch("all", "Replace every occurrence.", Some('a'))
	}

	fn description(&self) -> &str {
		"Find and replace text."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let find: String = call.req(engine_state, stack, 0)?;
		let replace: String = call.req(engine_state, stack, 1)?;
		let all = call.has_flag(engine_state, stack, "all")?;
		map_strings(input, head, engine_state, move |s| {
			let out = if all { s.replace(&find, &replace) } else { s.replacen(&find, &replace, 1) };
			Value::string(out, head)
		})
	}
}

#[derive(Clone)]
pub struct StrContains;

impl Command for StrContains {
	fn name(&self) -> &str {
		"str contains"
	}

	fn signature(&self) -> Signature {
		Signature::build("str contains")
			.input_output_types(vec![
				(Type::String, Type::Bool),
				(Type::List(Box::new(Type::String)), Type::List(Box::new(Type::Bool))),
			])
			.required("string", SyntaxShape::String, "The substring to find.")
			.switch("ignore-case", "Compare case-insensitively.", Some('i'))
			.category(Category::Strings)
	}

	fn description(&self) -> &str {
		"Check whether text contains a substring."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let needle: String = call.req(engine_state, stack, 0)?;
		let ignore_case = call.has_flag(engine_state, stack, "ignore-case")?;
		map_strings(input, head, engine_state, move |s| {
			let found = if ignore_case {
				s.to_lowercase().contains(&needle.to_lowercase())
			} else {
				s.contains(needle.as_str())
			};
			Value::bool(found, head)
		})
	}
}

#[derive(Clone)]
pub struct StrJoin;

impl Command for StrJoin {
	fn name(&self) -> &str {
		"str join"
	}

	fn signature(&self) -> Signature {
		Signature::build("str join")
			.input_output_types(vec![
				(Type::List(Box::new(Type::Any)), Type::String),
				(Type::String, Type::String),
			])
			.optional("separator", SyntaxShape::String, "Placed between items.")
			.category(Category::Strings)
	}

	fn description(&self) -> &str {
		"Concatenate a list into one string."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let separator: Option<String> = call.opt(engine_state, stack, 0)?;
		let parts = match input {
			PipelineData::Value(Value::String { val, .. }, ..) => vec![val],
			input => collect_list(input, head)?
				.into_iter()
				.map(Value::coerce_into_string)
				.collect::<Result<Vec<_>, _>>()?,
		};
		let joined = parts.join(separator.as_deref().unwrap_or_default());
		Ok(Value::string(joined, head).into_pipeline_data())
	}
}

#[derive(Clone)]
pub struct SplitRow;

impl Command for SplitRow {
	fn name(&self) -> &str {
		"split row"
	}

	fn signature(&self) -> Signature {
		Signature::build("split row")
			.input_output_types(vec![
				(Type::String, Type::List(Box::new(Type::String))),
				(Type::List(Box::new(Type::String)), Type::List(Box::new(Type::String))),
			])
			.required("separator", SyntaxShape::String, "The text to split on.")
			.category(Category::Strings)
	}

	fn description(&self) -> &str {
		"Split text into a list on a separator."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let separator: Spanned<String> = call.req(engine_state, stack, 0)?;
		if separator.item.is_empty() {
			return Err(ShellError::GenericError {
				error: "Empty separator".into(),
				msg: "separator must not be empty".into(),
				span: Some(separator.span),
				help: None,
				inner: vec![],
			});
		}

		let sources = match input {
			PipelineData::Value(Value::String { val, .. }, ..) => vec![val],
			input => collect_list(input, head)?
				.into_iter()
				.map(|value| match value {
					Value::String { val, .. } => Ok(val),
					other => Err(unsupported(&other, "string", head)),
				})
				.collect::<Result<Vec<_>, _>>()?,
		};

		let mut parts = Vec::new();
		for source in &sources {
			let split = source.split(separator.item.as_str());
			parts.extend(split.map(|part| Value::string(part, head)));
		}
		Ok(Value::list(parts, head).into_pipeline_data())
	}
}

#[derive(Clone)]
pub struct Lines;

impl Command for Lines {
	fn name(&self) -> &str {
		"lines"
	}

	fn signature(&self) -> Signature {
		Signature::build("lines")
			.input_output_types(vec![(Type::String, Type::List(Box::new(Type::String)))])
			.category(Category::Strings)
	}

	fn description(&self) -> &str {
		"Split text into lines. A trailing newline does not produce an empty last line."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let text = input.collect_string("\n", engine_state.get_config())?;
		let lines: Vec<Value> = text.lines().map(|line| Value::string(line, head)).collect();
		Ok(Value::list(lines, head).into_pipeline_data())
	}
}

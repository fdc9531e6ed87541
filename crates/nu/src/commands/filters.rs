use std::cmp::Ordering;

use nu_engine::command_prelude::*;
use nu_engine::{ClosureEval, ClosureEvalOnce};
use nu_protocol::engine::Closure;

use super::collect_list;

#[derive(Clone)]
pub struct Length;

impl Command for Length {
	fn name(&self) -> &str {
		"length"
	}

	fn signature(&self) -> Signature {
		Signature::build("length")
			.input_output_types(vec![
				(Type::List(Box::new(Type::Any)), Type::Int),
				(Type::String, Type::Int),
				(Type::Nothing, Type::Int),
			])
			.category(Category::Filters)
	}

	fn description(&self) -> &str {
		"Count list items, or characters in a string."
	}

	fn run(
		&self,
		_engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let count = match input {
			PipelineData::Value(Value::String { val, .. }, ..) => val.chars().count(),
			input => collect_list(input, head)?.len(),
		};
		Ok(Value::int(count as i64, head).into_pipeline_data())
	}
}

/// `each {|x| ...}`: maps a closure over a list. `null` results are dropped.
#[derive(Clone)]
pub struct Each;

impl Command for Each {
	fn name(&self) -> &str {
		"each"
	}

	fn signature(&self) -> Signature {
		Signature::build("each")
			.input_output_types(vec![
				(Type::List(Box::new(Type::Any)), Type::List(Box::new(Type::Any))),
				(Type::Any, Type::Any),
			])
			.required(
				"closure",
				SyntaxShape::Closure(Some(vec![SyntaxShape::Any])),
				"The closure to run.",
			)
			.category(Category::Filters)
	}

	fn description(&self) -> &str {
		"Run a closure on each item of a list."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let closure: Closure = call.req(engine_state, stack, 0)?;

		match input {
			PipelineData::Empty | PipelineData::Value(Value::Nothing { .. }, ..) => {
				Ok(PipelineData::empty())
			}
			PipelineData::Value(Value::List { .. }, ..) | PipelineData::ListStream(..) => {
				let mut closure = ClosureEval::new(engine_state, stack, closure);
				let mut out = Vec::new();
				for value in input {
					let mapped = closure.run_with_value(value)?.into_value(head)?;
					if !mapped.is_nothing() {
						out.push(mapped);
					}
				}
				Ok(Value::list(out, head).into_pipeline_data())
			}
			PipelineData::Value(value, ..) => {
				ClosureEvalOnce::new(engine_state, stack, closure).run_with_value(value)
			}
			other => Err(ShellError::OnlySupportsThisInputType {
				exp_input_type: "list".into(),
				wrong_type: other.get_type().to_string(),
				dst_span: head,
				src_span: other.span().unwrap_or(head),
			}),
		}
	}
}

#[derive(Clone)]
pub struct Sort;

impl Command for Sort {
	fn name(&self) -> &str {
		"sort"
	}

	fn signature(&self) -> Signature {
		Signature::build("sort")
			.input_output_types(vec![(
				Type::List(Box::new(Type::Any)),
				Type::List(Box::new(Type::Any)),
			)])
			.switch("reverse", "Sort in descending order.", Some('r'))
			.category(Category::Filters)
	}

	fn description(&self) -> &str {
		"Sort a list of values. The sort is stable."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let reverse = call.has_flag(engine_state, stack, "reverse")?;
		let mut vals = collect_list(input, head)?;
		vals.sort_by(|a, b| {
			let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
			if reverse { ord.reverse() } else { ord }
		});
		Ok(Value::list(vals, head).into_pipeline_data())
	}
}

/// Drops repeated values, keeping the first of each.
#[derive(Clone)]
pub struct Uniq;

impl Command for Uniq {
	fn name(&self) -> &str {
		"uniq"
	}

	fn signature(&self) -> Signature {
		Signature::build("uniq")
			.input_output_types(vec![(
				Type::List(Box::new(Type::Any)),
				Type::List(Box::new(Type::Any)),
			)])
			.category(Category::Filters)
	}

	fn description(&self) -> &str {
		"Remove duplicate values from a list, keeping the first."
	}

	fn run(
		&self,
		_engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let mut out: Vec<Value> = Vec::new();
		for value in collect_list(input, head)? {
			if !out.contains(&value) {
				out.push(value);
			}
		}
		Ok(Value::list(out, head).into_pipeline_data())
	}
}

#[derive(Clone)]
pub struct Reverse;

impl Command for Reverse {
	fn name(&self) -> &str {
		"reverse"
	}

	fn signature(&self) -> Signature {
		Signature::build("reverse")
			.input_output_types(vec![
				(Type::List(Box::new(Type::Any)), Type::List(Box::new(Type::Any))),
				(Type::String, Type::String),
			])
			.category(Category::Filters)
	}

	fn description(&self) -> &str {
		"Reverse a list, or the characters of a string."
	}

	fn run(
		&self,
		_engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		match input {
			PipelineData::Value(Value::String { val, .. }, ..) => {
				let reversed: String = val.chars().rev().collect();
				Ok(Value::string(reversed, head).into_pipeline_data())
			}
			input => {
				let mut vals = collect_list(input, head)?;
				vals.reverse();
				Ok(Value::list(vals, head).into_pipeline_data())
			}
		}
	}
}

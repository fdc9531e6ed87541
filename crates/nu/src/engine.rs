//! Engine construction, parsing, and evaluation.

use std::sync::Arc;

use nu_protocol::ast::Block;
use nu_protocol::config::Config;
use nu_protocol::engine::{EngineState, Stack, StateWorkingSet};
use nu_protocol::{PipelineData, ShellError, Span, Value};

use crate::ScriptError;
use crate::commands::{self, AppInfo, SharedCapture};
use crate::sandbox::ensure_sandboxed;

const RECURSION_LIMIT: i64 = 64;

/// Builds a fresh engine with the language core and script commands.
///
/// Registered from `nu-cmd-lang`: definitions, bindings, branching, `do`,
/// `try`, `return`, `echo`, and `error make`. Loops, modules, overlays,
/// aliases, and externs are left out so they fail at parse time.
pub(crate) fn create_engine_state(
	app: AppInfo,
	capture: &SharedCapture,
) -> Result<EngineState, ScriptError> {
	let mut engine_state = EngineState::new();
	let delta = {
		let mut working_set = StateWorkingSet::new(&engine_state);
		macro_rules! bind {
			( $( $cmd:expr ),* $(,)? ) => {
				$( working_set.add_decl(Box::new($cmd)); )*
			};
		}
		bind! {
			nu_cmd_lang::Def,
			nu_cmd_lang::Let,
			nu_cmd_lang::Mut,
			nu_cmd_lang::Const,
			nu_cmd_lang::If,
			nu_cmd_lang::Match,
			nu_cmd_lang::Do,
			nu_cmd_lang::Try,
			nu_cmd_lang::Return,
			nu_cmd_lang::Echo,
			nu_cmd_lang::Error,
			nu_cmd_lang::ErrorMake,
		}
		commands::register_all(&mut working_set, app, capture);
		working_set.render()
	};
	engine_state.merge_delta(delta).map_err(|e| ScriptError::Engine(e.to_string()))?;

	let mut config: Config = engine_state.get_config().as_ref().clone();
	config.recursion_limit = RECURSION_LIMIT;
	engine_state.set_config(config);
	Ok(engine_state)
}

/// Parses `source`, runs the sandbox scan, and merges the result.
pub(crate) fn parse_and_validate(
	engine_state: &mut EngineState,
	fname: &str,
	source: &str,
) -> Result<Arc<Block>, ScriptError> {
	let mut working_set = StateWorkingSet::new(engine_state);
	let block = nu_parser::parse(&mut working_set, Some(fname), source.as_bytes(), false);

	if let Some(error) = working_set.parse_errors.first() {
		return Err(ScriptError::Parse(error.to_string()));
	}
	if let Some(error) = working_set.compile_errors.first() {
		return Err(ScriptError::Parse(error.to_string()));
	}
	ensure_sandboxed(&working_set, block.as_ref())?;

	let delta = working_set.render();
	engine_state.merge_delta(delta).map_err(|e| ScriptError::Engine(e.to_string()))?;
	Ok(block)
}

/// Evaluates `block` with `env` set on a fresh stack.
pub(crate) fn evaluate(
	engine_state: &EngineState,
	block: &Block,
	env: Vec<(String, Value)>,
) -> Result<Value, ScriptError> {
	let mut stack = Stack::new();
	for (key, value) in env {
		stack.add_env_var(key, value);
	}
	let eval_block = nu_engine::get_eval_block(engine_state);
	let runtime = |e: ShellError| ScriptError::Runtime(e.to_string());
	let execution =
		eval_block(engine_state, &mut stack, block, PipelineData::empty()).map_err(runtime)?;
	let value = execution.body.into_value(Span::unknown()).map_err(runtime)?;
	match value {
		Value::Error { error, .. } => Err(ScriptError::Runtime(error.to_string())),
		value => Ok(value),
	}
}

use std::sync::Arc;

use nu_protocol::{Span, Value};
use parking_lot::Mutex;
use quill_settings::Scope;
use tracing::{debug, instrument, warn};

use crate::commands::{AppInfo, Capture};
use crate::params::{Params, params_to_nu};
use crate::{ScriptError, engine};

/// Largest script source accepted.
pub const MAX_SOURCE_BYTES: usize = 512 * 1024;

const SCRIPT_FILE: &str = "<quill-script>";
const ENTRY: &str = "__quill_script";
const ENV_SELECTION: &str = "QUILL_SELECTION";
const ENV_TEXT: &str = "QUILL_TEXT";
const ENV_PARAMS: &str = "QUILL_PARAMS";

/// One script invocation.
#[derive(Debug, Clone, Default)]
pub struct ScriptRequest {
	/// Nu source, evaluated as a function body.
	pub code: String,
	/// Bound to `$text`.
	pub full_text: String,
	/// Bound to `$selection`; empty when nothing is selected.
	pub selection: String,
	pub params: Params,
	pub scope: Scope,
}

impl ScriptRequest {
	/// The text a `null` result hands back unchanged.
	pub fn target(&self) -> &str {
		match self.scope {
			Scope::Selection => &self.selection,
			Scope::Document => &self.full_text,
		}
	}
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
	pub text: String,
	/// False when the script returned nothing.
	pub changed: bool,
	/// Lines written with `log`.
	pub logs: Vec<String>,
	/// Messages raised with `notify`.
	pub notices: Vec<String>,
}

/// Runs user scripts in a sandboxed Nu engine.
///
/// Every run gets a fresh engine, so nothing a script defines survives into
/// the next one.
#[derive(Debug, Clone)]
pub struct ScriptHost {
	app_name: String,
	app_version: String,
	max_source_bytes: usize,
}

impl Default for ScriptHost {
	fn default() -> Self {
		Self {
			app_name: "quill".to_string(),
			app_version: env!("CARGO_PKG_VERSION").to_string(),
			max_source_bytes: MAX_SOURCE_BYTES,
		}
	}
}

impl ScriptHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_source_bytes(mut self, limit: usize) -> Self {
		self.max_source_bytes = limit;
		self
	}

	/// Runs `request` on the blocking pool and waits for it.
	#[instrument(skip_all, fields(scope = %request.scope, bytes = request.code.len()))]
	pub async fn execute(&self, request: ScriptRequest) -> Result<ScriptOutcome, ScriptError> {
		self.precheck(&request)?;
		let host = self.clone();
		let result = tokio::task::spawn_blocking(move || host.execute_blocking(request)).await?;
		if let Err(error) = &result {
			warn!(%error, "script failed");
		}
		result
	}

	fn precheck(&self, request: &ScriptRequest) -> Result<(), ScriptError> {
		let size = request.code.len();
		if size > self.max_source_bytes {
			return Err(ScriptError::TooLarge {
				size,
				limit: self.max_source_bytes,
			});
		}
		if needs_selection(&request.code) && request.selection.is_empty() {
			return Err(ScriptError::SelectionRequired);
		}
		Ok(())
	}

	/// Synchronous core of [`execute`](Self::execute).
	pub fn execute_blocking(&self, request: ScriptRequest) -> Result<ScriptOutcome, ScriptError> {
		self.precheck(&request)?;
		let span = Span::unknown();
		let capture = Arc::new(Mutex::new(Capture::default()));
		let app = AppInfo {
			name: self.app_name.clone(),
			version: self.app_version.clone(),
			scope: request.scope.to_string(),
			has_selection: !request.selection.is_empty(),
		};

		let mut engine_state = engine::create_engine_state(app, &capture)?;
		let source = wrap_source(&request.code);
		let block = engine::parse_and_validate(&mut engine_state, SCRIPT_FILE, &source)?;

		let target = request.target().to_string();
		let env = vec![
			(ENV_SELECTION.to_string(), Value::string(request.selection, span)),
			(ENV_TEXT.to_string(), Value::string(request.full_text, span)),
			(ENV_PARAMS.to_string(), params_to_nu(request.params, span)),
		];
		let value = engine::evaluate(&engine_state, &block, env)?;

		let (text, changed) = match value {
			Value::Nothing { .. } => (target, false),
			value => (render(value, &engine_state), true),
		};
		let Capture { logs, notices } = std::mem::take(&mut *capture.lock());
		debug!(changed, logs = logs.len(), notices = notices.len(), "script finished");
		Ok(ScriptOutcome {
			text,
			changed,
			logs,
			notices,
		})
	}
}

/// Whether `code` reads the selection without ever reading the document.
///
/// Textual, not semantic: a mention inside a string literal counts.
pub fn needs_selection(code: &str) -> bool {
	code.contains("$selection") && !code.contains("$text")
}

/// Wraps user code as the body of a command so `return` works, and binds the
/// script variables from the environment.
fn wrap_source(code: &str) -> String {
	format!(
		"def {ENTRY} [] {{\n\
		 let selection = $env.{ENV_SELECTION}\n\
		 let text = $env.{ENV_TEXT}\n\
		 let params = $env.{ENV_PARAMS}\n\
		 {code}\n\
		 }}\n\
		 {ENTRY}\n"
	)
}

/// Text form of a script result. Lists become one item per line.
fn render(value: Value, engine_state: &nu_protocol::engine::EngineState) -> String {
	let config = engine_state.get_config();
	match value {
		Value::String { val, .. } => val,
		Value::List { vals, .. } => vals
			.into_iter()
			.map(|item| match item {
				Value::String { val, .. } => val,
				other => other.to_expanded_string(", ", config),
			})
			.collect::<Vec<_>>()
			.join("\n"),
		other => other.to_expanded_string("\n", config),
	}
}

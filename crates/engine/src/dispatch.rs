//! Resolves one [`ToolOperation`] against the settings and runs it.

use quill_nu::{ScriptError, ScriptHost, ScriptRequest, normalize_params};
use quill_registry::{NotificationSink, StrategyRegistry, keys};
use quill_settings::{OperationTarget, Scope, Settings, ToolOperation, ToolSettings};
use serde_json::{Map, Value as Json};
use tracing::{debug, error, instrument, warn};

use crate::error::DispatchError;
use crate::host::AiClient;
use crate::protect;

/// Everything a step needs besides the operation and its input.
pub struct StepContext<'a> {
	pub scope: Scope,
	/// The whole document. Selection-scope scripts see it as `$text`.
	pub document: &'a str,
	pub notices: &'a mut dyn NotificationSink,
	/// Push shield notices. Batches turn this off.
	pub announce_shield: bool,
	/// Runtime parameter overrides for a script step.
	pub params: Option<&'a Map<String, Json>>,
}

impl<'a> StepContext<'a> {
	pub fn new(scope: Scope, document: &'a str, notices: &'a mut dyn NotificationSink) -> Self {
		Self {
			scope,
			document,
			notices,
			announce_shield: true,
			params: None,
		}
	}

	pub fn quiet(mut self) -> Self {
		self.announce_shield = false;
		self
	}
}

/// Output of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub text: String,
	/// False when the step degraded to a no-op (missing reference, AI
	/// failure, selection required).
	pub applied: bool,
}

impl Step {
	fn applied(text: String) -> Self {
		Self { text, applied: true }
	}

	fn skipped(text: &str) -> Self {
		Self {
			text: text.to_string(),
			applied: false,
		}
	}
}

/// Routes operations to the strategy registry, the script host, or the AI
/// client.
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
	settings: &'a Settings,
	registry: &'a StrategyRegistry,
	scripts: &'a ScriptHost,
	ai: &'a dyn AiClient,
}

impl<'a> Dispatcher<'a> {
	pub fn new(
		settings: &'a Settings,
		registry: &'a StrategyRegistry,
		scripts: &'a ScriptHost,
		ai: &'a dyn AiClient,
	) -> Self {
		Self {
			settings,
			registry,
			scripts,
			ai,
		}
	}

	/// Runs `op` on `text`.
	///
	/// Only a failing script is an error. Every other problem is reported
	/// through `ctx.notices` and returns `text` unchanged.
	#[instrument(skip_all, fields(op = %op.target.describe(), scope = %ctx.scope))]
	pub async fn apply(
		&self,
		op: &ToolOperation,
		text: &str,
		ctx: &mut StepContext<'_>,
	) -> Result<Step, DispatchError> {
		let step = match &op.target {
			OperationTarget::Builtin { tool } => self.builtin(tool, &op.settings, text, ctx),
			OperationTarget::CustomScript { script_id } => self.script(script_id, text, ctx).await?,
			OperationTarget::CustomAiAction { action_id } => {
				self.ai_action(action_id, &op.settings, text, ctx).await
			}
		};
		debug!(applied = step.applied, bytes = step.text.len(), "step done");
		Ok(step)
	}

	fn builtin(
		&self,
		id: &str,
		settings: &ToolSettings,
		text: &str,
		ctx: &mut StepContext<'_>,
	) -> Step {
		let Some(strategy) = self.registry.get(id) else {
			warn!(tool = id, "unknown tool");
			ctx.notices.push(keys::tool_not_found(id));
			return Step::skipped(text);
		};
		let settings = protect::scoped(settings, ctx.scope);
		let announce = ctx.announce_shield;
		let out = protect::protect(text, &settings, &mut *ctx.notices, announce, |body, notices| {
			strategy.execute(body, &settings, notices)
		});
		Step::applied(out)
	}

	async fn script(
		&self,
		id: &str,
		text: &str,
		ctx: &mut StepContext<'_>,
	) -> Result<Step, DispatchError> {
		let Some(script) = self.settings.script(id) else {
			warn!(script = id, "unknown script");
			ctx.notices.push(keys::script_not_found(id));
			return Ok(Step::skipped(text));
		};

		let no_overrides = Map::new();
		let params = normalize_params(&script.params, ctx.params.unwrap_or(&no_overrides));
		let (full_text, selection) = match ctx.scope {
			Scope::Document => (text.to_string(), String::new()),
			Scope::Selection => (ctx.document.to_string(), text.to_string()),
		};
		let request = ScriptRequest {
			code: script.code.clone(),
			full_text,
			selection,
			params,
			scope: ctx.scope,
		};

		match self.scripts.execute(request).await {
			Ok(outcome) => {
				for message in outcome.notices {
					ctx.notices.push(keys::script_notice(message));
				}
				Ok(Step::applied(outcome.text))
			}
			Err(ScriptError::SelectionRequired) => {
				ctx.notices.push(keys::SELECTION_REQUIRED.emit());
				Ok(Step::skipped(text))
			}
			Err(source) => {
				error!(script = %script.name, error = %source, "script failed");
				Err(DispatchError::Script {
					name: script.name.clone(),
					source,
				})
			}
		}
	}

	async fn ai_action(
		&self,
		id: &str,
		settings: &ToolSettings,
		text: &str,
		ctx: &mut StepContext<'_>,
	) -> Step {
		let Some(action) = self.settings.ai_action(id) else {
			warn!(action = id, "unknown AI action");
			ctx.notices.push(keys::prompt_not_found(id));
			return Step::skipped(text);
		};
		let config = self.settings.ai.merged(&action.overrides);
		if !config.is_configured() {
			ctx.notices.push(keys::AI_UNCONFIGURED.emit());
			return Step::skipped(text);
		}

		let settings = protect::scoped(settings, ctx.scope);
		let parts = protect::split(text, settings.preserve_frontmatter, settings.preserve_header);
		if ctx.announce_shield && let Some(key) = parts.shield_notice() {
			ctx.notices.push(key.emit());
		}

		let prompt = action.render_prompt(parts.body);
		let response = self.ai.send(&config, &action.system_prompt, &prompt).await;
		if let Some(err) = response.failure() {
			warn!(action = %action.name, error = err, "AI request failed");
			ctx.notices.push(keys::ai_error(err));
			return Step::skipped(text);
		}
		Step::applied(parts.reassemble(&response.content))
	}
}

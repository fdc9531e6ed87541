//! One editing session: settings, tools, history, and the document.

use std::path::Path;
use std::sync::Arc;

use quill_nu::ScriptHost;
use quill_registry::{Notification, StrategyRegistry, keys};
use quill_settings::{BatchProcess, OperationTarget, Scope, Settings, ToolOperation};
use serde_json::{Map, Value as Json};
use tracing::{Instrument, debug, info, info_span};

use crate::batch::run_operations;
use crate::dispatch::{Dispatcher, Step, StepContext};
use crate::error::{BatchError, DispatchError, SessionError};
use crate::history::History;
use crate::host::{AiClient, EditorHost};
use crate::notify::NotificationCenter;

/// What an operation did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// New text was written and the previous document pushed to history.
	Written,
	/// The operation ran but produced the text it was given.
	Unchanged,
	/// Nothing ran; a notification says why.
	Skipped,
}

/// Owns everything one editor needs to run operations.
///
/// Entry points take `&mut self`, so two runs can never overlap on one
/// session.
pub struct Session<E> {
	settings: Settings,
	registry: StrategyRegistry,
	scripts: ScriptHost,
	ai: Arc<dyn AiClient>,
	history: History,
	notifications: NotificationCenter,
	editor: E,
}

impl<E: EditorHost> Session<E> {
	pub fn new(settings: Settings, editor: E, ai: Arc<dyn AiClient>) -> Self {
		Self {
			settings,
			registry: StrategyRegistry::with_builtins(),
			scripts: ScriptHost::new(),
			ai,
			history: History::new(),
			notifications: NotificationCenter::new(),
			editor,
		}
	}

	pub fn with_history(mut self, history: History) -> Self {
		self.history = history;
		self
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn settings_mut(&mut self) -> &mut Settings {
		&mut self.settings
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn editor(&self) -> &E {
		&self.editor
	}

	pub fn take_notifications(&mut self) -> Vec<Notification> {
		self.notifications.take_pending()
	}

	pub fn save_settings(&self, path: &Path) -> Result<(), SessionError> {
		Ok(self.settings.save(path)?)
	}

	/// Runs built-in tool `id` with the live tool settings.
	pub async fn apply_tool(&mut self, id: &str, scope: Scope) -> Result<Outcome, SessionError> {
		let op = ToolOperation::builtin(id, self.settings.tools.clone());
		self.run_single(&op, scope, None).await
	}

	/// Runs script `id`. `overrides` replace declared parameter defaults.
	pub async fn run_script(
		&mut self,
		id: &str,
		scope: Scope,
		overrides: &Map<String, Json>,
	) -> Result<Outcome, SessionError> {
		let op = ToolOperation::script(id, self.settings.tools.clone());
		self.run_single(&op, scope, Some(overrides)).await
	}

	/// Runs AI action `id` in `scope`. Actions marked `apply_to_selection`
	/// always target the selection.
	pub async fn run_ai_action(&mut self, id: &str, scope: Scope) -> Result<Outcome, SessionError> {
		let Some(action) = self.settings.ai_action(id) else {
			self.notifications.notify(keys::prompt_not_found(id));
			return Ok(Outcome::Skipped);
		};
		let scope = if action.apply_to_selection { Scope::Selection } else { scope };
		let op = ToolOperation::ai_action(id, self.settings.tools.clone());
		self.run_single(&op, scope, None).await
	}

	/// Runs the stored batch `id`.
	///
	/// A missing batch loses its shortcut entry.
	pub async fn run_saved_batch(
		&mut self,
		id: &str,
		scope: Scope,
	) -> Result<Outcome, SessionError> {
		let Some(batch) = self.settings.batch(id).cloned() else {
			self.settings.batch_shortcuts.shift_remove(id);
			self.notifications.notify(keys::batch_not_found(id));
			return Err(BatchError::NotFound(id.to_string()).into());
		};
		self.run_batch(&batch, scope).await
	}

	/// Runs every step of `batch` and writes the result once.
	///
	/// A failing step leaves the document as it was.
	pub async fn run_batch(
		&mut self,
		batch: &BatchProcess,
		scope: Scope,
	) -> Result<Outcome, SessionError> {
		let Some(input) = self.read_target(scope) else {
			return Err(BatchError::NoSelection.into());
		};
		let document = self.editor.value();
		let dispatcher =
			Dispatcher::new(&self.settings, &self.registry, &self.scripts, self.ai.as_ref());
		let mut ctx = StepContext::new(scope, &document, &mut self.notifications).quiet();

		let span = info_span!("batch", batch = %batch.name, steps = batch.operations.len(), %scope);
		let result = run_operations(&dispatcher, &batch.operations, input.clone(), &mut ctx)
			.instrument(span)
			.await;

		match result {
			Ok(text) => {
				self.notifications.notify(keys::batch_applied(&batch.name, batch.operations.len()));
				info!(batch = %batch.name, "batch applied");
				Ok(self.write(scope, &input, text))
			}
			Err(err) => {
				if let BatchError::Step { step, source } = &err {
					self.notifications.notify(keys::script_failed(&source.to_string()));
					self.notifications.notify(keys::batch_aborted(*step));
				}
				Err(err.into())
			}
		}
	}

	pub fn undo(&mut self) -> Outcome {
		match self.history.undo(self.editor.value()) {
			Some(previous) => {
				self.editor.set_value(previous);
				Outcome::Written
			}
			None => {
				self.notifications.notify(keys::NOTHING_TO_UNDO);
				Outcome::Skipped
			}
		}
	}

	pub fn redo(&mut self) -> Outcome {
		match self.history.redo(self.editor.value()) {
			Some(next) => {
				self.editor.set_value(next);
				Outcome::Written
			}
			None => {
				self.notifications.notify(keys::NOTHING_TO_REDO);
				Outcome::Skipped
			}
		}
	}

	async fn run_single(
		&mut self,
		op: &ToolOperation,
		scope: Scope,
		params: Option<&Map<String, Json>>,
	) -> Result<Outcome, SessionError> {
		let Some(input) = self.read_target(scope) else {
			return Ok(Outcome::Skipped);
		};
		let document = self.editor.value();
		let dispatcher =
			Dispatcher::new(&self.settings, &self.registry, &self.scripts, self.ai.as_ref());
		let mut ctx = StepContext::new(scope, &document, &mut self.notifications);
		ctx.params = params;

		let result = dispatcher.apply(op, &input, &mut ctx).await;
		match result {
			Ok(Step { text, applied: true }) => {
				if let Some(notice) = self.success_notice(&op.target) {
					self.notifications.notify(notice);
				}
				Ok(self.write(scope, &input, text))
			}
			Ok(Step { applied: false, .. }) => Ok(Outcome::Skipped),
			Err(err) => {
				let DispatchError::Script { source, .. } = &err;
				self.notifications.notify(keys::script_failed(&source.to_string()));
				Err(err.into())
			}
		}
	}

	/// The text `scope` targets. An empty selection counts as none.
	fn read_target(&mut self, scope: Scope) -> Option<String> {
		match scope {
			Scope::Document => Some(self.editor.value()),
			Scope::Selection => {
				let selection = self.editor.selection().filter(|s| !s.is_empty());
				if selection.is_none() {
					self.notifications.notify(keys::NO_SELECTION);
				}
				selection
			}
		}
	}

	fn write(&mut self, scope: Scope, before: &str, text: String) -> Outcome {
		if text == before {
			debug!(%scope, "no change");
			return Outcome::Unchanged;
		}
		self.history.push(self.editor.value());
		match scope {
			Scope::Document => self.editor.set_value(text),
			Scope::Selection => self.editor.replace_selection(text),
		}
		Outcome::Written
	}

	fn success_notice(&self, target: &OperationTarget) -> Option<Notification> {
		match target {
			OperationTarget::Builtin { tool } => {
				self.registry.get(tool).map(|s| keys::tool_applied(s.meta().name))
			}
			OperationTarget::CustomScript { script_id } => {
				self.settings.script(script_id).map(|s| keys::script_succeeded(&s.name))
			}
			OperationTarget::CustomAiAction { action_id } => {
				self.settings.ai_action(action_id).map(|a| keys::ai_done(&a.name))
			}
		}
	}
}

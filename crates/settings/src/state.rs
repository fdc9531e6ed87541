//! Persisted settings root.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::migrate::CURRENT_SETTINGS_VERSION;
use crate::{AiConfig, BatchProcess, CustomAiAction, ScriptDefinition, ToolSettings};

/// The whole persisted configuration.
///
/// Owned by one session and passed by reference into every operation; there
/// is no process-wide settings singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
	pub settings_version: u64,
	pub tools: ToolSettings,
	pub ai: AiConfig,
	pub scripts: Vec<ScriptDefinition>,
	pub ai_actions: Vec<CustomAiAction>,
	pub batches: Vec<BatchProcess>,
	/// Whether a command shortcut is registered for each batch id.
	pub batch_shortcuts: IndexMap<String, bool>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			settings_version: CURRENT_SETTINGS_VERSION,
			tools: ToolSettings::default(),
			ai: AiConfig::default(),
			scripts: Vec::new(),
			ai_actions: Vec::new(),
			batches: Vec::new(),
			batch_shortcuts: IndexMap::new(),
		}
	}
}

impl Settings {
	pub fn script(&self, id: &str) -> Option<&ScriptDefinition> {
		self.scripts.iter().find(|script| script.id == id)
	}

	pub fn ai_action(&self, id: &str) -> Option<&CustomAiAction> {
		self.ai_actions.iter().find(|action| action.id == id)
	}

	pub fn batch(&self, id: &str) -> Option<&BatchProcess> {
		self.batches.iter().find(|batch| batch.id == id)
	}

	/// Inserts `batch`, replacing any stored batch with the same id in place.
	pub fn upsert_batch(&mut self, batch: BatchProcess) {
		match self.batches.iter_mut().find(|existing| existing.id == batch.id) {
			Some(existing) => *existing = batch,
			None => self.batches.push(batch),
		}
	}

	/// Removes a batch and its shortcut entry.
	pub fn remove_batch(&mut self, id: &str) -> Option<BatchProcess> {
		self.batch_shortcuts.shift_remove(id);
		let index = self.batches.iter().position(|batch| batch.id == id)?;
		Some(self.batches.remove(index))
	}

	/// Removes a script definition. Batch steps that reference it are left
	/// alone; the dispatcher reports them as dangling at run time.
	pub fn remove_script(&mut self, id: &str) -> Option<ScriptDefinition> {
		let index = self.scripts.iter().position(|script| script.id == id)?;
		Some(self.scripts.remove(index))
	}

	pub fn shortcut_enabled(&self, batch_id: &str) -> bool {
		self.batch_shortcuts.get(batch_id).copied().unwrap_or(false)
	}
}

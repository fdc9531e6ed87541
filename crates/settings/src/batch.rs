//! Tool operations and batch processes.

use serde::{Deserialize, Serialize};

use crate::ToolSettings;

/// What a single operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OperationTarget {
	/// A strategy from the registry.
	Builtin { tool: String },
	/// A script from [`Settings::scripts`](crate::Settings::scripts).
	#[serde(rename_all = "camelCase")]
	CustomScript { script_id: String },
	/// A prompt from [`Settings::ai_actions`](crate::Settings::ai_actions).
	#[serde(rename_all = "camelCase")]
	CustomAiAction { action_id: String },
}

impl OperationTarget {
	/// Short description for tracing/logging.
	pub fn describe(&self) -> String {
		match self {
			Self::Builtin { tool } => format!("tool:{tool}"),
			Self::CustomScript { script_id } => format!("script:{script_id}"),
			Self::CustomAiAction { action_id } => format!("ai:{action_id}"),
		}
	}
}

/// One batch step: a target plus the settings snapshot captured when the
/// step was authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOperation {
	pub target: OperationTarget,
	#[serde(default)]
	pub settings: ToolSettings,
}

impl ToolOperation {
	pub fn builtin(tool: impl Into<String>, settings: ToolSettings) -> Self {
		Self {
			target: OperationTarget::Builtin { tool: tool.into() },
			settings,
		}
	}

	pub fn script(script_id: impl Into<String>, settings: ToolSettings) -> Self {
		Self {
			target: OperationTarget::CustomScript { script_id: script_id.into() },
			settings,
		}
	}

	pub fn ai_action(action_id: impl Into<String>, settings: ToolSettings) -> Self {
		Self {
			target: OperationTarget::CustomAiAction { action_id: action_id.into() },
			settings,
		}
	}
}

/// A saved, named, ordered list of operations.
///
/// Identity is `id`; "unsaved changes" detection compares whole values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchProcess {
	pub id: String,
	pub name: String,
	pub operations: Vec<ToolOperation>,
}

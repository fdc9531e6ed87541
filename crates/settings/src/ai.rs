//! AI provider configuration and custom prompt actions.

use serde::{Deserialize, Serialize};

/// Global AI provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiConfig {
	pub endpoint: String,
	pub api_key: String,
	pub model: String,
	pub temperature: f32,
	pub max_tokens: u32,
}

impl Default for AiConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
			api_key: String::new(),
			model: String::new(),
			temperature: 0.7,
			max_tokens: 2048,
		}
	}
}

impl AiConfig {
	/// Returns `true` when credentials and a model are present.
	pub fn is_configured(&self) -> bool {
		!self.api_key.trim().is_empty() && !self.model.trim().is_empty()
	}

	/// Applies `overrides` on top of this configuration.
	///
	/// Only fields set in `overrides` replace the global value.
	pub fn merged(&self, overrides: &AiOverrides) -> Self {
		Self {
			endpoint: overrides.endpoint.clone().unwrap_or_else(|| self.endpoint.clone()),
			api_key: overrides.api_key.clone().unwrap_or_else(|| self.api_key.clone()),
			model: overrides.model.clone().unwrap_or_else(|| self.model.clone()),
			temperature: overrides.temperature.unwrap_or(self.temperature),
			max_tokens: overrides.max_tokens.unwrap_or(self.max_tokens),
		}
	}
}

/// Per-action provider overrides. `None` falls back to [`AiConfig`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiOverrides {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<f32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_tokens: Option<u32>,
}

/// A saved prompt that rewrites text through the AI collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomAiAction {
	pub id: String,
	pub name: String,
	/// User prompt. `{{text}}` is replaced by the input text; without the
	/// placeholder the text is appended after a blank line.
	pub prompt: String,
	pub system_prompt: String,
	/// Target the active selection when run on its own.
	pub apply_to_selection: bool,
	pub overrides: AiOverrides,
}

const TEXT_PLACEHOLDER: &str = "{{text}}";

impl CustomAiAction {
	/// Builds the user prompt for `text`.
	pub fn render_prompt(&self, text: &str) -> String {
		if self.prompt.contains(TEXT_PLACEHOLDER) {
			self.prompt.replace(TEXT_PLACEHOLDER, text)
		} else if self.prompt.is_empty() {
			text.to_string()
		} else {
			format!("{}\n\n{}", self.prompt, text)
		}
	}
}

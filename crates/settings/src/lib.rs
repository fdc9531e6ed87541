//! Settings state and data model for Quill.
//!
//! Everything the engine reads from persisted configuration lives here:
//!
//! * [`ToolSettings`]: one sub-record per built-in tool family plus the
//!   global protection flags. A clone of this struct is the *settings
//!   snapshot* carried by every [`ToolOperation`].
//! * [`ScriptDefinition`] and [`ParamDef`]: user-authored Nu scripts.
//! * [`CustomAiAction`] and [`AiConfig`]: prompt-backed rewrites.
//! * [`BatchProcess`]: named, ordered operation lists.
//! * [`Scope`]: whether an operation targets the document or the selection.
//! * [`Settings`]: the persisted root, loaded from JSON with legacy
//!   migration and default backfill.

mod ai;
mod batch;
mod error;
mod migrate;
mod persist;
mod scope;
mod script;
mod state;
mod tools;

pub use ai::{AiConfig, AiOverrides, CustomAiAction};
pub use batch::{BatchProcess, OperationTarget, ToolOperation};
pub use error::{Result, SettingsError};
pub use migrate::{CURRENT_SETTINGS_VERSION, migrate_legacy};
pub use persist::default_settings_path;
pub use scope::Scope;
pub use script::{ParamDef, ParamKind, ScriptDefinition};
pub use state::Settings;
pub use tools::{
	CaseMode, CaseSettings, ColumnSettings, DedupeSettings, FilterMode, FilterSettings,
	FindReplaceSettings, NumberingSettings, RegexSettings, SortSettings, ToolSettings, WrapSettings,
};

/// Generates a fresh identifier for user-created records.
pub fn new_id() -> String {
	uuid::Uuid::new_v4().to_string()
}

use quill_nu::ScriptError;
use quill_settings::SettingsError;
use thiserror::Error;

/// A step failure that must reach the caller.
///
/// Missing references, malformed patterns, and AI failures are reported as
/// notifications instead and never show up here.
#[derive(Debug, Error)]
pub enum DispatchError {
	#[error("script '{name}' failed: {source}")]
	Script {
		name: String,
		#[source]
		source: ScriptError,
	},
}

#[derive(Debug, Error)]
pub enum BatchError {
	#[error("batch needs a selection but nothing is selected")]
	NoSelection,
	#[error("batch process not found: {0}")]
	NotFound(String),
	/// `step` is 1-based.
	#[error("batch stopped at step {step}: {source}")]
	Step {
		step: usize,
		#[source]
		source: DispatchError,
	},
}

#[derive(Debug, Error)]
pub enum SessionError {
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	#[error(transparent)]
	Batch(#[from] BatchError),
	#[error(transparent)]
	Settings(#[from] SettingsError),
}

use thiserror::Error;

/// Failure to build or run a user script.
///
/// Every variant leaves the caller's buffer untouched; reporting is up to the
/// caller.
#[derive(Debug, Error)]
pub enum ScriptError {
	/// The source reads `$selection` but not `$text`, and nothing is selected.
	#[error("script needs a selection")]
	SelectionRequired,
	#[error("script is {size} bytes; the limit is {limit}")]
	TooLarge { size: usize, limit: usize },
	#[error("failed to prepare script engine: {0}")]
	Engine(String),
	#[error("parse error: {0}")]
	Parse(String),
	/// Parsed fine, but uses something outside the capability surface.
	#[error("not allowed in scripts: {0}")]
	Sandbox(String),
	#[error("runtime error: {0}")]
	Runtime(String),
	#[error("script task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

//! Error types for settings loading and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Error reading or writing a settings file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Settings JSON could not be parsed or serialized.
	#[error("settings JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The settings document root is not a JSON object.
	#[error("settings root must be a JSON object")]
	NotAnObject,
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

//! JSON load/save for [`Settings`].

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::{Result, Settings, SettingsError, migrate_legacy};

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns `$XDG_CONFIG_HOME/quill/settings.json` (or the platform
/// equivalent), if a config directory can be determined.
pub fn default_settings_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("quill").join(SETTINGS_FILE_NAME))
}

impl Settings {
	/// Parses settings JSON, migrating legacy layouts and backfilling
	/// absent fields from defaults.
	pub fn from_json_str(source: &str) -> Result<Self> {
		let value: Value = serde_json::from_str(source)?;
		Self::from_json_value(value)
	}

	pub fn from_json_value(value: Value) -> Result<Self> {
		let Value::Object(mut root) = value else {
			return Err(SettingsError::NotAnObject);
		};
		migrate_legacy(&mut root);
		Ok(serde_json::from_value(Value::Object(root))?)
	}

	/// Loads settings from `path`. A missing file yields defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let source = match std::fs::read_to_string(path) {
			Ok(source) => source,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				debug!(path = %path.display(), "no settings file, using defaults");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(SettingsError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		let settings = Self::from_json_str(&source)?;
		info!(
			path = %path.display(),
			scripts = settings.scripts.len(),
			batches = settings.batches.len(),
			"settings loaded"
		);
		Ok(settings)
	}

	/// Writes settings to `path` as pretty JSON, creating parent directories.
	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|error| SettingsError::Io {
				path: parent.to_path_buf(),
				error,
			})?;
		}
		let json = serde_json::to_string_pretty(self)?;
		std::fs::write(path, json).map_err(|error| SettingsError::Io {
			path: path.to_path_buf(),
			error,
		})
	}
}

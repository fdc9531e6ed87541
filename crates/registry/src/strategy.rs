use quill_settings::ToolSettings;

use crate::NotificationSink;

/// Display metadata for a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyMeta {
	/// Registry key (e.g. `"dedupe"`).
	pub id: &'static str,
	/// Human-readable name for listings.
	pub name: &'static str,
	pub description: &'static str,
}

impl StrategyMeta {
	pub const fn new(id: &'static str, name: &'static str, description: &'static str) -> Self {
		Self { id, name, description }
	}
}

/// A named text transformation.
///
/// Implementations must be deterministic for a given input and settings
/// snapshot, and total over well-typed settings: malformed user input carried
/// in settings (an invalid pattern, say) is reported through `notices` and
/// the input is returned unchanged.
pub trait Strategy: Send + Sync {
	fn meta(&self) -> &StrategyMeta;

	fn id(&self) -> &'static str {
		self.meta().id
	}

	fn execute(
		&self,
		text: &str,
		settings: &ToolSettings,
		notices: &mut dyn NotificationSink,
	) -> String;
}

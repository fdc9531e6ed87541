use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::Strategy;

/// Maps strategy ids to strategies.
///
/// Registering an id that already exists replaces the strategy but keeps the
/// id's original position, so [`all`](Self::all) stays in first-registration
/// order. There is no removal.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
	entries: IndexMap<&'static str, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry preloaded with [`crate::builtins`].
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		crate::builtins::register_builtins(&mut registry);
		registry
	}

	pub fn register(&mut self, strategy: impl Strategy + 'static) {
		self.register_arc(Arc::new(strategy));
	}

	pub fn register_arc(&mut self, strategy: Arc<dyn Strategy>) {
		let id = strategy.id();
		if self.entries.insert(id, strategy).is_some() {
			trace!(id, "strategy replaced");
		}
	}

	pub fn get(&self, id: &str) -> Option<&Arc<dyn Strategy>> {
		self.entries.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	/// Returns every registered strategy in insertion order.
	pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
		self.entries.values()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for StrategyRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StrategyRegistry")
			.field("ids", &self.entries.keys().collect::<Vec<_>>())
			.finish()
	}
}

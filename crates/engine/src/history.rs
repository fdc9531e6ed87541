//! Bounded document history.
//!
//! Entries are whole-document snapshots. The undo stack holds at most
//! `capacity` entries and drops the oldest first; any fresh push empties the
//! redo stack.

use std::collections::VecDeque;

use tracing::trace;

/// Default number of undo entries kept.
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
	undo_stack: VecDeque<String>,
	redo_stack: Vec<String>,
	capacity: usize,
}

impl Default for History {
	fn default() -> Self {
		Self::new()
	}
}

impl History {
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}

	/// A zero capacity is treated as one.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			undo_stack: VecDeque::new(),
			redo_stack: Vec::new(),
			capacity: capacity.max(1),
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn undo_len(&self) -> usize {
		self.undo_stack.len()
	}

	pub fn redo_len(&self) -> usize {
		self.redo_stack.len()
	}

	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	/// Records `content` as the state to return to on the next undo.
	///
	/// A push equal to the current top is not stored twice. Redo is cleared
	/// either way.
	pub fn push(&mut self, content: String) {
		self.redo_stack.clear();
		if self.undo_stack.back() == Some(&content) {
			return;
		}
		self.undo_stack.push_back(content);
		self.evict();
		trace!(undo = self.undo_stack.len(), "history.push");
	}

	/// Steps back, parking `current` for redo.
	pub fn undo(&mut self, current: String) -> Option<String> {
		let previous = self.undo_stack.pop_back()?;
		self.redo_stack.push(current);
		trace!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "history.undo");
		Some(previous)
	}

	/// Steps forward, parking `current` for undo.
	pub fn redo(&mut self, current: String) -> Option<String> {
		let next = self.redo_stack.pop()?;
		self.undo_stack.push_back(current);
		self.evict();
		trace!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "history.redo");
		Some(next)
	}

	fn evict(&mut self) {
		while self.undo_stack.len() > self.capacity {
			self.undo_stack.pop_front();
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn duplicate_push_is_stored_once() {
		let mut history = History::new();
		history.push("a".into());
		history.push("a".into());
		assert_eq!(history.undo_len(), 1);
	}

	#[test]
	fn capacity_evicts_oldest() {
		let mut history = History::with_capacity(2);
		for content in ["a", "b", "c"] {
			history.push(content.into());
		}
		assert_eq!(history.undo("d".into()).as_deref(), Some("c"));
		assert_eq!(history.undo("c".into()).as_deref(), Some("b"));
		assert_eq!(history.undo("b".into()), None);
	}

	#[test]
	fn push_clears_redo() {
		let mut history = History::new();
		history.push("a".into());
		history.undo("b".into());
		assert!(history.can_redo());
		history.push("c".into());
		assert!(!history.can_redo());
	}

	#[test]
	fn push_equal_to_top_still_clears_redo() {
		let mut history = History::new();
		history.push("a".into());
		history.push("b".into());
		history.undo("c".into());
		history.push("a".into());
		assert_eq!(history.undo_len(), 1);
		assert_eq!(history.redo_len(), 0);
	}

	#[test]
	fn empty_stacks_are_no_ops() {
		let mut history = History::new();
		assert_eq!(history.undo("x".into()), None);
		assert_eq!(history.redo("x".into()), None);
		assert_eq!(history.redo_len(), 0);
		assert_eq!(history.undo_len(), 0);
	}

	proptest! {
		#[test]
		fn undo_redo_undo_round_trips(
			contents in prop::collection::hash_set("[a-z]{1,6}", 1..8),
			current in "[A-Z]{1,6}",
		) {
			let mut history = History::new();
			for content in contents {
				history.push(content);
			}
			let undone = history.undo(current.clone()).expect("non-empty");
			let redone = history.redo(undone.clone()).expect("redo after undo");
			prop_assert_eq!(&redone, &current);
			let again = history.undo(redone).expect("undo after redo");
			prop_assert_eq!(again, undone);
		}
	}
}

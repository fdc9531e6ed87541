//! Editing copy of a saved batch.
//!
//! Changes land on the working copy only. [`BatchDraft::is_dirty`] compares
//! it structurally with the batch as it was loaded, and nothing reaches
//! [`Settings`] until [`save`](BatchDraft::save) or
//! [`save_as_new`](BatchDraft::save_as_new).

use quill_settings::{BatchProcess, Settings, ToolOperation, new_id};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchDraft {
	original: BatchProcess,
	current: BatchProcess,
}

impl BatchDraft {
	pub fn new(batch: BatchProcess) -> Self {
		Self {
			current: batch.clone(),
			original: batch,
		}
	}

	/// A draft for a batch that has never been saved.
	pub fn blank(name: impl Into<String>) -> Self {
		Self::new(BatchProcess {
			id: new_id(),
			name: name.into(),
			operations: Vec::new(),
		})
	}

	/// Loads the stored batch `id`.
	pub fn load(settings: &Settings, id: &str) -> Option<Self> {
		settings.batch(id).cloned().map(Self::new)
	}

	pub fn current(&self) -> &BatchProcess {
		&self.current
	}

	pub fn original(&self) -> &BatchProcess {
		&self.original
	}

	pub fn is_dirty(&self) -> bool {
		self.current != self.original
	}

	pub fn add_step(&mut self, op: ToolOperation) {
		self.current.operations.push(op);
	}

	pub fn remove_step(&mut self, index: usize) -> Option<ToolOperation> {
		(index < self.current.operations.len()).then(|| self.current.operations.remove(index))
	}

	/// Moves the step at `from` so it ends up at `to`. Returns `false` when
	/// either index is out of range.
	pub fn move_step(&mut self, from: usize, to: usize) -> bool {
		let len = self.current.operations.len();
		if from >= len || to >= len {
			return false;
		}
		let op = self.current.operations.remove(from);
		self.current.operations.insert(to, op);
		true
	}

	pub fn rename(&mut self, name: impl Into<String>) {
		self.current.name = name.into();
	}

	/// Throws away unsaved edits.
	pub fn revert(&mut self) {
		self.current = self.original.clone();
	}

	/// Stores the working copy in place of the batch with the same id.
	pub fn save(&mut self, settings: &mut Settings) {
		settings.upsert_batch(self.current.clone());
		self.original = self.current.clone();
		debug!(batch = %self.current.id, steps = self.current.operations.len(), "batch saved");
	}

	/// Stores the working copy under a fresh id and `name`, leaving the
	/// stored original alone. The draft then tracks the new copy.
	pub fn save_as_new(&mut self, settings: &mut Settings, name: impl Into<String>) -> String {
		let id = new_id();
		self.current.id = id.clone();
		self.current.name = name.into();
		self.save(settings);
		id
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use quill_settings::ToolSettings;

	use super::*;

	fn sample() -> BatchProcess {
		BatchProcess {
			id: "b1".into(),
			name: "Cleanup".into(),
			operations: vec![
				ToolOperation::builtin("dedupe", ToolSettings::default()),
				ToolOperation::builtin("trim-empty-lines", ToolSettings::default()),
			],
		}
	}

	fn tools(draft: &BatchDraft) -> Vec<String> {
		draft.current().operations.iter().map(|op| op.target.describe()).collect()
	}

	#[test]
	fn edits_mark_dirty_until_saved() {
		let mut settings = Settings::default();
		settings.upsert_batch(sample());
		let mut draft = BatchDraft::load(&settings, "b1").expect("stored");
		assert!(!draft.is_dirty());

		assert!(draft.move_step(1, 0));
		assert!(draft.is_dirty());
		let first = |settings: &Settings| {
			settings.batch("b1").expect("stored").operations[0].target.describe()
		};
		assert_eq!(first(&settings), "tool:dedupe");

		draft.save(&mut settings);
		assert!(!draft.is_dirty());
		assert_eq!(settings.batches.len(), 1);
		assert_eq!(first(&settings), "tool:trim-empty-lines");
	}

	#[test]
	fn moving_back_is_clean_again() {
		let mut draft = BatchDraft::new(sample());
		draft.move_step(0, 1);
		draft.move_step(0, 1);
		assert!(!draft.is_dirty());
		assert!(!draft.move_step(0, 2));
	}

	#[test]
	fn save_as_new_leaves_original_untouched() {
		let mut settings = Settings::default();
		settings.upsert_batch(sample());
		let mut draft = BatchDraft::load(&settings, "b1").expect("stored");
		draft.remove_step(0);

		let id = draft.save_as_new(&mut settings, "Trim only");
		assert_ne!(id, "b1");
		assert_eq!(settings.batches.len(), 2);
		assert_eq!(settings.batch("b1").expect("original").operations.len(), 2);
		let copy = settings.batch(&id).expect("copy");
		assert_eq!(copy.name, "Trim only");
		assert_eq!(tools(&draft), ["tool:trim-empty-lines"]);
		assert!(!draft.is_dirty());
	}

	#[test]
	fn blank_draft_saves_as_a_new_batch() {
		let mut settings = Settings::default();
		let mut draft = BatchDraft::blank("Fresh");
		assert!(!draft.is_dirty());
		draft.add_step(ToolOperation::builtin("sort-lines", ToolSettings::default()));

		draft.save(&mut settings);
		let stored = settings.batch(&draft.current().id).expect("stored");
		assert_eq!(stored.name, "Fresh");
		assert_eq!(tools(&draft), ["tool:sort-lines"]);
	}

	#[test]
	fn revert_and_out_of_range_remove() {
		let mut draft = BatchDraft::new(sample());
		assert_eq!(draft.remove_step(5), None);
		draft.rename("Other");
		draft.add_step(ToolOperation::builtin("reverse-lines", ToolSettings::default()));
		assert!(draft.is_dirty());
		draft.revert();
		assert_eq!(draft.current(), draft.original());
	}
}

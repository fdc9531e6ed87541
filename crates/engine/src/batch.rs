//! Linear batch sequencing.

use quill_settings::ToolOperation;
use tracing::{Instrument, info_span};

use crate::dispatch::{Dispatcher, StepContext};
use crate::error::BatchError;

/// Feeds `input` through `operations` in order, each step's output becoming
/// the next step's input.
///
/// Missing references degrade to no-op steps. A failing script stops the
/// run; nothing after it executes.
pub async fn run_operations(
	dispatcher: &Dispatcher<'_>,
	operations: &[ToolOperation],
	input: String,
	ctx: &mut StepContext<'_>,
) -> Result<String, BatchError> {
	let mut text = input;
	for (index, op) in operations.iter().enumerate() {
		let step = index + 1;
		let span = info_span!("step", step, op = %op.target.describe());
		text = dispatcher
			.apply(op, &text, ctx)
			.instrument(span)
			.await
			.map_err(|source| BatchError::Step { step, source })?
			.text;
	}
	Ok(text)
}

use nu_engine::command_prelude::*;

use super::SharedCapture;

/// `notify <message>`: queues a notice for the user.
#[derive(Clone)]
pub(super) struct Notify(pub SharedCapture);

impl Command for Notify {
	fn name(&self) -> &str {
		"notify"
	}

	fn signature(&self) -> Signature {
		Signature::build("notify")
			.input_output_types(vec![(Type::Any, Type::Nothing)])
			.required("message", SyntaxShape::String, "Notice text.")
			.category(Category::Custom("quill".into()))
	}

	fn description(&self) -> &str {
		"Show a message to the user once the script finishes."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		_input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let message: String = call.req(engine_state, stack, 0)?;
		self.0.lock().notices.push(message);
		Ok(PipelineData::empty())
	}
}

use nu_engine::command_prelude::*;
use tracing::info;

use super::SharedCapture;

/// `log <message>`: records a line in the run's log and the tracing stream.
#[derive(Clone)]
pub(super) struct Log(pub SharedCapture);

impl Command for Log {
	fn name(&self) -> &str {
		"log"
	}

	fn signature(&self) -> Signature {
		Signature::build("log")
			.input_output_types(vec![(Type::Any, Type::Nothing)])
			.required("message", SyntaxShape::Any, "What to log.")
			.category(Category::Custom("quill".into()))
	}

	fn description(&self) -> &str {
		"Write a message to the script log."
	}

	fn run(
		&self,
		engine_state: &EngineState,
		stack: &mut Stack,
		call: &Call,
		_input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let value: Value = call.req(engine_state, stack, 0)?;
		let message = value.to_expanded_string(" ", engine_state.get_config());
		info!(target: "quill::script", %message);
		self.0.lock().logs.push(message);
		Ok(PipelineData::empty())
	}
}

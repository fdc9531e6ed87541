use nu_engine::command_prelude::*;
use nu_protocol::Record;

/// What scripts learn about their host through `app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
	pub name: String,
	pub version: String,
	/// `"document"` or `"selection"`.
	pub scope: String,
	pub has_selection: bool,
}

#[derive(Clone)]
pub(super) struct App(pub AppInfo);

impl Command for App {
	fn name(&self) -> &str {
		"app"
	}

	fn signature(&self) -> Signature {
		Signature::build("app")
			.input_output_types(vec![(Type::Nothing, Type::record())])
			.category(Category::Custom("quill".into()))
	}

	fn description(&self) -> &str {
		"Describe the host application and the current run."
	}

	fn run(
		&self,
		_engine_state: &EngineState,
		_stack: &mut Stack,
		call: &Call,
		_input: PipelineData,
	) -> Result<PipelineData, ShellError> {
		let head = call.head;
		let mut record = Record::new();
		record.push("name", Value::string(self.0.name.clone(), head));
		record.push("version", Value::string(self.0.version.clone(), head));
		record.push("scope", Value::string(self.0.scope.clone(), head));
		record.push("has_selection", Value::bool(self.0.has_selection, head));
		Ok(Value::record(record, head).into_pipeline_data())
	}
}

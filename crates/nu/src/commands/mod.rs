//! Commands visible to scripts.
//!
//! Host capabilities (`app`, `log`, `notify`) plus a small, pure set of
//! string and list commands. Nothing here touches the filesystem, network,
//! or process table.

use std::sync::Arc;

use nu_engine::command_prelude::*;
use parking_lot::Mutex;

mod app;
mod filters;
mod log;
mod notify;
mod strings;

pub use app::AppInfo;

/// Output a script produced besides its return value.
#[derive(Debug, Default)]
pub(crate) struct Capture {
	pub logs: Vec<String>,
	pub notices: Vec<String>,
}

pub(crate) type SharedCapture = Arc<Mutex<Capture>>;

/// Registers every script-visible command into `working_set`.
pub(crate) fn register_all(
	working_set: &mut StateWorkingSet<'_>,
	app: AppInfo,
	capture: &SharedCapture,
) {
	working_set.add_decl(Box::new(app::App(app)));
	working_set.add_decl(Box::new(log::Log(capture.clone())));
	working_set.add_decl(Box::new(notify::Notify(capture.clone())));

	working_set.add_decl(Box::new(strings::StrUpcase));
	working_set.add_decl(Box::new(strings::StrDowncase));
	working_set.add_decl(Box::new(strings::StrTrim));
	working_set.add_decl(Box::new(strings::StrReplace));
	working_set.add_decl(Box::new(strings::StrContains));
	working_set.add_decl(Box::new(strings::StrJoin));
	working_set.add_decl(Box::new(strings::SplitRow));
	working_set.add_decl(Box::new(strings::Lines));

	working_set.add_decl(Box::new(filters::Length));
	working_set.add_decl(Box::new(filters::Each));
	working_set.add_decl(Box::new(filters::Sort));
	working_set.add_decl(Box::new(filters::Uniq));
	working_set.add_decl(Box::new(filters::Reverse));
}

/// Collects list or stream input into a vector.
pub(crate) fn collect_list(input: PipelineData, head: Span) -> Result<Vec<Value>, ShellError> {
	match input {
		PipelineData::Empty | PipelineData::Value(Value::Nothing { .. }, ..) => Ok(Vec::new()),
		PipelineData::Value(Value::List { vals, .. }, ..) => Ok(vals),
		PipelineData::ListStream(stream, ..) => Ok(stream.into_iter().collect()),
		other => Err(ShellError::OnlySupportsThisInputType {
			exp_input_type: "list".into(),
			wrong_type: other.get_type().to_string(),
			dst_span: head,
			src_span: other.span().unwrap_or(head),
		}),
	}
}

fn unsupported(value: &Value, expected: &str, head: Span) -> ShellError {
	ShellError::OnlySupportsThisInputType {
		exp_input_type: expected.into(),
		wrong_type: value.get_type().to_string(),
		dst_span: head,
		src_span: value.span(),
	}
}

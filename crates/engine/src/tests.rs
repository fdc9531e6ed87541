use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_nu::{ScriptError, ScriptHost};
use quill_registry::{Notification, NotificationKey, Silent, StrategyRegistry, keys};
use quill_settings::{
	AiConfig, BatchProcess, CustomAiAction, ScriptDefinition, Scope, Settings, ToolOperation,
	ToolSettings,
};
use serde_json::{Map, json};

use super::*;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Uppercases whatever prompt it receives.
struct ShoutingAi;

#[async_trait]
impl AiClient for ShoutingAi {
	async fn send(&self, _config: &AiConfig, _system: &str, user_prompt: &str) -> AiResponse {
		AiResponse::ok(user_prompt.to_uppercase())
	}
}

struct DownAi;

#[async_trait]
impl AiClient for DownAi {
	async fn send(&self, _config: &AiConfig, _system: &str, _user: &str) -> AiResponse {
		AiResponse::failed("503 Service Unavailable")
	}
}

fn session(text: &str) -> Session<TextBuffer> {
	Session::new(Settings::default(), TextBuffer::new(text), Arc::new(NoTransport))
}

fn op(tool: &str) -> ToolOperation {
	ToolOperation::builtin(tool, ToolSettings::default())
}

fn batch(operations: Vec<ToolOperation>) -> BatchProcess {
	BatchProcess {
		id: "batch".into(),
		name: "Cleanup".into(),
		operations,
	}
}

fn script(id: &str, code: &str) -> ScriptDefinition {
	ScriptDefinition {
		id: id.into(),
		name: id.into(),
		code: code.into(),
		params: Vec::new(),
	}
}

fn configured_action(apply_to_selection: bool) -> (AiConfig, CustomAiAction) {
	let config = AiConfig {
		api_key: "key".into(),
		model: "model".into(),
		..AiConfig::default()
	};
	let action = CustomAiAction {
		id: "shout".into(),
		name: "Shout".into(),
		prompt: "{{text}}".into(),
		apply_to_selection,
		..CustomAiAction::default()
	};
	(config, action)
}

fn has(notices: &[Notification], key: NotificationKey) -> bool {
	notices.iter().any(|n| n.is(key))
}

#[tokio::test]
async fn dedupe_then_trim_empty_lines() {
	init_tracing();
	let mut session = session("a\na\n\nb\n");
	let steps = batch(vec![op("dedupe"), op("trim-empty-lines")]);
	let outcome = session.run_batch(&steps, Scope::Document).await.expect("batch runs");

	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "a\nb");
	assert_eq!(session.history().undo_len(), 1);
	assert!(has(&session.take_notifications(), keys::BATCH_APPLIED));
}

#[tokio::test]
async fn batch_without_selection_aborts_before_any_step() {
	let mut session = session("keep me");
	let err = session
		.run_batch(&batch(vec![op("change-case")]), Scope::Selection)
		.await
		.expect_err("needs a selection");

	assert!(matches!(err, SessionError::Batch(BatchError::NoSelection)), "{err}");
	assert_eq!(session.editor().text(), "keep me");
	assert!(has(&session.take_notifications(), keys::NO_SELECTION));
	assert!(!session.history().can_undo());
}

#[tokio::test]
async fn selection_batch_replaces_only_the_selection() {
	let buffer = TextBuffer::new("# Title\nb\na\nrest").with_selection(8..12).expect("valid");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(NoTransport));
	let steps = batch(vec![op("sort-lines"), op("change-case")]);
	session.run_batch(&steps, Scope::Selection).await.expect("runs");
	assert_eq!(session.editor().text(), "# Title\nA\nB\nrest");
}

#[tokio::test]
async fn script_upcases_selection() {
	let buffer = TextBuffer::new("say hi now").with_selection(4..6).expect("valid");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(NoTransport));
	session.settings_mut().scripts.push(script("up", "return ($selection | str upcase)"));

	let outcome =
		session.run_script("up", Scope::Selection, &Map::new()).await.expect("script runs");
	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "say HI now");
	assert!(has(&session.take_notifications(), keys::SCRIPT_SUCCEEDED));
}

#[tokio::test]
async fn selection_only_script_without_selection_is_skipped() {
	let mut session = session("untouched");
	session.settings_mut().scripts.push(script("up", "return ($selection | str upcase)"));

	let outcome =
		session.run_script("up", Scope::Document, &Map::new()).await.expect("not an error");
	assert_eq!(outcome, Outcome::Skipped);
	assert_eq!(session.editor().text(), "untouched");
	let notices = session.take_notifications();
	assert_eq!(notices.len(), 1);
	assert_eq!(notices[0].message, keys::SELECTION_REQUIRED.emit().message);
}

#[tokio::test]
async fn script_params_reach_the_script() {
	let mut session = session("a,b");
	let mut def = script("join", "$text | split row ',' | str join $params.sep");
	def.params.push(quill_settings::ParamDef {
		key: "sep".into(),
		default: json!(" "),
		..Default::default()
	});
	session.settings_mut().scripts.push(def);

	let mut overrides = Map::new();
	overrides.insert("sep".into(), json!("\\n"));
	session.run_script("join", Scope::Document, &overrides).await.expect("runs");
	assert_eq!(session.editor().text(), "a\nb");
}

#[tokio::test]
async fn failing_script_aborts_batch_and_writes_nothing() {
	init_tracing();
	let mut session = session("abc");
	session.settings_mut().scripts.push(script("boom", "error make {msg: 'boom'}"));
	let steps = vec![
		op("change-case"),
		ToolOperation::script("boom", ToolSettings::default()),
		op("reverse-lines"),
	];

	let err = session.run_batch(&batch(steps), Scope::Document).await.expect_err("step 2 fails");
	match err {
		SessionError::Batch(BatchError::Step {
			step,
			source: DispatchError::Script { source, .. },
		}) => {
			assert_eq!(step, 2);
			assert!(matches!(source, ScriptError::Runtime(_)), "{source}");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(session.editor().text(), "abc");
	assert!(!session.history().can_undo());
	let notices = session.take_notifications();
	assert!(has(&notices, keys::SCRIPT_FAILED));
	assert!(has(&notices, keys::BATCH_ABORTED));
}

#[tokio::test]
async fn missing_references_degrade_to_no_op_steps() {
	let mut session = session("abc");
	let steps = vec![
		op("no-such-tool"),
		ToolOperation::script("deleted", ToolSettings::default()),
		ToolOperation::ai_action("deleted", ToolSettings::default()),
		op("change-case"),
	];
	let outcome = session.run_batch(&batch(steps), Scope::Document).await.expect("runs");

	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "ABC");
	let notices = session.take_notifications();
	assert!(has(&notices, keys::TOOL_NOT_FOUND));
	assert!(has(&notices, keys::SCRIPT_NOT_FOUND));
	assert!(has(&notices, keys::PROMPT_NOT_FOUND));
}

#[tokio::test]
async fn removed_script_leaves_its_batch_steps_dangling() {
	let mut session = session("abc");
	session.settings_mut().scripts.push(script("swap", "$text | str replace 'a' 'z'"));
	let mut saved =
		batch(vec![ToolOperation::script("swap", ToolSettings::default()), op("change-case")]);
	saved.id = "saved".into();
	session.settings_mut().upsert_batch(saved);

	assert!(session.settings_mut().remove_script("swap").is_some());
	let outcome = session.run_saved_batch("saved", Scope::Document).await.expect("runs");

	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "ABC");
	assert!(has(&session.take_notifications(), keys::SCRIPT_NOT_FOUND));
	let stored = session.settings().batch("saved").expect("still stored");
	let targets: Vec<String> = stored.operations.iter().map(|op| op.target.describe()).collect();
	assert_eq!(targets, ["script:swap", "tool:change-case"]);
}

#[tokio::test]
async fn missing_batch_clears_its_shortcut() {
	let mut session = session("abc");
	session.settings_mut().batch_shortcuts.insert("gone".into(), true);

	let err = session.run_saved_batch("gone", Scope::Document).await.expect_err("missing");
	assert!(
		matches!(err, SessionError::Batch(BatchError::NotFound(ref id)) if id == "gone"),
		"{err}"
	);
	assert!(!session.settings().batch_shortcuts.contains_key("gone"));
	assert!(has(&session.take_notifications(), keys::BATCH_NOT_FOUND));
}

#[tokio::test]
async fn saved_batch_runs_by_id() {
	let mut session = session("b\na\n");
	session.settings_mut().upsert_batch(batch(vec![op("sort-lines")]));
	session.run_saved_batch("batch", Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "a\nb\n");
}

#[tokio::test]
async fn batch_keeps_shield_notices_quiet() {
	let mut session = session("---\ntitle: x\n---\nbody");
	session.run_batch(&batch(vec![op("change-case")]), Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "---\ntitle: x\n---\nBODY");
	assert!(!has(&session.take_notifications(), keys::FRONTMATTER_SHIELDED));
}

#[tokio::test]
async fn single_tool_announces_shielding() {
	let mut session = session("---\ntitle: x\n---\nbody");
	session.apply_tool("change-case", Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "---\ntitle: x\n---\nBODY");
	let notices = session.take_notifications();
	assert!(has(&notices, keys::FRONTMATTER_SHIELDED));
	assert!(has(&notices, keys::TOOL_APPLIED));
}

#[tokio::test]
async fn removed_frontmatter_is_not_reinstated() {
	let mut session = session("---\na: 1\n---\nbody");
	let mut strip = ToolSettings::default().without_protection();
	strip.regex.pattern = "\\A---\\n(?s:.*?)---\\n".into();
	let steps = vec![ToolOperation::builtin("regex-replace", strip), op("change-case")];
	session.run_batch(&batch(steps), Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "BODY");
}

#[tokio::test]
async fn selection_scope_ignores_protection_flags() {
	let buffer = TextBuffer::new("x ---\na\n---\nb").with_selection(2..13).expect("valid");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(NoTransport));
	session.settings_mut().tools.preserve_header = true;
	session.apply_tool("change-case", Scope::Selection).await.expect("runs");
	assert_eq!(session.editor().text(), "x ---\nA\n---\nB");
}

#[tokio::test]
async fn malformed_pattern_leaves_text_unchanged() {
	let mut session = session("abc");
	session.settings_mut().tools.regex.pattern = "(".into();
	let outcome = session.apply_tool("regex-replace", Scope::Document).await.expect("not an error");
	assert_eq!(outcome, Outcome::Unchanged);
	assert_eq!(session.editor().text(), "abc");
	assert!(has(&session.take_notifications(), keys::MALFORMED_PATTERN));
}

#[tokio::test]
async fn unconfigured_ai_is_reported() {
	let mut session = session("abc");
	let (_, action) = configured_action(false);
	session.settings_mut().ai_actions.push(action);

	let outcome = session.run_ai_action("shout", Scope::Document).await.expect("no error");
	assert_eq!(outcome, Outcome::Skipped);
	assert_eq!(session.editor().text(), "abc");
	assert!(has(&session.take_notifications(), keys::AI_UNCONFIGURED));
}

#[tokio::test]
async fn ai_action_runs_inside_protection() {
	let buffer = TextBuffer::new("---\na: 1\n---\nbody");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(ShoutingAi));
	let (config, action) = configured_action(false);
	session.settings_mut().ai = config;
	session.settings_mut().ai_actions.push(action);

	let outcome = session.run_ai_action("shout", Scope::Document).await.expect("runs");
	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "---\na: 1\n---\nBODY");
	let notices = session.take_notifications();
	assert!(has(&notices, keys::FRONTMATTER_SHIELDED));
	assert!(has(&notices, keys::AI_DONE));
}

#[tokio::test]
async fn ai_action_on_selection() {
	let buffer = TextBuffer::new("one two").with_selection(4..7).expect("valid");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(ShoutingAi));
	let (config, action) = configured_action(true);
	session.settings_mut().ai = config;
	session.settings_mut().ai_actions.push(action);

	session.run_ai_action("shout", Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "one TWO");
}

#[tokio::test]
async fn document_ai_action_honours_requested_selection() {
	let buffer = TextBuffer::new("one two").with_selection(0..3).expect("valid");
	let mut session = Session::new(Settings::default(), buffer, Arc::new(ShoutingAi));
	let (config, action) = configured_action(false);
	session.settings_mut().ai = config;
	session.settings_mut().ai_actions.push(action);

	let outcome = session.run_ai_action("shout", Scope::Selection).await.expect("runs");
	assert_eq!(outcome, Outcome::Written);
	assert_eq!(session.editor().text(), "ONE two");
}

#[tokio::test]
async fn ai_failure_leaves_text_alone() {
	let mut session = Session::new(Settings::default(), TextBuffer::new("abc"), Arc::new(DownAi));
	let (config, action) = configured_action(false);
	session.settings_mut().ai = config;
	session.settings_mut().ai_actions.push(action);

	let outcome = session.run_ai_action("shout", Scope::Document).await.expect("no error");
	assert_eq!(outcome, Outcome::Skipped);
	assert_eq!(session.editor().text(), "abc");
	let notices = session.take_notifications();
	assert!(has(&notices, keys::AI_ERROR));
	assert!(notices.iter().any(|n| n.message.contains("503")));
}

#[tokio::test]
async fn undo_and_redo_walk_history() {
	let mut session = session("abc");
	session.apply_tool("change-case", Scope::Document).await.expect("runs");
	assert_eq!(session.editor().text(), "ABC");

	assert_eq!(session.undo(), Outcome::Written);
	assert_eq!(session.editor().text(), "abc");
	assert_eq!(session.redo(), Outcome::Written);
	assert_eq!(session.editor().text(), "ABC");
	assert_eq!(session.redo(), Outcome::Skipped);

	session.undo();
	assert_eq!(session.undo(), Outcome::Skipped);
	assert!(has(&session.take_notifications(), keys::NOTHING_TO_UNDO));
}

#[tokio::test]
async fn history_capacity_bounds_undo() {
	let mut session = session("a").with_history(History::with_capacity(2));
	for tool in ["wrap-lines", "wrap-lines", "wrap-lines"] {
		session.settings_mut().tools.wrap.prefix = ">".into();
		session.apply_tool(tool, Scope::Document).await.expect("runs");
	}
	assert_eq!(session.editor().text(), ">>>a");
	assert_eq!(session.undo(), Outcome::Written);
	assert_eq!(session.undo(), Outcome::Written);
	assert_eq!(session.editor().text(), ">a");
	assert_eq!(session.undo(), Outcome::Skipped);
}

#[tokio::test]
async fn unchanged_output_skips_history() {
	let mut session = session("a\nb");
	session.apply_tool("sort-lines", Scope::Document).await.expect("runs");
	assert!(!session.history().can_undo());
}

const PURE_TOOLS: &[&str] = &[
	"dedupe",
	"trim-empty-lines",
	"trim-lines",
	"sort-lines",
	"reverse-lines",
	"change-case",
	"number-lines",
];

proptest! {
	#[test]
	fn sequencing_is_associative(
		text in "[a-c \n]{0,40}",
		picks in prop::collection::vec(0..PURE_TOOLS.len(), 1..6),
		cut in 0usize..6,
	) {
		let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
		let settings = Settings::default();
		let registry = StrategyRegistry::with_builtins();
		let scripts = ScriptHost::new();
		let dispatcher = Dispatcher::new(&settings, &registry, &scripts, &NoTransport);
		let run = |ops: &[ToolOperation], input: String| {
			runtime.block_on(async {
				let mut sink = Silent;
				let mut ctx = StepContext::new(Scope::Document, "", &mut sink).quiet();
				run_operations(&dispatcher, ops, input, &mut ctx).await
			})
		};

		let ops: Vec<ToolOperation> = picks.iter().map(|&i| op(PURE_TOOLS[i])).collect();
		let cut = cut.min(ops.len());
		let (head, tail) = ops.split_at(cut);

		let whole = run(&ops, text.clone()).expect("pure steps");
		let staged = run(tail, run(head, text).expect("pure steps")).expect("pure steps");
		prop_assert_eq!(whole, staged);
	}
}

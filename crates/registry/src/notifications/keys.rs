//! Notification keys.

// Protection
notif!(frontmatter_shielded, Info, "Frontmatter preserved");
notif!(header_shielded, Info, "First line preserved");
notif!(frontmatter_and_header_shielded, Info, "Frontmatter and first line preserved");

// Tools and batches
notif!(tool_applied(name: &str), Success, format!("Applied {name}"));
notif!(tool_not_found(id: &str), Error, format!("Unknown tool: {id}"));
notif!(malformed_pattern(err: &str), Error, format!("Invalid pattern: {err}"));
notif!(batch_applied(name: &str, steps: usize), Success, format!("Ran '{name}' ({steps} steps)"));
notif!(batch_not_found(id: &str), Error, format!("Batch process not found: {id}"));
notif!(
	batch_aborted(step: usize),
	Error,
	format!("Batch stopped at step {step}; nothing was written")
);

// Selection
notif!(no_selection, Warn, "Nothing is selected");
notif_alias!(selection_required, no_selection, "This script needs a selection");

// Scripts
notif!(script_succeeded(name: &str), Success, format!("Script '{name}' finished"));
notif!(script_failed(err: &str), Error, format!("Script failed: {err}"));
notif!(script_not_found(id: &str), Error, format!("Script not found: {id}"));
notif!(script_notice(message: impl Into<String>), Info, message);

// AI actions
notif!(ai_done(name: &str), Success, format!("'{name}' finished"));
notif!(ai_error(err: &str), Error, format!("AI request failed: {err}"));
notif!(ai_unconfigured, Warn, "AI is not configured; set an API key and model");
notif!(prompt_not_found(id: &str), Error, format!("AI action not found: {id}"));

// History
notif!(nothing_to_undo, Warn, "Nothing to undo");
notif!(nothing_to_redo, Warn, "Nothing to redo");

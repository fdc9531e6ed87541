use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use quill_engine::{NoTransport, Outcome, Session, TextBuffer};
use quill_registry::{Level, Notification, StrategyRegistry};
use quill_settings::{Scope, Settings, default_settings_path};
use serde_json::{Map, Value as Json};
use tracing::{debug, info};

use crate::cli::{Cli, Command};

/// Exit status when the operation was skipped.
const SKIPPED: u8 = 2;

enum Target {
	Tool(String),
	Script(String, Map<String, Json>),
	Ai(String),
	Batch(String),
}

/// Runs `cli`, writing listings and dry-run output to `out`.
pub async fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<ExitCode> {
	let settings_path = cli.settings.clone().or_else(default_settings_path);
	let settings = match &settings_path {
		Some(path) => Settings::load(path)
			.with_context(|| format!("loading settings from {}", path.display()))?,
		None => Settings::default(),
	};

	let (file, target) = match cli.command {
		Command::List => {
			list(&settings, out)?;
			return Ok(ExitCode::SUCCESS);
		}
		Command::Apply { tool, file } => (file, Target::Tool(tool)),
		Command::Script { id, file, params } => {
			let overrides =
				params.into_iter().map(|(key, value)| (key, Json::String(value))).collect();
			(file, Target::Script(id, overrides))
		}
		Command::Ai { id, file } => (file, Target::Ai(id)),
		Command::Batch { id, file } => (file, Target::Batch(id)),
	};

	let text =
		std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
	let mut buffer = TextBuffer::new(text);
	let scope = match cli.selection {
		Some(range) => {
			buffer.select(range)?;
			Scope::Selection
		}
		None => Scope::Document,
	};

	let original_settings = settings.clone();
	let mut session = Session::new(settings, buffer, Arc::new(NoTransport));
	let result = match &target {
		Target::Tool(id) => session.apply_tool(id, scope).await,
		Target::Script(id, overrides) => session.run_script(id, scope, overrides).await,
		Target::Ai(id) => session.run_ai_action(id, scope).await,
		Target::Batch(id) => session.run_saved_batch(id, scope).await,
	};
	report(&session.take_notifications());

	if session.settings() != &original_settings
		&& let Some(path) = &settings_path
	{
		session
			.save_settings(path)
			.with_context(|| format!("saving settings to {}", path.display()))?;
	}

	let outcome = result?;
	debug!(?outcome, %scope, "finished");
	if cli.dry_run {
		write!(out, "{}", session.editor().text())?;
	} else if outcome == Outcome::Written {
		write_back(&file, session.editor().text())?;
	}

	Ok(match outcome {
		Outcome::Skipped => ExitCode::from(SKIPPED),
		Outcome::Written | Outcome::Unchanged => ExitCode::SUCCESS,
	})
}

fn write_back(path: &Path, text: &str) -> anyhow::Result<()> {
	std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
	info!(path = %path.display(), bytes = text.len(), "file updated");
	Ok(())
}

fn report(notifications: &[Notification]) {
	for notification in notifications {
		eprintln!("{}: {}", label(notification.level()), notification.message);
	}
}

fn label(level: Level) -> &'static str {
	match level {
		Level::Info => "info",
		Level::Warn => "warning",
		Level::Error => "error",
		Level::Success => "done",
	}
}

fn list(settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
	let registry = StrategyRegistry::with_builtins();
	writeln!(out, "Tools:")?;
	for strategy in registry.all() {
		let meta = strategy.meta();
		writeln!(out, "  {:<18} {}: {}", meta.id, meta.name, meta.description)?;
	}

	if !settings.scripts.is_empty() {
		writeln!(out, "Scripts:")?;
		for script in &settings.scripts {
			writeln!(out, "  {:<18} {}", script.id, script.name)?;
		}
	}
	if !settings.ai_actions.is_empty() {
		writeln!(out, "AI actions:")?;
		for action in &settings.ai_actions {
			let target = if action.apply_to_selection { " (selection)" } else { "" };
			writeln!(out, "  {:<18} {}{target}", action.id, action.name)?;
		}
	}
	if !settings.batches.is_empty() {
		writeln!(out, "Batches:")?;
		for batch in &settings.batches {
			let shortcut = if settings.shortcut_enabled(&batch.id) { " [shortcut]" } else { "" };
			let steps = batch.operations.len();
			writeln!(out, "  {:<18} {} ({steps} steps){shortcut}", batch.id, batch.name)?;
		}
	}
	Ok(())
}

//! Quill command-line host.
//!
//! Loads a file into an in-memory buffer, runs one tool, script, AI action,
//! or batch against it, and writes the result back.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

mod cli;
mod run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);
	run::execute(cli, &mut std::io::stdout()).await
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("quill=trace,debug")
			} else {
				EnvFilter::new("warn")
			}
		})
	};

	if let Some(log_dir) = std::env::var("QUILL_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("quill.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter()).with_writer(std::io::stderr).init();
}

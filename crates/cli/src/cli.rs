use std::ops::Range;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Run text tools, scripts, AI actions, and batches over a file")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Settings file (defaults to the platform config directory)
	#[arg(long, global = true, value_name = "PATH")]
	pub settings: Option<PathBuf>,

	/// Operate on this byte range instead of the whole file
	#[arg(long, global = true, value_name = "START..END", value_parser = parse_range)]
	pub selection: Option<Range<usize>>,

	/// Print the result instead of writing the file
	#[arg(long, global = true)]
	pub dry_run: bool,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List tools, scripts, AI actions, and batches
	List,
	/// Apply a built-in tool
	Apply {
		/// Tool id, e.g. `dedupe`
		tool: String,
		file: PathBuf,
	},
	/// Run a saved script
	Script {
		/// Script id
		id: String,
		file: PathBuf,
		/// Parameter override (repeatable)
		#[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
		params: Vec<(String, String)>,
	},
	/// Run a saved AI action
	Ai {
		/// Action id
		id: String,
		file: PathBuf,
	},
	/// Run a saved batch process
	Batch {
		/// Batch id
		id: String,
		file: PathBuf,
	},
}

pub fn parse_range(s: &str) -> Result<Range<usize>, String> {
	let (start, end) = s.split_once("..").ok_or_else(|| format!("expected START..END, got '{s}'"))?;
	let start: usize = start.trim().parse().map_err(|e| format!("bad start '{start}': {e}"))?;
	let end: usize = end.trim().parse().map_err(|e| format!("bad end '{end}': {e}"))?;
	if start > end {
		return Err(format!("range start {start} is past end {end}"));
	}
	Ok(start..end)
}

pub fn parse_param(s: &str) -> Result<(String, String), String> {
	let (key, value) = s.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
	let key = key.trim();
	if key.is_empty() {
		return Err("parameter name is empty".to_string());
	}
	Ok((key.to_string(), value.to_string()))
}

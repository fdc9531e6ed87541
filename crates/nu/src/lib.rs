//! Sandboxed Nu script host for Quill.
//!
//! User scripts are Nu source evaluated as the body of a command with three
//! bindings: `$selection`, `$text`, and `$params`. The capability surface is
//! fixed:
//!
//! * `app`, `log`, and `notify` reach the host.
//! * A handful of pure string and list commands (`str *`, `lines`,
//!   `split row`, `each`, `sort`, `uniq`, `reverse`, `length`).
//! * The language core from `nu-cmd-lang`, minus loops, modules, overlays,
//!   and externs.
//!
//! Sandboxing is layered. The engine context simply does not contain
//! filesystem, network, process, or plugin commands, so scripts using them
//! fail to parse. An AST scan then rejects external calls, redirection, and
//! glob expansion before anything runs.
//!
//! Results follow a small contract: a string replaces the target verbatim,
//! `null` leaves it unchanged, and anything else is rendered as text.

mod commands;
mod engine;
mod error;
mod host;
pub mod params;
mod sandbox;

pub use commands::AppInfo;
pub use error::{Result, ScriptError};
pub use host::{MAX_SOURCE_BYTES, ScriptHost, ScriptOutcome, ScriptRequest, needs_selection};
pub use params::{ParamValue, Params, normalize_params};

//! Orchestration core for Quill.
//!
//! * [`protect`]: frontmatter and header shielding around a transformation.
//! * [`History`]: bounded whole-document undo/redo.
//! * [`Dispatcher`]: resolves a [`ToolOperation`](quill_settings::ToolOperation)
//!   to a built-in strategy, a script, or an AI action and runs it.
//! * [`run_operations`]: the linear batch pipeline.
//! * [`BatchDraft`]: unsaved edits to a stored batch.
//! * [`Session`]: owns settings, history, notifications, and the editor, and
//!   exposes the entry points a host calls.
//!
//! The document itself lives behind [`EditorHost`]; language models behind
//! [`AiClient`].

mod batch;
mod dispatch;
mod draft;
mod error;
mod history;
mod host;
mod notify;
pub mod protect;
mod session;

pub use batch::run_operations;
pub use dispatch::{Dispatcher, Step, StepContext};
pub use draft::BatchDraft;
pub use error::{BatchError, DispatchError, SessionError};
pub use history::{DEFAULT_CAPACITY, History};
pub use host::{AiClient, AiResponse, EditorHost, InvalidSelection, NoTransport, TextBuffer};
pub use notify::NotificationCenter;
pub use session::{Outcome, Session};

#[cfg(test)]
mod tests;

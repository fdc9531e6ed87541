//! Session notification queue.
//!
//! Collects typed notifications raised while operations run. Hosts drain the
//! queue and decide how to present each one.

use std::collections::VecDeque;

use quill_registry::{IntoNotification, Notification, NotificationKey, NotificationSink};

#[derive(Debug)]
pub struct NotificationCenter {
	pending: VecDeque<Notification>,
}

impl Default for NotificationCenter {
	fn default() -> Self {
		Self::new()
	}
}

impl NotificationCenter {
	pub fn new() -> Self {
		Self {
			pending: VecDeque::new(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	pub fn notify(&mut self, notification: impl IntoNotification) {
		self.pending.push_back(notification.into_notification());
	}

	pub fn take_pending(&mut self) -> Vec<Notification> {
		self.pending.drain(..).collect()
	}

	/// Whether any queued notification came from `key`.
	pub fn contains(&self, key: NotificationKey) -> bool {
		self.pending.iter().any(|n| n.is(key))
	}
}

impl NotificationSink for NotificationCenter {
	fn push(&mut self, notification: Notification) {
		self.pending.push_back(notification);
	}
}

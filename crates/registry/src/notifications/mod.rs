//! Notifications.
//!
//! Type-safe notices with compile-time checked keys. Strategies and the engine
//! push [`Notification`]s into a [`NotificationSink`]; the host decides how to
//! show them.

#[macro_use]
mod macros;

pub mod keys;

/// Severity level for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	/// Informational message (default).
	#[default]
	Info,
	Warn,
	Error,
	Success,
}

/// Static notification definition.
#[derive(Debug)]
pub struct NotificationDef {
	/// Unique identifier for this notification type.
	pub id: &'static str,
	pub level: Level,
}

impl NotificationDef {
	pub const fn new(id: &'static str, level: Level) -> Self {
		Self { id, level }
	}
}

/// Runtime notification instance ready to display.
#[derive(Debug, Clone)]
pub struct Notification {
	/// Reference to the static definition.
	pub def: &'static NotificationDef,
	/// The formatted message content.
	pub message: String,
}

impl Notification {
	pub fn new(def: &'static NotificationDef, message: impl Into<String>) -> Self {
		Self {
			def,
			message: message.into(),
		}
	}

	pub fn level(&self) -> Level {
		self.def.level
	}

	pub fn id(&self) -> &'static str {
		self.def.id
	}

	/// Whether this notification was built from `key`'s definition.
	pub fn is(&self, key: NotificationKey) -> bool {
		std::ptr::eq(self.def, key.def)
	}
}

impl PartialEq for Notification {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.def, other.def) && self.message == other.message
	}
}

impl Eq for Notification {}

/// Typed key referencing a notification definition with a static message.
#[derive(Clone, Copy)]
pub struct NotificationKey {
	def: &'static NotificationDef,
	message: &'static str,
}

impl NotificationKey {
	pub const fn new(def: &'static NotificationDef, message: &'static str) -> Self {
		Self { def, message }
	}

	/// Creates a notification instance from this key.
	pub fn emit(self) -> Notification {
		Notification::new(self.def, self.message)
	}

	pub fn level(self) -> Level {
		self.def.level
	}

	pub fn id(self) -> &'static str {
		self.def.id
	}
}

impl core::fmt::Debug for NotificationKey {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("NotificationKey")
			.field("id", &self.def.id)
			.field("message", &self.message)
			.finish()
	}
}

/// Trait for anything that can become a [`Notification`].
pub trait IntoNotification {
	fn into_notification(self) -> Notification;
}

impl IntoNotification for Notification {
	fn into_notification(self) -> Notification {
		self
	}
}

impl IntoNotification for NotificationKey {
	fn into_notification(self) -> Notification {
		self.emit()
	}
}

impl From<NotificationKey> for Notification {
	fn from(key: NotificationKey) -> Self {
		key.emit()
	}
}

/// Receiver for notifications raised while a tool runs.
pub trait NotificationSink {
	fn push(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
	fn push(&mut self, notification: Notification) {
		Vec::push(self, notification);
	}
}

/// Discards everything. Used when a caller suppresses notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl NotificationSink for Silent {
	fn push(&mut self, _notification: Notification) {}
}

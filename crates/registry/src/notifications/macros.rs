//! Notification definition macros.
//!
//! See [`notif!`] for defining notifications and [`notif_alias!`] for keys
//! that share an existing definition.

/// Defines a notification key.
///
/// # Static Notifications
///
/// ```ignore
/// notif!(no_selection, Warn, "Nothing is selected");
/// // Generates: NO_SELECTION const
/// // Usage: notices.push(keys::NO_SELECTION.emit());
/// ```
///
/// # Parameterized Notifications
///
/// ```ignore
/// notif!(tool_not_found(id: &str), Error, format!("Unknown tool: {id}"));
/// // Generates: TOOL_NOT_FOUND const + tool_not_found() function
/// // Usage: notices.push(keys::tool_not_found("dedupe"));
/// ```
macro_rules! notif {
	// Static message: notif!(name, Level, "message")
	($name:ident, $level:ident, $msg:literal) => {
		paste::paste! {
			static [<NOTIF_ $name:upper>]: $crate::NotificationDef = $crate::NotificationDef::new(
				concat!("quill::", stringify!($name)),
				$crate::Level::$level,
			);

			#[doc = concat!("Static notification: ", $msg)]
			pub const [<$name:upper>]: $crate::NotificationKey =
				$crate::NotificationKey::new(&[<NOTIF_ $name:upper>], $msg);
		}
	};

	// Parameterized: notif!(name(arg: Type, ...), Level, format_expr)
	($name:ident ( $($arg:ident : $ty:ty),* $(,)? ), $level:ident, $fmt:expr) => {
		paste::paste! {
			static [<NOTIF_ $name:upper>]: $crate::NotificationDef = $crate::NotificationDef::new(
				concat!("quill::", stringify!($name)),
				$crate::Level::$level,
			);

			/// Const key for matching against emitted notifications.
			pub const [<$name:upper>]: $crate::NotificationKey =
				$crate::NotificationKey::new(&[<NOTIF_ $name:upper>], "");

			pub fn $name($($arg: $ty),*) -> $crate::Notification {
				$crate::Notification::new(&[<NOTIF_ $name:upper>], $fmt)
			}
		}
	};
}

/// Creates a key with its own message that reuses another definition's id.
///
/// ```ignore
/// notif!(no_selection, Warn, "Nothing is selected");
/// notif_alias!(selection_required, no_selection, "This script needs a selection");
/// ```
macro_rules! notif_alias {
	($alias:ident, $base:ident, $msg:literal) => {
		paste::paste! {
			#[doc = concat!("Alias for ", stringify!($base), ": ", $msg)]
			pub const [<$alias:upper>]: $crate::NotificationKey =
				$crate::NotificationKey::new(&[<NOTIF_ $base:upper>], $msg);
		}
	};
}

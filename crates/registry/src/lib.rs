//! Strategy registry and built-in text tools.
//!
//! * [`Strategy`]: one named, pluggable transformation.
//! * [`StrategyRegistry`]: id → strategy lookup in insertion order.
//! * [`builtins`]: the stock tool catalogue.
//! * [`notifications`]: typed user-facing notices emitted by strategies and
//!   by the engine.

pub mod builtins;
pub mod notifications;
mod registry;
mod strategy;

pub use notifications::{
	IntoNotification, Level, Notification, NotificationDef, NotificationKey, NotificationSink,
	Silent, keys,
};
pub use registry::StrategyRegistry;
pub use strategy::{Strategy, StrategyMeta};

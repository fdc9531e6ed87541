//! Stock text tools.
//!
//! Line-oriented tools split on `\n` and join with `\n`. A single trailing
//! newline is set aside before splitting and restored afterwards, so it never
//! shows up as an extra empty line.

use crate::StrategyRegistry;

mod case;
mod columns;
mod lines;
mod replace;

pub use case::ChangeCase;
pub use columns::{ExtractColumn, SwapColumns};
pub use lines::{
	Dedupe, FilterLines, NumberLines, ReverseLines, SortLines, TrimEmptyLines, TrimLines, WrapLines,
};
pub use replace::{FindReplace, RegexReplace};

/// Defines a unit strategy type with static metadata.
macro_rules! strategy {
	(
		$(#[$attr:meta])*
		$ty:ident {
			id: $id:literal,
			name: $name:literal,
			description: $desc:literal,
		}
		fn execute($text:ident, $settings:ident, $notices:ident) $body:block
	) => {
		$(#[$attr])*
		#[derive(Debug, Default, Clone, Copy)]
		pub struct $ty;

		impl $crate::Strategy for $ty {
			fn meta(&self) -> &$crate::StrategyMeta {
				static META: $crate::StrategyMeta = $crate::StrategyMeta::new($id, $name, $desc);
				&META
			}

			fn execute(
				&self,
				$text: &str,
				$settings: &quill_settings::ToolSettings,
				$notices: &mut dyn $crate::NotificationSink,
			) -> String $body
		}
	};
}
pub(crate) use strategy;

/// Registers every stock tool, in catalogue order.
pub fn register_builtins(registry: &mut StrategyRegistry) {
	registry.register(RegexReplace);
	registry.register(FindReplace);
	registry.register(FilterLines);
	registry.register(Dedupe);
	registry.register(TrimEmptyLines);
	registry.register(TrimLines);
	registry.register(SortLines);
	registry.register(ReverseLines);
	registry.register(SwapColumns);
	registry.register(ExtractColumn);
	registry.register(WrapLines);
	registry.register(ChangeCase);
	registry.register(NumberLines);
}

/// Applies `f` to the lines of `text`, preserving one trailing newline.
pub(crate) fn map_lines<F>(text: &str, f: F) -> String
where
	F: FnOnce(Vec<&str>) -> Vec<String>,
{
	if text.is_empty() {
		return String::new();
	}
	let (body, trailing) = match text.strip_suffix('\n') {
		Some(body) => (body, true),
		None => (text, false),
	};
	let mut out = f(body.split('\n').collect()).join("\n");
	if trailing {
		out.push('\n');
	}
	out
}

#[cfg(test)]
mod tests;

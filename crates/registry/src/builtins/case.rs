use quill_settings::CaseMode;

use super::strategy;

strategy! {
	ChangeCase {
		id: "change-case",
		name: "Change Case",
		description: "Convert to upper, lower, or title case",
	}
	fn execute(text, settings, _notices) {
		match settings.case.mode {
			CaseMode::Upper => text.to_uppercase(),
			CaseMode::Lower => text.to_lowercase(),
			CaseMode::Title => title_case(text),
		}
	}
}

/// Upper-cases the first letter of each whitespace-delimited word and
/// lower-cases the rest. Whitespace is kept as-is.
fn title_case(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut at_word_start = true;
	for c in text.chars() {
		if c.is_whitespace() {
			at_word_start = true;
			out.push(c);
		} else if at_word_start {
			at_word_start = false;
			out.extend(c.to_uppercase());
		} else {
			out.extend(c.to_lowercase());
		}
	}
	out
}

use regex::{NoExpand, RegexBuilder};
use tracing::debug;

use super::strategy;
use crate::keys;

strategy! {
	/// Regular-expression replace. `$1`-style group references are expanded.
	RegexReplace {
		id: "regex-replace",
		name: "Regex Replace",
		description: "Replace regular-expression matches",
	}
	fn execute(text, settings, notices) {
		let opts = &settings.regex;
		if opts.pattern.is_empty() {
			return text.to_string();
		}
		let re = match RegexBuilder::new(&opts.pattern)
			.case_insensitive(opts.case_insensitive)
			.multi_line(opts.multiline)
			.build()
		{
			Ok(re) => re,
			Err(err) => {
				debug!(pattern = %opts.pattern, error = %err, "rejected pattern");
				notices.push(keys::malformed_pattern(&err.to_string()));
				return text.to_string();
			}
		};
		let replacement = opts.replacement.as_str();
		if opts.global {
			re.replace_all(text, replacement).into_owned()
		} else {
			re.replace(text, replacement).into_owned()
		}
	}
}

strategy! {
	/// Literal find and replace of every occurrence.
	FindReplace {
		id: "find-replace",
		name: "Find & Replace",
		description: "Replace every occurrence of a literal string",
	}
	fn execute(text, settings, notices) {
		let opts = &settings.find_replace;
		if opts.find.is_empty() {
			return text.to_string();
		}
		if opts.case_sensitive {
			return text.replace(&opts.find, &opts.replace);
		}
		match RegexBuilder::new(&regex::escape(&opts.find)).case_insensitive(true).build() {
			Ok(re) => re.replace_all(text, NoExpand(&opts.replace)).into_owned(),
			Err(err) => {
				notices.push(keys::malformed_pattern(&err.to_string()));
				text.to_string()
			}
		}
	}
}

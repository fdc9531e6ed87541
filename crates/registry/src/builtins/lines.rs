use std::cmp::Ordering;
use std::collections::HashSet;

use quill_settings::FilterMode;
use regex::RegexBuilder;

use super::{map_lines, strategy};
use crate::keys;

strategy! {
	/// Keeps or removes lines matching a substring or pattern.
	FilterLines {
		id: "filter-lines",
		name: "Filter Lines",
		description: "Keep or remove lines that match",
	}
	fn execute(text, settings, notices) {
		let opts = &settings.filter;
		if opts.pattern.is_empty() {
			return text.to_string();
		}

		let matcher: Box<dyn Fn(&str) -> bool> = if opts.use_regex {
			match RegexBuilder::new(&opts.pattern).case_insensitive(!opts.case_sensitive).build() {
				Ok(re) => Box::new(move |line: &str| re.is_match(line)),
				Err(err) => {
					notices.push(keys::malformed_pattern(&err.to_string()));
					return text.to_string();
				}
			}
		} else if opts.case_sensitive {
			let needle = opts.pattern.clone();
			Box::new(move |line: &str| line.contains(&needle))
		} else {
			let needle = opts.pattern.to_lowercase();
			Box::new(move |line: &str| line.to_lowercase().contains(&needle))
		};

		let keep = opts.mode == FilterMode::Keep;
		map_lines(text, |lines| {
			lines.into_iter().filter(|line| matcher(*line) == keep).map(str::to_string).collect()
		})
	}
}

strategy! {
	/// Removes repeated lines, keeping the first occurrence.
	Dedupe {
		id: "dedupe",
		name: "Remove Duplicates",
		description: "Remove duplicate lines, keeping the first",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.dedupe;
		map_lines(text, |lines| {
			let mut seen = HashSet::new();
			lines
				.into_iter()
				.filter(|&line| {
					let key = if opts.trim_whitespace { line.trim() } else { line };
					let key =
						if opts.case_sensitive { key.to_string() } else { key.to_lowercase() };
					seen.insert(key)
				})
				.map(str::to_string)
				.collect()
		})
	}
}

strategy! {
	/// Drops blank lines, including the one implied by a trailing newline.
	TrimEmptyLines {
		id: "trim-empty-lines",
		name: "Remove Empty Lines",
		description: "Remove lines that are empty or whitespace-only",
	}
	fn execute(text, _settings, _notices) {
		text.split('\n').filter(|line| !line.trim().is_empty()).collect::<Vec<_>>().join("\n")
	}
}

strategy! {
	TrimLines {
		id: "trim-lines",
		name: "Trim Lines",
		description: "Trim whitespace at both ends of every line",
	}
	fn execute(text, _settings, _notices) {
		map_lines(text, |lines| lines.into_iter().map(|line| line.trim().to_string()).collect())
	}
}

strategy! {
	/// Stable line sort.
	SortLines {
		id: "sort-lines",
		name: "Sort Lines",
		description: "Sort lines alphabetically or numerically",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.sort;
		map_lines(text, |mut lines| {
			lines.sort_by(|a, b| {
				let ord = compare_lines(a, b, opts.case_sensitive, opts.numeric);
				if opts.descending { ord.reverse() } else { ord }
			});
			lines.into_iter().map(str::to_string).collect()
		})
	}
}

strategy! {
	ReverseLines {
		id: "reverse-lines",
		name: "Reverse Lines",
		description: "Reverse the order of lines",
	}
	fn execute(text, _settings, _notices) {
		map_lines(text, |lines| lines.into_iter().rev().map(str::to_string).collect())
	}
}

strategy! {
	WrapLines {
		id: "wrap-lines",
		name: "Wrap Lines",
		description: "Add a prefix and suffix to every line",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.wrap;
		map_lines(text, |lines| {
			lines
				.into_iter()
				.map(|line| {
					if opts.skip_empty && line.trim().is_empty() {
						line.to_string()
					} else {
						format!("{}{line}{}", opts.prefix, opts.suffix)
					}
				})
				.collect()
		})
	}
}

strategy! {
	NumberLines {
		id: "number-lines",
		name: "Number Lines",
		description: "Prefix lines with ascending numbers",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.numbering;
		map_lines(text, |lines| {
			(opts.start..)
				.zip(lines)
				.map(|(n, line)| format!("{n}{}{line}", opts.separator))
				.collect()
		})
	}
}

fn compare_lines(a: &str, b: &str, case_sensitive: bool, numeric: bool) -> Ordering {
	if numeric && let (Some(x), Some(y)) = (leading_number(a), leading_number(b)) {
		return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
	}
	if case_sensitive {
		a.cmp(b)
	} else {
		a.to_lowercase().cmp(&b.to_lowercase())
	}
}

/// Parses an optional sign, digits, and fraction at the start of `line`.
fn leading_number(line: &str) -> Option<f64> {
	let line = line.trim_start();
	let mut end = 0;
	let mut seen_digit = false;
	let mut seen_dot = false;
	for (i, c) in line.char_indices() {
		match c {
			'-' | '+' if i == 0 => {}
			'0'..='9' => seen_digit = true,
			'.' if !seen_dot => seen_dot = true,
			_ => break,
		}
		end = i + c.len_utf8();
	}
	if !seen_digit {
		return None;
	}
	line[..end].trim_end_matches('.').parse().ok()
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_settings::{CaseMode, FilterMode, ToolSettings};

use super::*;
use crate::{Notification, Strategy, keys};

fn run(
	strategy: impl Strategy,
	text: &str,
	settings: &ToolSettings,
) -> (String, Vec<Notification>) {
	let mut notices = Vec::new();
	let out = strategy.execute(text, settings, &mut notices);
	(out, notices)
}

fn apply(strategy: impl Strategy, text: &str, settings: &ToolSettings) -> String {
	run(strategy, text, settings).0
}

#[test]
fn regex_replace_expands_groups() {
	let mut settings = ToolSettings::default();
	settings.regex.pattern = r"(\w+)@(\w+)".into();
	settings.regex.replacement = "$2 at $1".into();
	assert_eq!(apply(RegexReplace, "me@home, you@work", &settings), "home at me, work at you");

	settings.regex.global = false;
	assert_eq!(apply(RegexReplace, "me@home, you@work", &settings), "home at me, you@work");
}

#[test]
fn regex_replace_multiline_anchors() {
	let mut settings = ToolSettings::default();
	settings.regex.pattern = r"\s+$".into();
	assert_eq!(apply(RegexReplace, "a  \nb\t\n", &settings), "a\nb");
}

#[test]
fn invalid_pattern_reports_and_leaves_text() {
	let mut settings = ToolSettings::default();
	settings.regex.pattern = "(unclosed".into();

	let (out, notices) = run(RegexReplace, "keep me", &settings);
	assert_eq!(out, "keep me");
	assert_eq!(notices.len(), 1);
	assert!(notices[0].is(keys::MALFORMED_PATTERN));
}

#[test]
fn empty_pattern_is_a_no_op() {
	let (out, notices) = run(RegexReplace, "text", &ToolSettings::default());
	assert_eq!(out, "text");
	assert!(notices.is_empty());
}

#[test]
fn find_replace_literal_and_case_insensitive() {
	let mut settings = ToolSettings::default();
	settings.find_replace.find = "a.b".into();
	settings.find_replace.replace = "$x".into();
	assert_eq!(apply(FindReplace, "a.b aXb A.B", &settings), "$x aXb A.B");

	settings.find_replace.case_sensitive = false;
	assert_eq!(apply(FindReplace, "a.b aXb A.B", &settings), "$x aXb $x");
}

#[test]
fn filter_keeps_and_removes() {
	let mut settings = ToolSettings::default();
	settings.filter.pattern = "err".into();
	let text = "ok 1\nerr 2\nERR 3\nok 4\n";
	assert_eq!(apply(FilterLines, text, &settings), "err 2\n");

	settings.filter.case_sensitive = false;
	settings.filter.mode = FilterMode::Remove;
	assert_eq!(apply(FilterLines, text, &settings), "ok 1\nok 4\n");

	settings.filter.use_regex = true;
	settings.filter.pattern = r"^ok \d$".into();
	settings.filter.mode = FilterMode::Keep;
	assert_eq!(apply(FilterLines, text, &settings), "ok 1\nok 4\n");
}

#[test]
fn dedupe_keeps_first_occurrence() {
	let settings = ToolSettings::default();
	assert_eq!(apply(Dedupe, "b\na\nb\na\nc", &settings), "b\na\nc");

	let mut loose = ToolSettings::default();
	loose.dedupe.trim_whitespace = true;
	loose.dedupe.case_sensitive = false;
	assert_eq!(apply(Dedupe, "Apple\n apple \nAPPLE\npear\n", &loose), "Apple\npear\n");
}

#[test]
fn dedupe_then_trim_empty_lines() {
	let settings = ToolSettings::default();
	let deduped = apply(Dedupe, "a\na\n\nb\n", &settings);
	assert_eq!(deduped, "a\n\nb\n");
	assert_eq!(apply(TrimEmptyLines, &deduped, &settings), "a\nb");
}

#[test]
fn trim_lines_strips_each_line() {
	assert_eq!(apply(TrimLines, "  a \n\tb\t\n", &ToolSettings::default()), "a\nb\n");
}

#[test]
fn sort_orders_lines() {
	let mut settings = ToolSettings::default();
	assert_eq!(apply(SortLines, "b\nC\na\n", &settings), "C\na\nb\n");

	settings.sort.case_sensitive = false;
	assert_eq!(apply(SortLines, "b\nC\na\n", &settings), "a\nb\nC\n");

	settings.sort.numeric = true;
	assert_eq!(apply(SortLines, "10 x\n9 y\n-1 z", &settings), "-1 z\n9 y\n10 x");

	settings.sort.descending = true;
	assert_eq!(apply(SortLines, "10 x\n9 y\n-1 z", &settings), "10 x\n9 y\n-1 z");
}

#[test]
fn reverse_keeps_trailing_newline() {
	assert_eq!(apply(ReverseLines, "1\n2\n3\n", &ToolSettings::default()), "3\n2\n1\n");
}

#[test]
fn swap_columns_skips_short_lines() {
	let mut settings = ToolSettings::default();
	settings.column.first = 1;
	settings.column.second = 3;
	assert_eq!(apply(SwapColumns, "a,b,c\nx,y\n", &settings), "c,b,a\nx,y\n");
}

#[test]
fn extract_column_blank_when_missing() {
	let mut settings = ToolSettings::default();
	settings.column.delimiter = "\t".into();
	settings.column.first = 2;
	assert_eq!(apply(ExtractColumn, "a\tb\nc", &settings), "b\n");
}

#[test]
fn wrap_skips_blank_lines_when_asked() {
	let mut settings = ToolSettings::default();
	settings.wrap.prefix = "<".into();
	settings.wrap.suffix = ">".into();
	assert_eq!(apply(WrapLines, "a\n\nb", &settings), "<a>\n<>\n<b>");

	settings.wrap.skip_empty = true;
	assert_eq!(apply(WrapLines, "a\n\nb", &settings), "<a>\n\n<b>");
}

#[test]
fn change_case_modes() {
	let mut settings = ToolSettings::default();
	assert_eq!(apply(ChangeCase, "hello World", &settings), "HELLO WORLD");

	settings.case.mode = CaseMode::Lower;
	assert_eq!(apply(ChangeCase, "hello World", &settings), "hello world");

	settings.case.mode = CaseMode::Title;
	assert_eq!(apply(ChangeCase, "hello  wORLD\nnext line", &settings), "Hello  World\nNext Line");
}

#[test]
fn number_lines_from_start() {
	let mut settings = ToolSettings::default();
	settings.numbering.start = 7;
	settings.numbering.separator = ": ".into();
	assert_eq!(apply(NumberLines, "a\nb\n", &settings), "7: a\n8: b\n");
}

#[test]
fn empty_input_stays_empty() {
	let settings = ToolSettings::default();
	assert_eq!(apply(NumberLines, "", &settings), "");
	assert_eq!(apply(WrapLines, "", &settings), "");
	assert_eq!(apply(TrimEmptyLines, "", &settings), "");
}

#[test]
fn reverse_moves_leading_blank_line_into_terminator() {
	let settings = ToolSettings::default();
	assert_eq!(apply(ReverseLines, "\na", &settings), "a\n");
	assert_eq!(apply(ReverseLines, "a\n", &settings), "a\n");
	assert_eq!(apply(ReverseLines, "\na\n", &settings), "a\n\n");
}

proptest! {
	// A leading blank line without a trailing newline ends up as the terminator.
	#[test]
	fn reverse_twice_is_identity(text in "[a-c\n]{0,40}") {
		prop_assume!(text.ends_with('\n') || !text.starts_with('\n'));
		let settings = ToolSettings::default();
		let once = apply(ReverseLines, &text, &settings);
		prop_assert_eq!(apply(ReverseLines, &once, &settings), text);
	}

	#[test]
	fn dedupe_is_idempotent(text in "[ab\n ]{0,40}") {
		let settings = ToolSettings::default();
		let once = apply(Dedupe, &text, &settings);
		prop_assert_eq!(apply(Dedupe, &once, &settings), once);
	}

	#[test]
	fn sort_preserves_line_count(text in "[a-z0-9\n]{0,40}") {
		let settings = ToolSettings::default();
		let sorted = apply(SortLines, &text, &settings);
		prop_assert_eq!(sorted.matches('\n').count(), text.matches('\n').count());
	}
}

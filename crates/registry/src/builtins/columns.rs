use super::{map_lines, strategy};

strategy! {
	/// Swaps two delimited columns on every line. Lines lacking either column
	/// are left alone.
	SwapColumns {
		id: "swap-columns",
		name: "Swap Columns",
		description: "Swap two delimited columns",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.column;
		let invalid = opts.first == 0 || opts.second == 0 || opts.first == opts.second;
		if opts.delimiter.is_empty() || invalid {
			return text.to_string();
		}
		let delim = opts.delimiter.as_str();
		map_lines(text, |lines| {
			lines
				.into_iter()
				.map(|line| {
					let mut cols: Vec<&str> = line.split(delim).collect();
					if opts.first > cols.len() || opts.second > cols.len() {
						return line.to_string();
					}
					cols.swap(opts.first - 1, opts.second - 1);
					cols.join(delim)
				})
				.collect()
		})
	}
}

strategy! {
	/// Keeps a single delimited column from every line.
	ExtractColumn {
		id: "extract-column",
		name: "Extract Column",
		description: "Keep one delimited column",
	}
	fn execute(text, settings, _notices) {
		let opts = &settings.column;
		if opts.delimiter.is_empty() || opts.first == 0 {
			return text.to_string();
		}
		let delim = opts.delimiter.as_str();
		map_lines(text, |lines| {
			lines
				.into_iter()
				.map(|line| line.split(delim).nth(opts.first - 1).unwrap_or_default().to_string())
				.collect()
		})
	}
}

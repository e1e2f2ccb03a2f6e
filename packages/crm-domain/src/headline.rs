use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Copy, Debug)]
pub struct HeadlineOptions<'a> {
	/// Half of this many words of context are kept in front of the first match.
	pub min_words: usize,
	pub max_words: usize,
	pub start_sel: &'a str,
	pub stop_sel: &'a str,
}

struct Segment<'a> {
	text: &'a str,
	word: bool,
}

/// Cuts a window of at most `max_words` words around the first word accepted by `is_match` and
/// wraps every accepted word in the selectors. Runs of whitespace collapse to one space.
pub fn headline<F>(text: &str, opts: &HeadlineOptions<'_>, is_match: F) -> String
where
	F: Fn(&str) -> bool,
{
	let selectors = Some((opts.start_sel, opts.stop_sel));

	render(text, opts.max_words, opts.min_words / 2, selectors, is_match)
}

/// Leading `max_words` words of `text`, without markup.
pub fn excerpt(text: &str, max_words: usize) -> String {
	render(text, max_words, 0, None, |_| false)
}

fn render<F>(
	text: &str,
	max_words: usize,
	context: usize,
	selectors: Option<(&str, &str)>,
	is_match: F,
) -> String
where
	F: Fn(&str) -> bool,
{
	let segments: Vec<Segment<'_>> = text
		.split_word_bounds()
		.map(|text| Segment { text, word: text.chars().any(char::is_alphanumeric) })
		.collect();
	let words: Vec<usize> =
		segments.iter().enumerate().filter(|(_, s)| s.word).map(|(idx, _)| idx).collect();

	if words.is_empty() {
		return text.split_whitespace().collect::<Vec<_>>().join(" ");
	}

	let matches: Vec<bool> = match selectors {
		Some(_) => segments.iter().map(|s| s.word && is_match(s.text)).collect(),
		None => vec![false; segments.len()],
	};
	let max_words = max_words.max(1);
	let total = words.len();
	let (start, end) = if total <= max_words {
		(0, total)
	} else {
		let anchor = words.iter().position(|&idx| matches[idx]).unwrap_or(0);
		let start = anchor.saturating_sub(context).min(total - max_words);

		(start, start + max_words)
	};
	let from = if start == 0 { 0 } else { words[start] };
	let to = if end == total { segments.len() - 1 } else { words[end - 1] };
	let mut out = String::new();
	let mut pending_space = false;

	for idx in from..=to {
		let segment = &segments[idx];

		if !segment.word && segment.text.chars().all(char::is_whitespace) {
			pending_space = true;

			continue;
		}
		if pending_space && !out.is_empty() {
			out.push(' ');
		}

		pending_space = false;

		match selectors {
			Some((start_sel, stop_sel)) if matches[idx] => {
				out.push_str(start_sel);
				out.push_str(segment.text);
				out.push_str(stop_sel);
			},
			_ => out.push_str(segment.text),
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	const OPTS: HeadlineOptions<'static> =
		HeadlineOptions { min_words: 6, max_words: 18, start_sel: "<b>", stop_sel: "</b>" };

	#[test]
	fn short_text_is_kept_whole_and_marked() {
		let text = "Klant wil een nieuwe badkamer,  snel graag.";
		let out = headline(text, &OPTS, |w| w == "badkamer");

		assert_eq!(out, "Klant wil een nieuwe <b>badkamer</b>, snel graag.");
	}

	#[test]
	fn long_text_is_windowed_around_first_match() {
		let text = (1..=30).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
		let out = headline(&text, &OPTS, |w| w == "w20");
		let words: Vec<&str> = out.split(' ').collect();

		assert_eq!(words.len(), 18);
		assert_eq!(words[0], "w13");
		assert_eq!(words[17], "w30");
		assert!(out.contains("<b>w20</b>"));
	}

	#[test]
	fn window_starts_at_match_context() {
		let text = (1..=40).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
		let out = headline(&text, &OPTS, |w| w == "w10");

		assert!(out.starts_with("w7 w8 w9 <b>w10</b>"), "Unexpected headline: {out}");
	}

	#[test]
	fn excerpt_truncates_without_markup() {
		let out = excerpt("one two\nthree   four five", 3);

		assert_eq!(out, "one two three");
	}

	#[test]
	fn text_without_words_is_whitespace_collapsed() {
		assert_eq!(excerpt("  --  ++ ", 5), "-- ++");
	}
}

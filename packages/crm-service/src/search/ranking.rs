use crm_config::SearchWeights;
use crm_domain::text::{self, Lexer};

use crate::search::query::{NormalizedQuery, TokenSet, Tokenizers};

/// Field importance, from identifying names (`A`) down to free text (`D`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldClass {
	A,
	B,
	C,
	D,
}

/// Own-field rank of one row, with the contribution of every field in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OwnRank {
	pub score: f32,
	pub fields: Vec<f32>,
}
impl OwnRank {
	pub fn field_hit(&self, idx: usize) -> bool {
		self.fields.get(idx).is_some_and(|score| *score > 0.0)
	}
}

/// Which field a catalog-style ladder match landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderHit {
	Primary,
	Secondary,
	Description,
}

/// Scores rows against one normalized query.
pub struct Ranker<'a> {
	query: &'a NormalizedQuery,
	tokenizers: &'a Tokenizers,
	weights: &'a SearchWeights,
}
impl<'a> Ranker<'a> {
	pub fn new(
		query: &'a NormalizedQuery,
		tokenizers: &'a Tokenizers,
		weights: &'a SearchWeights,
	) -> Self {
		Self { query, tokenizers, weights }
	}

	/// Weighted rank over a row's fields, summed across both tokenizers.
	///
	/// A tokenizer contributes only when the row as a whole satisfies its token set. Each field
	/// then adds `class_weight * hits / query_lexemes`.
	pub fn rank(&self, fields: &[(Option<&str>, FieldClass)]) -> OwnRank {
		let mut scores = vec![0.0_f32; fields.len()];

		for (lexer, tokens) in self.passes() {
			if tokens.is_empty() {
				continue;
			}

			let docs: Vec<Vec<String>> = fields
				.iter()
				.map(|(text, _)| text.map(|text| lexer.lexemes(text)).unwrap_or_default())
				.collect();

			if !tokens.matches(&docs) {
				continue;
			}

			let len = tokens.exact.len() as f32;

			for (idx, doc) in docs.iter().enumerate() {
				let hits: f32 = tokens.exact.iter().map(|query| tokens.hit(query, doc)).sum();

				scores[idx] += self.weight(fields[idx].1) * hits / len;
			}
		}

		OwnRank { score: scores.iter().sum(), fields: scores }
	}

	/// Rank of a single free-text document such as a note body.
	pub fn rank_text(&self, text: &str, class: FieldClass) -> f32 {
		self.rank(&[(Some(text), class)]).score
	}

	/// Fixed-rank ladder for short code-like records: exact primary or secondary value, then
	/// primary prefix, then secondary prefix, then a bare substring anywhere.
	pub fn ladder(
		&self,
		primary: &str,
		secondary: Option<&str>,
		description: Option<&str>,
	) -> Option<(f32, LadderHit)> {
		let query = self.query.folded.as_str();

		if query.is_empty() {
			return None;
		}

		let primary = fold_literal(primary);
		let secondary = secondary.map(fold_literal);
		let description = description.map(fold_literal);

		if primary == query {
			return Some((1.0, LadderHit::Primary));
		}
		if secondary.as_deref() == Some(query) {
			return Some((1.0, LadderHit::Secondary));
		}
		if primary.starts_with(query) {
			return Some((0.8, LadderHit::Primary));
		}
		if secondary.as_deref().is_some_and(|value| value.starts_with(query)) {
			return Some((0.6, LadderHit::Secondary));
		}
		if primary.contains(query) {
			return Some((0.3, LadderHit::Primary));
		}
		if secondary.as_deref().is_some_and(|value| value.contains(query)) {
			return Some((0.3, LadderHit::Secondary));
		}
		if description.as_deref().is_some_and(|value| value.contains(query)) {
			return Some((0.3, LadderHit::Description));
		}

		None
	}

	/// Whether a word of display text should be highlighted.
	pub fn is_hit_word(&self, word: &str) -> bool {
		let folded = text::fold(word);

		text::split_words(&folded).any(|piece| {
			self.passes().into_iter().any(|(lexer, tokens)| {
				lexer.lexeme(piece).is_some_and(|lexeme| tokens.hits_lexeme(&lexeme))
			})
		})
	}

	fn passes(&self) -> [(&'a Lexer, &'a TokenSet); 2] {
		[
			(&self.tokenizers.generic, &self.query.generic),
			(&self.tokenizers.natural, &self.query.natural),
		]
	}

	fn weight(&self, class: FieldClass) -> f32 {
		match class {
			FieldClass::A => self.weights.a,
			FieldClass::B => self.weights.b,
			FieldClass::C => self.weights.c,
			FieldClass::D => self.weights.d,
		}
	}
}

fn fold_literal(value: &str) -> String {
	text::fold(value).split_whitespace().collect::<Vec<_>>().join(" ")
}

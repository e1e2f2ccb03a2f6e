//! Query normalization: one raw query in, the token sets every matcher compares against out.

use crm_domain::text::{self, Language, Lexer};

/// The two tokenizers a query and every searchable field are analyzed with.
pub struct Tokenizers {
	pub generic: Lexer,
	pub natural: Lexer,
}
impl Tokenizers {
	pub fn new(language: Language) -> Self {
		Self { generic: Lexer::generic(), natural: Lexer::natural(language) }
	}
}

/// Query lexemes for one tokenizer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
	/// Every lexeme, in query order.
	pub exact: Vec<String>,
	/// The lexemes long enough to be matched as prefixes.
	pub prefix: Vec<String>,
}
impl TokenSet {
	fn new(exact: Vec<String>, prefix_min_chars: usize) -> Self {
		let prefix = exact
			.iter()
			.filter(|lexeme| lexeme.chars().count() >= prefix_min_chars)
			.cloned()
			.collect();

		Self { exact, prefix }
	}

	pub fn is_empty(&self) -> bool {
		self.exact.is_empty()
	}

	/// True when every lexeme occurs in some document, or when every prefix lexeme starts some
	/// document lexeme. A query without lexemes matches nothing.
	pub fn matches(&self, docs: &[Vec<String>]) -> bool {
		if self.exact.is_empty() {
			return false;
		}

		let exact = self.exact.iter().all(|query| docs.iter().any(|doc| doc.contains(query)));

		if exact {
			return true;
		}

		!self.prefix.is_empty()
			&& self.prefix.iter().all(|query| {
				docs.iter().any(|doc| doc.iter().any(|lexeme| lexeme.starts_with(query.as_str())))
			})
	}

	/// Weight of one query lexeme against one document: 1 for an exact hit, 0.5 for a prefix hit.
	pub fn hit(&self, query: &str, doc: &[String]) -> f32 {
		if doc.iter().any(|lexeme| lexeme == query) {
			return 1.0;
		}
		if self.prefix.iter().any(|prefix| prefix == query)
			&& doc.iter().any(|lexeme| lexeme.starts_with(query))
		{
			return 0.5;
		}

		0.0
	}

	pub fn hits_lexeme(&self, lexeme: &str) -> bool {
		self.exact.iter().any(|query| query == lexeme)
			|| self.prefix.iter().any(|prefix| lexeme.starts_with(prefix.as_str()))
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedQuery {
	/// Diacritic-folded, lowercased, whitespace-collapsed query used by the exact/prefix ladder.
	pub folded: String,
	pub generic: TokenSet,
	pub natural: TokenSet,
}

/// Pure and deterministic; the same input always yields identical token sets.
pub fn normalize(raw: &str, tokenizers: &Tokenizers, prefix_min_chars: usize) -> NormalizedQuery {
	let folded = text::fold(raw).split_whitespace().collect::<Vec<_>>().join(" ");
	let generic = TokenSet::new(tokenizers.generic.lexemes(raw), prefix_min_chars);
	let natural = TokenSet::new(tokenizers.natural.lexemes(raw), prefix_min_chars);

	NormalizedQuery { folded, generic, natural }
}

use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

const DUTCH_STOPWORDS: &[&str] = &[
	"aan", "al", "als", "bij", "dat", "de", "den", "der", "die", "dit", "een", "en", "er", "had",
	"heb", "het", "hij", "hoe", "ik", "in", "is", "je", "kan", "maar", "me", "met", "mij", "na",
	"naar", "niet", "nog", "of", "om", "ook", "op", "over", "te", "tot", "u", "uit", "van", "voor",
	"was", "wat", "we", "wel", "wij", "wordt", "zal", "ze", "zich", "zij", "zijn", "zo",
];
const ENGLISH_STOPWORDS: &[&str] = &[
	"a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
	"her", "his", "i", "in", "is", "it", "its", "of", "on", "or", "our", "she", "so", "that",
	"the", "their", "them", "there", "they", "this", "to", "was", "we", "were", "will", "with",
	"you", "your",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
	Dutch,
	English,
	French,
	German,
	Italian,
	Portuguese,
	Spanish,
	Swedish,
}
impl Language {
	pub const ALL: [Self; 8] = [
		Self::Dutch,
		Self::English,
		Self::French,
		Self::German,
		Self::Italian,
		Self::Portuguese,
		Self::Spanish,
		Self::Swedish,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Dutch => "dutch",
			Self::English => "english",
			Self::French => "french",
			Self::German => "german",
			Self::Italian => "italian",
			Self::Portuguese => "portuguese",
			Self::Spanish => "spanish",
			Self::Swedish => "swedish",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();

		Self::ALL.into_iter().find(|language| language.as_str().eq_ignore_ascii_case(raw))
	}

	fn algorithm(self) -> Algorithm {
		match self {
			Self::Dutch => Algorithm::Dutch,
			Self::English => Algorithm::English,
			Self::French => Algorithm::French,
			Self::German => Algorithm::German,
			Self::Italian => Algorithm::Italian,
			Self::Portuguese => Algorithm::Portuguese,
			Self::Spanish => Algorithm::Spanish,
			Self::Swedish => Algorithm::Swedish,
		}
	}

	fn stopwords(self) -> &'static [&'static str] {
		match self {
			Self::Dutch => DUTCH_STOPWORDS,
			Self::English => ENGLISH_STOPWORDS,
			_ => &[],
		}
	}
}

/// Turns text into comparable lexemes.
///
/// The generic lexer keeps every folded word as-is, which suits names, e-mail addresses, phone
/// numbers and codes. The natural-language lexer additionally drops stop words and stems, which
/// suits notes and descriptions.
pub struct Lexer {
	stemmer: Option<Stemmer>,
	stopwords: &'static [&'static str],
}
impl Lexer {
	pub fn generic() -> Self {
		Self { stemmer: None, stopwords: &[] }
	}

	pub fn natural(language: Language) -> Self {
		let stemmer = Stemmer::create(language.algorithm());

		Self { stemmer: Some(stemmer), stopwords: language.stopwords() }
	}

	/// Lexemes of `text` in first-seen order, without duplicates.
	pub fn lexemes(&self, text: &str) -> Vec<String> {
		let folded = fold(text);
		let mut out: Vec<String> = Vec::new();

		for piece in split_words(&folded) {
			let Some(lexeme) = self.lexeme(piece) else { continue };

			if !out.contains(&lexeme) {
				out.push(lexeme);
			}
		}

		out
	}

	/// Lexeme for one already folded word piece, `None` when it is a stop word.
	pub fn lexeme(&self, piece: &str) -> Option<String> {
		if self.stopwords.contains(&piece) {
			return None;
		}

		match self.stemmer.as_ref() {
			Some(stemmer) => Some(stemmer.stem(piece).into_owned()),
			None => Some(piece.to_string()),
		}
	}
}

/// Compatibility-decomposes, strips combining marks and lowercases, so `"Émile Müller"` and
/// `"emile muller"` compare equal.
pub fn fold(input: &str) -> String {
	input.nfkd().filter(|ch| !is_combining_mark(*ch)).flat_map(char::to_lowercase).collect()
}

/// Alphanumeric runs of already folded text.
pub fn split_words(folded: &str) -> impl Iterator<Item = &str> {
	folded.split(|ch: char| !ch.is_alphanumeric()).filter(|piece| !piece.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fold_strips_diacritics_and_case() {
		assert_eq!(fold("Émile MÜLLER"), "emile muller");
		assert_eq!(fold("Curaçao"), "curacao");
		assert_eq!(fold("ﬁle"), "file");
	}

	#[test]
	fn generic_lexer_splits_contact_fields() {
		let lexer = Lexer::generic();

		assert_eq!(
			lexer.lexemes("Jan.Bakker@Example.com"),
			vec!["jan", "bakker", "example", "com"]
		);
		assert_eq!(lexer.lexemes("06-1234 5678"), vec!["06", "1234", "5678"]);
	}

	#[test]
	fn generic_lexer_keeps_stop_words_and_dedupes() {
		let lexer = Lexer::generic();

		assert_eq!(lexer.lexemes("van der Berg van Dijk"), vec!["van", "der", "berg", "dijk"]);
	}

	#[test]
	fn natural_lexer_drops_stop_words_and_stems() {
		let lexer = Lexer::natural(Language::English);

		assert_eq!(lexer.lexemes("The dog is running and runs"), vec!["dog", "run"]);
	}

	#[test]
	fn natural_lexer_is_deterministic() {
		let lexer = Lexer::natural(Language::Dutch);
		let first = lexer.lexemes("Nieuwe badkamers met inloopdouches");
		let second = lexer.lexemes("Nieuwe badkamers met inloopdouches");

		assert_eq!(first, second);
		assert!(!first.contains(&"met".to_string()));
	}

	#[test]
	fn language_parse_is_case_insensitive() {
		assert_eq!(Language::parse(" Dutch "), Some(Language::Dutch));
		assert_eq!(Language::parse("klingon"), None);
	}

	#[test]
	fn every_language_parses_from_its_name() {
		for language in Language::ALL {
			assert_eq!(Language::parse(language.as_str()), Some(language));
		}
	}
}

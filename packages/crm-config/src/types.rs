use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Applied when the caller omits `limit` or passes a non-positive value.
	pub default_limit: u32,
	pub max_limit: u32,
	/// Shorter queries (after trimming) short-circuit to an empty result.
	pub min_query_chars: u32,
	pub max_query_chars: u32,
	/// Lexemes shorter than this are left out of the prefix variant of a query.
	pub prefix_min_chars: u32,
	/// Snowball stemmer used by the natural-language tokenizer.
	pub language: String,
	pub query_timeout_ms: u64,
	pub weights: SearchWeights,
	pub damping: SearchDamping,
	pub snippet: SearchSnippet,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: 10,
			max_limit: 50,
			min_query_chars: 2,
			max_query_chars: 100,
			prefix_min_chars: 3,
			language: "dutch".to_string(),
			query_timeout_ms: 5_000,
			weights: SearchWeights::default(),
			damping: SearchDamping::default(),
			snippet: SearchSnippet::default(),
		}
	}
}

/// Field class weights, highest (identifying names) to lowest (free text).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchWeights {
	pub a: f32,
	pub b: f32,
	pub c: f32,
	pub d: f32,
}
impl Default for SearchWeights {
	fn default() -> Self {
		Self { a: 1.0, b: 0.4, c: 0.2, d: 0.1 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchDamping {
	pub note: f32,
	pub service_note: f32,
	pub quote: f32,
	pub appointment: f32,
	pub partner: f32,
}
impl Default for SearchDamping {
	fn default() -> Self {
		Self { note: 0.30, service_note: 0.25, quote: 0.20, appointment: 0.15, partner: 0.10 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSnippet {
	pub min_words: u32,
	pub max_words: u32,
	pub start_sel: String,
	pub stop_sel: String,
}
impl Default for SearchSnippet {
	fn default() -> Self {
		Self {
			min_words: 6,
			max_words: 18,
			start_sel: "<mark>".to_string(),
			stop_sel: "</mark>".to_string(),
		}
	}
}

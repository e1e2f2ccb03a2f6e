mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Postgres, Search, SearchDamping, SearchSnippet, SearchWeights, Service, Storage,
};

use std::{fs, path::Path};

use crm_domain::text::Language;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	validate_search(&cfg.search)
}

fn validate_search(search: &Search) -> Result<()> {
	if search.max_limit == 0 {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than zero.".to_string(),
		});
	}
	if search.default_limit == 0 || search.default_limit > search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must be in the range 1-search.max_limit.".to_string(),
		});
	}
	if search.min_query_chars < 2 {
		return Err(Error::Validation {
			message: "search.min_query_chars must be at least 2.".to_string(),
		});
	}
	if search.min_query_chars > search.max_query_chars {
		return Err(Error::Validation {
			message: "search.min_query_chars must not exceed search.max_query_chars.".to_string(),
		});
	}
	if search.prefix_min_chars == 0 {
		return Err(Error::Validation {
			message: "search.prefix_min_chars must be greater than zero.".to_string(),
		});
	}
	if Language::parse(&search.language).is_none() {
		let supported = Language::ALL.map(Language::as_str);

		return Err(Error::Validation {
			message: format!("search.language must be one of {}.", supported.join(", ")),
		});
	}
	if search.query_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.query_timeout_ms must be greater than zero.".to_string(),
		});
	}

	let weights = &search.weights;

	for (label, value) in [
		("search.weights.a", weights.a),
		("search.weights.b", weights.b),
		("search.weights.c", weights.c),
		("search.weights.d", weights.d),
	] {
		if !value.is_finite() || value <= 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number greater than zero."),
			});
		}
	}

	if !(weights.a >= weights.b && weights.b >= weights.c && weights.c >= weights.d) {
		return Err(Error::Validation {
			message: "search.weights must be ordered a >= b >= c >= d.".to_string(),
		});
	}

	let damping = &search.damping;
	let ladder = [
		("search.damping.note", damping.note),
		("search.damping.service_note", damping.service_note),
		("search.damping.quote", damping.quote),
		("search.damping.appointment", damping.appointment),
		("search.damping.partner", damping.partner),
	];

	for (label, value) in ladder {
		if !value.is_finite() || value <= 0.0 || value >= 1.0 {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number in the range (0.0, 1.0)."),
			});
		}
	}
	for pair in ladder.windows(2) {
		let (higher, lower) = (pair[0], pair[1]);

		if higher.1 <= lower.1 {
			return Err(Error::Validation {
				message: format!("{} must be greater than {}.", higher.0, lower.0),
			});
		}
	}

	let snippet = &search.snippet;

	if snippet.min_words == 0 {
		return Err(Error::Validation {
			message: "search.snippet.min_words must be greater than zero.".to_string(),
		});
	}
	if snippet.min_words > snippet.max_words {
		return Err(Error::Validation {
			message: "search.snippet.min_words must not exceed search.snippet.max_words."
				.to_string(),
		});
	}
	if snippet.start_sel.is_empty() || snippet.stop_sel.is_empty() {
		return Err(Error::Validation {
			message: "search.snippet.start_sel and search.snippet.stop_sel must be non-empty."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.search.language = cfg.search.language.trim().to_lowercase();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}

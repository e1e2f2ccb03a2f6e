use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use crm_config::{Config, Error};
use crm_domain::text::Language;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_search(key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let search = root
		.as_table_mut()
		.and_then(|table| table.get_mut("search"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].");

	search.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("crm_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn template_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = crm_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected template config to load.");

	assert_eq!(cfg.search.default_limit, 10);
	assert_eq!(cfg.search.language, "dutch");
	assert!((cfg.search.damping.quote - 0.20).abs() < f32::EPSILON);
}

#[test]
fn search_section_defaults_when_omitted() {
	let payload = "\
[service]
http_bind = \"127.0.0.1:8080\"
log_level = \"\"

[storage.postgres]
dsn = \"postgres://localhost/crm\"
pool_max_conns = 1
";
	let path = write_temp_config(payload.to_string());
	let result = crm_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected config without [search] to load.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.max_limit, 50);
	assert_eq!(cfg.search.prefix_min_chars, 3);
	assert_eq!(cfg.search.snippet.max_words, 18);
}

#[test]
fn language_is_normalized_before_validation() {
	let payload = sample_toml_with_search("language", Value::String(" English ".to_string()));
	let path = write_temp_config(payload);
	let result = crm_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert_eq!(result.expect("Expected config to load.").search.language, "english");
}

#[test]
fn unknown_language_is_rejected() {
	let payload = sample_toml_with_search("language", Value::String("klingon".to_string()));
	let path = write_temp_config(payload);
	let result = crm_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected language validation error.");

	assert!(
		err.to_string().starts_with("search.language must be one of"),
		"Unexpected error: {err}"
	);
}

#[test]
fn every_stemmer_language_is_accepted() {
	for language in Language::ALL {
		let payload =
			sample_toml_with_search("language", Value::String(language.as_str().to_string()));
		let path = write_temp_config(payload);
		let result = crm_config::load(&path);

		fs::remove_file(&path).expect("Failed to remove test config.");

		let cfg = result.expect("Expected config to load.");

		assert_eq!(Language::parse(&cfg.search.language), Some(language));
	}
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("crm_config_test_missing_file.toml");
	let err = crm_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn default_limit_must_not_exceed_max_limit() {
	let mut cfg = base_config();

	cfg.search.default_limit = 60;

	let err = crm_config::validate(&cfg).expect_err("Expected default_limit validation error.");

	assert!(
		err.to_string().contains("search.default_limit must be in the range"),
		"Unexpected error: {err}"
	);
}

#[test]
fn min_query_chars_must_be_at_least_two() {
	let mut cfg = base_config();

	cfg.search.min_query_chars = 1;

	let err = crm_config::validate(&cfg).expect_err("Expected min_query_chars validation error.");

	assert!(err.to_string().contains("search.min_query_chars must be at least 2."));
}

#[test]
fn damping_ladder_must_stay_ordered() {
	let mut cfg = base_config();

	cfg.search.damping.partner = 0.18;

	let err = crm_config::validate(&cfg).expect_err("Expected damping ordering error.");

	assert_eq!(
		err.to_string(),
		"search.damping.appointment must be greater than search.damping.partner."
	);
}

#[test]
fn damping_factors_must_be_below_one() {
	let mut cfg = base_config();

	cfg.search.damping.note = 1.0;

	let err = crm_config::validate(&cfg).expect_err("Expected damping range error.");

	assert!(err.to_string().contains("search.damping.note must be a finite number"));
}

#[test]
fn tuned_damping_is_accepted_when_order_is_kept() {
	let mut cfg = base_config();

	cfg.search.damping.note = 0.5;
	cfg.search.damping.service_note = 0.4;
	cfg.search.damping.quote = 0.3;
	cfg.search.damping.appointment = 0.2;
	cfg.search.damping.partner = 0.05;

	assert!(crm_config::validate(&cfg).is_ok());
}

#[test]
fn weights_must_descend_by_class() {
	let mut cfg = base_config();

	cfg.search.weights.d = 0.5;

	let err = crm_config::validate(&cfg).expect_err("Expected weight ordering error.");

	assert!(err.to_string().contains("search.weights must be ordered"));
}

#[test]
fn snippet_bounds_must_be_consistent() {
	let mut cfg = base_config();

	cfg.search.snippet.min_words = 20;

	let err = crm_config::validate(&cfg).expect_err("Expected snippet validation error.");

	assert!(err.to_string().contains("search.snippet.min_words must not exceed"));
}

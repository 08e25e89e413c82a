use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use nomina_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_browser(updates: &[(&str, i64)]) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");
	let browser = root
		.get_mut("browser")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [browser].");

	for (key, number) in updates {
		browser.insert((*key).to_string(), Value::Integer(*number));
	}

	toml::to_string(&value).expect("Failed to render template config.")
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

	path.push(format!("nomina_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = nomina_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.gateway.api_base, "https://api.nomina-transparente.mx");
	assert_eq!(cfg.gateway.api_key, None);
	assert_eq!(cfg.browser.page_size, 10);
	assert_eq!(cfg.browser.initial_batch, 200);
	assert_eq!(cfg.browser.bulk_batch, 5_000);
	assert_eq!(cfg.browser.bulk_from_page, 2);
	assert_eq!(cfg.browser.debounce_ms, 500);
}

#[test]
fn browser_section_is_optional() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	value.as_table_mut().expect("Template config must be a table.").remove("browser");

	let cfg: Config = toml::from_str(&toml::to_string(&value).expect("Failed to render config."))
		.expect("Config without [browser] must parse.");

	assert_eq!(cfg.browser.page_size, 10);
	assert_eq!(cfg.browser.debounce_ms, 500);
	assert!(nomina_config::validate(&cfg).is_ok());
}

#[test]
fn bulk_batch_must_cover_initial_batch() {
	let payload = sample_toml_with_browser(&[("initial_batch", 300), ("bulk_batch", 200)]);
	let path = write_temp_config(payload);
	let result = nomina_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected bulk_batch validation error.");

	assert!(
		err.to_string().contains(
			"browser.bulk_batch must be greater than or equal to browser.initial_batch."
		),
		"Unexpected error: {err}"
	);
}

#[test]
fn page_size_must_be_positive() {
	let payload = sample_toml_with_browser(&[("page_size", 0)]);
	let path = write_temp_config(payload);
	let result = nomina_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected page_size validation error.");

	assert!(
		err.to_string().contains("browser.page_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn debounce_must_be_positive() {
	let mut cfg = base_config();

	cfg.browser.debounce_ms = 0;

	let err = nomina_config::validate(&cfg).expect_err("Expected debounce validation error.");

	assert!(
		err.to_string().contains("browser.debounce_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn gateway_paths_must_be_absolute() {
	let mut cfg = base_config();

	cfg.gateway.institution_path = "api/relacionados".to_string();

	let err = nomina_config::validate(&cfg).expect_err("Expected path validation error.");

	assert!(
		err.to_string().contains("gateway.institution_path must start with '/'."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.gateway.default_headers.insert("x-retries".to_string(), serde_json::json!(3));

	let err = nomina_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(
		err.to_string().contains("gateway.default_headers.x-retries must be a string."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("nomina_config_test_missing_file.toml");

	let err = nomina_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_toml_reports_parse_error_with_path() {
	let path = write_temp_config("[browser\npage_size = 10\n".to_string());
	let result = nomina_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
	assert!(err.to_string().contains(&path.display().to_string()), "Unexpected error: {err}");
	assert!(err.to_string().starts_with("Related-people config "), "Unexpected error: {err}");
}

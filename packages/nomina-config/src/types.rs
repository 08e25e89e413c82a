use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub gateway: Gateway,
	#[serde(default)]
	pub browser: Browser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Remote search endpoints that answer related-people queries.
#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
	pub api_base: String,
	pub surname_path: String,
	pub institution_path: String,
	/// Optional. Sent as a bearer token when present.
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Client-side paging policy shared by both related-people tabs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Browser {
	/// Records per local page.
	pub page_size: u32,
	/// `maxRecords` hint for pages below `bulk_from_page`.
	pub initial_batch: u32,
	/// `maxRecords` hint once the user pages past `bulk_from_page`.
	pub bulk_batch: u32,
	pub bulk_from_page: u32,
	pub debounce_ms: u64,
}
impl Default for Browser {
	fn default() -> Self {
		Self {
			page_size: 10,
			initial_batch: 200,
			bulk_batch: 5_000,
			bulk_from_page: 2,
			debounce_ms: 500,
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

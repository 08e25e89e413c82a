use serde::{Deserialize, Serialize};

use crate::person::PersonSummary;

/// Result of a single gateway call.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FetchBatch {
	pub records: Vec<PersonSummary>,
	pub server_has_more: bool,
	pub server_total_count: u64,
	pub server_page_count: u64,
}
impl FetchBatch {
	/// True when the gateway reports nothing beyond this batch.
	pub fn is_complete(&self) -> bool {
		!self.server_has_more
	}
}

/// Paging and filter parameters sent alongside the criteria.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchRequest {
	pub server_page: u32,
	pub max_records: u32,
	pub search_text: String,
}

/// Chooses how many records to ask for, based on how deep the user is paging.
///
/// Early pages get a small batch. Reaching `bulk_from_page` switches to a bulk batch large enough
/// to be cached and sliced locally for every following page. Requests always start at server
/// page 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchPolicy {
	pub initial_batch: u32,
	pub bulk_batch: u32,
	pub bulk_from_page: u32,
}
impl FetchPolicy {
	pub fn from_config(cfg: &nomina_config::Browser) -> Self {
		Self {
			initial_batch: cfg.initial_batch,
			bulk_batch: cfg.bulk_batch,
			bulk_from_page: cfg.bulk_from_page,
		}
	}

	pub fn max_records(&self, page_index: usize) -> u32 {
		if page_index < self.bulk_from_page as usize { self.initial_batch } else { self.bulk_batch }
	}

	pub fn request(&self, page_index: usize, search_text: &str) -> FetchRequest {
		FetchRequest {
			server_page: 0,
			max_records: self.max_records(page_index),
			search_text: search_text.to_string(),
		}
	}
}
impl Default for FetchPolicy {
	fn default() -> Self {
		Self::from_config(&nomina_config::Browser::default())
	}
}

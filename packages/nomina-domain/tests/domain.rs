use nomina_domain::{
	FetchBatch, FetchPolicy, PaginationSummary,
	pagination::{page_bounds, total_pages},
};

#[test]
fn early_pages_request_initial_batch() {
	let policy = FetchPolicy::default();

	assert_eq!(policy.max_records(0), 200);
	assert_eq!(policy.max_records(1), 200);
}

#[test]
fn deep_pages_request_bulk_batch() {
	let policy = FetchPolicy::default();

	assert_eq!(policy.max_records(2), 5_000);
	assert_eq!(policy.max_records(57), 5_000);
}

#[test]
fn requests_always_start_at_server_page_zero() {
	let policy = FetchPolicy::default();
	let request = policy.request(9, "garcia");

	assert_eq!(request.server_page, 0);
	assert_eq!(request.max_records, 5_000);
	assert_eq!(request.search_text, "garcia");
}

#[test]
fn policy_follows_browser_config() {
	let cfg = nomina_config::Browser {
		page_size: 25,
		initial_batch: 50,
		bulk_batch: 1_000,
		bulk_from_page: 4,
		debounce_ms: 300,
	};
	let policy = FetchPolicy::from_config(&cfg);

	assert_eq!(policy.max_records(3), 50);
	assert_eq!(policy.max_records(4), 1_000);
}

#[test]
fn total_pages_rounds_up() {
	assert_eq!(total_pages(0, 10), 0);
	assert_eq!(total_pages(10, 10), 1);
	assert_eq!(total_pages(35, 10), 4);
	assert_eq!(total_pages(8_000, 10), 800);
}

#[test]
fn page_bounds_clamp_to_available_records() {
	assert_eq!(page_bounds(3, 10, 35), 30..35);
	assert_eq!(page_bounds(4, 10, 35), 35..35);
	assert_eq!(page_bounds(0, 10, 0), 0..0);
}

#[test]
fn summary_reports_visible_range() {
	let summary = PaginationSummary::new(3, 10, 35, 5);

	assert_eq!(summary.current_page, 4);
	assert_eq!(summary.total_pages, 4);
	assert_eq!(summary.total_records, 35);
	assert_eq!(summary.range_start, 31);
	assert_eq!(summary.range_end, 35);
}

#[test]
fn empty_summary_is_all_zero() {
	assert_eq!(PaginationSummary::new(0, 10, 0, 0), PaginationSummary::default());
}

#[test]
fn batch_completeness_follows_server_flag() {
	let batch = FetchBatch { server_has_more: true, ..FetchBatch::default() };

	assert!(!batch.is_complete());
	assert!(FetchBatch::default().is_complete());
}

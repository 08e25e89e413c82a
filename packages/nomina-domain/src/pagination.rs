use std::ops::Range;

use serde::{Deserialize, Serialize};

/// What the pager footer shows for one tab.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PaginationSummary {
	/// 1-based. Zero when there is nothing to show.
	pub current_page: u64,
	pub total_pages: u64,
	pub total_records: u64,
	/// 1-based position of the first visible record. Zero when the page is empty.
	pub range_start: u64,
	pub range_end: u64,
}
impl PaginationSummary {
	pub fn new(page_index: usize, page_size: u32, total_records: u64, visible: usize) -> Self {
		let total_pages = total_pages(total_records, page_size);
		let offset = page_index as u64 * page_size as u64;
		let (range_start, range_end) =
			if visible == 0 { (0, 0) } else { (offset + 1, offset + visible as u64) };

		Self {
			current_page: if total_pages == 0 { 0 } else { page_index as u64 + 1 },
			total_pages,
			total_records,
			range_start,
			range_end,
		}
	}
}

pub fn total_pages(total_records: u64, page_size: u32) -> u64 {
	if page_size == 0 {
		return 0;
	}

	total_records.div_ceil(page_size as u64)
}

/// Index range of local page `page_index` inside a list of `len` records.
pub fn page_bounds(page_index: usize, page_size: u32, len: usize) -> Range<usize> {
	let start = page_index.saturating_mul(page_size as usize).min(len);
	let end = start.saturating_add(page_size as usize).min(len);

	start..end
}

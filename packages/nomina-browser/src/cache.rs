use nomina_domain::{FetchBatch, PersonSummary, RelatedCriteria, pagination};

/// Holds one complete, unfiltered result set and serves local pages out of it.
///
/// Partial batches (`server_has_more`) and filtered batches are never stored. A partial batch
/// cannot answer arbitrary pages, and a filtered one is only valid for a single filter string.
/// The total reported by the most recent batch is remembered either way so the pager can size
/// itself before anything is cached.
#[derive(Debug)]
pub struct LocalPageCache<C> {
	entry: Option<CacheEntry<C>>,
	last_server_total: Option<u64>,
}

#[derive(Debug)]
struct CacheEntry<C> {
	criteria: C,
	records: Vec<PersonSummary>,
}

impl<C> LocalPageCache<C>
where
	C: RelatedCriteria,
{
	pub fn new() -> Self {
		Self { entry: None, last_server_total: None }
	}

	/// Returns whether the batch was kept.
	pub fn store(&mut self, batch: &FetchBatch, criteria: &C, filter_text: &str) -> bool {
		self.last_server_total = Some(batch.server_total_count);

		if batch.server_has_more || !filter_text.is_empty() {
			return false;
		}

		self.entry = Some(CacheEntry { criteria: criteria.clone(), records: batch.records.clone() });

		true
	}

	/// `None` is a miss. The caller has to go to the gateway.
	pub fn get_page(
		&self,
		criteria: &C,
		page_index: usize,
		page_size: u32,
	) -> Option<&[PersonSummary]> {
		let entry = self.entry.as_ref().filter(|entry| &entry.criteria == criteria)?;
		let bounds = pagination::page_bounds(page_index, page_size, entry.records.len());

		Some(&entry.records[bounds])
	}

	/// Forgets the stored batch and the remembered server total.
	pub fn invalidate(&mut self) {
		self.entry = None;
		self.last_server_total = None;
	}

	pub fn is_populated(&self) -> bool {
		self.entry.is_some()
	}

	pub fn total_records(&self) -> u64 {
		match self.entry.as_ref() {
			Some(entry) => entry.records.len() as u64,
			None => self.last_server_total.unwrap_or(0),
		}
	}

	pub fn total_pages(&self, page_size: u32) -> u64 {
		pagination::total_pages(self.total_records(), page_size)
	}
}
impl<C> Default for LocalPageCache<C>
where
	C: RelatedCriteria,
{
	fn default() -> Self {
		Self::new()
	}
}

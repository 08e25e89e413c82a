use std::{
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use nomina_domain::{
	FetchBatch, FetchPolicy, FetchRequest, PaginationSummary, PersonSummary, RelatedCriteria,
	RelatedKind, pagination,
};

use crate::{Debouncer, RelatedGateway, Result, cache::LocalPageCache};

/// Origin of an in-flight gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTag {
	pub ticket: u64,
	pub page_index: usize,
	pub filter_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Loading(RequestTag),
	Loaded,
	Failed { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
	/// The page lies outside `[0, total_pages)`. Nothing changed.
	OutOfRange,
	CacheHit,
	Fetched,
	/// A newer action superseded the request before its response arrived.
	Stale,
}

/// Snapshot of one tab, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserView {
	pub kind: RelatedKind,
	pub records: Vec<PersonSummary>,
	pub summary: PaginationSummary,
	pub page_index: usize,
	/// Filter of the current query. Displayed records, if any, were fetched with it.
	pub filter_text: String,
	/// Latest text typed, possibly still waiting out the debounce window.
	pub draft_filter_text: String,
	pub server_has_more: bool,
	pub is_loading: bool,
	pub has_error: bool,
	pub error: Option<String>,
	pub is_empty: bool,
}

/// Progressive, cached pagination over one related-people query.
///
/// Early pages are fetched in small batches and deep pages in one bulk batch. A complete,
/// unfiltered batch is cached and every later page is sliced from it without touching the
/// gateway. Filter edits are debounced, drop the cache and restart from page 0. Responses are
/// committed only if no newer request was started in the meantime.
pub struct RelatedPeopleBrowser<C>
where
	C: RelatedCriteria,
{
	inner: Arc<Inner<C>>,
}

struct Inner<C>
where
	C: RelatedCriteria,
{
	gateway: Arc<dyn RelatedGateway<C>>,
	policy: FetchPolicy,
	page_size: u32,
	debounce: Duration,
	debouncer: Debouncer,
	state: Mutex<BrowserState<C>>,
}

struct BrowserState<C> {
	criteria: C,
	filter_text: String,
	draft_filter_text: String,
	phase: Phase,
	cache: LocalPageCache<C>,
	page_index: usize,
	visible: Vec<PersonSummary>,
	server_has_more: bool,
	next_ticket: u64,
}

struct PendingFetch<C> {
	tag: RequestTag,
	criteria: C,
	request: FetchRequest,
}

impl<C> RelatedPeopleBrowser<C>
where
	C: RelatedCriteria,
{
	pub fn new(
		criteria: C,
		gateway: Arc<dyn RelatedGateway<C>>,
		cfg: &nomina_config::Browser,
	) -> Self {
		let inner = Inner {
			gateway,
			policy: FetchPolicy::from_config(cfg),
			page_size: cfg.page_size,
			debounce: Duration::from_millis(cfg.debounce_ms),
			debouncer: Debouncer::new(),
			state: Mutex::new(BrowserState::new(criteria, 0)),
		};

		Self { inner: Arc::new(inner) }
	}

	pub fn kind(&self) -> RelatedKind {
		C::KIND
	}

	pub fn criteria(&self) -> C {
		self.inner.lock().criteria.clone()
	}

	pub fn phase(&self) -> Phase {
		self.inner.lock().phase.clone()
	}

	pub fn page_index(&self) -> usize {
		self.inner.lock().page_index
	}

	pub fn view(&self) -> BrowserView {
		let state = self.inner.lock();
		let total_records = state.cache.total_records();
		let error = match &state.phase {
			Phase::Failed { message } => Some(message.clone()),
			_ => None,
		};

		BrowserView {
			kind: C::KIND,
			records: state.visible.clone(),
			summary: PaginationSummary::new(
				state.page_index,
				self.inner.page_size,
				total_records,
				state.visible.len(),
			),
			page_index: state.page_index,
			filter_text: state.filter_text.clone(),
			draft_filter_text: state.draft_filter_text.clone(),
			server_has_more: state.server_has_more,
			is_loading: matches!(state.phase, Phase::Loading(_)),
			has_error: error.is_some(),
			error,
			is_empty: matches!(state.phase, Phase::Loaded)
				&& state.visible.is_empty()
				&& total_records == 0,
		}
	}

	/// Loads page 0 regardless of the known page count.
	///
	/// Used when the tab is first shown and to retry a failed first load.
	pub async fn open(&self) -> Result<PageOutcome> {
		self.inner.load_page(0, false).await
	}

	pub async fn go_to_page(&self, page_index: usize) -> Result<PageOutcome> {
		self.inner.load_page(page_index, true).await
	}

	pub async fn next(&self) -> Result<PageOutcome> {
		let page_index = self.page_index();

		self.go_to_page(page_index + 1).await
	}

	pub async fn previous(&self) -> Result<PageOutcome> {
		match self.page_index().checked_sub(1) {
			Some(page_index) => self.go_to_page(page_index).await,
			None => Ok(PageOutcome::OutOfRange),
		}
	}

	/// Records a keystroke in the filter box and re-arms the debounce timer.
	///
	/// When the timer expires the cache and the displayed page are dropped and page 0 is fetched
	/// with the last text set.
	/// Must be called from within a tokio runtime.
	pub fn set_filter_text(&self, text: impl Into<String>) {
		let text = text.into();

		self.inner.lock().draft_filter_text = text.clone();

		let inner = Arc::downgrade(&self.inner);

		self.inner.debouncer.schedule(self.inner.debounce, async move {
			let Some(inner) = inner.upgrade() else {
				return;
			};

			if let Err(err) = inner.apply_filter(&text).await {
				tracing::warn!(
					tab = C::KIND.as_str(),
					error = %err,
					"Related-people filter fetch failed."
				);
			}
		});
	}

	/// Applies a filter immediately, discarding any keystroke still waiting on the timer.
	pub async fn apply_filter_now(&self, text: &str) -> Result<PageOutcome> {
		self.inner.debouncer.cancel();
		self.inner.lock().draft_filter_text = text.to_string();

		self.inner.apply_filter(text).await
	}

	/// Waits until a pending debounced filter, if any, has been applied.
	pub async fn settle(&self) {
		self.inner.debouncer.settle().await;
	}

	/// Switches to a new subject: drops the cache, the filter and the displayed page.
	pub fn reset(&self, criteria: C) {
		self.inner.debouncer.cancel();

		let mut state = self.inner.lock();
		let next_ticket = state.next_ticket;

		*state = BrowserState::new(criteria, next_ticket);

		tracing::debug!(tab = C::KIND.as_str(), "Related-people tab reset.");
	}
}
impl<C> Clone for RelatedPeopleBrowser<C>
where
	C: RelatedCriteria,
{
	fn clone(&self) -> Self {
		Self { inner: self.inner.clone() }
	}
}

impl<C> Inner<C>
where
	C: RelatedCriteria,
{
	fn lock(&self) -> MutexGuard<'_, BrowserState<C>> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	async fn load_page(&self, page_index: usize, check_range: bool) -> Result<PageOutcome> {
		let pending = {
			let mut state = self.lock();

			if check_range && page_index as u64 >= state.cache.total_pages(self.page_size) {
				return Ok(PageOutcome::OutOfRange);
			}

			let hit = state
				.cache
				.get_page(&state.criteria, page_index, self.page_size)
				.map(<[PersonSummary]>::to_vec);

			if let Some(records) = hit {
				state.visible = records;
				state.page_index = page_index;
				state.server_has_more = false;
				state.phase = Phase::Loaded;

				tracing::debug!(tab = C::KIND.as_str(), page = page_index, "Served page from cache.");

				return Ok(PageOutcome::CacheHit);
			}

			self.begin_fetch(&mut state, page_index)
		};

		self.run_fetch(pending).await
	}

	async fn apply_filter(&self, text: &str) -> Result<PageOutcome> {
		let pending = {
			let mut state = self.lock();

			state.cache.invalidate();
			state.filter_text = text.trim().to_string();
			state.page_index = 0;
			state.visible.clear();
			state.server_has_more = false;

			self.begin_fetch(&mut state, 0)
		};

		self.run_fetch(pending).await
	}

	fn begin_fetch(&self, state: &mut BrowserState<C>, page_index: usize) -> PendingFetch<C> {
		let ticket = state.next_ticket;

		state.next_ticket += 1;

		let tag = RequestTag { ticket, page_index, filter_text: state.filter_text.clone() };
		let request = self.policy.request(page_index, &state.filter_text);

		tracing::debug!(
			tab = C::KIND.as_str(),
			ticket,
			page = page_index,
			max_records = request.max_records,
			"Fetching related people."
		);

		state.phase = Phase::Loading(tag.clone());

		PendingFetch { tag, criteria: state.criteria.clone(), request }
	}

	async fn run_fetch(&self, pending: PendingFetch<C>) -> Result<PageOutcome> {
		let PendingFetch { tag, criteria, request } = pending;
		let result = self.gateway.search_related(&criteria, &request).await;
		let mut state = self.lock();
		let current = match &state.phase {
			Phase::Loading(current) => current.ticket == tag.ticket && state.criteria == criteria,
			_ => false,
		};

		if !current {
			tracing::debug!(
				tab = C::KIND.as_str(),
				ticket = tag.ticket,
				"Discarding stale related-people response."
			);

			return Ok(PageOutcome::Stale);
		}

		match result {
			Ok(batch) => {
				self.commit(&mut state, &criteria, &tag, batch);

				Ok(PageOutcome::Fetched)
			},
			Err(err) => {
				tracing::warn!(
					tab = C::KIND.as_str(),
					ticket = tag.ticket,
					page = tag.page_index,
					error = %err,
					"Related-people fetch failed."
				);

				state.phase = Phase::Failed { message: err.to_string() };

				Err(err)
			},
		}
	}

	fn commit(
		&self,
		state: &mut BrowserState<C>,
		criteria: &C,
		tag: &RequestTag,
		mut batch: FetchBatch,
	) {
		let exclude = criteria.exclude_person_id();
		let received = batch.records.len();

		batch.records.retain(|person| person.person_id != exclude);

		if batch.records.len() != received {
			tracing::warn!(
				tab = C::KIND.as_str(),
				person_id = exclude,
				"Gateway returned the subject person among related people."
			);
		}

		for person in &mut batch.records {
			criteria.annotate(person);
		}

		if batch.is_complete() {
			batch.server_total_count = batch.records.len() as u64;
		}

		let cached = state.cache.store(&batch, criteria, &tag.filter_text);
		let bounds = pagination::page_bounds(tag.page_index, self.page_size, batch.records.len());

		state.visible = batch.records[bounds].to_vec();
		state.page_index = tag.page_index;
		state.server_has_more = batch.server_has_more;
		state.phase = Phase::Loaded;

		tracing::debug!(
			tab = C::KIND.as_str(),
			ticket = tag.ticket,
			records = batch.records.len(),
			cached,
			"Committed related-people batch."
		);
	}
}

impl<C> BrowserState<C> {
	fn new(criteria: C, next_ticket: u64) -> Self
	where
		C: RelatedCriteria,
	{
		Self {
			criteria,
			filter_text: String::new(),
			draft_filter_text: String::new(),
			phase: Phase::Idle,
			cache: LocalPageCache::new(),
			page_index: 0,
			visible: Vec::new(),
			server_has_more: false,
			next_ticket,
		}
	}
}

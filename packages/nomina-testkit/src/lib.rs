use std::{
	collections::VecDeque,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use nomina_browser::{BoxFuture, Error, RelatedGateway, Result};
use nomina_domain::{FetchBatch, FetchRequest, PersonSummary, RelatedCriteria};

/// In-memory stand-in for the remote search gateway.
///
/// Serves a fixed directory of people the way the real endpoint does: filters by search text,
/// excludes the subject, returns at most `max_records` from the requested server page and
/// reports whether more remain. Every request is recorded. Failures and per-call delays can be
/// scripted ahead of time.
#[derive(Default)]
pub struct ScriptedGateway {
	people: Vec<PersonSummary>,
	leak_excluded: bool,
	calls: AtomicUsize,
	requests: Mutex<Vec<FetchRequest>>,
	pending_failures: AtomicUsize,
	delays: Mutex<VecDeque<Duration>>,
}
impl ScriptedGateway {
	pub fn new(people: Vec<PersonSummary>) -> Self {
		Self { people, ..Self::default() }
	}

	/// Keeps the excluded person in responses, like a misbehaving backend would.
	pub fn leaking_excluded(mut self) -> Self {
		self.leak_excluded = true;

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn requests(&self) -> Vec<FetchRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_request(&self) -> Option<FetchRequest> {
		self.requests().pop()
	}

	/// Makes the next call fail. Repeated calls queue up consecutive failures.
	pub fn fail_next(&self) {
		self.pending_failures.fetch_add(1, Ordering::SeqCst);
	}

	/// Delays calls in order. Calls beyond the script answer immediately.
	pub fn delay_calls(&self, delays: impl IntoIterator<Item = Duration>) {
		self.delays.lock().unwrap_or_else(|err| err.into_inner()).extend(delays);
	}

	fn serve(&self, exclude_person_id: &str, request: &FetchRequest) -> FetchBatch {
		let needle = request.search_text.trim().to_lowercase();
		let matching: Vec<&PersonSummary> = self
			.people
			.iter()
			.filter(|person| self.leak_excluded || person.person_id != exclude_person_id)
			.filter(|person| needle.is_empty() || person.full_name.to_lowercase().contains(&needle))
			.collect();
		let max_records = request.max_records.max(1) as usize;
		let offset = request.server_page as usize * max_records;
		let records: Vec<PersonSummary> =
			matching.iter().skip(offset).take(max_records).map(|person| (*person).clone()).collect();
		let total = matching.len();

		FetchBatch {
			server_has_more: offset + records.len() < total,
			server_total_count: total as u64,
			server_page_count: total.div_ceil(max_records) as u64,
			records,
		}
	}
}

impl<C> RelatedGateway<C> for ScriptedGateway
where
	C: RelatedCriteria,
{
	fn search_related<'a>(
		&'a self,
		criteria: &'a C,
		request: &'a FetchRequest,
	) -> BoxFuture<'a, Result<FetchBatch>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request.clone());

		let delay = self.delays.lock().unwrap_or_else(|err| err.into_inner()).pop_front();
		let fail = self
			.pending_failures
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| pending.checked_sub(1))
			.is_ok();

		Box::pin(async move {
			if let Some(delay) = delay {
				tokio::time::sleep(delay).await;
			}
			if fail {
				return Err(Error::GatewayUnavailable { message: "scripted failure".to_string() });
			}

			Ok(self.serve(criteria.exclude_person_id(), request))
		})
	}
}

/// `count` people named "{name} {n}", ids `{prefix}-{n}` starting at 1.
pub fn people(prefix: &str, name: &str, count: usize) -> Vec<PersonSummary> {
	(1..=count)
		.map(|index| PersonSummary {
			person_id: format!("{prefix}-{index}"),
			full_name: format!("{name} {index}"),
			region: Some("Ciudad de México".to_string()),
			current_salary: Some(18_500.0 + index as f64),
			exact_match: false,
			paternal_surname: None,
			maternal_surname: None,
		})
		.collect()
}

use std::sync::{Arc, Mutex};

use nomina_config::Config;
use nomina_domain::{InstitutionCriteria, LastNameCriteria, SubjectPerson};

use crate::{HttpGateway, PageOutcome, RelatedGateway, RelatedPeopleBrowser, Result};

/// Outcome of loading both tabs. Each tab fails on its own.
#[derive(Debug)]
pub struct PanelOpen {
	pub surname: Result<PageOutcome>,
	pub institution: Result<PageOutcome>,
}

/// The two related-people tabs of one detail view.
pub struct RelatedPeoplePanel {
	subject: Mutex<SubjectPerson>,
	surname: RelatedPeopleBrowser<LastNameCriteria>,
	institution: RelatedPeopleBrowser<InstitutionCriteria>,
}
impl RelatedPeoplePanel {
	pub fn new(
		subject: SubjectPerson,
		surname_gateway: Arc<dyn RelatedGateway<LastNameCriteria>>,
		institution_gateway: Arc<dyn RelatedGateway<InstitutionCriteria>>,
		cfg: &nomina_config::Browser,
	) -> Self {
		let surname =
			RelatedPeopleBrowser::new(subject.last_name_criteria(), surname_gateway, cfg);
		let institution =
			RelatedPeopleBrowser::new(subject.institution_criteria(), institution_gateway, cfg);

		Self { subject: Mutex::new(subject), surname, institution }
	}

	/// Panel wired to the HTTP search gateway described by `cfg`.
	pub fn http(subject: SubjectPerson, cfg: &Config) -> Result<Self> {
		let gateway = Arc::new(HttpGateway::new(cfg.gateway.clone())?);

		Ok(Self::new(subject, gateway.clone(), gateway, &cfg.browser))
	}

	pub fn subject(&self) -> SubjectPerson {
		self.subject.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn surname(&self) -> &RelatedPeopleBrowser<LastNameCriteria> {
		&self.surname
	}

	pub fn institution(&self) -> &RelatedPeopleBrowser<InstitutionCriteria> {
		&self.institution
	}

	/// Loads page 0 of both tabs concurrently.
	pub async fn open(&self) -> PanelOpen {
		let (surname, institution) = tokio::join!(self.surname.open(), self.institution.open());

		PanelOpen { surname, institution }
	}

	/// Moves the panel to another subject person and reloads both tabs from scratch.
	pub async fn open_subject(&self, subject: SubjectPerson) -> PanelOpen {
		self.surname.reset(subject.last_name_criteria());
		self.institution.reset(subject.institution_criteria());

		tracing::info!(person_id = %subject.person_id, "Opened related people for subject.");

		*self.subject.lock().unwrap_or_else(|err| err.into_inner()) = subject;

		self.open().await
	}
}

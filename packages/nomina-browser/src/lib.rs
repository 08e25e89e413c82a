pub mod browser;
pub mod cache;
pub mod debounce;
pub mod panel;

mod error;

pub use browser::{BrowserView, PageOutcome, Phase, RelatedPeopleBrowser, RequestTag};
pub use cache::LocalPageCache;
pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use panel::{PanelOpen, RelatedPeoplePanel};

use std::{future::Future, pin::Pin, sync::Arc};

use nomina_config::Gateway;
use nomina_domain::{FetchBatch, FetchRequest, InstitutionCriteria, LastNameCriteria};
use nomina_providers::{Client, related};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote search endpoint for one kind of related-people query.
pub trait RelatedGateway<C>
where
	Self: Send + Sync,
{
	fn search_related<'a>(
		&'a self,
		criteria: &'a C,
		request: &'a FetchRequest,
	) -> BoxFuture<'a, Result<FetchBatch>>;
}

/// Gateway backed by the HTTP search API.
#[derive(Clone)]
pub struct HttpGateway {
	cfg: Arc<Gateway>,
	client: Client,
}
impl HttpGateway {
	pub fn new(cfg: Gateway) -> Result<Self> {
		let client = nomina_providers::client(&cfg)?;

		Ok(Self { cfg: Arc::new(cfg), client })
	}
}

impl RelatedGateway<LastNameCriteria> for HttpGateway {
	fn search_related<'a>(
		&'a self,
		criteria: &'a LastNameCriteria,
		request: &'a FetchRequest,
	) -> BoxFuture<'a, Result<FetchBatch>> {
		Box::pin(async move {
			Ok(related::search_by_surname(&self.client, &self.cfg, criteria, request).await?)
		})
	}
}

impl RelatedGateway<InstitutionCriteria> for HttpGateway {
	fn search_related<'a>(
		&'a self,
		criteria: &'a InstitutionCriteria,
		request: &'a FetchRequest,
	) -> BoxFuture<'a, Result<FetchBatch>> {
		Box::pin(async move {
			Ok(related::search_by_institution(&self.client, &self.cfg, criteria, request).await?)
		})
	}
}

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};
use nomina_config::Gateway;
use nomina_domain::{
	FetchBatch, FetchRequest, InstitutionCriteria, LastNameCriteria, PersonSummary,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedResponse {
	success: bool,
	#[serde(default)]
	data: Vec<PersonSummary>,
	paginador: Option<Paginador>,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paginador {
	has_more: bool,
	#[serde(default)]
	total_en_servidor: u64,
	#[serde(default)]
	paginas_en_servidor: u64,
}

pub async fn search_by_surname(
	client: &Client,
	cfg: &Gateway,
	criteria: &LastNameCriteria,
	request: &FetchRequest,
) -> Result<FetchBatch> {
	let mut params = vec![
		("apellidoPaterno", criteria.paternal_surname.clone()),
		("apellidoMaterno", criteria.maternal_surname.clone()),
		("excludeProfessorId", criteria.exclude_person_id.clone()),
	];

	push_paging(&mut params, request);

	search(client, cfg, &cfg.surname_path, &params).await
}

pub async fn search_by_institution(
	client: &Client,
	cfg: &Gateway,
	criteria: &InstitutionCriteria,
	request: &FetchRequest,
) -> Result<FetchBatch> {
	let mut params = vec![("identificadorGrupo", criteria.group_id.clone())];

	if let Some(region_id) = criteria.region_id.as_ref() {
		params.push(("idEntidadFederativa", region_id.clone()));
	}

	params.push(("sujetoObligado", criteria.institution_name.clone()));
	params.push(("excludeProfessorId", criteria.exclude_person_id.clone()));

	push_paging(&mut params, request);

	search(client, cfg, &cfg.institution_path, &params).await
}

fn push_paging(params: &mut Vec<(&'static str, String)>, request: &FetchRequest) {
	params.push(("numeroPagina", request.server_page.to_string()));
	params.push(("maxRecords", request.max_records.to_string()));
	params.push(("searchText", request.search_text.clone()));
}

async fn search(
	client: &Client,
	cfg: &Gateway,
	path: &str,
	params: &[(&'static str, String)],
) -> Result<FetchBatch> {
	let url = format!("{}{}", cfg.api_base, path);

	tracing::debug!(%url, "Requesting related people.");

	let res = client.get(url).query(params).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_related_response(json)
}

fn parse_related_response(json: Value) -> Result<FetchBatch> {
	let response: RelatedResponse = serde_json::from_value(json)?;

	if !response.success {
		let message = response
			.message
			.filter(|message| !message.trim().is_empty())
			.unwrap_or_else(|| "Related-people search reported failure.".to_string());

		return Err(Error::InvalidResponse { message });
	}

	let batch = match response.paginador {
		Some(paginador) => FetchBatch {
			server_has_more: paginador.has_more,
			server_total_count: paginador.total_en_servidor.max(response.data.len() as u64),
			server_page_count: paginador.paginas_en_servidor,
			records: response.data,
		},
		None => FetchBatch {
			server_has_more: false,
			server_total_count: response.data.len() as u64,
			server_page_count: if response.data.is_empty() { 0 } else { 1 },
			records: response.data,
		},
	};

	Ok(batch)
}

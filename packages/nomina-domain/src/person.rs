use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::criteria::{InstitutionCriteria, LastNameCriteria};

/// One related-person record as returned by the search gateway.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
	pub person_id: String,
	pub full_name: String,
	#[serde(default)]
	pub region: Option<String>,
	#[serde(default)]
	pub current_salary: Option<f64>,
	/// Display-only. Never used to filter.
	#[serde(default)]
	pub exact_match: bool,
	#[serde(default, rename = "apellidoPaterno", skip_serializing_if = "Option::is_none")]
	pub paternal_surname: Option<String>,
	#[serde(default, rename = "apellidoMaterno", skip_serializing_if = "Option::is_none")]
	pub maternal_surname: Option<String>,
}

/// The person whose detail page is open.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubjectPerson {
	pub person_id: String,
	pub paternal_surname: String,
	pub maternal_surname: String,
	pub group_id: String,
	pub region_id: Option<String>,
	pub institution_name: String,
}
impl SubjectPerson {
	pub fn last_name_criteria(&self) -> LastNameCriteria {
		LastNameCriteria {
			paternal_surname: self.paternal_surname.trim().to_string(),
			maternal_surname: self.maternal_surname.trim().to_string(),
			exclude_person_id: self.person_id.clone(),
		}
	}

	pub fn institution_criteria(&self) -> InstitutionCriteria {
		InstitutionCriteria {
			group_id: self.group_id.trim().to_string(),
			region_id: self
				.region_id
				.as_deref()
				.map(str::trim)
				.filter(|value| !value.is_empty())
				.map(str::to_string),
			institution_name: self.institution_name.trim().to_string(),
			exclude_person_id: self.person_id.clone(),
		}
	}
}

/// Compares surnames ignoring case, surrounding whitespace and diacritics.
pub fn surnames_equal(left: &str, right: &str) -> bool {
	fold_surname(left) == fold_surname(right)
}

fn fold_surname(raw: &str) -> String {
	raw.trim().nfd().filter(|ch| !is_combining_mark(*ch)).flat_map(char::to_lowercase).collect()
}

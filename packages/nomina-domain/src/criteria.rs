use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::person::{PersonSummary, surnames_equal};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedKind {
	Surname,
	Institution,
}
impl RelatedKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Surname => "surname",
			Self::Institution => "institution",
		}
	}
}

/// Identity of a related-people query, without the free-text filter.
///
/// Two values that compare equal address the same server-side result set, so equality doubles
/// as the key of the local page cache.
pub trait RelatedCriteria
where
	Self: Clone + Debug + PartialEq + Send + Sync + 'static,
{
	const KIND: RelatedKind;

	fn exclude_person_id(&self) -> &str;

	/// Sets `exact_match` on a record returned for this query.
	fn annotate(&self, person: &mut PersonSummary) {
		person.exact_match = false;
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LastNameCriteria {
	pub paternal_surname: String,
	pub maternal_surname: String,
	pub exclude_person_id: String,
}
impl RelatedCriteria for LastNameCriteria {
	const KIND: RelatedKind = RelatedKind::Surname;

	fn exclude_person_id(&self) -> &str {
		&self.exclude_person_id
	}

	fn annotate(&self, person: &mut PersonSummary) {
		if person.exact_match {
			return;
		}

		let (Some(paternal), Some(maternal)) =
			(person.paternal_surname.as_deref(), person.maternal_surname.as_deref())
		else {
			return;
		};

		person.exact_match = surnames_equal(paternal, &self.paternal_surname)
			&& surnames_equal(maternal, &self.maternal_surname);
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InstitutionCriteria {
	pub group_id: String,
	pub region_id: Option<String>,
	pub institution_name: String,
	pub exclude_person_id: String,
}
impl RelatedCriteria for InstitutionCriteria {
	const KIND: RelatedKind = RelatedKind::Institution;

	fn exclude_person_id(&self) -> &str {
		&self.exclude_person_id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(paternal: Option<&str>, maternal: Option<&str>, exact: bool) -> PersonSummary {
		PersonSummary {
			person_id: "p-2".to_string(),
			full_name: "Ana Pérez López".to_string(),
			region: Some("Jalisco".to_string()),
			current_salary: Some(25_000.0),
			exact_match: exact,
			paternal_surname: paternal.map(str::to_string),
			maternal_surname: maternal.map(str::to_string),
		}
	}

	fn criteria() -> LastNameCriteria {
		LastNameCriteria {
			paternal_surname: "Pérez".to_string(),
			maternal_surname: "López".to_string(),
			exclude_person_id: "p-1".to_string(),
		}
	}

	#[test]
	fn surname_tab_marks_both_surnames_equal() {
		let mut person = candidate(Some("PEREZ"), Some(" lopez "), false);

		criteria().annotate(&mut person);

		assert!(person.exact_match);
	}

	#[test]
	fn surname_tab_requires_both_surnames() {
		let mut person = candidate(Some("Pérez"), Some("García"), false);

		criteria().annotate(&mut person);

		assert!(!person.exact_match);

		let mut person = candidate(Some("Pérez"), None, false);

		criteria().annotate(&mut person);

		assert!(!person.exact_match);
	}

	#[test]
	fn surname_tab_keeps_gateway_flag() {
		let mut person = candidate(None, None, true);

		criteria().annotate(&mut person);

		assert!(person.exact_match);
	}

	#[test]
	fn institution_tab_never_marks_exact_match() {
		let criteria = InstitutionCriteria {
			group_id: "g-1".to_string(),
			region_id: None,
			institution_name: "UNAM".to_string(),
			exclude_person_id: "p-1".to_string(),
		};
		let mut person = candidate(Some("Pérez"), Some("López"), true);

		criteria.annotate(&mut person);

		assert!(!person.exact_match);
	}
}

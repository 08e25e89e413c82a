use std::fmt::Write;

use nomina_browser::BrowserView;
use nomina_domain::RelatedKind;

pub fn tab_title(kind: RelatedKind) -> &'static str {
	match kind {
		RelatedKind::Surname => "Same surnames",
		RelatedKind::Institution => "Same institution",
	}
}

/// Renders one tab as plain text, footer included.
pub fn view(view: &BrowserView) -> String {
	let mut out = String::new();
	let summary = &view.summary;

	let _ = writeln!(out, "== {} ==", tab_title(view.kind));

	if !view.filter_text.is_empty() {
		let _ = writeln!(out, "Filter: {:?}", view.filter_text);
	}
	if view.draft_filter_text != view.filter_text {
		let _ = writeln!(out, "Pending filter: {:?}", view.draft_filter_text);
	}

	if view.is_loading {
		let _ = writeln!(out, "Loading...");
	} else if let Some(error) = &view.error {
		let _ = writeln!(out, "Error: {error}");
	} else if view.is_empty {
		let _ = writeln!(out, "No related people found.");
	}

	for (offset, person) in view.records.iter().enumerate() {
		let position = summary.range_start + offset as u64;
		let region = person.region.as_deref().unwrap_or("-");
		let salary = person
			.current_salary
			.map(|salary| format!("{salary:.2}"))
			.unwrap_or_else(|| "-".to_string());
		let marker = if person.exact_match { " *" } else { "" };

		let _ = writeln!(out, "{position:>6}. {}{marker}  [{region}]  {salary}", person.full_name);
	}

	let _ = write!(
		out,
		"Page {} of {} | {}-{} of {} records",
		summary.current_page,
		summary.total_pages,
		summary.range_start,
		summary.range_end,
		summary.total_records,
	);

	if view.server_has_more {
		out.push_str(" (more on server)");
	}

	out.push('\n');

	out
}

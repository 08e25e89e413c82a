/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	Next,
	Previous,
	/// Zero-based page index.
	GoTo(usize),
	SwitchTab,
	/// Reloads the current page, or page 0 when nothing is known yet.
	Retry,
	/// Empty text clears the filter.
	Filter(String),
	Quit,
}

pub const HELP: &str =
	"n next, p previous, g <page> go to page, t switch tab, r retry, f <text> filter, f clear, q quit";

/// Parses a prompt line. Blank input yields `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
	let line = line.trim();
	let (head, rest) = match line.split_once(char::is_whitespace) {
		Some((head, rest)) => (head, rest.trim()),
		None => (line, ""),
	};
	let command = match head {
		"" => return Ok(None),
		"n" => Command::Next,
		"p" => Command::Previous,
		"t" => Command::SwitchTab,
		"r" => Command::Retry,
		"q" => Command::Quit,
		"f" => Command::Filter(rest.to_string()),
		"g" => {
			let page = rest.parse::<usize>().map_err(|_| format!("Invalid page number: {rest:?}."))?;

			match page.checked_sub(1) {
				Some(page_index) => Command::GoTo(page_index),
				None => return Err("Pages start at 1.".to_string()),
			}
		},
		other => return Err(format!("Unknown command {other:?}. {HELP}")),
	};

	Ok(Some(command))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_navigation() {
		assert_eq!(parse("n"), Ok(Some(Command::Next)));
		assert_eq!(parse(" p "), Ok(Some(Command::Previous)));
		assert_eq!(parse("g 3"), Ok(Some(Command::GoTo(2))));
		assert_eq!(parse("t"), Ok(Some(Command::SwitchTab)));
		assert_eq!(parse("r"), Ok(Some(Command::Retry)));
		assert_eq!(parse("q"), Ok(Some(Command::Quit)));
		assert_eq!(parse(""), Ok(None));
	}

	#[test]
	fn filter_keeps_inner_spaces_and_may_be_empty() {
		assert_eq!(parse("f  luis garcia "), Ok(Some(Command::Filter("luis garcia".to_string()))));
		assert_eq!(parse("f"), Ok(Some(Command::Filter(String::new()))));
	}

	#[test]
	fn rejects_bad_pages_and_unknown_commands() {
		assert!(parse("g").is_err());
		assert!(parse("g 0").is_err());
		assert!(parse("g two").is_err());
		assert!(parse("x").is_err());
	}
}

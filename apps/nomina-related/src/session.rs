use nomina_browser::{BrowserView, PageOutcome, PanelOpen, RelatedPeopleBrowser, RelatedPeoplePanel};
use nomina_domain::{RelatedCriteria, RelatedKind};

use crate::command::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
	/// Redraw the active tab, optionally with a one-line notice.
	Render(Option<String>),
	Quit,
}

/// Interactive state of the terminal front end: the panel plus the tab on screen.
pub struct Session {
	panel: RelatedPeoplePanel,
	active: RelatedKind,
}
impl Session {
	pub fn new(panel: RelatedPeoplePanel) -> Self {
		Self { panel, active: RelatedKind::Surname }
	}

	pub fn active(&self) -> RelatedKind {
		self.active
	}

	pub fn panel(&self) -> &RelatedPeoplePanel {
		&self.panel
	}

	pub fn view(&self) -> BrowserView {
		match self.active {
			RelatedKind::Surname => self.panel.surname().view(),
			RelatedKind::Institution => self.panel.institution().view(),
		}
	}

	pub async fn open(&self) -> PanelOpen {
		self.panel.open().await
	}

	pub async fn handle(&mut self, command: Command) -> Step {
		let outcome = match command {
			Command::Quit => return Step::Quit,
			Command::SwitchTab => {
				self.active = match self.active {
					RelatedKind::Surname => RelatedKind::Institution,
					RelatedKind::Institution => RelatedKind::Surname,
				};

				return Step::Render(None);
			},
			command => match self.active {
				RelatedKind::Surname => apply(self.panel.surname(), command).await,
				RelatedKind::Institution => apply(self.panel.institution(), command).await,
			},
		};
		let notice = match outcome {
			Ok(Some(PageOutcome::OutOfRange)) => Some("No such page.".to_string()),
			Ok(_) => None,
			Err(err) => Some(format!("{err}. Press r to retry.")),
		};

		Step::Render(notice)
	}
}

async fn apply<C>(
	browser: &RelatedPeopleBrowser<C>,
	command: Command,
) -> nomina_browser::Result<Option<PageOutcome>>
where
	C: RelatedCriteria,
{
	match command {
		Command::Next => browser.next().await.map(Some),
		Command::Previous => browser.previous().await.map(Some),
		Command::GoTo(page_index) => browser.go_to_page(page_index).await.map(Some),
		Command::Retry => {
			let page_index = browser.page_index();
			let outcome = browser.go_to_page(page_index).await?;

			match outcome {
				PageOutcome::OutOfRange => browser.open().await.map(Some),
				outcome => Ok(Some(outcome)),
			}
		},
		Command::Filter(text) => {
			browser.set_filter_text(text);
			browser.settle().await;

			Ok(None)
		},
		Command::SwitchTab | Command::Quit => Ok(None),
	}
}

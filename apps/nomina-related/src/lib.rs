pub mod command;
pub mod render;
pub mod session;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use nomina_browser::RelatedPeoplePanel;
use nomina_domain::SubjectPerson;

use crate::session::{Session, Step};

#[derive(Debug, Parser)]
#[command(
	version = nomina_cli::VERSION,
	rename_all = "kebab",
	styles = nomina_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Identifier of the person whose relatives are listed. Never listed itself.
	#[arg(long, value_name = "ID")]
	pub person_id: String,
	#[arg(long, value_name = "SURNAME")]
	pub paternal_surname: String,
	#[arg(long, value_name = "SURNAME", default_value = "")]
	pub maternal_surname: String,
	#[arg(long, value_name = "ID")]
	pub group_id: String,
	#[arg(long, value_name = "ID")]
	pub region_id: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub institution_name: String,
}
impl Args {
	pub fn subject(&self) -> SubjectPerson {
		SubjectPerson {
			person_id: self.person_id.clone(),
			paternal_surname: self.paternal_surname.clone(),
			maternal_surname: self.maternal_surname.clone(),
			group_id: self.group_id.clone(),
			region_id: self.region_id.clone(),
			institution_name: self.institution_name.clone(),
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = nomina_config::load(&args.config)?;

	init_tracing(&config)?;

	let panel = RelatedPeoplePanel::http(args.subject(), &config)?;
	let mut session = Session::new(panel);
	let mut stdout = tokio::io::stdout();
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let opened = session.open().await;

	if let Err(err) = &opened.surname {
		tracing::warn!(error = %err, "Surname tab failed to load.");
	}
	if let Err(err) = &opened.institution {
		tracing::warn!(error = %err, "Institution tab failed to load.");
	}

	write_screen(&mut stdout, &session, Some(command::HELP)).await?;

	while let Some(line) = lines.next_line().await? {
		let notice = match command::parse(&line) {
			Ok(None) => continue,
			Ok(Some(command)) => match session.handle(command).await {
				Step::Quit => break,
				Step::Render(notice) => notice,
			},
			Err(message) => Some(message),
		};

		write_screen(&mut stdout, &session, notice.as_deref()).await?;
	}

	Ok(())
}

async fn write_screen(
	stdout: &mut tokio::io::Stdout,
	session: &Session,
	notice: Option<&str>,
) -> color_eyre::Result<()> {
	let mut screen = render::view(&session.view());

	if let Some(notice) = notice {
		screen.push_str(notice);
		screen.push('\n');
	}

	screen.push_str("> ");
	stdout.write_all(screen.as_bytes()).await?;
	stdout.flush().await?;

	Ok(())
}

fn init_tracing(config: &nomina_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = nomina_related::Args::parse();

	nomina_related::run(args).await
}

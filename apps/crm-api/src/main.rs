use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = crm_api::Args::parse();

	crm_api::run(args).await
}

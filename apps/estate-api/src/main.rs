use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = estate_api::Args::parse();
	estate_api::run(args).await
}

pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use estate_service::CancellationToken;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = estate_cli::VERSION,
	rename_all = "kebab",
	styles = estate_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = estate_config::load(&args.config)?;
	init_tracing(&config)?;
	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let shutdown = CancellationToken::new();
	let state = AppState::new(config, shutdown.clone()).await?;
	let app = routes::router(state);

	let http_listener = TcpListener::bind(http_addr).await?;
	tracing::info!(%http_addr, "HTTP server listening.");

	tokio::spawn(watch_signals(shutdown.clone()));

	axum::serve(http_listener, app)
		.with_graceful_shutdown(async move { shutdown.cancelled().await })
		.await?;

	tracing::info!("HTTP server stopped.");

	Ok(())
}

fn init_tracing(config: &estate_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}

/// Cancels `shutdown` on Ctrl-C or, on Unix, SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
	let ctrl_c = async {
		if let Err(err) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %err, "Failed to listen for Ctrl-C.");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			},
			Err(err) => {
				tracing::error!(error = %err, "Failed to listen for SIGTERM.");
				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("Shutdown signal received; draining in-flight requests.");
	shutdown.cancel();
}

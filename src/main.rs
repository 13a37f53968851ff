use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shelf::{AppState, BookRepository, Config, SqliteBooks};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info,shelf=debug,tower_http=debug".into()),
		)
		.init();

	let config = Config::from_env().context("loading configuration")?;
	let key = config.cookie_key()?;
	if config.secret_key.is_none() {
		tracing::warn!("SECRET_KEY not set, flash cookies will not survive a restart");
	}

	let books = SqliteBooks::connect(&config.database_url, config.max_connections).await
		.with_context(|| format!("can't connect to database {}", config.database_url))?;
	books.initialize().await.context("creating books table")?;

	let app = shelf::router(AppState::new(Arc::new(books), key), &config.static_dir);

	let listener = tokio::net::TcpListener::bind(config.bind_addr).await
		.with_context(|| format!("can't bind {}", config.bind_addr))?;
	tracing::info!(addr = %config.bind_addr, db = %config.database_url, "listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;
	tracing::info!("shut down");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "can't listen for ctrl-c");
		std::future::pending::<()>().await;
	}
}

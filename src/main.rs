//! Todo Service - Main Entry Point
//!
//! This is the main entry point for the todo HTTP service.
//! The actual implementation is in the `todo_service` library.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use todo_service::{Config, InMemoryStore, TodoService, TodoStore, TomlFileStore, http};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let store: Arc<dyn TodoStore> = match config.data_file {
        Some(ref path) => Arc::new(TomlFileStore::open(path)?),
        None => {
            tracing::info!("no data file configured, todos are kept in memory");
            Arc::new(InMemoryStore::new())
        }
    };

    let service = Arc::new(TodoService::new(store).with_default_limit(config.default_limit));
    http::serve(service, &config).await.inspect_err(|e| {
        tracing::error!(error = %e, "todo service exited with error");
    })
}

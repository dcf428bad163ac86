mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{Cli, StorageBackendArg};
use crate::state::AppState;
use clap::Parser;
use shortcard_store::{
    AssetStore, InMemoryRepository, JsonFileRepository, LinkService, PersistenceStrategy,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Cli::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        data_file = %config.data_file.display(),
        upload_dir = %config.upload_dir.display(),
        "starting shortcard gateway"
    );

    let strategy = match config.storage {
        StorageBackendArg::JsonFile => {
            PersistenceStrategy::Durable(Arc::new(JsonFileRepository::new(&config.data_file)))
        }
        StorageBackendArg::InMemory => {
            PersistenceStrategy::Durable(Arc::new(InMemoryRepository::new()))
        }
        StorageBackendArg::Stateless => PersistenceStrategy::SelfContained,
    };

    let service = LinkService::new(strategy, AssetStore::new(&config.upload_dir));
    let state = AppState::new(Arc::new(service), config.public_host);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use dermscore_api::{ApiConfig, AppState, scheduler};
use dermscore_engine::all_templates;
use dermscore_service::templates;
use dermscore_storage::{DocumentStore, MemoryStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let store: Arc<dyn DocumentStore> = match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening file-backed store");
            Arc::new(MemoryStore::open(path).await?)
        }
        None => {
            tracing::info!("no data file configured, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_templates {
        templates::seed(store.as_ref(), all_templates(), jiff::Timestamp::now()).await?;
    }

    scheduler::spawn(store.clone(), config.aggregate_offset);

    let state = AppState::new(store, &config.jwt_secret);
    let app = dermscore_api::app(state);

    let listener = TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %config.bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

//! Main entry point for the headshot relay

use headshot_relay::{
    api,
    backend::{GenerationService, ReplicateClient},
    catalog::Catalog,
    config::Settings,
    prompt::PromptComposer,
    storage::{LocalTempStorage, TemporaryStorage},
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }

    info!("Starting headshot relay");

    settings.validate()?;
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    let catalog = Arc::new(Catalog::load(settings.catalog.path.as_deref())?);
    info!(
        attire = catalog.attire.categories().count(),
        backgrounds = catalog.backgrounds.categories().count(),
        "Loaded catalog"
    );

    let service: Arc<dyn GenerationService> = Arc::new(ReplicateClient::new(&settings.generation)?);

    let storage: Option<Arc<dyn TemporaryStorage>> = if settings.storage.enabled {
        tokio::fs::create_dir_all(&settings.storage.base_path).await?;
        Some(Arc::new(LocalTempStorage::new(
            &settings.storage.base_path,
            settings.storage.url_prefix.clone(),
        )))
    } else {
        None
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let app_state = Arc::new(AppState::new(
        settings,
        PromptComposer::new(catalog),
        service,
        storage,
    ));

    // Build the router
    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

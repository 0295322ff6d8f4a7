use items_api::api::router::build_router;
use items_api::config::AppConfig;
use items_api::files::storage::FileStore;
use items_api::items::store::{ItemStore, seed_examples};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_env()?.apply_args(args.get(1..).unwrap_or_default())?;

    tracing::info!("Environment: {:?}", config.environment);

    // 1. Item store:
    let items = Arc::new(ItemStore::new());
    if config.seed_examples {
        match seed_examples(&items) {
            Ok(seeded) => tracing::info!(
                "Initialized {} example items in the in-memory database",
                seeded.len()
            ),
            Err(e) => tracing::error!("Failed to initialize example items: {}", e),
        }
    }

    // 2. Upload directory:
    let files = Arc::new(FileStore::new(config.upload_dir.clone()));
    if let Err(e) = files.ensure_dir().await {
        tracing::error!(
            "Failed to create upload directory {}: {}",
            files.root().display(),
            e
        );
    }

    // 3. HTTP Router:
    let app = build_router(items, files, &config);

    // 4. Start HTTP server:
    tracing::info!("Starting server on {}...", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app).await?;

    Ok(())
}

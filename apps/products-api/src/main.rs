//! Products API - REST server for product inventory

use axum_helpers::server::create_production_app;
use core_config::database::StoreBackend;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{
    InMemoryProductRepository, ProductRepository, ProductService, SqliteProductRepository,
};
use migration::Migrator;
use std::future::Future;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    match config.database.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory product store; data is lost on restart");
            serve(config, InMemoryProductRepository::new(), async {}).await?;
        }
        StoreBackend::Sqlite => {
            info!("Connecting to SQLite at {}", config.sqlite.url());

            let db = database::sqlite::connect(&config.sqlite).await?;
            database::sqlite::run_migrations::<Migrator>(&db, config.app.name).await?;

            let repository = SqliteProductRepository::new(db.clone());
            serve(config, repository, async move {
                info!("Shutting down: closing SQLite connections");
                if let Err(e) = db.close().await {
                    warn!("Failed to close SQLite connection pool: {}", e);
                }
            })
            .await?;
        }
    }

    info!("Products API shutdown complete");
    Ok(())
}

async fn serve<R, F>(config: Config, repository: R, cleanup: F) -> eyre::Result<()>
where
    R: ProductRepository + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let server = config.server.clone();
    let shutdown_timeout = config.shutdown_timeout;

    let state = AppState {
        config,
        products: ProductService::new(repository),
    };
    let app = api::app(state)?;

    info!("Starting Products API on port {}", server.port);

    create_production_app(app, &server, shutdown_timeout, cleanup)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))
}

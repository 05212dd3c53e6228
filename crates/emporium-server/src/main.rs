//! # Emporium Server
//!
//! Entry point for the Emporium catalog service: loads configuration, builds
//! the Postgres pool and Redis cache, wires the services together explicitly,
//! and serves the REST API until a shutdown signal arrives.

use emporium_config::{AppConfig, ConfigLoader};
use emporium_core::{EmporiumError, EmporiumResult, HealthCheck};
use emporium_repository::{create_pool, PostgresProductRepository, PostgresReviewRepository};
use emporium_rest::{create_router, middleware::AuthState, AppState};
use emporium_service::{
    Cache, ProductServiceImpl, RatingAggregator, RedisCache, ReviewServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    init_logging();

    startup::print_banner();
    info!("Starting Emporium server, version {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> EmporiumResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let cache = build_cache(&config)?;
    let ttl = config.cache.ttl();

    // Explicit wiring: every collaborator is passed in, nothing is global.
    let product_repository = Arc::new(PostgresProductRepository::new(db_pool.clone()));
    let review_repository = Arc::new(PostgresReviewRepository::new(db_pool.clone()));

    let aggregator = Arc::new(RatingAggregator::new(
        product_repository.clone(),
        review_repository.clone(),
        cache.clone(),
        ttl,
    ));
    let product_service = Arc::new(ProductServiceImpl::new(
        product_repository.clone(),
        cache.clone(),
        aggregator.clone(),
    ));
    let review_service = Arc::new(ReviewServiceImpl::new(
        product_repository,
        review_repository,
        cache,
        aggregator,
        ttl,
    ));

    let state = AppState::new(product_service, review_service);
    let auth = AuthState::new(&config.auth);
    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![db_pool.clone()];
    let router = create_router(state, auth, &config.server, health_checks);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EmporiumError::internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(config.server.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EmporiumError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Builds the shared cache collaborator. With caching disabled the no-op
/// cache stands in: reads always miss and the read path recomputes.
fn build_cache(config: &AppConfig) -> EmporiumResult<Arc<dyn Cache>> {
    if !config.cache.enabled {
        info!("Caching disabled; running with a no-op cache");
        return Ok(Arc::new(RedisCache::disabled()));
    }

    let redis_config = deadpool_redis::Config::from_url(&config.redis.url);
    let pool = redis_config
        .builder()
        .map_err(|e| EmporiumError::Cache(format!("Invalid Redis configuration: {e}")))?
        .max_size(config.redis.pool_size as usize)
        .runtime(deadpool_redis::Runtime::Tokio1)
        .build()
        .map_err(|e| EmporiumError::Cache(format!("Failed to build Redis pool: {e}")))?;

    info!("Redis connection pool established");
    Ok(Arc::new(RedisCache::new(Arc::new(pool))))
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emporium=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

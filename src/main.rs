//! stock-dashboard - HTTP server for the laminate stock dashboard.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use laminate_stock::adapters::http::{stock_router, StockAppState};
use laminate_stock::adapters::{
    FileTableStore, InMemorySessionRegistry, InMemoryTableStore, SheetsTableStore,
};
use laminate_stock::config::{
    AppConfig, ConfigError, LogFormat, ServerConfig, StoreBackend, StoreConfig, ValidationError,
};
use laminate_stock::domain::inventory::ColumnResolver;
use laminate_stock::domain::table::StockTable;
use laminate_stock::ports::{BackingStore, StoreError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;
    match config.server.effective_log_format() {
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).init(),
    }

    let settings = config.layout.session_settings();
    let store = build_store(&config.store, &settings.resolver).await?;
    info!(
        environment = ?config.server.environment,
        store = %store.describe(),
        save_mode = %config.store.save_mode,
        derivation_mode = ?settings.engine.mode(),
        "Backing store ready"
    );

    let mut registry = InMemorySessionRegistry::new();
    if let Some(ttl) = config.server.session_ttl() {
        registry = registry.with_idle_ttl(ttl);
    }

    let state = StockAppState::new(
        store,
        Arc::new(registry),
        settings,
        config.store.save_mode,
    );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(stock_router().with_state(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the configured store. A file store without a file is seeded with a
/// blank template table.
async fn build_store(
    config: &StoreConfig,
    resolver: &ColumnResolver,
) -> Result<Arc<dyn BackingStore>, Box<dyn std::error::Error>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryTableStore::blank(resolver)?)),
        StoreBackend::File => {
            let path = config
                .file_path
                .as_deref()
                .ok_or(ValidationError::MissingRequired("store.file_path"))?;
            let store = FileTableStore::new(path);
            if let Err(StoreError::NotFound(_)) = store.load().await {
                warn!(path, "Stock table file missing, creating a blank one");
                store
                    .save(&StockTable::new(resolver.template_columns())?)
                    .await?;
            }
            Ok(Arc::new(store))
        }
        StoreBackend::Sheets => {
            let sheets = config
                .sheets
                .sheets_config()
                .ok_or(ValidationError::MissingRequired("store.sheets.spreadsheet_id"))?;
            let credentials = config
                .sheets
                .credentials()
                .ok_or(ValidationError::MissingRequired("store.sheets.private_key"))?;
            Ok(Arc::new(SheetsTableStore::new(sheets, credentials)?))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

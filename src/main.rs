mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;
#[cfg(test)]
mod store_tests;
mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::CatalogStore};

#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmoteka=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = CatalogStore::new(db);

    let state = Arc::new(AppState { store });

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/movies", get(routes::movie_list))
        .route("/movies/{id}", get(routes::movie_detail))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

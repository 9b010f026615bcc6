// ABOUTME: Main entry point for the Star Wars catalog API
// ABOUTME: Sets up tracing, configuration, storage, routes, and the HTTP server

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod entities;
mod error;
mod handlers;
mod migration;
mod sitemap;
mod storage;
mod types;

#[cfg(test)]
mod storage_tests;

use config::{Args, Config};
use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap::sitemap))
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/:user_id/favorites", get(handlers::list_user_favorites))
        .route("/planets", get(handlers::list_planets).post(handlers::create_planet))
        .route("/planets/:planet_id", get(handlers::get_planet))
        .route("/people", get(handlers::list_people).post(handlers::create_person))
        .route("/people/:people_id", get(handlers::get_person))
        .route("/favorite/planet/:planet_id", post(handlers::add_favorite_planet))
        .route("/favorite/people/:people_id", post(handlers::add_favorite_person))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starwars_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from(&args);

    let storage = Arc::new(Storage::connect(&config).await?);
    tracing::info!("Connected to database");

    let app = router(AppState { storage });

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Server running on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

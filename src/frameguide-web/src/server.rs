//! Axum server setup and routing

use crate::routes;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use frameguide_frame::{Catalog, Renderer};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,

    /// Public base URL used in rendered frames
    pub base_url: String,

    /// Directory holding the page images and the infographic
    pub public_dir: PathBuf,

    pub renderer: Renderer,
}

/// Build the application router
pub fn router(state: AppState, public_dir: PathBuf) -> Router {
    Router::new()
        // Frame actions
        .route(
            "/api",
            post(routes::frame_action).fallback(routes::frame_method_not_allowed),
        )
        .route(
            "/api/page",
            post(routes::frame_action).fallback(routes::frame_method_not_allowed),
        )
        // Landing redirect
        .route(
            "/",
            get(routes::redirect_to_infographic).fallback(routes::index_method_not_allowed),
        )
        .route("/health", get(routes::health))
        // Static files (page images, infographic)
        .fallback_service(ServeDir::new(public_dir))
        // Add state
        .with_state(state)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Start the web server and run until Ctrl-C
pub async fn serve(settings: ServerSettings) -> anyhow::Result<()> {
    let catalog = Catalog::builtin();
    catalog.validate()?;
    let state = AppState::new(catalog, settings.renderer, &settings.base_url);

    info!("serving {} pages from {:?}", catalog.size(), settings.public_dir);
    info!("frame base url: {}", state.base_url);

    let app = router(state, settings.public_dir);

    // Bind to address
    let addr = SocketAddr::new(settings.host, settings.port);
    info!("Starting Frameguide on http://{}", addr);
    println!("\n🖼️  Frameguide");
    println!("   → http://{}\n", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}

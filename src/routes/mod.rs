use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::email::EmailService;

mod health;
mod quote;

pub use quote::SENT_MESSAGE;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub email: EmailService,
}

pub fn router(app_state: AppState) -> Router {
    let public_dir = ServeDir::new(&app_state.config.server.public_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/quote", post(quote::action))
        .fallback_service(public_dir)
        .with_state(app_state)
        // Brotli and Gzip for the static site
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}

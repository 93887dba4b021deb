use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod doc;
pub mod favorites;
pub mod health;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/favorites", favorites::router())
}

pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound
}

//! Route assembly.

mod common;
mod docs;
mod entity;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc, OPENAPI_PATH, SWAGGER_UI_PATH};
pub use entity::entity_routes;

use crate::error::{AppError, RESOURCE_NOT_FOUND};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

async fn not_found() -> AppError {
    AppError::NotFound(RESOURCE_NOT_FOUND.into())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Método não permitido".into())
}

/// Full application: operational routes, API document and every entity group.
///
/// Unmatched paths and methods answer with the same `{"error"}` body as handlers.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(entity_routes(state))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

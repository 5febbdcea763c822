//! Route table: consultant resource routes, welcome page, JSON 404 fallback.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

/// Consultant resource routes, mounted under `/api/consultants`.
pub fn consultant_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::create)
                .get(handlers::find_by_name)
                .delete(handlers::delete_all),
        )
        .route("/skills", post(handlers::find_by_skills))
        .route("/assigned", get(handlers::find_assigned))
        .route("/update/:id", put(handlers::update))
        .route("/delete/:id", delete(handlers::delete))
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Welcome to Regent Competence Evening, fall 2022 🎉🎉🎉"
}

async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}

/// Full application router: welcome page at `/`, resource routes under
/// `/api/consultants`, and a JSON 404 for every other path.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/api/consultants", consultant_routes(state))
        .fallback(route_not_found)
}

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::VisitStore;
use crate::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
}

pub fn router<S: VisitStore>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health::<S>))
}

/// Connectivity probe: opens and closes a connection, runs no query.
async fn health<S: VisitStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Health {
                status: "healthy",
                database: "connected",
            }),
        ),
        Err(e) => {
            e.log();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Health {
                    status: "unhealthy",
                    database: e.message(),
                }),
            )
        }
    }
}

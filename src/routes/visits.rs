use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::VisitStore;
use crate::error::AppError;
use crate::models::NewVisit;
use crate::AppState;

#[derive(Serialize)]
struct Recorded {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct VisitCount {
    total_visits: i64,
}

pub fn router<S: VisitStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/visit", post(record_visit::<S>))
        .route("/count", get(count_visits::<S>))
}

async fn record_visit<S: VisitStore>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, AppError> {
    let visit = state.store.record_visit(NewVisit::now()).await?;
    tracing::debug!(id = visit.id, "visit recorded");

    Ok((
        StatusCode::CREATED,
        Json(Recorded {
            status: "success",
            message: "Visit recorded",
        }),
    ))
}

async fn count_visits<S: VisitStore>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, AppError> {
    let total_visits = state.store.count_visits().await?;
    Ok(Json(VisitCount { total_visits }))
}

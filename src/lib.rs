pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::Router;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::db::VisitStore;

#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

/// Build the full Axum application router over `store`.
///
/// Schema initialization is the caller's job; see [`db::init_db`].
pub fn build_app<S: VisitStore>(store: S) -> Router {
    let state = AppState { store };

    Router::new()
        .merge(routes::index::router::<S>())
        .merge(routes::visits::router::<S>())
        .merge(routes::health::router::<S>())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

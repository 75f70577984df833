use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::db::VisitStore;
use crate::AppState;

pub fn router<S: VisitStore>() -> Router<AppState<S>> {
    Router::new().route("/", get(index))
}

/// Route map. Constant, and never touches the database.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Visitor Counter API",
        "endpoints": {
            "/": "This help message",
            "/visit": "Record a visit",
            "/count": "Get total visit count",
            "/health": "Health check"
        }
    }))
}

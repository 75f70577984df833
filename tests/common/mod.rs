#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use visitor_counter::db::VisitStore;
use visitor_counter::error::AppError;
use visitor_counter::models::{NewVisit, Visit};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Up,
    /// Connections are refused.
    Down,
    /// Connections succeed but every statement fails.
    Broken,
}

#[derive(Default)]
struct Inner {
    visits: Vec<Visit>,
    last_id: i32,
    table_created: bool,
    mode: Option<Mode>,
}

/// In-memory stand-in for the PostgreSQL store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn set_mode(&self, mode: Mode) {
        self.inner.lock().unwrap().mode = Some(mode);
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.inner.lock().unwrap().visits.clone()
    }

    pub fn table_created(&self) -> bool {
        self.inner.lock().unwrap().table_created
    }

    fn check(&self, statement: bool) -> Result<(), AppError> {
        match self.inner.lock().unwrap().mode.unwrap_or(Mode::Up) {
            Mode::Up => Ok(()),
            Mode::Down => Err(AppError::StorageUnavailable(sqlx::Error::Io(
                std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused (os error 111)",
                ),
            ))),
            Mode::Broken if statement => Err(AppError::QueryFailed(sqlx::Error::Protocol(
                "relation \"visitors\" does not exist".to_string(),
            ))),
            Mode::Broken => Ok(()),
        }
    }
}

impl VisitStore for MemoryStore {
    async fn init_schema(&self) -> Result<(), AppError> {
        self.check(true)?;
        self.inner.lock().unwrap().table_created = true;
        Ok(())
    }

    async fn record_visit(&self, visit: NewVisit) -> Result<Visit, AppError> {
        self.check(true)?;
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let stored = Visit {
            id: inner.last_id,
            visit_time: visit.visit_time,
            ip_address: Some(visit.ip_address),
        };
        inner.visits.push(stored.clone());
        Ok(stored)
    }

    async fn count_visits(&self) -> Result<i64, AppError> {
        self.check(true)?;
        Ok(self.inner.lock().unwrap().visits.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check(false)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::default();
        let router = visitor_counter::build_app(store.clone());
        Self { router, store }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        request(&self.router, req).await
    }

    pub async fn get(&self, uri: &str) -> Response {
        get(&self.router, uri).await
    }

    pub async fn post(&self, uri: &str) -> Response {
        post(&self.router, uri).await
    }
}

pub async fn request(router: &Router, req: Request<Body>) -> Response {
    tower::ServiceExt::oneshot(router.clone(), req)
        .await
        .unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    request(router, req).await
}

pub async fn post(router: &Router, uri: &str) -> Response {
    let req = Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::empty())
        .unwrap();
    request(router, req).await
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert the status and parse the body as JSON.
pub async fn json_body(resp: Response, expected: StatusCode) -> Value {
    assert_eq!(resp.status(), expected);
    let content_type = resp
        .headers()
        .get("content-type")
        .expect("JSON responses carry a content type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/json"), "got {content_type}");
    serde_json::from_str(&body_string(resp).await).unwrap()
}

use std::future::Future;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::DbConfig;
use crate::error::AppError;
use crate::models::{NewVisit, Visit};

pub const CREATE_VISITORS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS visitors (
        id SERIAL PRIMARY KEY,
        visit_time TIMESTAMP NOT NULL,
        ip_address VARCHAR(50)
    )
"#;

/// Storage behind the HTTP handlers. Each call is one statement.
pub trait VisitStore: Clone + Send + Sync + 'static {
    /// Idempotently create the visitors table.
    fn init_schema(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    fn record_visit(&self, visit: NewVisit) -> impl Future<Output = Result<Visit, AppError>> + Send;

    fn count_visits(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Open and drop a connection without running anything.
    fn ping(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// PostgreSQL store that opens a fresh connection for every operation.
///
/// There is no pool and no cap, so concurrent requests map one-to-one onto
/// concurrent server connections.
#[derive(Clone)]
pub struct PgStore {
    options: PgConnectOptions,
}

impl PgStore {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }

    pub async fn connect(&self) -> Result<PgConnection, AppError> {
        PgConnection::connect_with(&self.options)
            .await
            .map_err(AppError::StorageUnavailable)
    }
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!("Error closing connection: {e}");
    }
}

impl VisitStore for PgStore {
    async fn init_schema(&self) -> Result<(), AppError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(CREATE_VISITORS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(AppError::QueryFailed);
        release(conn).await;
        result.map(|_| ())
    }

    async fn record_visit(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let mut conn = self.connect().await?;
        let result: Result<Visit, AppError> = sqlx::query_as(
            "INSERT INTO visitors (visit_time, ip_address) VALUES ($1, $2) RETURNING id, visit_time, ip_address",
        )
        .bind(visit.visit_time)
        .bind(&visit.ip_address)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::QueryFailed);
        release(conn).await;
        result
    }

    async fn count_visits(&self) -> Result<i64, AppError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitors")
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::QueryFailed);
        release(conn).await;
        result
    }

    async fn ping(&self) -> Result<(), AppError> {
        let conn = self.connect().await?;
        release(conn).await;
        Ok(())
    }
}

/// Best-effort startup initialization: failures are logged and startup continues.
pub async fn init_db<S: VisitStore>(store: &S) -> bool {
    match store.init_schema().await {
        Ok(()) => {
            tracing::info!("Database initialized");
            true
        }
        Err(e) => {
            tracing::error!("Error initializing database: {e}");
            false
        }
    }
}

use chrono::{Local, NaiveDateTime};
use sqlx::FromRow;

/// The client address is never extracted; every visit carries this placeholder.
pub const UNKNOWN_IP: &str = "unknown";

#[derive(Debug, Clone, FromRow)]
pub struct Visit {
    pub id: i32,
    pub visit_time: NaiveDateTime,
    pub ip_address: Option<String>,
}

/// A visit that has not been stored yet. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub visit_time: NaiveDateTime,
    pub ip_address: String,
}

impl NewVisit {
    pub fn now() -> Self {
        Self {
            visit_time: Local::now().naive_local(),
            ip_address: UNKNOWN_IP.to_string(),
        }
    }
}

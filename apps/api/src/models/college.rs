use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A locally stored college. Seeds every enrichment lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CollegeRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

//! College persistence: the lookup collaborator behind enrichment, plus the
//! read-only directory listing.
//!
//! `AppState` carries an `Arc<dyn CollegeRepository>`; production wires in
//! `PgCollegeRepository`, tests use the in-memory fake at the bottom of this file.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::college::CollegeRow;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validated list filter. Built from raw query parameters by `CollegeFilter::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollegeFilter {
    /// Case-insensitive literal substring match on `name`; `%` and `_` are
    /// not wildcards.
    pub search: Option<String>,
    /// Case-insensitive exact match on `state`.
    pub state: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl CollegeFilter {
    /// `page` is 1-based and defaults to 1; `limit` defaults to 20 and is clamped
    /// to 1..=100. Blank text filters are dropped.
    pub fn new(
        search: Option<String>,
        state: Option<String>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::Validation("page starts at 1".to_string()));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        Ok(Self {
            search: non_blank(search),
            state: non_blank(state),
            page,
            limit,
        })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One page of colleges plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct CollegePage {
    pub colleges: Vec<CollegeRow>,
    pub total: i64,
}

#[async_trait]
pub trait CollegeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollegeRow>, AppError>;

    async fn list(&self, filter: &CollegeFilter) -> Result<CollegePage, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCollegeRepository {
    pool: PgPool,
}

impl PgCollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollegeRepository for PgCollegeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollegeRow>, AppError> {
        let row: Option<CollegeRow> = sqlx::query_as(
            "SELECT id, name, city, state, created_at FROM colleges WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self, filter: &CollegeFilter) -> Result<CollegePage, AppError> {
        let colleges: Vec<CollegeRow> = sqlx::query_as(
            r#"
            SELECT id, name, city, state, created_at
            FROM colleges
            WHERE ($1::text IS NULL OR strpos(LOWER(name), LOWER($1)) > 0)
              AND ($2::text IS NULL OR LOWER(state) = LOWER($2))
            ORDER BY name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.state.as_deref())
        .bind(i64::from(filter.limit))
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM colleges
            WHERE ($1::text IS NULL OR strpos(LOWER(name), LOWER($1)) > 0)
              AND ($2::text IS NULL OR LOWER(state) = LOWER($2))
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.state.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(CollegePage { colleges, total })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory fake for tests
// ────────────────────────────────────────────────────────────────────────────

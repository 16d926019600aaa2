use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::colleges::repository::CollegeFilter;
use crate::enrichment::models::EnrichmentResult;
use crate::errors::AppError;
use crate::models::college::CollegeRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CollegeListQuery {
    pub search: Option<String>,
    pub state: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CollegeListResponse {
    pub colleges: Vec<CollegeRow>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

/// GET /api/v1/colleges
pub async fn handle_list_colleges(
    State(state): State<AppState>,
    Query(params): Query<CollegeListQuery>,
) -> Result<Json<CollegeListResponse>, AppError> {
    let filter = CollegeFilter::new(params.search, params.state, params.page, params.limit)?;
    let page = state.colleges.list(&filter).await?;
    Ok(Json(CollegeListResponse {
        colleges: page.colleges,
        page: filter.page,
        limit: filter.limit,
        total: page.total,
    }))
}

/// GET /api/v1/colleges/:id
pub async fn handle_get_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CollegeRow>, AppError> {
    let college = state
        .colleges
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("College {id} not found")))?;
    Ok(Json(college))
}

/// GET /api/v1/colleges/:id/enrich
pub async fn handle_enrich_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichmentResult>, AppError> {
    let result = state.enricher.enrich(id).await?;
    Ok(Json(result))
}

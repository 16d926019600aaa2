use std::sync::Arc;

use crate::colleges::repository::CollegeRepository;
use crate::enrichment::aggregator::EnrichmentAggregator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// College lookups. `PgCollegeRepository` in production.
    pub colleges: Arc<dyn CollegeRepository>,
    pub enricher: Arc<EnrichmentAggregator>,
}

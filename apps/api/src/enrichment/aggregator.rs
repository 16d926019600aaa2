//! EnrichmentAggregator: resolves a stored college, queries the directory and
//! the encyclopedia concurrently, and merges whatever came back.
//!
//! Only two outcomes are terminal: the college does not exist (`NotFound`,
//! before any outbound call) or the repository itself fails. Everything a
//! provider can do wrong is absorbed into `None` fields and `false` flags.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use super::directory::DirectoryProvider;
use super::matching::{select_candidate, website_of};
use super::models::{DirectoryCandidate, EnrichmentResult, EnrichmentSources, PageSummary};
use super::summary::{lookup_title, SummaryProvider};
use super::ProviderError;
use crate::colleges::repository::CollegeRepository;
use crate::errors::AppError;
use crate::models::college::CollegeRow;

pub struct EnrichmentAggregator {
    colleges: Arc<dyn CollegeRepository>,
    directory: Arc<dyn DirectoryProvider>,
    summaries: Arc<dyn SummaryProvider>,
    provider_timeout: Duration,
}

impl EnrichmentAggregator {
    pub fn new(
        colleges: Arc<dyn CollegeRepository>,
        directory: Arc<dyn DirectoryProvider>,
        summaries: Arc<dyn SummaryProvider>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            colleges,
            directory,
            summaries,
            provider_timeout,
        }
    }

    pub async fn enrich(&self, id: Uuid) -> Result<EnrichmentResult, AppError> {
        let college = self
            .colleges
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("College {id} not found")))?;

        let title = lookup_title(&college);
        let (directory, summary) = tokio::join!(
            bounded(self.provider_timeout, self.directory.search(&college.name)),
            bounded(self.provider_timeout, self.summaries.summary(&title)),
        );

        if let Err(e) = &directory {
            warn!("Directory lookup failed for college {id}: {e}");
        }
        if let Err(e) = &summary {
            warn!("Summary lookup failed for college {id} ({title:?}): {e}");
        }

        let result = assemble(college, directory, summary);
        debug!(
            "Enriched college {id}: directory={}, encyclopedia={}",
            result.sources.directory, result.sources.encyclopedia
        );
        Ok(result)
    }
}

/// Caps a provider call at `limit`; running out of time counts as a failure.
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ProviderError::Timeout {
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

fn assemble(
    college: CollegeRow,
    directory: Result<Vec<DirectoryCandidate>, ProviderError>,
    summary: Result<PageSummary, ProviderError>,
) -> EnrichmentResult {
    let (website, directory_hit) = match directory {
        Ok(candidates) if !candidates.is_empty() => {
            let website = select_candidate(
                &candidates,
                college.city.as_deref(),
                college.state.as_deref(),
            )
            .and_then(website_of);
            (website, true)
        }
        _ => (None, false),
    };

    let (summary, thumbnail, encyclopedia_hit) = match summary {
        Ok(page) => {
            let titled = page.title.as_deref().is_some_and(|t| !t.is_empty());
            (page.extract, page.thumbnail.map(|t| t.source), titled)
        }
        Err(_) => (None, None, false),
    };

    EnrichmentResult {
        id: college.id,
        name: college.name,
        city: college.city,
        state: college.state,
        website,
        summary,
        thumbnail,
        sources: EnrichmentSources {
            directory: directory_hit,
            encyclopedia: encyclopedia_hit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colleges::repository::memory::InMemoryCollegeRepository;
    use crate::enrichment::directory::HipolabsClient;
    use crate::enrichment::models::Thumbnail;
    use crate::enrichment::summary::WikipediaClient;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // ── Fakes ───────────────────────────────────────────────────────────────

    enum Scripted<T> {
        Reply(T),
        Fail(u16),
        Hang,
    }

    impl<T: Clone> Scripted<T> {
        async fn play(&self) -> Result<T, ProviderError> {
            match self {
                Scripted::Reply(v) => Ok(v.clone()),
                Scripted::Fail(status) => Err(ProviderError::Status { status: *status }),
                Scripted::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ProviderError::Status { status: 599 })
                }
            }
        }
    }

    struct FakeDirectory {
        script: Scripted<Vec<DirectoryCandidate>>,
        calls: AtomicUsize,
        last_name: Mutex<Option<String>>,
    }

    impl FakeDirectory {
        fn new(script: Scripted<Vec<DirectoryCandidate>>) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                last_name: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl DirectoryProvider for FakeDirectory {
        async fn search(&self, name: &str) -> Result<Vec<DirectoryCandidate>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_name.lock().unwrap() = Some(name.to_string());
            self.script.play().await
        }
    }

    struct FakeSummaries {
        script: Scripted<PageSummary>,
        calls: AtomicUsize,
        last_title: Mutex<Option<String>>,
    }

    impl FakeSummaries {
        fn new(script: Scripted<PageSummary>) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                last_title: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl SummaryProvider for FakeSummaries {
        async fn summary(&self, title: &str) -> Result<PageSummary, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_title.lock().unwrap() = Some(title.to_string());
            self.script.play().await
        }
    }

    // ── Fixtures ────────────────────────────────────────────────────────────

    fn test_college() -> CollegeRow {
        CollegeRow {
            id: Uuid::new_v4(),
            name: "Test College".to_string(),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            created_at: Utc::now(),
        }
    }

    fn test_candidate() -> DirectoryCandidate {
        DirectoryCandidate {
            name: "Test College".to_string(),
            state_province: Some("Maharashtra".to_string()),
            web_pages: vec!["https://test.edu".to_string()],
        }
    }

    fn test_page() -> PageSummary {
        PageSummary {
            title: Some("Test College".to_string()),
            extract: Some("A college.".to_string()),
            thumbnail: Some(Thumbnail {
                source: "http://img".to_string(),
            }),
        }
    }

    fn aggregator(
        college: &CollegeRow,
        directory: Arc<FakeDirectory>,
        summaries: Arc<FakeSummaries>,
    ) -> EnrichmentAggregator {
        EnrichmentAggregator::new(
            Arc::new(InMemoryCollegeRepository::with_rows(vec![college.clone()])),
            directory,
            summaries,
            Duration::from_secs(4),
        )
    }

    // ── Tests ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unknown_college_makes_no_provider_calls() {
        let directory = FakeDirectory::new(Scripted::Reply(vec![test_candidate()]));
        let summaries = FakeSummaries::new(Scripted::Reply(test_page()));
        let agg = aggregator(&test_college(), directory.clone(), summaries.clone());

        let err = agg.enrich(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
        assert_eq!(summaries.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_both_providers_succeed() {
        let college = test_college();
        let directory = FakeDirectory::new(Scripted::Reply(vec![test_candidate()]));
        let summaries = FakeSummaries::new(Scripted::Reply(test_page()));
        let agg = aggregator(&college, directory.clone(), summaries.clone());

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.id, college.id);
        assert_eq!(result.name, "Test College");
        assert_eq!(result.city.as_deref(), Some("Pune"));
        assert_eq!(result.state.as_deref(), Some("Maharashtra"));
        assert_eq!(result.website.as_deref(), Some("https://test.edu"));
        assert_eq!(result.summary.as_deref(), Some("A college."));
        assert_eq!(result.thumbnail.as_deref(), Some("http://img"));
        assert_eq!(
            result.sources,
            EnrichmentSources {
                directory: true,
                encyclopedia: true
            }
        );

        assert_eq!(directory.calls.load(Ordering::SeqCst), 1);
        assert_eq!(summaries.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            directory.last_name.lock().unwrap().as_deref(),
            Some("Test College")
        );
        assert_eq!(
            summaries.last_title.lock().unwrap().as_deref(),
            Some("Test College Pune Maharashtra")
        );
    }

    #[tokio::test]
    async fn test_empty_directory_keeps_summary() {
        let college = test_college();
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Reply(vec![])),
            FakeSummaries::new(Scripted::Reply(test_page())),
        );

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.website, None);
        assert!(!result.sources.directory);
        assert_eq!(result.summary.as_deref(), Some("A college."));
        assert_eq!(result.thumbnail.as_deref(), Some("http://img"));
        assert!(result.sources.encyclopedia);
    }

    #[tokio::test]
    async fn test_both_providers_failing_still_returns_full_shape() {
        let college = test_college();
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Fail(500)),
            FakeSummaries::new(Scripted::Fail(404)),
        );

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.name, college.name);
        assert_eq!(result.website, None);
        assert_eq!(result.summary, None);
        assert_eq!(result.thumbnail, None);
        assert_eq!(result.sources, EnrichmentSources::default());
    }

    #[tokio::test]
    async fn test_network_errors_are_absorbed() {
        // Nothing listens on port 1, so both real clients fail to connect.
        let college = test_college();
        let http = reqwest::Client::new();
        let agg = EnrichmentAggregator::new(
            Arc::new(InMemoryCollegeRepository::with_rows(vec![college.clone()])),
            Arc::new(HipolabsClient::new(http.clone(), "http://127.0.0.1:1", "India")),
            Arc::new(WikipediaClient::new(http, "http://127.0.0.1:1/page/summary")),
            Duration::from_secs(4),
        );

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.website, None);
        assert_eq!(result.summary, None);
        assert_eq!(result.thumbnail, None);
        assert_eq!(result.sources, EnrichmentSources::default());
    }

    #[tokio::test]
    async fn test_unmatched_candidates_fall_back_to_first() {
        let college = test_college();
        let candidates = vec![
            DirectoryCandidate {
                name: "Other Institute".to_string(),
                state_province: Some("Kerala".to_string()),
                web_pages: vec![],
            },
            DirectoryCandidate {
                name: "Another Institute".to_string(),
                state_province: Some("Assam".to_string()),
                web_pages: vec!["https://another.edu".to_string()],
            },
        ];
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Reply(candidates)),
            FakeSummaries::new(Scripted::Fail(404)),
        );

        let result = agg.enrich(college.id).await.unwrap();

        // First candidate has no web pages, so the website stays empty even
        // though the directory contributed.
        assert_eq!(result.website, None);
        assert!(result.sources.directory);
    }

    #[tokio::test]
    async fn test_fallback_candidate_website_is_used() {
        let college = test_college();
        let candidates = vec![
            DirectoryCandidate {
                name: "Other Institute".to_string(),
                state_province: Some("Kerala".to_string()),
                web_pages: vec!["https://other.edu".to_string()],
            },
            DirectoryCandidate {
                name: "Another Institute".to_string(),
                state_province: Some("Assam".to_string()),
                web_pages: vec!["https://another.edu".to_string()],
            },
        ];
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Reply(candidates)),
            FakeSummaries::new(Scripted::Fail(404)),
        );

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.website.as_deref(), Some("https://other.edu"));
        assert!(result.sources.directory);
    }

    #[tokio::test]
    async fn test_untitled_summary_fills_fields_without_flag() {
        let college = test_college();
        let page = PageSummary {
            title: Some(String::new()),
            extract: Some("Orphan extract.".to_string()),
            thumbnail: None,
        };
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Reply(vec![test_candidate()])),
            FakeSummaries::new(Scripted::Reply(page)),
        );

        let result = agg.enrich(college.id).await.unwrap();

        assert_eq!(result.summary.as_deref(), Some("Orphan extract."));
        assert_eq!(result.thumbnail, None);
        assert!(!result.sources.encyclopedia);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out_alone() {
        let college = test_college();
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Hang),
            FakeSummaries::new(Scripted::Reply(test_page())),
        );

        let started = tokio::time::Instant::now();
        let result = agg.enrich(college.id).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!result.sources.directory);
        assert_eq!(result.website, None);
        assert!(result.sources.encyclopedia);
        assert_eq!(result.summary.as_deref(), Some("A college."));
    }

    #[tokio::test]
    async fn test_repeat_enrichment_is_identical() {
        let college = test_college();
        let agg = aggregator(
            &college,
            FakeDirectory::new(Scripted::Reply(vec![test_candidate()])),
            FakeSummaries::new(Scripted::Reply(test_page())),
        );

        let first = agg.enrich(college.id).await.unwrap();
        let second = agg.enrich(college.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_reports_limit() {
        let err = bounded(Duration::from_millis(250), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<(), ProviderError>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { after_ms: 250 }));
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One institution from the directory search.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DirectoryCandidate {
    pub name: String,
    #[serde(rename = "state-province", default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub web_pages: Vec<String>,
}

/// Encyclopedia page summary. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub source: String,
}

/// Which providers contributed data to an `EnrichmentResult`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichmentSources {
    /// Directory search returned at least one candidate.
    pub directory: bool,
    /// Page summary came back with a non-empty title.
    pub encyclopedia: bool,
}

/// Always fully shaped, whatever the providers did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentResult {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub sources: EnrichmentSources,
}

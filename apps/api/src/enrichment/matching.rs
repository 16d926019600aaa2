//! Picks the directory candidate that best corresponds to a stored college.
//!
//! Heuristic: the first candidate whose name or state/province mentions the
//! college's city or state (case-insensitive substring) wins; otherwise the
//! first candidate. List order decides ties, not relevance, so an unrelated
//! institution whose name happens to contain the city can be chosen.

use super::models::DirectoryCandidate;

pub fn select_candidate<'a>(
    candidates: &'a [DirectoryCandidate],
    city: Option<&str>,
    state: Option<&str>,
) -> Option<&'a DirectoryCandidate> {
    // An absent value never matches; an empty one matches every candidate.
    let needles: Vec<String> = [city, state]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect();

    candidates
        .iter()
        .find(|c| mentions_any(c, &needles))
        .or_else(|| candidates.first())
}

fn mentions_any(candidate: &DirectoryCandidate, needles: &[String]) -> bool {
    let name = candidate.name.to_lowercase();
    let region = candidate.state_province.as_deref().map(str::to_lowercase);

    needles.iter().any(|needle| {
        region
            .as_deref()
            .is_some_and(|r| r.contains(needle.as_str()))
            || name.contains(needle.as_str())
    })
}

/// First listed web page, if any.
pub fn website_of(candidate: &DirectoryCandidate) -> Option<String> {
    candidate.web_pages.first().cloned()
}

//! Top-cited articles view.

use std::cmp::Reverse;

use serde::Serialize;

use crate::models::Publication;

/// Number of articles shown by default.
pub const DEFAULT_TOP_N: usize = 5;

/// One row of the top-cited table.
#[derive(Debug, Clone, Serialize)]
pub struct CitedArticle {
    /// Publication ID.
    pub id: String,

    /// Title.
    pub title: String,

    /// Citation count (0 when not reported; ranking keeps unreported last).
    pub citations: u32,

    /// Journal title.
    pub journal: Option<String>,

    /// Publication date string.
    pub date: Option<String>,
}

/// The `n` most cited articles.
///
/// Non-increasing citation order; ties keep original order; publications
/// without a reported count rank after every reported one.
#[must_use]
pub fn top_cited(publications: &[Publication], n: usize) -> Vec<CitedArticle> {
    let mut ranked: Vec<&Publication> = publications.iter().collect();
    ranked.sort_by_key(|p| Reverse(rank(p)));

    ranked
        .into_iter()
        .take(n)
        .map(|p| CitedArticle {
            id: p.id.clone(),
            title: p.title_or_default().to_string(),
            citations: p.citations(),
            journal: p.journal_title().map(String::from),
            date: p.date.clone(),
        })
        .collect()
}

/// Unreported counts rank below zero.
fn rank(publication: &Publication) -> i64 {
    publication.times_cited.map_or(-1, i64::from)
}

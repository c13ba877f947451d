//! Recency views: most recent papers and the trailing six-month window.

use std::cmp::Reverse;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::Publication;

/// Window length of the "last six months" view.
pub const SIX_MONTHS_DAYS: u64 = 180;

/// One row of a recency table.
#[derive(Debug, Clone, Serialize)]
pub struct RecentPaper {
    /// Publication ID.
    pub id: String,

    /// Title.
    pub title: String,

    /// First author's display name, when known.
    pub first_author: Option<String>,

    /// Publication date string as returned by the API.
    pub date: Option<String>,

    /// Journal title.
    pub journal: Option<String>,

    /// Citation count (0 when not reported).
    pub citations: u32,
}

impl RecentPaper {
    fn from_publication(publication: &Publication) -> Self {
        Self {
            id: publication.id.clone(),
            title: publication.title_or_default().to_string(),
            first_author: publication.first_author(),
            date: publication.date.clone(),
            journal: publication.journal_title().map(String::from),
            citations: publication.citations(),
        }
    }
}

/// The `n` most recent papers.
///
/// Dates parse permissively; records whose date does not parse sort after
/// every record with a parseable date. Descending, stable.
#[must_use]
pub fn most_recent(publications: &[Publication], n: usize) -> Vec<RecentPaper> {
    let mut ranked: Vec<&Publication> = publications.iter().collect();
    ranked.sort_by_key(|p| Reverse(p.parsed_date()));

    ranked.into_iter().take(n).map(RecentPaper::from_publication).collect()
}

/// Papers published in the trailing 180 days, inclusive of the cutoff.
/// Descending by date, uncapped.
#[must_use]
pub fn last_six_months(publications: &[Publication], today: NaiveDate) -> Vec<RecentPaper> {
    let cutoff = window_start(today);

    let mut recent: Vec<(&Publication, NaiveDate)> = publications
        .iter()
        .filter_map(|p| p.parsed_date().map(|d| (p, d)))
        .filter(|(_, date)| *date >= cutoff)
        .collect();
    recent.sort_by_key(|(_, date)| Reverse(*date));

    recent.into_iter().map(|(p, _)| RecentPaper::from_publication(p)).collect()
}

/// First day of the six-month window ending today.
#[must_use]
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(SIX_MONTHS_DAYS)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(id: &str, date: Option<&str>) -> Publication {
        Publication { id: id.to_string(), date: date.map(String::from), ..Default::default() }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_most_recent_orders_descending() {
        let publications = vec![
            publication("P1", Some("2023-01-01")),
            publication("P2", Some("2024-06-15")),
            publication("P3", Some("2023-12-31")),
        ];
        let recent = most_recent(&publications, 5);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P2", "P3", "P1"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let publications = vec![
            publication("P1", Some("garbage")),
            publication("P2", Some("2020-01-01")),
            publication("P3", None),
            publication("P4", Some("2024-01-01")),
        ];
        let recent = most_recent(&publications, 4);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(&ids[..2], &["P4", "P2"]);
        // Both dateless records come after every dated one, original order kept.
        assert_eq!(&ids[2..], &["P1", "P3"]);
    }

    #[test]
    fn test_last_six_months_window_inclusive() {
        let today = day(2024, 7, 1);
        let cutoff = window_start(today);

        let publications = vec![
            publication("P1", Some(&cutoff.to_string())),
            publication("P2", Some("2024-06-30")),
            publication("P3", Some("2023-01-01")),
            publication("P4", Some("not a date")),
        ];

        let recent = last_six_months(&publications, today);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P2", "P1"]);
    }

    #[test]
    fn test_last_six_months_uncapped() {
        let today = day(2024, 7, 1);
        let publications: Vec<Publication> =
            (0..40).map(|i| publication(&format!("P{i}"), Some("2024-06-01"))).collect();
        assert_eq!(last_six_months(&publications, today).len(), 40);
    }
}

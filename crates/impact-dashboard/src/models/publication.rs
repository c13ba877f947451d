//! Publication data model matching the Dimensions DSL response schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A publication record returned by the DSL search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Publication {
    /// Dimensions publication ID (e.g. "pub.1234567890").
    pub id: String,

    /// Publication title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication type (article, chapter, proceeding, ...).
    #[serde(default, rename = "type")]
    pub pub_type: Option<String>,

    /// Publication date in ISO format (YYYY-MM-DD, sometimes truncated).
    #[serde(default)]
    pub date: Option<String>,

    /// Online publication date.
    #[serde(default)]
    pub date_online: Option<String>,

    /// Journal volume.
    #[serde(default)]
    pub volume: Option<String>,

    /// Journal issue.
    #[serde(default)]
    pub issue: Option<String>,

    /// Page range.
    #[serde(default)]
    pub pages: Option<String>,

    /// Journal reference.
    #[serde(default)]
    pub journal: Option<Journal>,

    /// Citation count. Absent means "not reported", not zero.
    #[serde(default)]
    pub times_cited: Option<u32>,

    /// Ordered author list, possibly empty.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Funding organizations (absent from the fixed query's field set).
    #[serde(default)]
    pub funders: Option<Vec<FunderRef>>,

    /// Grant investigators (absent from the fixed query's field set).
    #[serde(default)]
    pub investigators: Option<Vec<InvestigatorRef>>,
}

impl Publication {
    /// Get the title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Get the journal title if available.
    #[must_use]
    pub fn journal_title(&self) -> Option<&str> {
        self.journal.as_ref()?.title.as_deref()
    }

    /// Get citation count or 0 if not reported. Display helper only;
    /// aggregations that must distinguish absent counts read the field.
    #[must_use]
    pub fn citations(&self) -> u32 {
        self.times_cited.unwrap_or(0)
    }

    /// First author's display name, when both name parts are present.
    #[must_use]
    pub fn first_author(&self) -> Option<String> {
        let author = self.authors.first()?;
        match (author.first_name.as_deref(), author.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                Some(format!("{first} {last}"))
            }
            _ => None,
        }
    }

    /// Parse the publication date permissively.
    ///
    /// Accepts full dates, year-month, and bare years (padded to the first
    /// day). Unparseable or absent dates yield `None`.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(self.date.as_deref()?)
    }
}

/// Permissive date parser for DSL date strings.
#[must_use]
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok()
}

/// Journal reference embedded in a publication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    /// Dimensions journal ID.
    #[serde(default)]
    pub id: Option<String>,

    /// Journal title.
    #[serde(default)]
    pub title: Option<String>,
}

/// One author entry on a publication, with their affiliations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Dimensions researcher ID (e.g. "ur.0123456789.01").
    #[serde(default)]
    pub researcher_id: Option<String>,

    /// Organizations this author lists on the publication.
    #[serde(default)]
    pub affiliations: Vec<AffiliationRef>,
}

/// One organization an author is affiliated with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffiliationRef {
    /// GRID/Dimensions organization ID.
    #[serde(default)]
    pub id: Option<String>,

    /// Organization name.
    #[serde(default)]
    pub name: Option<String>,

    /// City.
    #[serde(default)]
    pub city: Option<String>,

    /// Country.
    #[serde(default)]
    pub country: Option<String>,
}

/// Funding organization reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunderRef {
    /// Organization ID.
    #[serde(default)]
    pub id: Option<String>,

    /// Funder name.
    #[serde(default)]
    pub name: Option<String>,

    /// Funder country.
    #[serde(default)]
    pub country_name: Option<String>,
}

/// Grant investigator reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestigatorRef {
    /// Researcher ID.
    #[serde(default)]
    pub id: Option<String>,

    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Role on the grant.
    #[serde(default)]
    pub role: Option<String>,
}

/// Response from the key-for-token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokenResponse {
    /// Session token, sent as `Authorization: JWT <token>`.
    pub token: String,
}

/// Envelope of a DSL publications query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DslResponse {
    /// Matched publication records for this page.
    #[serde(default)]
    pub publications: Vec<Publication>,

    /// Query statistics.
    #[serde(default, rename = "_stats")]
    pub stats: Option<QueryStats>,
}

impl DslResponse {
    /// Total matches reported by the API, falling back to this page's size.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.stats.as_ref().map_or(self.publications.len(), |s| s.total_count)
    }
}

/// DSL `_stats` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryStats {
    /// Total number of records matching the query.
    #[serde(default)]
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_deserialize_minimal() {
        let json = r#"{"id": "pub.1"}"#;
        let publication: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(publication.id, "pub.1");
        assert!(publication.title.is_none());
        assert!(publication.times_cited.is_none());
        assert!(publication.authors.is_empty());
    }

    #[test]
    fn test_publication_deserialize_full() {
        let json = r#"{
            "id": "pub.1",
            "title": "Urban analytics at scale",
            "type": "article",
            "date": "2023-05-17",
            "journal": {"id": "jour.1", "title": "Urban Studies"},
            "times_cited": 42,
            "authors": [{
                "first_name": "Ada",
                "last_name": "Lovelace",
                "researcher_id": "ur.1",
                "affiliations": [{"name": "University of Melbourne", "country": "Australia"}]
            }]
        }"#;

        let publication: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(publication.title_or_default(), "Urban analytics at scale");
        assert_eq!(publication.citations(), 42);
        assert_eq!(publication.journal_title(), Some("Urban Studies"));
        assert_eq!(publication.first_author(), Some("Ada Lovelace".to_string()));
        assert_eq!(publication.parsed_date(), NaiveDate::from_ymd_opt(2023, 5, 17));
    }

    #[test]
    fn test_first_author_requires_both_names() {
        let mut publication = Publication { id: "pub.1".to_string(), ..Default::default() };
        publication.authors.push(AuthorRef {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        });
        assert_eq!(publication.first_author(), None);
    }

    #[test]
    fn test_parse_date_permissive() {
        assert_eq!(parse_date("2023-05-17"), NaiveDate::from_ymd_opt(2023, 5, 17));
        assert_eq!(parse_date("2023-05"), NaiveDate::from_ymd_opt(2023, 5, 1));
        assert_eq!(parse_date("2023"), NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_dsl_response_total_count() {
        let json = r#"{
            "publications": [{"id": "pub.1"}],
            "_stats": {"total_count": 250}
        }"#;
        let response: DslResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count(), 250);

        let bare: DslResponse = serde_json::from_str(r#"{"publications": [{"id": "pub.1"}]}"#).unwrap();
        assert_eq!(bare.total_count(), 1);
    }
}

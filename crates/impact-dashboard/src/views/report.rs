//! Report assembly: every view computed over one table set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::TableSet;

use super::{
    CitationBucket, CitedArticle, CountryEntry, DEFAULT_BINS, DEFAULT_TOP_N, KeyMetrics,
    OrganisationEntry, RecentPaper, citation_distribution, country_rollup, key_metrics,
    last_six_months, most_recent, organisation_rollup, recent, top_cited,
};

/// The assembled impact report, one render pass over the loaded tables.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    /// Organization the report covers.
    pub organization: String,

    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// First day of the trailing six-month window.
    pub window_start: NaiveDate,

    /// Headline counts.
    pub key_metrics: KeyMetrics,

    /// Most cited articles.
    pub top_cited: Vec<CitedArticle>,

    /// Most recent papers.
    pub most_recent: Vec<RecentPaper>,

    /// Papers in the trailing six-month window.
    pub last_six_months: Vec<RecentPaper>,

    /// Organization rollup.
    pub organisations: Vec<OrganisationEntry>,

    /// Country rollup.
    pub countries: Vec<CountryEntry>,

    /// Citation histogram.
    pub citation_distribution: Vec<CitationBucket>,
}

impl ImpactReport {
    /// Compute every view over the given tables. Absent tables yield empty
    /// sections; nothing here fails.
    #[must_use]
    pub fn build(tables: &TableSet, organization: &str, now: DateTime<Utc>) -> Self {
        let publications = tables.publications.as_deref().unwrap_or_default();
        let affiliations = tables.affiliations.as_deref().unwrap_or_default();
        let today = now.date_naive();

        Self {
            organization: organization.to_string(),
            generated_at: now,
            window_start: recent::window_start(today),
            key_metrics: key_metrics(publications, affiliations),
            top_cited: top_cited(publications, DEFAULT_TOP_N),
            most_recent: most_recent(publications, DEFAULT_TOP_N),
            last_six_months: last_six_months(publications, today),
            organisations: organisation_rollup(affiliations),
            countries: country_rollup(affiliations),
            citation_distribution: citation_distribution(publications, DEFAULT_BINS),
        }
    }
}

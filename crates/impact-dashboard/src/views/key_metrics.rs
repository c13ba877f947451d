//! Key metrics: headline counts for the report.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{AffiliationRow, Publication};

/// Headline counts across the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyMetrics {
    /// Total publication records.
    pub total_publications: usize,

    /// Citations summed over publications that report a count.
    pub total_citations: u64,

    /// Distinct affiliated organizations.
    pub affiliated_organisations: usize,

    /// Distinct non-blank affiliated countries.
    pub affiliated_countries: usize,
}

/// Compute the headline metrics. Absent counts contribute nothing to the
/// citation total; they are not zeros.
#[must_use]
pub fn key_metrics(publications: &[Publication], affiliations: &[AffiliationRow]) -> KeyMetrics {
    let total_citations =
        publications.iter().filter_map(|p| p.times_cited).map(u64::from).sum();

    let organisations: HashSet<&str> =
        affiliations.iter().map(|a| a.aff_name.as_str()).collect();

    let countries: HashSet<&str> = affiliations
        .iter()
        .filter_map(|a| a.aff_country.as_deref())
        .filter(|c| !c.is_empty())
        .collect();

    KeyMetrics {
        total_publications: publications.len(),
        total_citations,
        affiliated_organisations: organisations.len(),
        affiliated_countries: countries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(id: &str, times_cited: Option<u32>) -> Publication {
        Publication { id: id.to_string(), times_cited, ..Default::default() }
    }

    fn affiliation(org: &str, country: Option<&str>) -> AffiliationRow {
        AffiliationRow {
            pub_id: "P1".to_string(),
            researcher_id: None,
            first_name: None,
            last_name: None,
            aff_id: None,
            aff_name: org.to_string(),
            aff_city: None,
            aff_country: country.map(String::from),
            times_cited: None,
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(key_metrics(&[], &[]), KeyMetrics::default());
    }

    #[test]
    fn test_absent_citation_counts_excluded() {
        let publications =
            vec![publication("P1", Some(10)), publication("P2", None), publication("P3", Some(5))];
        let metrics = key_metrics(&publications, &[]);
        assert_eq!(metrics.total_publications, 3);
        assert_eq!(metrics.total_citations, 15);
    }

    #[test]
    fn test_distinct_organisations_and_countries() {
        let affiliations = vec![
            affiliation("X", Some("Australia")),
            affiliation("X", Some("Australia")),
            affiliation("Y", Some("")),
            affiliation("Z", None),
        ];
        let metrics = key_metrics(&[], &affiliations);
        assert_eq!(metrics.affiliated_organisations, 3);
        assert_eq!(metrics.affiliated_countries, 1);
    }
}

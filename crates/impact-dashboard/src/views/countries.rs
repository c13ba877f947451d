//! Affiliated countries rollup.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::AffiliationRow;

/// One country's publication count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    /// Country name.
    pub country: String,

    /// Distinct publications with at least one affiliation in this country.
    pub publication_count: usize,
}

/// Count distinct publications per non-blank country, sorted by count
/// descending then name.
#[must_use]
pub fn country_rollup(affiliations: &[AffiliationRow]) -> Vec<CountryEntry> {
    let mut publications_by_country: HashMap<&str, HashSet<&str>> = HashMap::new();

    for row in affiliations {
        let Some(country) = row.aff_country.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        publications_by_country.entry(country).or_default().insert(row.pub_id.as_str());
    }

    let mut entries: Vec<CountryEntry> = publications_by_country
        .into_iter()
        .map(|(country, publications)| CountryEntry {
            country: country.to_string(),
            publication_count: publications.len(),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.publication_count.cmp(&a.publication_count).then_with(|| a.country.cmp(&b.country))
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: Option<&str>, pub_id: &str) -> AffiliationRow {
        AffiliationRow {
            pub_id: pub_id.to_string(),
            researcher_id: None,
            first_name: None,
            last_name: None,
            aff_id: None,
            aff_name: "X".to_string(),
            aff_city: None,
            aff_country: country.map(String::from),
            times_cited: None,
        }
    }

    #[test]
    fn test_counts_distinct_publications() {
        let rows = vec![
            row(Some("Australia"), "P1"),
            row(Some("Australia"), "P1"),
            row(Some("Australia"), "P2"),
            row(Some("Germany"), "P1"),
        ];
        let rollup = country_rollup(&rows);
        assert_eq!(
            rollup,
            vec![
                CountryEntry { country: "Australia".to_string(), publication_count: 2 },
                CountryEntry { country: "Germany".to_string(), publication_count: 1 },
            ]
        );
    }

    #[test]
    fn test_blank_countries_excluded() {
        let rows = vec![row(None, "P1"), row(Some(""), "P2")];
        assert!(country_rollup(&rows).is_empty());
    }

    #[test]
    fn test_equal_counts_sort_by_name() {
        let rows = vec![row(Some("Norway"), "P1"), row(Some("Chile"), "P2")];
        let rollup = country_rollup(&rows);
        assert_eq!(rollup[0].country, "Chile");
        assert_eq!(rollup[1].country, "Norway");
    }
}

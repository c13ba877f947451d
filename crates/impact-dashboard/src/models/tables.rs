//! Normalized result tables produced by the loader.
//!
//! One loader call yields up to five tables. A facet the query returned
//! nothing for is `None`, which every view renders as a placeholder rather
//! than an error.

use serde::{Deserialize, Serialize};

use super::Publication;

/// One (publication, author) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRow {
    /// Owning publication ID.
    pub pub_id: String,

    /// Dimensions researcher ID, when resolved.
    pub researcher_id: Option<String>,

    /// Given name.
    pub first_name: Option<String>,

    /// Family name.
    pub last_name: Option<String>,
}

/// One (publication, author, organization) row.
///
/// `times_cited` is filled by the enrichment join; rows whose publication
/// reference matches nothing keep `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliationRow {
    /// Owning publication ID.
    pub pub_id: String,

    /// Dimensions researcher ID, when resolved.
    pub researcher_id: Option<String>,

    /// Given name.
    pub first_name: Option<String>,

    /// Family name.
    pub last_name: Option<String>,

    /// Organization ID.
    pub aff_id: Option<String>,

    /// Organization name.
    pub aff_name: String,

    /// Organization city.
    pub aff_city: Option<String>,

    /// Organization country.
    pub aff_country: Option<String>,

    /// Citation count of the owning publication (set by the enrichment
    /// join; never fabricated).
    pub times_cited: Option<u32>,
}

/// One (publication, funder) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunderRow {
    /// Owning publication ID.
    pub pub_id: String,

    /// Funder organization ID.
    pub funder_id: Option<String>,

    /// Funder name.
    pub name: String,

    /// Funder country.
    pub country: Option<String>,
}

/// One (publication, investigator) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigatorRow {
    /// Owning publication ID.
    pub pub_id: String,

    /// Researcher ID.
    pub investigator_id: Option<String>,

    /// Given name.
    pub first_name: Option<String>,

    /// Family name.
    pub last_name: Option<String>,

    /// Role on the grant.
    pub role: Option<String>,
}

/// The five tables produced by one load. Records are immutable once the
/// load completes; views receive borrows and copy what they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSet {
    /// Main publication records.
    pub publications: Option<Vec<Publication>>,

    /// Flattened author rows.
    pub authors: Option<Vec<AuthorRow>>,

    /// Flattened affiliation rows (citation-enriched).
    pub affiliations: Option<Vec<AffiliationRow>>,

    /// Flattened funder rows.
    pub funders: Option<Vec<FunderRow>>,

    /// Flattened investigator rows.
    pub investigators: Option<Vec<InvestigatorRow>>,
}

impl TableSet {
    /// A set with every facet absent, the all-absent failure outcome.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no facet holds data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.publications.is_none()
            && self.authors.is_none()
            && self.affiliations.is_none()
            && self.funders.is_none()
            && self.investigators.is_none()
    }

    /// Number of publication records, 0 when the facet is absent.
    #[must_use]
    pub fn publication_count(&self) -> usize {
        self.publications.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let tables = TableSet::empty();
        assert!(tables.is_empty());
        assert_eq!(tables.publication_count(), 0);
    }

    #[test]
    fn test_non_empty_set() {
        let tables = TableSet {
            publications: Some(vec![Publication { id: "pub.1".to_string(), ..Default::default() }]),
            ..Default::default()
        };
        assert!(!tables.is_empty());
        assert_eq!(tables.publication_count(), 1);
    }
}

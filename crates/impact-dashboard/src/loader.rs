//! Data loader: one authenticated fetch producing five normalized tables.
//!
//! The loader owns the memo (keyed by the exact credential/endpoint/query
//! triple) and the citation-enrichment join. Failures are classified into
//! the operator-facing buckets and never cached, so a resubmitted
//! credential always triggers a fresh attempt.

use std::collections::HashMap;
use std::sync::Arc;

use moka::future::Cache;

use crate::client::DimensionsClient;
use crate::config::Config;
use crate::error::{ClientResult, LoadError, LoadResult};
use crate::models::{
    AffiliationRow, AuthorRow, FunderRow, InvestigatorRow, Publication, TableSet,
};

/// Loads and memoizes the dashboard's working dataset.
pub struct Loader {
    /// API client.
    client: DimensionsClient,

    /// Memoized load results, success only.
    cache: Cache<String, Arc<TableSet>>,

    /// Endpoint, part of the memo key.
    endpoint: String,

    /// The fixed DSL query, part of the memo key.
    query: String,
}

impl Loader {
    /// Create a new loader from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = DimensionsClient::new(config)?;
        let cache = Cache::builder().max_capacity(config.cache_max_size).build();

        Ok(Self {
            client,
            cache,
            endpoint: config.endpoint.clone(),
            query: config.dsl_query(),
        })
    }

    /// Check a credential locally. Blank and whitespace-only keys are
    /// rejected before any network interaction.
    #[must_use]
    pub fn validate_credential(api_key: &str) -> bool {
        !api_key.trim().is_empty()
    }

    /// Load the five result tables for this credential.
    ///
    /// A repeated call with the same credential (against the same endpoint
    /// and query) returns the memoized tables without touching the network.
    ///
    /// # Errors
    ///
    /// Returns a classified [`LoadError`]; the attempt is terminal for this
    /// render pass but the loader stays usable.
    pub async fn load(&self, api_key: &str) -> LoadResult<Arc<TableSet>> {
        if !Self::validate_credential(api_key) {
            return Err(LoadError::BlankCredential);
        }

        let key = self.memo_key(api_key);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("Load served from memo");
            return Ok(cached);
        }

        let tables = match self.fetch(api_key).await {
            Ok(tables) => Arc::new(tables),
            Err(err) => {
                let err = LoadError::from(err);
                tracing::warn!(kind = err.kind(), error = %err, "Load failed");
                return Err(err);
            }
        };

        self.cache.insert(key, Arc::clone(&tables)).await;
        Ok(tables)
    }

    /// One authenticate, one iterative query, then normalization.
    async fn fetch(&self, api_key: &str) -> ClientResult<TableSet> {
        let session = self.client.authenticate(api_key).await?;
        let response = self.client.query_iterative(&session, &self.query).await?;

        tracing::info!(
            publications = response.publications.len(),
            total = response.total_count(),
            "Loaded publication records"
        );

        Ok(normalize(response.publications))
    }

    /// Memo key over the exact input triple.
    fn memo_key(&self, api_key: &str) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(api_key.as_bytes());
        hasher.update(b"|");
        hasher.update(self.endpoint.as_bytes());
        hasher.update(b"|");
        hasher.update(self.query.as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

/// Flatten publication records into the five tables and run the
/// enrichment join. Facets with no rows become `None`.
#[must_use]
pub fn normalize(publications: Vec<Publication>) -> TableSet {
    if publications.is_empty() {
        return TableSet::empty();
    }

    let mut authors = Vec::new();
    let mut affiliations = Vec::new();
    let mut funders = Vec::new();
    let mut investigators = Vec::new();

    for publication in &publications {
        for author in &publication.authors {
            authors.push(AuthorRow {
                pub_id: publication.id.clone(),
                researcher_id: author.researcher_id.clone(),
                first_name: author.first_name.clone(),
                last_name: author.last_name.clone(),
            });

            for affiliation in &author.affiliations {
                // Rows without an organization name cannot be attributed.
                let Some(aff_name) = affiliation.name.clone().filter(|n| !n.is_empty()) else {
                    continue;
                };
                affiliations.push(AffiliationRow {
                    pub_id: publication.id.clone(),
                    researcher_id: author.researcher_id.clone(),
                    first_name: author.first_name.clone(),
                    last_name: author.last_name.clone(),
                    aff_id: affiliation.id.clone(),
                    aff_name,
                    aff_city: affiliation.city.clone(),
                    aff_country: affiliation.country.clone(),
                    times_cited: None,
                });
            }
        }

        for funder in publication.funders.iter().flatten() {
            let Some(name) = funder.name.clone().filter(|n| !n.is_empty()) else {
                continue;
            };
            funders.push(FunderRow {
                pub_id: publication.id.clone(),
                funder_id: funder.id.clone(),
                name,
                country: funder.country_name.clone(),
            });
        }

        for investigator in publication.investigators.iter().flatten() {
            investigators.push(InvestigatorRow {
                pub_id: publication.id.clone(),
                investigator_id: investigator.id.clone(),
                first_name: investigator.first_name.clone(),
                last_name: investigator.last_name.clone(),
                role: investigator.role.clone(),
            });
        }
    }

    attach_citations(&mut affiliations, &publications);

    TableSet {
        publications: Some(publications),
        authors: (!authors.is_empty()).then_some(authors),
        affiliations: (!affiliations.is_empty()).then_some(affiliations),
        funders: (!funders.is_empty()).then_some(funders),
        investigators: (!investigators.is_empty()).then_some(investigators),
    }
}

/// Left-join `times_cited` from publications into affiliation rows on the
/// publication ID. Unmatched rows keep `None`; the loader never fabricates
/// a zero. A missing side leaves the rows untouched.
pub fn attach_citations(affiliations: &mut [AffiliationRow], publications: &[Publication]) {
    if affiliations.is_empty() || publications.is_empty() {
        return;
    }

    let citations: HashMap<&str, Option<u32>> =
        publications.iter().map(|p| (p.id.as_str(), p.times_cited)).collect();

    for row in affiliations {
        row.times_cited = citations.get(row.pub_id.as_str()).copied().flatten();
    }
}

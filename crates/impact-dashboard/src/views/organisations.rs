//! Affiliated organisations rollup.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::AffiliationRow;

/// Researchers listed per organization entry.
const TOP_RESEARCHERS: usize = 3;

/// One organization's contribution summary.
#[derive(Debug, Clone, Serialize)]
pub struct OrganisationEntry {
    /// Organization name.
    pub name: String,

    /// Country, when known. Unknown countries form their own group rather
    /// than dropping the organization from the rollup.
    pub country: Option<String>,

    /// Distinct researchers affiliated through this organization.
    pub researcher_count: usize,

    /// Citations summed over this organization's distinct publications.
    pub times_cited: u64,

    /// Most frequently occurring researchers, up to three.
    pub top_researchers: Vec<Researcher>,
}

/// A researcher reference inside an organization entry.
#[derive(Debug, Clone, Serialize)]
pub struct Researcher {
    /// Dimensions researcher ID.
    pub researcher_id: String,

    /// Display name, when both name parts are present.
    pub name: Option<String>,

    /// Affiliation rows carrying this researcher for the organization.
    pub publication_count: usize,
}

#[derive(Default)]
struct Group {
    /// researcher_id -> (row count, display name)
    researchers: HashMap<String, (usize, Option<String>)>,
    /// pub_id -> citation count of that publication (first value wins; all
    /// rows of one publication carry the same count after enrichment)
    publications: HashMap<String, Option<u32>>,
}

/// Group affiliations by (organization, country).
///
/// Researcher counts are distinct over non-blank researcher IDs; citation
/// sums run over distinct publications, with absent counts contributing
/// nothing. Sorted by researcher count descending, then citations, then
/// name, for a deterministic table.
#[must_use]
pub fn organisation_rollup(affiliations: &[AffiliationRow]) -> Vec<OrganisationEntry> {
    let mut groups: HashMap<(String, Option<String>), Group> = HashMap::new();

    for row in affiliations {
        let key = (row.aff_name.clone(), row.aff_country.clone());
        let group = groups.entry(key).or_default();

        if let Some(id) = row.researcher_id.as_deref().filter(|id| !id.is_empty()) {
            let entry = group.researchers.entry(id.to_string()).or_insert((0, None));
            entry.0 += 1;
            if entry.1.is_none() {
                entry.1 = display_name(row);
            }
        }

        group.publications.entry(row.pub_id.clone()).or_insert(row.times_cited);
    }

    let mut entries: Vec<OrganisationEntry> = groups
        .into_iter()
        .map(|((name, country), group)| {
            // The researcher map is keyed by distinct non-blank IDs.
            let researcher_count = group.researchers.len();
            let times_cited =
                group.publications.values().filter_map(|c| *c).map(u64::from).sum();

            let mut researchers: Vec<(String, (usize, Option<String>))> =
                group.researchers.into_iter().collect();
            researchers.sort_by(|(a_id, (a_rows, _)), (b_id, (b_rows, _))| {
                b_rows.cmp(a_rows).then_with(|| a_id.cmp(b_id))
            });

            let top_researchers = researchers
                .into_iter()
                .take(TOP_RESEARCHERS)
                .map(|(researcher_id, (publication_count, name))| Researcher {
                    researcher_id,
                    name,
                    publication_count,
                })
                .collect();

            OrganisationEntry { name, country, researcher_count, times_cited, top_researchers }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.researcher_count
            .cmp(&a.researcher_count)
            .then_with(|| b.times_cited.cmp(&a.times_cited))
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

fn display_name(row: &AffiliationRow) -> Option<String> {
    match (row.first_name.as_deref(), row.last_name.as_deref()) {
        (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
            Some(format!("{first} {last}"))
        }
        _ => None,
    }
}

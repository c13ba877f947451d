//! Report views.
//!
//! Each view is a pure function over borrowed tables:
//! 1. Never mutates its input
//! 2. Treats an absent or empty table as "no data", not an error
//! 3. Produces a serializable summary the formatters render
//!
//! Sort and filter rules are fixed per view; see the individual modules.

mod countries;
mod distribution;
mod key_metrics;
mod organisations;
mod recent;
mod report;
mod top_cited;

pub use countries::{CountryEntry, country_rollup};
pub use distribution::{CitationBucket, DEFAULT_BINS, citation_distribution};
pub use key_metrics::{KeyMetrics, key_metrics};
pub use organisations::{OrganisationEntry, Researcher, organisation_rollup};
pub use recent::{RecentPaper, SIX_MONTHS_DAYS, last_six_months, most_recent};
pub use report::ImpactReport;
pub use top_cited::{CitedArticle, DEFAULT_TOP_N, top_cited};

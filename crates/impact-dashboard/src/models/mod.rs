//! Data models for Dimensions API entities and the normalized tables.
//!
//! Wire models use `#[serde(default)]` for optional fields and match the
//! DSL response naming. Table rows are the flattened per-facet records the
//! views aggregate over.

mod publication;
mod tables;

pub use publication::{
    AffiliationRef, AuthTokenResponse, AuthorRef, DslResponse, FunderRef, InvestigatorRef, Journal,
    Publication, QueryStats,
};
pub use tables::{AffiliationRow, AuthorRow, FunderRow, InvestigatorRow, TableSet};

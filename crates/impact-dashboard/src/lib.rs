//! Research Impact Dashboard
//!
//! A reporting service for the Dimensions Analytics API. Authenticates with
//! an operator-supplied key, runs one fixed publication search for an
//! organization, and serves the resulting impact report (key metrics,
//! top-cited articles, recent papers, organization and country rollups)
//! over HTTP.
//!
//! # Features
//!
//! - **Single-query loader**: one auth round trip, one iterative DSL query
//! - **Memoized**: results cached per (credential, endpoint, query) triple
//! - **Classified failures**: auth, connectivity, and unclassified errors
//!   surface as distinct operator-facing messages
//! - **Pure views**: every report section is a side-effect-free aggregation
//!
//! # Example
//!
//! ```no_run
//! use impact_dashboard::{config::Config, loader::Loader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let loader = Loader::new(&config)?;
//!
//!     let tables = loader.load("my-api-key").await?;
//!     println!("{} publications", tables.publication_count());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod loader;
pub mod models;
pub mod server;
pub mod views;

pub use client::DimensionsClient;
pub use config::Config;
pub use error::{ClientError, LoadError};
pub use loader::Loader;

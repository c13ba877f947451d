//! Configuration for the impact dashboard.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Production endpoint for the Dimensions Analytics API.
    pub const BASE_URL: &str = "https://app.dimensions.ai";

    /// Authentication resource (key exchange for a session token).
    pub const AUTH_PATH: &str = "/api/auth.json";

    /// DSL query resource.
    pub const DSL_PATH: &str = "/api/dsl.json";

    /// Request timeout (DSL queries over large result sets can be slow).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Records fetched per page of an iterative query.
    pub const PAGE_SIZE: usize = 1000;

    /// Upper bound on pages fetched for one query (50k records).
    pub const MAX_PAGES: usize = 50;

    /// Maximum number of memoized load results.
    pub const CACHE_MAX_SIZE: u64 = 64;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Publication field sets for DSL queries.
pub mod fields {
    /// Fields returned by the fixed publication search.
    pub const PUBLICATIONS: &[&str] = &[
        "id",
        "title",
        "authors",
        "pages",
        "type",
        "volume",
        "issue",
        "journal",
        "times_cited",
        "date",
        "date_online",
    ];
}

/// Organization tracked by the default deployment.
pub const DEFAULT_ORGANIZATION: &str = "Australian Urban Research Infrastructure Network";

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dimensions API key (optional until the operator submits one).
    pub api_key: Option<String>,

    /// API endpoint (overridable for testing with mock servers).
    pub endpoint: String,

    /// Organization name the publication search matches against.
    pub organization: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Records per page for iterative queries.
    pub page_size: usize,

    /// Page cap for iterative queries.
    pub max_pages: usize,

    /// Maximum number of memoized load results.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration with an optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            endpoint: api::BASE_URL.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::PAGE_SIZE,
            max_pages: api::MAX_PAGES,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            endpoint: base_url.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            page_size: api::PAGE_SIZE,
            max_pages: api::MAX_PAGES,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("DIMENSIONS_API_KEY").ok());
        if let Ok(endpoint) = std::env::var("DIMENSIONS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(organization) = std::env::var("DASHBOARD_ORGANIZATION") {
            config.organization = organization;
        }
        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Render the fixed DSL query for the configured organization.
    ///
    /// The organization name is matched as an exact phrase, which the DSL
    /// expresses as an escaped quoted string inside the search string.
    #[must_use]
    pub fn dsl_query(&self) -> String {
        format!(
            r#"search publications for "\"{}\"" return publications[{}]"#,
            self.organization.replace('"', ""),
            fields::PUBLICATIONS.join("+")
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

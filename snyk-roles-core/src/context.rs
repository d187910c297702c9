use crate::constants::{DEFAULT_API_VERSION, DEFAULT_REST_API_URL, DEFAULT_V1_API_URL};

/// API endpoints the tools talk to.
/// The access token is not part of it, it goes to `SnykClient::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    // Base of the REST API (memberships), https://api.snyk.io/rest
    pub rest_api_url: String,

    // Base of the v1 API (role updates), https://api.snyk.io/v1
    pub v1_api_url: String,

    // `version` query parameter of REST calls, 2024-10-15
    pub api_version: String,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            rest_api_url: DEFAULT_REST_API_URL.to_string(),
            v1_api_url: DEFAULT_V1_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both APIs at the same host, as a local mock server does
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Context {
            rest_api_url: format!("{}/rest", base),
            v1_api_url: format!("{}/v1", base),
            ..Self::default()
        }
    }
}

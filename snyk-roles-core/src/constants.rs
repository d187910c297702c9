// Constants used throughout the membership tools

// API endpoints
pub const DEFAULT_REST_API_URL: &str = "https://api.snyk.io/rest";
pub const DEFAULT_V1_API_URL: &str = "https://api.snyk.io/v1";
pub const DEFAULT_API_VERSION: &str = "2024-10-15";

// Headers
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
pub const REST_TOKEN_SCHEME: &str = "Token";
pub const V1_TOKEN_SCHEME: &str = "token";
pub const USER_AGENT: &str = concat!("snyk-roles/", env!("CARGO_PKG_VERSION"));

// Value used when a username or role name is absent
pub const NOT_AVAILABLE: &str = "N/A";

pub const MEMBERS_CSV_HEADER: &str = "username,user_id,role_name,role_id";

use std::fmt;

/// Custom error type for Snyk API operations
#[derive(Debug)]
pub enum SnykError {
    /// The API answered with a non-success status
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    /// Connection to the API host could not be established
    Connection(reqwest::Error),
    /// The request did not complete in time
    Timeout(reqwest::Error),
    /// Any other request error (redirects, body decoding, builder errors)
    Request(reqwest::Error),
    /// JSON parsing errors
    Json(serde_json::Error),
    /// Endpoint URL could not be built
    Url(url::ParseError),
    /// Configuration errors
    Config(String),
}

impl SnykError {
    /// Short name of the failure class, used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SnykError::Status { .. } => "http",
            SnykError::Connection(_) => "connection",
            SnykError::Timeout(_) => "timeout",
            SnykError::Request(_) => "request",
            SnykError::Json(_) => "json",
            SnykError::Url(_) => "url",
            SnykError::Config(_) => "config",
        }
    }
}

impl fmt::Display for SnykError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnykError::Status { status, url } => write!(f, "HTTP Error: {} for url: {}", status, url),
            SnykError::Connection(err) => write!(f, "Error Connecting: {}", err),
            SnykError::Timeout(err) => write!(f, "Timeout Error: {}", err),
            SnykError::Request(err) => write!(f, "An unexpected error occurred: {}", err),
            SnykError::Json(err) => write!(f, "An unexpected error occurred: invalid JSON: {}", err),
            SnykError::Url(err) => write!(f, "Invalid URL: {}", err),
            SnykError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SnykError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnykError::Connection(err) => Some(err),
            SnykError::Timeout(err) => Some(err),
            SnykError::Request(err) => Some(err),
            SnykError::Json(err) => Some(err),
            SnykError::Url(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SnykError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SnykError::Timeout(err);
        }
        if err.is_connect() {
            return SnykError::Connection(err);
        }
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => SnykError::Status {
                status,
                url: url.to_string(),
            },
            _ => SnykError::Request(err),
        }
    }
}

impl From<serde_json::Error> for SnykError {
    fn from(err: serde_json::Error) -> Self {
        SnykError::Json(err)
    }
}

impl From<url::ParseError> for SnykError {
    fn from(err: url::ParseError) -> Self {
        SnykError::Url(err)
    }
}

impl From<String> for SnykError {
    fn from(err: String) -> Self {
        SnykError::Config(err)
    }
}

/// Result type alias for Snyk API operations
pub type Result<T> = std::result::Result<T, SnykError>;

use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum KnowledgeTreeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    #[error("No access token for {0}")]
    MissingToken(&'static str),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while paging through a provider listing
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KnowledgeTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ConfigError::Invalid("timeout_secs must be greater than 0".into());
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn error_conversion() {
        let config_err = ConfigError::Invalid("test".into());
        let err: KnowledgeTreeError = config_err.into();
        assert!(matches!(err, KnowledgeTreeError::Config(_)));
    }

    #[test]
    fn status_error_names_url() {
        let err: KnowledgeTreeError = ListingError::Status {
            status: 401,
            url: "https://api.dropboxapi.com/2/files/list_folder".into(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("list_folder"));
    }

    #[test]
    fn missing_token_names_provider() {
        let err = KnowledgeTreeError::MissingToken("dropbox");
        assert_eq!(err.to_string(), "No access token for dropbox");
    }
}

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::HttpConfig;
use crate::error::{ListingError, Result};

/// Build the blocking client shared by provider clients
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("knowledge-tree/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ListingError::Http)?;
    Ok(client)
}

/// Fail on any non-2xx status.
pub fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "Provider request failed");
        return Err(ListingError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }
        .into());
    }
    Ok(response)
}

/// Check the status and decode a JSON body.
pub fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let body = check_status(response, url)?
        .text()
        .map_err(ListingError::Http)?;
    decode(&body, url)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, url: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        ListingError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Check the status and return the raw body.
pub fn read_bytes(response: Response, url: &str) -> Result<Vec<u8>> {
    let bytes = check_status(response, url)?
        .bytes()
        .map_err(ListingError::Http)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KnowledgeTreeError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        ok: bool,
    }

    #[test]
    fn decode_reads_valid_json() {
        let probe: Probe = decode(r#"{"ok": true}"#, "https://example.test").unwrap();
        assert!(probe.ok);
    }

    #[test]
    fn decode_failure_names_url() {
        let err = decode::<Probe>("<html>", "https://example.test/list").unwrap_err();
        match err {
            KnowledgeTreeError::Listing(ListingError::Decode { url, .. }) => {
                assert_eq!(url, "https://example.test/list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn client_builds_with_default_config() {
        assert!(build_client(&HttpConfig::default()).is_ok());
    }
}

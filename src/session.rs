//! Per-run application state: the selected brain and provider credentials.
//!
//! A session is started once from configuration and command-line input,
//! handed to commands by reference and ended explicitly, which drops any
//! access tokens it holds.

use std::collections::HashMap;
use std::fmt;

use crate::error::{KnowledgeTreeError, Result};

/// Cloud storage providers a session can hold credentials for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Dropbox,
    GoogleDrive,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Dropbox => "dropbox",
            Provider::GoogleDrive => "google drive",
        }
    }
}

/// An OAuth access token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Default)]
pub struct Session {
    brain_id: Option<String>,
    tokens: HashMap<Provider, AccessToken>,
}

impl Session {
    pub fn start(brain_id: Option<String>) -> Self {
        tracing::debug!(brain_id = ?brain_id, "Session started");
        Self {
            brain_id,
            tokens: HashMap::new(),
        }
    }

    /// Attach a token; blank tokens are ignored.
    pub fn with_token(mut self, provider: Provider, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.tokens.insert(provider, AccessToken::new(token.trim()));
        }
        self
    }

    pub fn brain_id(&self) -> Option<&str> {
        self.brain_id.as_deref()
    }

    pub fn token(&self, provider: Provider) -> Result<&AccessToken> {
        self.tokens
            .get(&provider)
            .ok_or(KnowledgeTreeError::MissingToken(provider.name()))
    }

    pub fn has_token(&self, provider: Provider) -> bool {
        self.tokens.contains_key(&provider)
    }

    /// Tear the session down, discarding credentials.
    pub fn end(mut self) {
        let providers = self.tokens.len();
        self.tokens.clear();
        tracing::debug!(providers, "Session ended");
    }
}

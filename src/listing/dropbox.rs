//! Dropbox file listing and download.
//!
//! Only the resource-server side lives here. Exchanging an authorization
//! code for a token needs the app secret and belongs on a trusted backend;
//! this module starts from an already-issued access token.

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::http::{read_bytes, read_json};
use super::page::{Page, PageSource};
use crate::config::DropboxConfig;
use crate::error::{KnowledgeTreeError, ListingError, Result};
use crate::session::AccessToken;
use crate::tree::{EntryKind, KeyedEntry};

pub const AUTHORIZE_URL: &str = "https://www.dropbox.com/oauth2/authorize";

/// Scopes needed to list and download files
pub const SCOPES: &str = "files.metadata.read files.content.read";

/// A file or folder entry from `list_folder`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DropboxEntry {
    #[serde(rename = ".tag")]
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub is_downloadable: Option<bool>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl KeyedEntry for DropboxEntry {
    /// The lower-cased path. Only its last component is reliably cased in
    /// `path_display`, so folders are matched on this one.
    fn entry_path(&self) -> &str {
        self.path_lower
            .as_deref()
            .or(self.path_display.as_deref())
            .unwrap_or("")
    }

    fn kind(&self) -> EntryKind {
        match self.tag.as_str() {
            "folder" => EntryKind::Directory,
            "file" if self.is_downloadable.unwrap_or(true) => EntryKind::File,
            _ => EntryKind::Unknown,
        }
    }

    fn entry_title(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    /// The display path, which is what downloads are addressed by.
    fn entry_id(&self) -> Option<&str> {
        self.path_display
            .as_deref()
            .or(self.path_lower.as_deref())
            .filter(|path| !path.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ListFolderResult {
    entries: Vec<DropboxEntry>,
    cursor: String,
    has_more: bool,
}

impl From<ListFolderResult> for Page<DropboxEntry> {
    fn from(result: ListFolderResult) -> Self {
        if result.has_more {
            Page::with_cursor(result.entries, result.cursor)
        } else {
            Page::last(result.entries)
        }
    }
}

pub struct DropboxClient {
    http: Client,
    token: AccessToken,
    api_base: String,
    content_base: String,
}

impl DropboxClient {
    pub fn new(http: Client, token: AccessToken, config: &DropboxConfig) -> Self {
        Self {
            http,
            token,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            content_base: config.content_base.trim_end_matches('/').to_string(),
        }
    }

    /// Recursive listing of `path` ("" for the whole Dropbox).
    pub fn list_folder(&self, path: &str) -> ListFolder<'_> {
        ListFolder {
            client: self,
            path: path.to_string(),
        }
    }

    /// Download a file by its path.
    pub fn download(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/download", self.content_base);
        let arg = json!({ "path": path }).to_string();
        tracing::debug!(%path, "Downloading from Dropbox");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .header("Dropbox-API-Arg", arg)
            .send()
            .map_err(ListingError::Http)?;
        read_bytes(response, &url)
    }

    fn post_json(&self, endpoint: &str, body: serde_json::Value) -> Result<ListFolderResult> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .json(&body)
            .send()
            .map_err(ListingError::Http)?;
        read_json(response, &url)
    }
}

/// Paged `list_folder` / `list_folder/continue` request.
pub struct ListFolder<'a> {
    client: &'a DropboxClient,
    path: String,
}

impl PageSource for ListFolder<'_> {
    type Item = DropboxEntry;

    fn fetch(&mut self, cursor: Option<&str>) -> Result<Page<DropboxEntry>> {
        let (endpoint, body) = list_folder_request(&self.path, cursor);
        Ok(self.client.post_json(endpoint, body)?.into())
    }
}

/// Endpoint and body for the first page (`cursor == None`) or a later one.
fn list_folder_request(path: &str, cursor: Option<&str>) -> (&'static str, serde_json::Value) {
    match cursor {
        None => (
            "files/list_folder",
            json!({
                "path": path,
                "recursive": true,
                "include_mounted_folders": true,
                "include_has_explicit_shared_members": true,
            }),
        ),
        Some(cursor) => ("files/list_folder/continue", json!({ "cursor": cursor })),
    }
}

/// URL that starts the authorization-code flow for `app_key`.
pub fn authorize_url(app_key: &str, redirect_uri: &str) -> Result<String> {
    let url = Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", app_key),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", SCOPES),
        ],
    )
    .map_err(|e| KnowledgeTreeError::InvalidUrl(e.to_string()))?;
    Ok(url.to_string())
}

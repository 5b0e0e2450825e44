//! Google Drive v3 file listing and download.

use reqwest::blocking::Client;
use serde::Deserialize;

use super::http::{read_bytes, read_json};
use super::page::{Page, PageSource};
use crate::config::DriveConfig;
use crate::error::{ListingError, Result};
use crate::session::AccessToken;
use crate::tree::CloudRecord;

/// Fields requested for every listed file
pub const FILE_FIELDS: &str = "nextPageToken,files(id,name,mimeType,parents)";

/// Native Google documents are exported in this format
pub const EXPORT_MIME: &str = "application/pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<CloudRecord>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl From<FileList> for Page<CloudRecord> {
    fn from(list: FileList) -> Self {
        Page {
            items: list.files,
            next_cursor: list.next_page_token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileId {
    id: String,
}

pub struct DriveClient {
    http: Client,
    token: AccessToken,
    api_base: String,
    page_size: Option<u32>,
}

impl DriveClient {
    pub fn new(http: Client, token: AccessToken, config: &DriveConfig) -> Self {
        Self {
            http,
            token,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }

    /// Paged listing of every file the token can see.
    pub fn list_files(&self) -> FileListing<'_> {
        FileListing { client: self }
    }

    /// Id of the "My Drive" root folder.
    pub fn root_folder_id(&self) -> Result<String> {
        let url = format!("{}/files/root", self.api_base);
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose())
            .query(&[("fields", "id")])
            .send()
            .map_err(ListingError::Http)?;
        let root: FileId = read_json(response, &url)?;
        Ok(root.id)
    }

    /// Download a file's content; Google documents are exported to PDF.
    pub fn download(&self, record: &CloudRecord) -> Result<Vec<u8>> {
        let (url, query) = self.download_request(record);
        tracing::debug!(
            id = %record.id,
            export = record.is_google_format(),
            "Downloading Drive file"
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose())
            .query(&query)
            .send()
            .map_err(ListingError::Http)?;
        read_bytes(response, &url)
    }

    fn download_request(
        &self,
        record: &CloudRecord,
    ) -> (String, [(&'static str, &'static str); 1]) {
        if record.is_google_format() {
            (
                format!("{}/files/{}/export", self.api_base, record.id),
                [("mimeType", EXPORT_MIME)],
            )
        } else {
            (
                format!("{}/files/{}", self.api_base, record.id),
                [("alt", "media")],
            )
        }
    }
}

/// Paged `files.list` request.
pub struct FileListing<'a> {
    client: &'a DriveClient,
}

impl PageSource for FileListing<'_> {
    type Item = CloudRecord;

    fn fetch(&mut self, cursor: Option<&str>) -> Result<Page<CloudRecord>> {
        let url = format!("{}/files", self.client.api_base);
        let query = list_query(self.client.page_size, cursor);

        let response = self
            .client
            .http
            .get(&url)
            .bearer_auth(self.client.token.expose())
            .query(&query)
            .send()
            .map_err(ListingError::Http)?;
        let list: FileList = read_json(response, &url)?;
        Ok(list.into())
    }
}

/// Query for one `files.list` page.
fn list_query(page_size: Option<u32>, cursor: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("fields", FILE_FIELDS.to_string())];
    if let Some(size) = page_size {
        query.push(("pageSize", size.to_string()));
    }
    if let Some(token) = cursor {
        query.push(("pageToken", token.to_string()));
    }
    query
}

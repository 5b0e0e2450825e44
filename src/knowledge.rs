//! Knowledge attached to a brain, as returned by the backend.

use serde::{Deserialize, Serialize};

/// A file uploaded into a brain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedKnowledge {
    pub id: String,
    pub brain_id: String,
    pub file_name: String,
    pub extension: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// A crawled URL attached to a brain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledKnowledge {
    pub id: String,
    pub brain_id: String,
    pub url: String,
    pub extension: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// One knowledge item. Anything with a `url` is crawled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Knowledge {
    Crawled(CrawledKnowledge),
    Uploaded(UploadedKnowledge),
}

impl Knowledge {
    pub fn id(&self) -> &str {
        match self {
            Knowledge::Crawled(k) => &k.id,
            Knowledge::Uploaded(k) => &k.id,
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        match self {
            Knowledge::Crawled(k) => k.file_path.as_deref(),
            Knowledge::Uploaded(k) => k.file_path.as_deref(),
        }
    }

    /// File name for uploads, URL for crawled pages
    pub fn display_name(&self) -> &str {
        match self {
            Knowledge::Crawled(k) => &k.url,
            Knowledge::Uploaded(k) => &k.file_name,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Knowledge::Uploaded(_))
    }
}

/// One optional path per knowledge item, ready for the tree builder.
pub fn path_list(items: &[Knowledge]) -> impl Iterator<Item = Option<&str>> {
    items.iter().map(Knowledge::file_path)
}

/// Knowledge whose path was checked, in checked-key order.
pub fn checked_knowledge<'a, S: AsRef<str>>(
    items: &'a [Knowledge],
    checked: &[S],
) -> Vec<&'a Knowledge> {
    checked
        .iter()
        .flat_map(|key| {
            items
                .iter()
                .filter(move |k| k.file_path() == Some(key.as_ref()))
        })
        .collect()
}

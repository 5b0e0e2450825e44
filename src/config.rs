use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::tree::{BuildOptions, DuplicateLeaves, EmptySegments, DEFAULT_ROOT_LABEL};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree: TreeConfig,
    pub output: OutputConfig,
    pub dropbox: DropboxConfig,
    pub gdrive: DriveConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Repeated full paths: keep, merge
    pub duplicate_leaves: DuplicateLeaves,
    /// Empty path segments: keep, skip
    pub empty_segments: EmptySegments,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: tree, json
    pub format: OutputFormat,
    /// Maximum depth to display (unset = unlimited)
    pub max_depth: Option<usize>,
    /// Children shown per directory (unset = all)
    pub max_children: Option<usize>,
    /// Print node keys next to titles
    pub show_keys: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropboxConfig {
    /// RPC endpoint base
    pub api_base: String,
    /// Content (download) endpoint base
    pub content_base: String,
    /// Folder to list, "" for the whole Dropbox
    pub root_path: String,
    /// Public app key, used only to build the authorization URL
    pub app_key: Option<String>,
    /// Redirect URI registered for the app
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub api_base: String,
    /// Label file paths start from
    pub root_label: String,
    /// Files requested per page (unset = provider default)
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.dropboxapi.com/2".to_string(),
            content_base: "https://content.dropboxapi.com/2".to_string(),
            root_path: String::new(),
            app_key: None,
            redirect_uri: None,
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.googleapis.com/drive/v3".to_string(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            page_size: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl TreeConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            duplicate_leaves: self.duplicate_leaves,
            empty_segments: self.empty_segments,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/knowledge-tree/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("knowledge-tree").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.gdrive.root_label.trim().is_empty() {
            return Err(ConfigError::Invalid("gdrive.root_label must not be empty".into()));
        }
        if let Some(size) = self.gdrive.page_size {
            if !(1..=1000).contains(&size) {
                return Err(ConfigError::Invalid(format!(
                    "gdrive.page_size must be between 1 and 1000, got {}",
                    size
                )));
            }
        }
        for (name, url) in [
            ("dropbox.api_base", &self.dropbox.api_base),
            ("dropbox.content_base", &self.dropbox.content_base),
            ("gdrive.api_base", &self.gdrive.api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gdrive.root_label, "gDrive");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[tree]"));
        assert!(toml_str.contains("duplicate_leaves = \"keep\""));
    }

    #[test]
    fn default_tree_options_keep_everything() {
        let options = TreeConfig::default().build_options();
        assert_eq!(options, BuildOptions::default());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_base_is_rejected() {
        let mut config = Config::default();
        config.dropbox.api_base = "ftp://example.com".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dropbox.api_base"));
    }

    #[test]
    fn page_size_bounds() {
        let mut config = Config::default();
        config.gdrive.page_size = Some(1000);
        assert!(config.validate().is_ok());
        config.gdrive.page_size = Some(0);
        assert!(config.validate().is_err());
    }
}

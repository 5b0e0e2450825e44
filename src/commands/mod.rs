//! Command implementations

pub mod dropbox;
pub mod gdrive;
pub mod knowledge;
pub mod paths;
pub mod records;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;

use crate::cli::OutputArgs;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::KnowledgeTreeError;
use crate::tree::{self, format_json, format_tree, FormatOptions, TreeNode};

/// Read a whole input file, or stdin for "-".
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }

    fs::read_to_string(path).map_err(|source| {
        KnowledgeTreeError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

pub(crate) fn parse_json<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|source| {
        KnowledgeTreeError::Parse {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Render a tree as JSON or as a box-drawing tree with a summary line.
///
/// Flags win over the `[output]` config section.
pub(crate) fn render(
    nodes: &[TreeNode],
    args: &OutputArgs,
    config: &OutputConfig,
    root_label: &str,
) -> Result<String> {
    if args.json || config.format == OutputFormat::Json {
        return Ok(format_json(nodes, true)?);
    }

    let mut options = FormatOptions::new()
        .with_keys(args.keys || config.show_keys)
        .with_root_label(root_label);
    if let Some(depth) = args.max_depth.or(config.max_depth) {
        options = options.with_max_depth(depth);
    }
    if let Some(n) = args.top.or(config.max_children) {
        options = options.with_max_children(n);
    }

    let stats = tree::stats(nodes);
    let mut output = format_tree(nodes, &options);
    output.push('\n');
    output.push_str(&format!(
        "Total: {} files in {} directories",
        stats.files, stats.directories
    ));
    Ok(output)
}

/// Spinner shown on stderr while a provider listing pages in.
pub(crate) fn listing_spinner(quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Write downloaded bytes under `dir`, keeping the tree key as relative path.
pub(crate) fn write_download(dir: &Path, key: &str, bytes: &[u8]) -> Result<()> {
    let relative: std::path::PathBuf = key
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect();
    if relative.as_os_str().is_empty() {
        return Err(KnowledgeTreeError::InvalidPath(key.to_string()).into());
    }

    let target = dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| KnowledgeTreeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&target, bytes).map_err(|source| KnowledgeTreeError::Io {
        path: target.clone(),
        source,
    })?;
    tracing::info!(path = %target.display(), bytes = bytes.len(), "Saved file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;
    use tempfile::TempDir;

    fn sample() -> Vec<TreeNode> {
        build_tree(["docs/guide.md", "notes.txt"])
    }

    #[test]
    fn render_tree_with_summary() {
        let output = render(&sample(), &OutputArgs::default(), &OutputConfig::default(), ".")
            .unwrap();
        assert!(output.starts_with(".\n"));
        assert!(output.ends_with("Total: 2 files in 1 directories"));
    }

    #[test]
    fn config_format_selects_json() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let output = render(&sample(), &OutputArgs::default(), &config, ".").unwrap();
        assert!(output.starts_with('['));
        assert!(!output.contains("Total:"));
    }

    #[test]
    fn depth_flag_overrides_config() {
        let config = OutputConfig {
            max_depth: Some(5),
            ..OutputConfig::default()
        };
        let args = OutputArgs {
            max_depth: Some(1),
            ..OutputArgs::default()
        };
        let output = render(&sample(), &args, &config, ".").unwrap();
        assert!(output.contains("docs/"));
        assert!(!output.contains("guide.md"));
    }

    #[test]
    fn downloads_keep_key_layout() {
        let dir = TempDir::new().unwrap();
        write_download(dir.path(), "Reports/q1.pdf", b"pdf").unwrap();
        assert_eq!(fs::read(dir.path().join("Reports/q1.pdf")).unwrap(), b"pdf");
    }

    #[test]
    fn downloads_cannot_escape_target() {
        let dir = TempDir::new().unwrap();
        write_download(dir.path(), "../../etc/passwd", b"x").unwrap();
        assert!(dir.path().join("etc/passwd").exists());
        assert!(write_download(dir.path(), "/..", b"x").is_err());
    }
}

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{KnowledgeTreeError, Result};

/// List files under `root` as slash-separated paths relative to it.
///
/// Entries are sorted by file name within each directory so the output is
/// stable across runs. Hidden entries are skipped unless requested.
pub fn list_directory(root: &Path, include_hidden: bool) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(KnowledgeTreeError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || include_hidden || !is_hidden(entry.file_name())
        });

    let mut paths = Vec::new();
    for result in walker {
        let entry = result.map_err(|err| KnowledgeTreeError::Io {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: err.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        paths.push(segments.join("/"));
    }

    tracing::debug!(root = %root.display(), files = paths.len(), "Listed local directory");
    Ok(paths)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

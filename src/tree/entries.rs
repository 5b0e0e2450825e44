//! Tree building from entries that carry their own full path.
//!
//! Dropbox reports every file and folder with an absolute lower-cased path
//! such as `/projects/notes.txt` plus a display name. Paths decide where a
//! node goes and names decide what it is called. Folders become directories
//! even when empty, files become leaves, anything else is left out.

use super::arena::TreeArena;
use super::builder::DuplicateLeaves;
use super::node::TreeNode;

/// How an entry should appear in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Deleted entries, non-downloadable files and unknown tags
    Unknown,
}

/// An entry that knows its full slash-separated path.
pub trait KeyedEntry {
    /// Full path, with or without a leading `/`
    fn entry_path(&self) -> &str;

    fn kind(&self) -> EntryKind;

    /// Title for the entry's own node; the last path segment when `None`
    fn entry_title(&self) -> Option<&str> {
        None
    }

    /// Provider identifier kept on the node, if any
    fn entry_id(&self) -> Option<&str> {
        None
    }
}

/// Build a tree from path-keyed entries in listing order.
pub fn build_entry_tree<E: KeyedEntry>(
    entries: &[E],
    duplicate_leaves: DuplicateLeaves,
) -> Vec<TreeNode> {
    let mut arena = TreeArena::new();
    let mut skipped = 0usize;

    for entry in entries {
        let kind = entry.kind();
        let path = entry.entry_path().trim_start_matches('/');
        if kind == EntryKind::Unknown || path.is_empty() {
            skipped += 1;
            continue;
        }

        let segments: Vec<&str> = path.split('/').collect();
        let Some((last, directories)) = segments.split_last() else {
            skipped += 1;
            continue;
        };

        let mut parent = arena.root();
        for segment in directories {
            parent = arena.directory(parent, segment);
        }

        let node = match kind {
            EntryKind::Directory => arena.directory(parent, last),
            EntryKind::File => {
                if duplicate_leaves == DuplicateLeaves::Merge
                    && arena.find_leaf(parent, last).is_some()
                {
                    skipped += 1;
                    continue;
                }
                arena.leaf(parent, last)
            }
            EntryKind::Unknown => continue,
        };

        if let Some(title) = entry.entry_title().filter(|t| !t.is_empty()) {
            arena.set_title(node, title);
        }
        if let Some(id) = entry.entry_id() {
            arena.set_id_if_absent(node, id);
        }
    }

    tracing::debug!(
        entries = entries.len(),
        nodes = arena.len(),
        skipped,
        "Built entry tree"
    );

    arena.into_nodes()
}

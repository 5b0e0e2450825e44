//! Tree building from provider metadata records that point at their parent.
//!
//! Google Drive lists files as `{ id, name, mimeType, parents }`. Records are
//! grouped under `parents[0]`; any record whose parent cannot be resolved
//! becomes a root, including records caught in a parent cycle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::arena::{NodeId, TreeArena};
use super::builder::DuplicateLeaves;
use super::node::TreeNode;

/// Google Drive's folder mime type
pub const DRIVE_FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Label prefixed to every `file_path` when none is configured
pub const DEFAULT_ROOT_LABEL: &str = "gDrive";

/// A cloud file as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl CloudRecord {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(DRIVE_FOLDER_MIME)
            || matches!(self.file_type.as_deref(), Some("directory" | "folder"))
    }

    /// Native Google documents have to be exported rather than downloaded.
    pub fn is_google_format(&self) -> bool {
        !self.is_folder()
            && self
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.contains("vnd.google-apps"))
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// Options for [`build_record_tree`].
#[derive(Debug, Clone)]
pub struct RecordTreeOptions {
    /// The provider's root folder id; records under it are roots.
    pub root_id: Option<String>,
    /// Synthetic label every `file_path` starts from. Empty for none.
    pub root_label: String,
    pub duplicate_leaves: DuplicateLeaves,
}

impl Default for RecordTreeOptions {
    fn default() -> Self {
        Self {
            root_id: None,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            duplicate_leaves: DuplicateLeaves::Keep,
        }
    }
}

impl RecordTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn with_duplicate_leaves(mut self, policy: DuplicateLeaves) -> Self {
        self.duplicate_leaves = policy;
        self
    }
}

/// Build a tree from parent-pointer records.
///
/// Keys are cumulative title paths, `id` carries the record id and
/// `file_path` is the key under `options.root_label`.
pub fn build_record_tree(records: &[CloudRecord], options: &RecordTreeOptions) -> Vec<TreeNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.contains_key(record.id.as_str()) {
            tracing::debug!(id = %record.id, "Ignoring duplicate record id");
            continue;
        }
        index.insert(record.id.as_str(), i);
        unique.push(i);
    }

    let mut roots = Vec::new();
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    for &i in &unique {
        match resolve_parent(records, &index, i, options.root_id.as_deref()) {
            Some(parent) => children.entry(parent).or_default().push(i),
            None => roots.push(i),
        }
    }

    let mut placer = Placer {
        records,
        children: &children,
        placed: vec![false; records.len()],
        arena: TreeArena::new(),
        duplicate_leaves: options.duplicate_leaves,
    };

    for &root in &roots {
        placer.place_subtree(root);
    }

    // Whatever is still unplaced hangs off a cycle or under a file.
    let mut promoted = 0usize;
    for &i in &unique {
        if !placer.placed[i] {
            promoted += 1;
            placer.place_subtree(i);
        }
    }

    tracing::debug!(
        records = records.len(),
        roots = roots.len(),
        promoted,
        nodes = placer.arena.len(),
        "Built record tree"
    );

    let mut nodes = placer.arena.into_nodes();
    assign_file_paths(&mut nodes, &options.root_label);
    nodes
}

fn resolve_parent(
    records: &[CloudRecord],
    index: &HashMap<&str, usize>,
    i: usize,
    root_id: Option<&str>,
) -> Option<usize> {
    let parent_id = records[i].parent_id()?;
    if root_id == Some(parent_id) {
        return None;
    }
    index.get(parent_id).copied().filter(|&parent| parent != i)
}

struct Placer<'a> {
    records: &'a [CloudRecord],
    children: &'a HashMap<usize, Vec<usize>>,
    placed: Vec<bool>,
    arena: TreeArena,
    duplicate_leaves: DuplicateLeaves,
}

impl Placer<'_> {
    /// Place `start` under the arena root, then its descendants depth-first.
    fn place_subtree(&mut self, start: usize) {
        let mut stack: Vec<(usize, NodeId)> = vec![(start, self.arena.root())];

        while let Some((i, parent)) = stack.pop() {
            if self.placed[i] {
                continue;
            }
            self.placed[i] = true;

            let record = &self.records[i];
            if record.is_folder() {
                let node = self.arena.directory(parent, &record.name);
                self.arena.set_id_if_absent(node, &record.id);
                if let Some(kids) = self.children.get(&i) {
                    stack.extend(kids.iter().rev().map(|&kid| (kid, node)));
                }
            } else {
                if self.duplicate_leaves == DuplicateLeaves::Merge
                    && self.arena.find_leaf(parent, &record.name).is_some()
                {
                    continue;
                }
                let node = self.arena.leaf(parent, &record.name);
                self.arena.set_id_if_absent(node, &record.id);
            }
        }
    }
}

/// Set `file_path` on every node to its key under `root_label`.
pub fn assign_file_paths(nodes: &mut [TreeNode], root_label: &str) {
    let mut stack: Vec<&mut TreeNode> = nodes.iter_mut().collect();
    while let Some(node) = stack.pop() {
        match node {
            TreeNode::Directory(dir) => {
                dir.file_path = Some(label_path(root_label, &dir.key));
                stack.extend(dir.children.iter_mut());
            }
            TreeNode::Leaf(leaf) => {
                leaf.file_path = Some(label_path(root_label, &leaf.key));
            }
        }
    }
}

fn label_path(root_label: &str, key: &str) -> String {
    if root_label.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", root_label, key)
    }
}

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// A directory in the tree. Never a leaf, even when it has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Single path segment this directory represents
    pub title: String,

    /// Slash-joined titles from the root down to this node
    pub key: String,

    /// Provider identifier (Drive file id, Dropbox path), if any
    pub id: Option<String>,

    /// Path under a synthetic root label, set by the record builder
    pub file_path: Option<String>,

    /// Children in first-seen order
    pub children: Vec<TreeNode>,
}

/// A file in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub title: String,
    pub key: String,
    pub id: Option<String>,
    pub file_path: Option<String>,
}

/// One node of a checkbox tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory(DirectoryNode),
    Leaf(LeafNode),
}

impl DirectoryNode {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            id: None,
            file_path: None,
            children: Vec::new(),
        }
    }
}

impl LeafNode {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            id: None,
            file_path: None,
        }
    }
}

impl TreeNode {
    pub fn title(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.title,
            TreeNode::Leaf(leaf) => &leaf.title,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.key,
            TreeNode::Leaf(leaf) => &leaf.key,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            TreeNode::Directory(dir) => dir.id.as_deref(),
            TreeNode::Leaf(leaf) => leaf.id.as_deref(),
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        match self {
            TreeNode::Directory(dir) => dir.file_path.as_deref(),
            TreeNode::Leaf(leaf) => leaf.file_path.as_deref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Children of a directory; always empty for a leaf.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Directory(dir) => &dir.children,
            TreeNode::Leaf(_) => &[],
        }
    }
}

/// Serialized in the shape tree-view widgets expect:
/// `{"title", "key", "isLeaf", "children"}` plus `id` / `filePath` when known.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let optional = usize::from(self.id().is_some()) + usize::from(self.file_path().is_some());
        let mut state = serializer.serialize_struct("TreeNode", 4 + optional)?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("key", self.key())?;
        state.serialize_field("isLeaf", &self.is_leaf())?;
        state.serialize_field("children", self.children())?;
        if let Some(id) = self.id() {
            state.serialize_field("id", id)?;
        }
        if let Some(file_path) = self.file_path() {
            state.serialize_field("filePath", file_path)?;
        }
        state.end()
    }
}

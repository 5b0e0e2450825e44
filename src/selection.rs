//! Checked keys coming back from a tree view.
//!
//! A checkbox tree reports directory keys alongside file keys. Downloads
//! only care about files, and the chat file filter only about paths the
//! brain actually contains.

use crate::tree::{self, LeafNode, TreeNode};

/// Ordered, de-duplicated set of checked keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(checked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = Vec::new();
        for key in checked {
            let key = key.into();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Checked keys that name a leaf of `tree`, in checked order.
    ///
    /// Same-named files in one folder share a key; only the first of them
    /// is returned and the rest are reported with a warning.
    pub fn files<'a>(&self, tree: &'a [TreeNode]) -> Vec<&'a LeafNode> {
        for key in self.ambiguous(tree) {
            tracing::warn!(%key, "Checked key names several files; using the first");
        }
        self.keys
            .iter()
            .filter_map(|key| tree::leaves(tree).find(|leaf| leaf.key == *key))
            .collect()
    }

    /// Checked keys that match more than one leaf of `tree`.
    pub fn ambiguous(&self, tree: &[TreeNode]) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|key| tree::leaves(tree).filter(|leaf| leaf.key == **key).count() > 1)
            .map(String::as_str)
            .collect()
    }

    /// Checked keys that appear in `known`, in checked order.
    pub fn within<S: AsRef<str>>(&self, known: &[S]) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|key| known.iter().any(|k| k.as_ref() == key.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    #[test]
    fn duplicates_are_dropped() {
        let selection = Selection::new(["a", "b", "a"]);
        assert_eq!(selection.keys(), &["a".to_string(), "b".to_string()]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn files_ignore_directories_and_unknown_keys() {
        let tree = build_tree(["docs/a.md", "docs/b.md", "c.txt"]);
        let selection = Selection::new(["docs", "c.txt", "docs/a.md", "ghost"]);
        let keys: Vec<_> = selection
            .files(&tree)
            .iter()
            .map(|l| l.key.as_str())
            .collect();
        assert_eq!(keys, vec!["c.txt", "docs/a.md"]);
    }

    #[test]
    fn within_filters_against_known_paths() {
        let known = vec!["folder1/file1.txt".to_string(), "file4.txt".to_string()];
        let selection = Selection::new(["folder1", "file4.txt", "folder1/file1.txt"]);
        assert_eq!(
            selection.within(&known),
            vec!["file4.txt", "folder1/file1.txt"]
        );
    }

    #[test]
    fn empty_selection() {
        let selection = Selection::default();
        assert!(selection.is_empty());
        assert!(selection.files(&build_tree(["a"])).is_empty());
    }

    #[test]
    fn same_named_files_are_reported_as_ambiguous() {
        let tree = build_tree(["Reports/q1.pdf", "Reports/q1.pdf", "Reports/q2.pdf"]);
        let selection = Selection::new(["Reports/q1.pdf", "Reports/q2.pdf"]);

        assert_eq!(selection.ambiguous(&tree), vec!["Reports/q1.pdf"]);
        assert_eq!(selection.files(&tree).len(), 2);
    }
}

use super::node::{LeafNode, TreeNode};

/// Pre-order iterator over a forest, yielding each node with its depth.
pub struct PreOrder<'a> {
    stack: Vec<(&'a TreeNode, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// Walk every node depth-first, roots at depth 0.
pub fn walk(nodes: &[TreeNode]) -> PreOrder<'_> {
    PreOrder {
        stack: nodes.iter().rev().map(|node| (node, 0)).collect(),
    }
}

/// First node with the given key.
pub fn find<'a>(nodes: &'a [TreeNode], key: &str) -> Option<&'a TreeNode> {
    walk(nodes).map(|(node, _)| node).find(|node| node.key() == key)
}

/// First node carrying the given provider id.
pub fn find_by_id<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    walk(nodes)
        .map(|(node, _)| node)
        .find(|node| node.id() == Some(id))
}

/// Whether some leaf has this key. Directory keys answer false.
pub fn is_leaf_key(nodes: &[TreeNode], key: &str) -> bool {
    walk(nodes).any(|(node, _)| node.is_leaf() && node.key() == key)
}

/// All leaves in pre-order.
pub fn leaves(nodes: &[TreeNode]) -> impl Iterator<Item = &LeafNode> {
    walk(nodes).filter_map(|(node, _)| match node {
        TreeNode::Leaf(leaf) => Some(leaf),
        TreeNode::Directory(_) => None,
    })
}

pub fn count_leaves(nodes: &[TreeNode]) -> usize {
    leaves(nodes).count()
}

/// Rebuild `root_label/title/.../title` for the node with `key` by joining
/// the titles met on the way down. `None` if no node has the key.
pub fn find_path_by_key(nodes: &[TreeNode], key: &str, root_label: &str) -> Option<String> {
    let mut stack: Vec<(&TreeNode, String)> = nodes
        .iter()
        .rev()
        .map(|node| (node, root_label.to_string()))
        .collect();

    while let Some((node, parent_path)) = stack.pop() {
        let path = if parent_path.is_empty() {
            node.title().to_string()
        } else {
            format!("{}/{}", parent_path, node.title())
        };
        if node.key() == key {
            return Some(path);
        }
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, path.clone())),
        );
    }
    None
}

/// Counts describing a tree's shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    /// Depth of the deepest node, 1 for a flat list
    pub depth: usize,
}

pub fn stats(nodes: &[TreeNode]) -> TreeStats {
    walk(nodes).fold(TreeStats::default(), |mut stats, (node, depth)| {
        if node.is_leaf() {
            stats.files += 1;
        } else {
            stats.directories += 1;
        }
        stats.depth = stats.depth.max(depth + 1);
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_tree;

    fn sample() -> Vec<TreeNode> {
        build_tree(["docs/guide.md", "docs/api/index.md", "notes.txt"])
    }

    #[test]
    fn walk_is_pre_order_with_depth() {
        let tree = sample();
        let visited: Vec<_> = walk(&tree).map(|(n, d)| (n.key(), d)).collect();
        assert_eq!(
            visited,
            vec![
                ("docs", 0),
                ("docs/guide.md", 1),
                ("docs/api", 1),
                ("docs/api/index.md", 2),
                ("notes.txt", 0),
            ]
        );
    }

    #[test]
    fn find_locates_directories_and_leaves() {
        let tree = sample();
        assert!(!find(&tree, "docs/api").unwrap().is_leaf());
        assert!(find(&tree, "docs/api/index.md").unwrap().is_leaf());
        assert!(find(&tree, "missing").is_none());
    }

    #[test]
    fn is_leaf_key_rejects_directories() {
        let tree = sample();
        assert!(is_leaf_key(&tree, "notes.txt"));
        assert!(!is_leaf_key(&tree, "docs"));
        assert!(!is_leaf_key(&tree, "nope"));
    }

    #[test]
    fn leaves_in_order() {
        let tree = sample();
        let keys: Vec<_> = leaves(&tree).map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["docs/guide.md", "docs/api/index.md", "notes.txt"]);
        assert_eq!(count_leaves(&tree), 3);
    }

    #[test]
    fn find_path_by_key_prefixes_label() {
        let tree = sample();
        assert_eq!(
            find_path_by_key(&tree, "docs/api/index.md", "GDrive").as_deref(),
            Some("GDrive/docs/api/index.md")
        );
        assert_eq!(
            find_path_by_key(&tree, "notes.txt", "").as_deref(),
            Some("notes.txt")
        );
        assert_eq!(find_path_by_key(&tree, "absent", "GDrive"), None);
    }

    #[test]
    fn find_by_id_matches_provider_id() {
        let mut tree = sample();
        if let TreeNode::Leaf(leaf) = &mut tree[1] {
            leaf.id = Some("xyz".into());
        }
        assert_eq!(find_by_id(&tree, "xyz").map(|n| n.key()), Some("notes.txt"));
        assert!(find_by_id(&tree, "other").is_none());
    }

    #[test]
    fn stats_counts_shape() {
        let tree = sample();
        assert_eq!(
            stats(&tree),
            TreeStats {
                directories: 2,
                files: 3,
                depth: 3
            }
        );
        assert_eq!(stats(&[]), TreeStats::default());
    }
}

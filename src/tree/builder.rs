//! Path-list-to-tree builder.
//!
//! Converts a flat list of slash-delimited paths into nested directory
//! nodes. Directories sharing a prefix are merged, sibling order follows
//! the order paths were first seen, and every path contributes one leaf.

use serde::{Deserialize, Serialize};

use super::arena::TreeArena;
use super::node::TreeNode;

/// What to do when the same full path appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateLeaves {
    /// Every occurrence becomes its own leaf sibling.
    #[default]
    Keep,
    /// Only the first occurrence produces a leaf.
    Merge,
}

/// What to do with empty segments such as the middle of `a//b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySegments {
    /// Empty segments become directories with an empty title.
    #[default]
    Keep,
    /// Empty segments are dropped before walking the path.
    Skip,
}

/// Options controlling how ambiguous paths are folded into the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub duplicate_leaves: DuplicateLeaves,
    pub empty_segments: EmptySegments,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse repeated full paths into a single leaf
    pub fn with_merge_duplicates(mut self, merge: bool) -> Self {
        self.duplicate_leaves = if merge {
            DuplicateLeaves::Merge
        } else {
            DuplicateLeaves::Keep
        };
        self
    }

    /// Drop empty segments instead of creating empty-titled directories
    pub fn with_skip_empty_segments(mut self, skip: bool) -> Self {
        self.empty_segments = if skip {
            EmptySegments::Skip
        } else {
            EmptySegments::Keep
        };
        self
    }
}

/// Incremental builder; push paths in order, then call [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct PathTreeBuilder {
    arena: TreeArena,
    options: BuildOptions,
    leaves: usize,
    skipped: usize,
    merged: usize,
}

impl PathTreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            arena: TreeArena::new(),
            options,
            leaves: 0,
            skipped: 0,
            merged: 0,
        }
    }

    /// Add one entry. `None` and empty strings are skipped.
    pub fn push(&mut self, path: Option<&str>) {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            self.skipped += 1;
            return;
        };

        let segments: Vec<&str> = match self.options.empty_segments {
            EmptySegments::Keep => path.split('/').collect(),
            EmptySegments::Skip => path.split('/').filter(|s| !s.is_empty()).collect(),
        };

        let Some((file_name, directories)) = segments.split_last() else {
            self.skipped += 1;
            return;
        };

        let mut parent = self.arena.root();
        for segment in directories {
            parent = self.arena.directory(parent, segment);
        }

        if self.options.duplicate_leaves == DuplicateLeaves::Merge
            && self.arena.find_leaf(parent, file_name).is_some()
        {
            self.merged += 1;
            return;
        }

        self.arena.leaf(parent, file_name);
        self.leaves += 1;
    }

    /// Leaves added so far
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn finish(self) -> Vec<TreeNode> {
        tracing::debug!(
            leaves = self.leaves,
            nodes = self.arena.len(),
            skipped = self.skipped,
            merged = self.merged,
            "Built path tree"
        );
        self.arena.into_nodes()
    }
}

/// Build a tree from paths that are all present.
pub fn build_tree<I, S>(paths: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_tree_with(paths.into_iter().map(Some), &BuildOptions::default())
}

/// Build a tree from optional paths; `None` entries are skipped.
pub fn build_tree_with<I, S>(paths: I, options: &BuildOptions) -> Vec<TreeNode>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut builder = PathTreeBuilder::new(*options);
    for path in paths {
        builder.push(path.as_ref().map(|p| p.as_ref()));
    }
    builder.finish()
}

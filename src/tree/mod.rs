mod arena;
mod builder;
mod entries;
mod formatter;
mod node;
mod query;
mod records;

pub use arena::{NodeId, TreeArena};
pub use builder::{
    build_tree, build_tree_with, BuildOptions, DuplicateLeaves, EmptySegments, PathTreeBuilder,
};
pub use entries::{build_entry_tree, EntryKind, KeyedEntry};
pub use formatter::{format_json, format_tree, FormatOptions};
pub use node::{DirectoryNode, LeafNode, TreeNode};
pub use query::{
    count_leaves, find, find_by_id, find_path_by_key, is_leaf_key, leaves, stats, walk, PreOrder,
    TreeStats,
};
pub use records::{
    assign_file_paths, build_record_tree, CloudRecord, RecordTreeOptions, DEFAULT_ROOT_LABEL,
    DRIVE_FOLDER_MIME,
};

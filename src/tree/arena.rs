use std::collections::HashMap;

use super::node::{DirectoryNode, LeafNode, TreeNode};

/// Index of a node inside a [`TreeArena`].
pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Directory,
    Leaf,
}

#[derive(Debug)]
struct Slot {
    title: String,
    parent: NodeId,
    kind: SlotKind,
    id: Option<String>,
    children: Vec<NodeId>,
}

/// Owned arena that trees are built in before being materialized.
///
/// Directories are indexed by `(parent, name)`, so a repeated directory
/// prefix always resolves to the node created the first time it was seen.
/// The lookup name is also the initial title; [`set_title`](Self::set_title)
/// may replace the title afterwards. Keys are derived from titles only when
/// the arena is materialized, so every key is the slash-join of the titles
/// above it.
#[derive(Debug)]
pub struct TreeArena {
    slots: Vec<Slot>,
    directories: HashMap<(NodeId, String), NodeId>,
    leaves: HashMap<(NodeId, String), NodeId>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                title: String::new(),
                parent: ROOT,
                kind: SlotKind::Directory,
                id: None,
                children: Vec::new(),
            }],
            directories: HashMap::new(),
            leaves: HashMap::new(),
        }
    }

    /// The synthetic container that holds the root-level nodes.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Number of nodes, not counting the synthetic root.
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the directory named `name` under `parent`, creating it if needed.
    pub fn directory(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(&existing) = self.directories.get(&(parent, name.to_string())) {
            return existing;
        }
        let id = self.push_slot(parent, name, SlotKind::Directory);
        self.directories.insert((parent, name.to_string()), id);
        id
    }

    /// Append a leaf under `parent`. Repeated names produce sibling duplicates.
    pub fn leaf(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.push_slot(parent, name, SlotKind::Leaf);
        self.leaves.entry((parent, name.to_string())).or_insert(id);
        id
    }

    /// First leaf named `name` under `parent`, if one was added.
    pub fn find_leaf(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.leaves.get(&(parent, name.to_string())).copied()
    }

    /// Replace a node's display title. Lookups keep using the original name.
    pub fn set_title(&mut self, node: NodeId, title: &str) {
        if node != ROOT {
            self.slots[node].title = title.to_string();
        }
    }

    /// Attach a provider id unless the node already has one.
    pub fn set_id_if_absent(&mut self, node: NodeId, id: &str) {
        if node == ROOT {
            return;
        }
        let slot = &mut self.slots[node];
        if slot.id.is_none() {
            slot.id = Some(id.to_string());
        }
    }

    /// Slash-joined titles from the root-level ancestor down to `node`.
    pub fn key(&self, node: NodeId) -> String {
        let mut titles = Vec::new();
        let mut current = node;
        while current != ROOT {
            titles.push(self.slots[current].title.as_str());
            current = self.slots[current].parent;
        }
        titles.reverse();
        titles.join("/")
    }

    fn push_slot(&mut self, parent: NodeId, name: &str, kind: SlotKind) -> NodeId {
        let id = self.slots.len();
        self.slots.push(Slot {
            title: name.to_string(),
            parent,
            kind,
            id: None,
            children: Vec::new(),
        });
        self.slots[parent].children.push(id);
        id
    }

    /// Materialize the arena into nested root-level nodes.
    ///
    /// Children are always allocated after their parent, so keys can be
    /// filled in walking the slots upwards, and walking them from the
    /// highest index down finds every child already built.
    pub fn into_nodes(self) -> Vec<TreeNode> {
        let mut keys: Vec<String> = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.iter().enumerate() {
            let key = if index == ROOT {
                String::new()
            } else if slot.parent == ROOT {
                slot.title.clone()
            } else {
                format!("{}/{}", keys[slot.parent], slot.title)
            };
            keys.push(key);
        }

        let mut built: Vec<Option<TreeNode>> = Vec::with_capacity(self.slots.len());
        built.resize_with(self.slots.len(), || None);

        let mut slots = self.slots;
        for index in (1..slots.len()).rev() {
            let slot = &mut slots[index];
            let node = match slot.kind {
                SlotKind::Directory => {
                    let children = slot
                        .children
                        .iter()
                        .filter_map(|&child| built[child].take())
                        .collect();
                    TreeNode::Directory(DirectoryNode {
                        title: std::mem::take(&mut slot.title),
                        key: std::mem::take(&mut keys[index]),
                        id: slot.id.take(),
                        file_path: None,
                        children,
                    })
                }
                SlotKind::Leaf => TreeNode::Leaf(LeafNode {
                    title: std::mem::take(&mut slot.title),
                    key: std::mem::take(&mut keys[index]),
                    id: slot.id.take(),
                    file_path: None,
                }),
            };
            built[index] = Some(node);
        }

        slots[ROOT]
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect()
    }
}

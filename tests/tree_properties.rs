//! Structural properties of the tree builders over generated inputs.

use knowledge_tree::tree::{
    build_record_tree, build_tree, build_tree_with, count_leaves, walk, BuildOptions,
    CloudRecord, RecordTreeOptions, TreeNode, DRIVE_FOLDER_MIME,
};

/// Deterministic pseudo-random path lists drawn from a small alphabet so
/// that folders collide often.
fn generated_inputs() -> Vec<Vec<Option<String>>> {
    let names = ["a", "b", "docs", "x.txt", "y.md", "", "z"];
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: usize| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % bound as u64) as usize
    };

    (0..64)
        .map(|_| {
            let len = next(12);
            (0..len)
                .map(|_| match next(10) {
                    0 => None,
                    _ => {
                        let depth = 1 + next(4);
                        let segments: Vec<&str> =
                            (0..depth).map(|_| names[next(names.len())]).collect();
                        Some(segments.join("/"))
                    }
                })
                .collect()
        })
        .collect()
}

fn build(input: &[Option<String>]) -> Vec<TreeNode> {
    build_tree_with(input.iter().map(|p| p.as_deref()), &BuildOptions::default())
}

/// (title path from a root, node) for every node
fn title_paths(nodes: &[TreeNode]) -> Vec<(String, &TreeNode)> {
    let mut out = Vec::new();
    let mut stack: Vec<(String, &TreeNode)> = nodes
        .iter()
        .rev()
        .map(|n| (n.title().to_string(), n))
        .collect();
    while let Some((path, node)) = stack.pop() {
        for child in node.children().iter().rev() {
            stack.push((format!("{}/{}", path, child.title()), child));
        }
        out.push((path, node));
    }
    out
}

#[test]
fn leaf_count_matches_present_paths() {
    for input in generated_inputs() {
        let expected = input
            .iter()
            .filter(|p| p.as_deref().is_some_and(|p| !p.is_empty()))
            .count();
        assert_eq!(count_leaves(&build(&input)), expected, "input: {:?}", input);
    }
}

#[test]
fn keys_join_ancestor_titles() {
    for input in generated_inputs() {
        let nodes = build(&input);
        for (path, node) in title_paths(&nodes) {
            assert_eq!(node.key(), path);
        }
    }
}

#[test]
fn leaf_keys_reconstruct_inputs() {
    for input in generated_inputs() {
        let nodes = build(&input);
        let mut leaf_keys: Vec<String> = title_paths(&nodes)
            .into_iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(path, _)| path)
            .collect();
        let mut expected: Vec<String> = input
            .iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        leaf_keys.sort();
        expected.sort();
        assert_eq!(leaf_keys, expected);
    }
}

#[test]
fn rebuilding_is_idempotent() {
    for input in generated_inputs() {
        assert_eq!(build(&input), build(&input));
    }
}

#[test]
fn directories_are_never_leaves() {
    for input in generated_inputs() {
        let nodes = build(&input);
        for (node, _) in walk(&nodes) {
            if let TreeNode::Directory(dir) = node {
                assert!(!node.is_leaf());
                assert!(dir.children.iter().all(|c| c.key().starts_with(&dir.key)));
            }
        }
    }
}

#[test]
fn roots_keep_first_seen_order() {
    let nodes = build_tree(["b/x.txt", "a/y.txt"]);
    let titles: Vec<&str> = nodes.iter().map(TreeNode::title).collect();
    assert_eq!(titles, vec!["b", "a"]);
}

#[test]
fn shared_folder_is_folded() {
    let nodes = build_tree(["dir/a.txt", "dir/b.txt"]);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].title(), "dir");
    let children: Vec<&str> = nodes[0].children().iter().map(TreeNode::title).collect();
    assert_eq!(children, vec!["a.txt", "b.txt"]);
    assert!(nodes[0].children().iter().all(TreeNode::is_leaf));
}

#[test]
fn single_segment_is_a_root_leaf() {
    let nodes = build_tree(["file.txt"]);
    let value = serde_json::to_value(&nodes).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "title": "file.txt", "key": "file.txt", "isLeaf": true, "children": [] }])
    );
}

#[test]
fn empty_input_is_empty_forest() {
    assert!(build_tree(Vec::<&str>::new()).is_empty());
}

#[test]
fn unknown_parent_becomes_root() {
    let records = vec![
        CloudRecord {
            id: "d".into(),
            name: "Docs".into(),
            mime_type: Some(DRIVE_FOLDER_MIME.into()),
            file_type: None,
            parents: vec!["missing".into()],
        },
        CloudRecord {
            id: "f".into(),
            name: "a.txt".into(),
            mime_type: Some("text/plain".into()),
            file_type: None,
            parents: vec!["d".into()],
        },
    ];
    let nodes = build_record_tree(&records, &RecordTreeOptions::new());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].key(), "Docs");
    assert_eq!(nodes[0].children()[0].key(), "Docs/a.txt");
}

#[test]
fn parent_cycle_terminates() {
    let records: Vec<CloudRecord> = [("p", "q"), ("q", "p")]
        .iter()
        .map(|(id, parent)| CloudRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            mime_type: Some(DRIVE_FOLDER_MIME.into()),
            file_type: None,
            parents: vec![parent.to_string()],
        })
        .collect();
    let nodes = build_record_tree(&records, &RecordTreeOptions::new());
    assert_eq!(walk(&nodes).count(), 2);
}

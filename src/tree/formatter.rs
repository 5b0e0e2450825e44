use super::node::TreeNode;

/// Format options for tree output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum depth to display (roots are depth 1)
    pub max_depth: Option<usize>,
    /// Show only the first N children per directory
    pub max_children: Option<usize>,
    /// Print each node's key after its title
    pub show_keys: bool,
    /// First line of the output
    pub root_label: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_children: None,
            show_keys: false,
            root_label: ".".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_max_children(mut self, n: usize) -> Self {
        self.max_children = Some(n);
        self
    }

    pub fn with_keys(mut self, show: bool) -> Self {
        self.show_keys = show;
        self
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }
}

/// Format a forest as a box-drawing tree under `root_label`
pub fn format_tree(nodes: &[TreeNode], options: &FormatOptions) -> String {
    let mut output = String::new();
    output.push_str(&options.root_label);
    output.push('\n');
    format_children(nodes, &mut output, "", 1, options);
    output
}

fn format_children(
    children: &[TreeNode],
    output: &mut String,
    prefix: &str,
    depth: usize,
    options: &FormatOptions,
) {
    if let Some(max_depth) = options.max_depth {
        if depth > max_depth {
            return;
        }
    }

    let shown = options
        .max_children
        .map_or(children.len(), |n| n.min(children.len()));
    let hidden = children.len() - shown;

    for (i, child) in children.iter().take(shown).enumerate() {
        let is_last = i + 1 == shown && hidden == 0;
        format_node(child, output, prefix, is_last, depth, options);
    }

    if hidden > 0 {
        output.push_str(&format!(
            "{}└── ... and {} more entries\n",
            prefix, hidden
        ));
    }
}

fn format_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &FormatOptions,
) {
    let connector = if is_last { "└── " } else { "├── " };

    let name = match node {
        TreeNode::Directory(dir) => format!("{}/", dir.title),
        TreeNode::Leaf(leaf) => leaf.title.clone(),
    };

    let key_str = if options.show_keys {
        format!("  [{}]", node.key())
    } else {
        String::new()
    };

    output.push_str(&format!("{}{}{}{}\n", prefix, connector, name, key_str));

    if !node.children().is_empty() {
        let new_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };
        format_children(node.children(), output, &new_prefix, depth + 1, options);
    }
}

/// Format a forest as the JSON array tree-view widgets consume
pub fn format_json(nodes: &[TreeNode], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(nodes)
    } else {
        serde_json::to_string(nodes)
    }
}

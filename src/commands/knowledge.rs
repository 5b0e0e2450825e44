//! Knowledge command implementation

use anyhow::Result;

use super::{parse_json, read_input, render};
use crate::cli::KnowledgeArgs;
use crate::config::Config;
use crate::knowledge::{checked_knowledge, path_list, Knowledge};
use crate::selection::Selection;
use crate::tree::build_tree_with;

/// Run the knowledge command.
///
/// With `--checked`, prints the knowledge items whose paths were checked
/// (the chat file filter) instead of the tree.
pub fn run(args: KnowledgeArgs, config: &Config) -> Result<()> {
    let content = read_input(&args.input)?;
    let items: Vec<Knowledge> = parse_json(&args.input, &content)?;

    let without_path = items.iter().filter(|k| k.file_path().is_none()).count();
    tracing::info!(items = items.len(), without_path, "Loaded knowledge");

    if !args.checked.is_empty() {
        let selection = Selection::new(args.checked.iter().cloned());
        let known: Vec<&str> = items.iter().filter_map(Knowledge::file_path).collect();
        let keys = selection.within(&known);
        tracing::debug!(
            checked = selection.len(),
            known = keys.len(),
            "Filtered checked keys"
        );
        let matched = checked_knowledge(&items, &keys);
        if args.output.json {
            println!("{}", serde_json::to_string_pretty(&matched)?);
        } else {
            for item in matched {
                println!("{}\t{}", item.id(), item.display_name());
            }
        }
        return Ok(());
    }

    let nodes = build_tree_with(path_list(&items), &config.tree.build_options());
    println!("{}", render(&nodes, &args.output, &config.output, ".")?);
    Ok(())
}

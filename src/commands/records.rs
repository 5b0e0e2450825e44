//! Records command implementation

use anyhow::Result;

use super::{parse_json, read_input, render};
use crate::cli::RecordsArgs;
use crate::config::Config;
use crate::tree::{build_record_tree, CloudRecord, RecordTreeOptions};

/// Run the records command.
pub fn run(args: RecordsArgs, config: &Config) -> Result<()> {
    let content = read_input(&args.input)?;
    let records: Vec<CloudRecord> = parse_json(&args.input, &content)?;
    tracing::info!(records = records.len(), "Building tree from records");

    let root_label = args
        .root_label
        .clone()
        .unwrap_or_else(|| config.gdrive.root_label.clone());
    let mut options = RecordTreeOptions::new()
        .with_root_label(root_label.as_str())
        .with_duplicate_leaves(config.tree.duplicate_leaves);
    if let Some(root_id) = &args.root_id {
        options = options.with_root_id(root_id.as_str());
    }

    let nodes = build_record_tree(&records, &options);
    let label = if root_label.is_empty() { "." } else { &root_label };
    println!("{}", render(&nodes, &args.output, &config.output, label)?);
    Ok(())
}

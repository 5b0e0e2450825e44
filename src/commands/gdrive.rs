//! Google Drive command implementation

use std::path::Path;

use anyhow::Result;

use super::{listing_spinner, render, write_download};
use crate::cli::DriveArgs;
use crate::config::Config;
use crate::listing::{build_client, collect_pages_with, DriveClient};
use crate::selection::Selection;
use crate::session::{Provider, Session};
use crate::tree::{build_record_tree, CloudRecord, RecordTreeOptions, TreeNode};

/// Run the gdrive command.
pub fn run(args: DriveArgs, config: &Config, session: &Session, quiet: bool) -> Result<()> {
    let token = session.token(Provider::GoogleDrive)?.clone();
    let client = DriveClient::new(build_client(&config.http)?, token, &config.gdrive);

    let spinner = listing_spinner(quiet, "Listing Google Drive...");
    let listed = client.root_folder_id().and_then(|root_id| {
        let records = collect_pages_with(&mut client.list_files(), |pages, items| {
            spinner.set_message(format!(
                "Listing Google Drive... {} files, {} pages",
                items, pages
            ));
        })?;
        Ok((root_id, records))
    });
    spinner.finish_and_clear();
    let (root_id, records) = listed?;
    tracing::info!(files = records.len(), "Listed Google Drive");

    let options = RecordTreeOptions::new()
        .with_root_id(root_id)
        .with_root_label(config.gdrive.root_label.as_str())
        .with_duplicate_leaves(config.tree.duplicate_leaves);
    let nodes = build_record_tree(&records, &options);

    if args.select.is_empty() {
        println!(
            "{}",
            render(&nodes, &args.output, &config.output, &config.gdrive.root_label)?
        );
        return Ok(());
    }

    let selection = Selection::new(args.select.iter().cloned());
    match &args.download_to {
        Some(dir) => download(&client, &nodes, &records, &selection, dir, session),
        None => {
            for leaf in selection.files(&nodes) {
                println!("{}", leaf.file_path.as_deref().unwrap_or(&leaf.key));
            }
            Ok(())
        }
    }
}

fn download(
    client: &DriveClient,
    nodes: &[TreeNode],
    records: &[CloudRecord],
    selection: &Selection,
    dir: &Path,
    session: &Session,
) -> Result<()> {
    let mut count = 0usize;
    for leaf in selection.files(nodes) {
        let record = leaf
            .id
            .as_deref()
            .and_then(|id| records.iter().find(|r| r.id == id));
        let Some(record) = record else {
            tracing::warn!(key = %leaf.key, "No record behind checked file");
            continue;
        };

        let bytes = client.download(record)?;
        let key = if record.is_google_format() {
            format!("{}.pdf", leaf.key)
        } else {
            leaf.key.clone()
        };
        write_download(dir, &key, &bytes)?;
        count += 1;
    }

    println!(
        "Downloaded {} files to {}{}",
        count,
        dir.display(),
        session
            .brain_id()
            .map(|brain| format!(" for brain {}", brain))
            .unwrap_or_default()
    );
    Ok(())
}

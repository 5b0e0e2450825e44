//! Dropbox command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::{listing_spinner, render, write_download};
use crate::cli::DropboxArgs;
use crate::config::Config;
use crate::listing::dropbox::authorize_url;
use crate::listing::{build_client, collect_pages_with, DropboxClient};
use crate::selection::Selection;
use crate::session::{Provider, Session};
use crate::tree::{build_entry_tree, TreeNode};

/// Run the dropbox command.
pub fn run(args: DropboxArgs, config: &Config, session: &Session, quiet: bool) -> Result<()> {
    if args.auth_url {
        let app_key = config
            .dropbox
            .app_key
            .as_deref()
            .context("dropbox.app_key is not configured")?;
        let redirect_uri = config
            .dropbox
            .redirect_uri
            .as_deref()
            .context("dropbox.redirect_uri is not configured")?;
        println!("{}", authorize_url(app_key, redirect_uri)?);
        return Ok(());
    }

    let token = session.token(Provider::Dropbox)?.clone();
    let client = DropboxClient::new(build_client(&config.http)?, token, &config.dropbox);
    let path = args.path.as_deref().unwrap_or(&config.dropbox.root_path);
    tracing::info!(%path, "Listing Dropbox folder");

    let spinner = listing_spinner(quiet, "Listing Dropbox...");
    let entries = collect_pages_with(&mut client.list_folder(path), |pages, items| {
        spinner.set_message(format!("Listing Dropbox... {} entries, {} pages", items, pages));
    });
    spinner.finish_and_clear();
    let entries = entries?;

    let nodes = build_entry_tree(&entries, config.tree.duplicate_leaves);

    if args.select.is_empty() {
        let label = if path.is_empty() { "/" } else { path };
        println!("{}", render(&nodes, &args.output, &config.output, label)?);
        return Ok(());
    }

    let selection = Selection::new(args.select.iter().cloned());
    match &args.download_to {
        Some(dir) => download(&client, &nodes, &selection, dir, session),
        None => {
            for leaf in selection.files(&nodes) {
                println!("{}", leaf.key);
            }
            Ok(())
        }
    }
}

fn download(
    client: &DropboxClient,
    nodes: &[TreeNode],
    selection: &Selection,
    dir: &Path,
    session: &Session,
) -> Result<()> {
    let files = selection.files(nodes);
    if files.len() < selection.len() {
        tracing::warn!(
            checked = selection.len(),
            files = files.len(),
            "Checked keys that are not files are ignored"
        );
    }

    for leaf in &files {
        let path = leaf.id.as_deref().unwrap_or(&leaf.key);
        let bytes = client.download(path)?;
        write_download(dir, &leaf.key, &bytes)?;
    }

    println!(
        "Downloaded {} files to {}{}",
        files.len(),
        dir.display(),
        session
            .brain_id()
            .map(|brain| format!(" for brain {}", brain))
            .unwrap_or_default()
    );
    Ok(())
}

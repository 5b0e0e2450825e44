//! Paths command implementation

use std::path::Path;

use anyhow::Result;

use super::{read_input, render};
use crate::cli::PathsArgs;
use crate::config::Config;
use crate::listing::list_directory;
use crate::tree::{build_tree_with, BuildOptions, TreeNode};

/// Run the paths command.
pub fn run(args: PathsArgs, config: &Config) -> Result<()> {
    let options = build_options(&args, config);

    let nodes = match &args.dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Reading paths from directory");
            let paths = list_directory(dir, args.all)?;
            build_tree_with(paths.iter().map(Some), &options)
        }
        None => {
            let input = args.input.as_deref().unwrap_or(Path::new("-"));
            let content = read_input(input)?;
            tree_from_lines(&content, &options)
        }
    };

    println!("{}", render(&nodes, &args.output, &config.output, ".")?);
    Ok(())
}

fn build_options(args: &PathsArgs, config: &Config) -> BuildOptions {
    let mut options = config.tree.build_options();
    if args.merge_duplicates {
        options = options.with_merge_duplicates(true);
    }
    if args.skip_empty_segments {
        options = options.with_skip_empty_segments(true);
    }
    options
}

/// One path per line. Blank lines count as items without a path.
fn tree_from_lines(content: &str, options: &BuildOptions) -> Vec<TreeNode> {
    let lines = content.lines().map(|line| {
        let line = line.trim_end_matches('\r');
        (!line.trim().is_empty()).then_some(line)
    });
    build_tree_with(lines, options)
}

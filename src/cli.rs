use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Knowledge Tree - Build checkbox tree views from brain and cloud file listings
#[derive(Parser, Debug)]
#[command(name = "knowledge-tree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a tree from slash-separated file paths
    Paths(PathsArgs),

    /// Build a tree from parent-pointer file records (JSON)
    Records(RecordsArgs),

    /// Build a tree from a brain's knowledge list (JSON)
    Knowledge(KnowledgeArgs),

    /// List a Dropbox folder as a tree
    Dropbox(DropboxArgs),

    /// List Google Drive files as a tree
    Gdrive(DriveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Rendering flags shared by every tree-producing command
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as tree-view JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum depth to display
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Show at most N children per directory
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Print node keys next to titles
    #[arg(short, long)]
    pub keys: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// File with one path per line ("-" for stdin); blank lines are skipped
    #[arg(value_name = "FILE", conflicts_with = "dir")]
    pub input: Option<PathBuf>,

    /// Read paths from the files under a local directory instead
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Include hidden files when reading a directory
    #[arg(short, long)]
    pub all: bool,

    /// Collapse repeated paths into one leaf
    #[arg(long)]
    pub merge_duplicates: bool,

    /// Drop empty segments such as the middle of "a//b"
    #[arg(long)]
    pub skip_empty_segments: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// JSON array of {id, name, mimeType|fileType, parents} ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Id of the provider's root folder
    #[arg(long, value_name = "ID")]
    pub root_id: Option<String>,

    /// Label file paths start from
    #[arg(long, value_name = "LABEL")]
    pub root_label: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct KnowledgeArgs {
    /// JSON array of knowledge items ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print the knowledge items matching these checked keys instead
    #[arg(long = "checked", value_name = "KEY")]
    pub checked: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct DropboxArgs {
    /// Access token
    #[arg(long, env = "KNOWLEDGE_TREE_DROPBOX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Folder to list (defaults to the configured root)
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Print the authorization URL and exit
    #[arg(long)]
    pub auth_url: bool,

    /// Keys of files to download
    #[arg(long = "select", value_name = "KEY")]
    pub select: Vec<String>,

    /// Directory selected files are written to
    #[arg(long, value_name = "DIR", requires = "select")]
    pub download_to: Option<PathBuf>,

    /// Brain the downloaded files are meant for
    #[arg(long, value_name = "ID")]
    pub brain: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct DriveArgs {
    /// Access token
    #[arg(long, env = "KNOWLEDGE_TREE_GDRIVE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Keys of files to download
    #[arg(long = "select", value_name = "KEY")]
    pub select: Vec<String>,

    /// Directory selected files are written to
    #[arg(long, value_name = "DIR", requires = "select")]
    pub download_to: Option<PathBuf>,

    /// Brain the downloaded files are meant for
    #[arg(long, value_name = "ID")]
    pub brain: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use knowledge_tree::cli::{Cli, Command};
use knowledge_tree::commands;
use knowledge_tree::config::Config;
use knowledge_tree::session::{Provider, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Completions need neither configuration nor a session
    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "knowledge-tree",
            &mut io::stdout(),
        );
        return Ok(());
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    let session = start_session(&cli.command);

    // Dispatch to subcommand
    let result = match cli.command {
        Command::Paths(args) => {
            tracing::info!(?args, "Building tree from paths");
            commands::paths::run(args, &config)
        }
        Command::Records(args) => {
            tracing::info!(?args, "Building tree from records");
            commands::records::run(args, &config)
        }
        Command::Knowledge(args) => {
            tracing::info!(?args, "Building tree from knowledge");
            commands::knowledge::run(args, &config)
        }
        Command::Dropbox(args) => {
            tracing::info!(path = ?args.path, "Starting Dropbox listing");
            commands::dropbox::run(args, &config, &session, cli.quiet)
        }
        Command::Gdrive(args) => {
            tracing::info!("Starting Google Drive listing");
            commands::gdrive::run(args, &config, &session, cli.quiet)
        }
        Command::Completions(_) => Ok(()),
    };

    session.end();
    result
}

fn start_session(command: &Command) -> Session {
    match command {
        Command::Dropbox(args) => Session::start(args.brain.clone())
            .with_token(Provider::Dropbox, args.token.clone()),
        Command::Gdrive(args) => Session::start(args.brain.clone())
            .with_token(Provider::GoogleDrive, args.token.clone()),
        _ => Session::start(None),
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("knowledge_tree={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

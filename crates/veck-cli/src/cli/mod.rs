//! CLI entry and dispatch.
//!
//! Without a subcommand, runs the full-screen TUI. Subcommands exercise the
//! same backend contract non-interactively for scripting.

use anyhow::{Context, Result};
use clap::Parser;
use veck_api::{Config, config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "veck")]
#[command(version)]
#[command(about = "Terminal chat client for an LLM + vector-search backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Run a similarity search over past conversations
    Search {
        /// The query text
        #[arg(value_name = "QUERY")]
        query: String,

        /// Minimum similarity score, 0.0 to 1.0
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Lists sessions
    List,
    /// Creates a session
    New {
        /// Optional title (untitled when omitted)
        #[arg(long)]
        title: Option<String>,
    },
    /// Deletes a session permanently (no undo window from the CLI)
    Delete {
        /// The ID of the session to delete
        #[arg(value_name = "SESSION_ID")]
        id: String,

        /// Keep the session's vectors in the store
        #[arg(long)]
        keep_vectors: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config-only commands work without a reachable backend or log dir.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = config::normalize_base_url(base_url).context("invalid --base-url")?;
    }

    // Logs go to a file: the TUI owns the terminal.
    let _log_guard = logging::init(&config::veck_home()).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    let Some(command) = cli.command else {
        // The TUI event loop is synchronous; entering the runtime lets its
        // effect handlers spawn onto the worker threads.
        let _guard = rt.enter();
        return veck_tui::run(&config);
    };

    rt.block_on(async move {
        match command {
            Commands::Sessions { command } => match command {
                SessionCommands::List => commands::sessions::list(&config).await,
                SessionCommands::New { title } => {
                    commands::sessions::new(&config, title.as_deref()).await
                }
                SessionCommands::Delete { id, keep_vectors } => {
                    commands::sessions::delete(&config, &id, !keep_vectors).await
                }
            },
            Commands::Search { query, threshold } => {
                commands::search::run(&config, &query, threshold).await
            }
            Commands::Config { .. } => unreachable!("handled above"),
        }
    })
}

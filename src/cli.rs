//! CLI parsing and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};

use crate::{catalog::ItemKind, commands, error::Result};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "jindo",
    version,
    about = "Manage itda-skills configuration and Claude Code extensions"
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Command to execute (defaults to list).
    #[command(subcommand)]
    command: Option<Command>,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Manage subagents.
    #[command(alias = "a")]
    Agents {
        /// Action to perform.
        #[command(subcommand)]
        action: ItemCommand,
    },
    /// Manage slash commands.
    Commands {
        /// Action to perform.
        #[command(subcommand)]
        action: ItemCommand,
    },
    /// Read and write the itda-skills config file.
    #[command(alias = "cfg")]
    Config {
        /// Action to perform.
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Show skills, agents, and commands at a glance.
    #[command(alias = "l", alias = "ls")]
    List {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Manage skills.
    #[command(alias = "s")]
    Skills {
        /// Action to perform.
        #[command(subcommand)]
        action: ItemCommand,
    },
    /// Print version information.
    Version,
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Open the config file in your editor.
    Edit,
    /// Resolve a key, honoring environment overrides.
    Get {
        /// Dot-separated key, e.g. `common.api_keys.tiingo`.
        key: String,
        /// Vendor environment variable checked before the ITDA_ variable.
        #[arg(long, value_name = "NAME")]
        vendor_env: Option<String>,
        /// Also print where the value came from.
        #[arg(long)]
        show_source: bool,
    },
    /// Create an empty config file.
    Init {
        /// Overwrite an existing file without prompting.
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// List every key in the config file.
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path.
    Path,
    /// Set a key; the value is coerced to a boolean, integer, or float when
    /// it parses as one.
    Set {
        /// Dot-separated key.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove a key.
    #[command(alias = "delete")]
    Unset {
        /// Dot-separated key.
        key: String,
    },
}

/// `skills`, `agents`, and `commands` subcommands.
#[derive(Debug, Subcommand)]
enum ItemCommand {
    /// List installed items.
    #[command(alias = "l", alias = "ls")]
    List {
        /// Only list items in `.claude/` under the current directory.
        #[arg(long, short = 'l')]
        local: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print an item's file.
    #[command(alias = "s")]
    Show {
        /// Identifier or declared name.
        name: String,
        /// Look in `.claude/` under the current directory.
        #[arg(long, short = 'l')]
        local: bool,
        /// Print metadata only.
        #[arg(long)]
        brief: bool,
    },
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let color = cli.color.into_choice();

    // Match arms are ordered alphabetically - maintain this order.
    match cli.command.unwrap_or(Command::List { json: false }) {
        Command::Agents { action } => {
            run_items(color, cli.verbose, ItemKind::Agent, action).await
        }
        Command::Commands { action } => {
            run_items(color, cli.verbose, ItemKind::Command, action).await
        }
        Command::Config { action } => run_config(color, cli.verbose, action).await,
        Command::List { json } => commands::list::run(color, cli.verbose, json).await,
        Command::Skills { action } => {
            run_items(color, cli.verbose, ItemKind::Skill, action).await
        }
        Command::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Dispatch a `config` subcommand.
async fn run_config(
    color: commands::ColorChoice,
    verbose: bool,
    action: ConfigCommand,
) -> Result<()> {
    match action {
        ConfigCommand::Edit => commands::config::edit(verbose).await,
        ConfigCommand::Get {
            key,
            vendor_env,
            show_source,
        } => commands::config::get(verbose, key, vendor_env, show_source).await,
        ConfigCommand::Init { force } => commands::config::init(force).await,
        ConfigCommand::List { json } => commands::config::list(color, json).await,
        ConfigCommand::Path => commands::config::path().await,
        ConfigCommand::Set { key, value } => commands::config::set(key, value).await,
        ConfigCommand::Unset { key } => commands::config::unset(key).await,
    }
}

/// Dispatch a `skills`, `agents`, or `commands` subcommand.
async fn run_items(
    color: commands::ColorChoice,
    verbose: bool,
    kind: ItemKind,
    action: ItemCommand,
) -> Result<()> {
    match action {
        ItemCommand::List { local, json } => {
            commands::items::list(color, verbose, kind, local, json).await
        }
        ItemCommand::Show { name, local, brief } => {
            commands::items::show(color, verbose, kind, name, local, brief).await
        }
    }
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}

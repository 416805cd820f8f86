#![warn(missing_docs)]
//! Hierarchical configuration for itda-skills, plus the `jindo` CLI.
//!
//! The [`Config`] store reads and writes `$XDG_CONFIG_HOME/itda-skills/config.toml`
//! and resolves dot-path keys against `ITDA_` environment overrides:
//!
//! ```no_run
//! use jindo::Config;
//!
//! let config = Config::load()?;
//! if let Some(resolved) = config.get_with_vendor_env("common.api_keys.tiingo", "TIINGO_API_KEY")? {
//!     println!("{} (from {})", resolved.value, resolved.source);
//! }
//! # Ok::<(), jindo::Error>(())
//! ```

/// Catalog scanning for skills, agents, and commands.
mod catalog;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration store, key paths, values, and overrides.
pub mod config;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Error handling for the crate.
mod error;
/// YAML frontmatter parsing for catalog items.
mod frontmatter;
/// Color palette and styling for CLI output.
mod palette;
/// Config file location.
pub mod paths;
/// Global and project-local `.claude` directories.
mod scope;
/// Shared fixtures for unit tests.
#[cfg(test)]
mod testutil;

pub use crate::{
    config::{
        Config,
        keypath::{delete_nested, get_nested, parse_dot_key, set_nested},
        overrides::{ENV_PREFIX, Resolved, ValueSource, to_env_key},
        value::{Table, Value, parse_value},
    },
    error::{Error, Result},
    paths::{config_dir, config_path},
};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}

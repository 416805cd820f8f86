//! Error types for the jindo CLI.

use std::{
    io,
    path::PathBuf,
    process::{ExitCode, ExitStatus},
    result::Result as StdResult,
};

use thiserror::Error;
use toml::{de::Error as TomlError, ser::Error as TomlSerError};

/// Result type for jindo operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// A dot-path was empty, whitespace-only, or contained an empty segment.
    #[error("Invalid config key: {key:?}")]
    InvalidKey {
        /// Key as supplied by the caller.
        key: String,
    },
    /// A traversal reached a segment that does not exist.
    #[error("Config key not found: {key}")]
    KeyNotFound {
        /// Key as supplied by the caller.
        key: String,
    },
    /// A traversal reached a non-table value where a table was required.
    #[error("Config key {key} passes through a value that is not a table")]
    NotAMap {
        /// Key as supplied by the caller.
        key: String,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        /// Underlying serialization error.
        source: TomlSerError,
    },
    /// The configuration file could not be written.
    #[error("Failed to write config at {path}: {source}")]
    ConfigWrite {
        /// Path to the config file or directory.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Home directory resolution failed.
    #[error("Failed to resolve the home directory.")]
    HomeDirMissing,
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// A skill, agent, or command could not be found.
    #[error("{kind} not found: {name}")]
    ItemNotFound {
        /// Kind label, e.g. "Skill".
        kind: &'static str,
        /// Missing item name.
        name: String,
    },
    /// A catalog directory or item file could not be read.
    #[error("Failed to read {path}: {source}")]
    ItemRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The editor command was invalid or could not be launched.
    #[error("Failed to run editor `{editor}`: {message}")]
    EditorFailed {
        /// Editor command that failed.
        editor: String,
        /// Error message.
        message: String,
    },
    /// The editor exited with a non-zero status.
    #[error("Editor `{editor}` exited with status {status}")]
    EditorStatus {
        /// Editor command that exited.
        editor: String,
        /// Exit status returned by the editor.
        status: ExitStatus,
    },
    /// JSON output could not be produced.
    #[error("Failed to render JSON: {source}")]
    JsonSerialize {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidKey { .. } | Self::KeyNotFound { .. } | Self::NotAMap { .. } => {
                ExitCode::from(2)
            }
            _ => ExitCode::from(1),
        }
    }

    /// Return true when the error reports a missing config key.
    pub(crate) fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

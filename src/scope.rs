//! Scope selection for the `.claude` directories.

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

/// Directory holding Claude Code configuration, relative to home or project.
const CLAUDE_DIR: &str = ".claude";

/// Where catalog items are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `~/.claude/<kind>`.
    Global,
    /// `./.claude/<kind>` in the current directory.
    Local,
}

impl Scope {
    /// Select a scope from a `--local` flag.
    pub(crate) fn from_local_flag(local: bool) -> Self {
        if local { Self::Local } else { Self::Global }
    }

    /// Human-readable label for section headings.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Local => "Local",
        }
    }

    /// Root `.claude` directory for this scope.
    pub(crate) fn root(self) -> Result<PathBuf> {
        let base = match self {
            Self::Global => dirs::home_dir().ok_or(Error::HomeDirMissing)?,
            Self::Local => env::current_dir().map_err(|error| Error::ItemRead {
                path: PathBuf::from("."),
                source: error,
            })?,
        };
        Ok(base.join(CLAUDE_DIR))
    }

    /// Directory holding items named `dir_name` for this scope.
    pub(crate) fn dir(self, dir_name: &str) -> Result<PathBuf> {
        Ok(self.root()?.join(dir_name))
    }

    /// Local directory for `dir_name`, only when it exists on disk.
    pub(crate) fn existing_local_dir(dir_name: &str) -> Result<Option<PathBuf>> {
        let dir = Self::Local.dir(dir_name)?;
        Ok(dir.is_dir().then_some(dir))
    }
}

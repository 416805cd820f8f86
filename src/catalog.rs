//! Catalog scanning for skills, agents, and commands.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

use serde::Serialize;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    frontmatter::parse_frontmatter,
};

/// Preferred skill file name within a skill directory.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Lowercase fallback skill file name.
const SKILL_FILE_NAME_LOWER: &str = "skill.md";

/// Extension of agent and command files.
const MARKDOWN_EXTENSION: &str = "md";

/// Joins a command's directory and file stem, as in `game:init`.
const NAMESPACE_SEPARATOR: char = ':';

/// Kinds of items kept under a `.claude` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// `skills/<name>/SKILL.md`.
    Skill,
    /// `agents/<name>.md`.
    Agent,
    /// `commands/<name>.md` or `commands/<namespace>/<name>.md`.
    Command,
}

impl ItemKind {
    /// Return all kinds in display order.
    pub(crate) fn all() -> [Self; 3] {
        [Self::Skill, Self::Agent, Self::Command]
    }

    /// Directory name under `.claude`.
    pub(crate) fn dir_name(self) -> &'static str {
        match self {
            Self::Skill => "skills",
            Self::Agent => "agents",
            Self::Command => "commands",
        }
    }

    /// Singular label for messages.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::Agent => "Agent",
            Self::Command => "Command",
        }
    }

    /// Plural label for section headings.
    pub(crate) fn plural_label(self) -> &'static str {
        match self {
            Self::Skill => "Skills",
            Self::Agent => "Agents",
            Self::Command => "Commands",
        }
    }
}

/// Metadata for one skill, agent, or command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Identifier used on the command line: the skill directory or file stem.
    pub id: String,
    /// Declared name, falling back to the identifier.
    pub name: String,
    /// Declared description.
    pub description: String,
    /// Path to the markdown file.
    pub path: PathBuf,
    /// Tools a skill may use.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    /// Model an agent runs on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Scan `dir` for items of `kind`, sorted by identifier.
///
/// A missing directory yields an empty list. Files with invalid frontmatter
/// are skipped and reported through `diagnostics`.
pub fn scan(kind: ItemKind, dir: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Item>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(Error::ItemRead {
                path: dir.to_path_buf(),
                source: error,
            });
        }
    }
    .filter_map(|entry| entry.ok())
    .collect::<Vec<_>>();
    diagnostics.detail(format!("scanning {}", dir.display()));

    let mut items = Vec::new();
    for entry in entries {
        for (id, path) in item_files(kind, &entry.path(), diagnostics) {
            match load_item(id, path) {
                Ok(item) => items.push(item),
                Err((path, reason)) => diagnostics.warn_skipped(&path, reason),
            }
        }
    }
    items.sort_by(|left, right| left.id.cmp(&right.id));
    Ok(items)
}

/// Find an item by identifier or declared name.
pub fn find(
    kind: ItemKind,
    dir: &Path,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Item> {
    scan(kind, dir, diagnostics)?
        .into_iter()
        .find(|item| item.id == name || item.name == name)
        .ok_or_else(|| Error::ItemNotFound {
            kind: kind.label(),
            name: name.to_string(),
        })
}

/// Map a directory entry to the identifiers and markdown files for `kind`.
fn item_files(
    kind: ItemKind,
    entry: &Path,
    diagnostics: &mut Diagnostics,
) -> Vec<(String, PathBuf)> {
    match kind {
        ItemKind::Skill => skill_file(entry).into_iter().collect(),
        ItemKind::Command if entry.is_dir() => namespaced_commands(entry, diagnostics),
        ItemKind::Agent | ItemKind::Command => markdown_file(entry).into_iter().collect(),
    }
}

/// The `SKILL.md` (or `skill.md`) inside a skill directory.
fn skill_file(entry: &Path) -> Option<(String, PathBuf)> {
    if !entry.is_dir() {
        return None;
    }
    let id = entry.file_name()?.to_string_lossy().to_string();
    [SKILL_FILE_NAME, SKILL_FILE_NAME_LOWER]
        .iter()
        .map(|file| entry.join(file))
        .find(|path| path.is_file())
        .map(|path| (id, path))
}

/// A plain `.md` file, identified by its stem.
fn markdown_file(entry: &Path) -> Option<(String, PathBuf)> {
    if !entry.is_file() || entry.extension()? != MARKDOWN_EXTENSION {
        return None;
    }
    let id = entry.file_stem()?.to_string_lossy().to_string();
    Some((id, entry.to_path_buf()))
}

/// Commands one level down, identified as `<dir>:<stem>`.
///
/// Deeper directories are ignored.
fn namespaced_commands(dir: &Path, diagnostics: &mut Diagnostics) -> Vec<(String, PathBuf)> {
    let Some(namespace) = dir.file_name().map(|name| name.to_string_lossy().to_string()) else {
        return Vec::new();
    };
    let mut paths = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect::<Vec<_>>(),
        Err(error) => {
            diagnostics.warn_skipped(dir, error.to_string());
            return Vec::new();
        }
    };
    paths.sort();

    paths
        .iter()
        .map(PathBuf::as_path)
        .filter_map(markdown_file)
        .map(|(stem, path)| (format!("{namespace}{NAMESPACE_SEPARATOR}{stem}"), path))
        .collect()
}

/// Read and parse one item file.
fn load_item(id: String, path: PathBuf) -> StdResult<Item, (PathBuf, String)> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(error) => return Err((path, error.to_string())),
    };
    let frontmatter = match parse_frontmatter(&contents) {
        Ok(frontmatter) => frontmatter,
        Err(error) => return Err((path, error.message)),
    };

    Ok(Item {
        name: frontmatter.name.unwrap_or_else(|| id.clone()),
        id,
        description: frontmatter.description,
        path,
        allowed_tools: frontmatter.allowed_tools,
        model: frontmatter.model,
    })
}

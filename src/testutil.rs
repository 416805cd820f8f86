//! Test utilities for setting up mock `.claude` directories.
//!
//! `TestFixture` creates an isolated `.claude` root with `skills/`,
//! `agents/` and `commands/` subdirectories and a fluent builder API for
//! populating them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::catalog::{ItemKind, SKILL_FILE_NAME};

/// Frontmatter-only markdown with a name and description.
pub fn item_content(name: &str, description: &str) -> String {
    format!("---\nname: {name}\ndescription: {description}\n---\n")
}

/// Isolated `.claude` directory tree.
pub struct TestFixture {
    /// Root temp directory (holds everything).
    root: TempDir,
}

impl TestFixture {
    /// Create a fixture with empty item directories.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        for kind in ItemKind::all() {
            fs::create_dir_all(root.path().join(kind.dir_name())).expect("create item dir");
        }
        Self { root }
    }

    /// Add a skill directory containing `file_name`.
    pub fn with_skill(self, id: &str, file_name: &str, contents: &str) -> Self {
        let skill_dir = self.dir(ItemKind::Skill).join(id);
        fs::create_dir_all(&skill_dir).expect("create skill dir");
        fs::write(skill_dir.join(file_name), contents).expect("write skill");
        self
    }

    /// Add a named skill with a standard `SKILL.md`.
    pub fn with_named_skill(self, id: &str, description: &str) -> Self {
        self.with_skill(id, SKILL_FILE_NAME, &item_content(id, description))
    }

    /// Add a file under the directory for `kind`; `file_name` may contain
    /// subdirectories.
    pub fn with_file(self, kind: ItemKind, file_name: &str, contents: &str) -> Self {
        let path = self.dir(kind).join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create item parent");
        }
        fs::write(path, contents).expect("write item");
        self
    }

    /// Directory for items of `kind`.
    pub fn dir(&self, kind: ItemKind) -> PathBuf {
        self.root.path().join(kind.dir_name())
    }

    /// Root of the fixture, usable as a scratch directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Path for a config file inside the fixture.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::TestFixture;
    use crate::catalog::{ItemKind, SKILL_FILE_NAME};

    #[test]
    fn creates_empty_fixture() {
        let fixture = TestFixture::new();
        for kind in ItemKind::all() {
            assert!(fixture.dir(kind).is_dir());
        }
        assert!(!fixture.config_path().exists());
    }

    #[test]
    fn adds_named_skill() {
        let fixture = TestFixture::new().with_named_skill("my-skill", "Does things.");
        let path = fixture.dir(ItemKind::Skill).join("my-skill").join(SKILL_FILE_NAME);
        assert!(path.is_file());
        assert!(fixture.root().exists());
    }
}

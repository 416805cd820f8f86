//! Hierarchical configuration store.
//!
//! A [`Config`] owns one root table loaded from a TOML file. Values are
//! addressed with dot-paths (`common.api_keys.tiingo`) and can be overridden
//! from the environment, see [`Config::get_with_env`] and
//! [`Config::get_with_vendor_env`].

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use toml::Table as TomlTable;

use crate::{
    error::{Error, Result},
    paths,
};

/// Dot-path parsing and nested table traversal.
pub mod keypath;
/// Environment overrides and precedence.
pub mod overrides;
/// Typed values and string coercion.
pub mod value;

use self::{
    keypath::{delete_nested, lookup, parse_dot_key, set_nested},
    overrides::{Resolved, process_env, resolve},
    value::{Table, Value, table_from_toml, table_to_toml},
};

/// Persisted key-value configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Root table of the document.
    root: Table,
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config from its default location.
    pub fn load() -> Result<Self> {
        let path = paths::config_path()?;
        Self::load_from(&path)
    }

    /// Load a config file from an explicit path.
    ///
    /// A missing file is not an error and yields an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let table: TomlTable = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        Ok(Self {
            root: table_from_toml(table),
        })
    }

    /// Save the config to its default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = paths::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Serialize and write the config, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| Error::ConfigWrite {
                path: parent.to_path_buf(),
                source: error,
            })?;
        }

        fs::write(path, contents).map_err(|error| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: error,
        })
    }

    /// Read the value at a dot-path.
    pub fn get(&self, key: &str) -> Result<&Value> {
        let segments = parse_dot_key(key)?;
        lookup(&self.root, &segments)
    }

    /// Assign a value at a dot-path, creating intermediate tables.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let segments = parse_dot_key(key)?;
        set_nested(&mut self.root, &segments, value.into())
    }

    /// Remove the value at a dot-path.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let segments = parse_dot_key(key)?;
        delete_nested(&mut self.root, &segments)
    }

    /// Return true when the root table has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Borrow the root table.
    pub fn to_map(&self) -> &Table {
        &self.root
    }

    /// Encode the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        encode_table(&self.root)
    }

    /// List every leaf as a `(dot-path, value)` pair in key order.
    ///
    /// Empty tables are reported as leaves so they remain visible.
    pub fn flatten(&self) -> Vec<(String, &Value)> {
        let mut leaves = Vec::new();
        flatten_into(&self.root, "", &mut leaves);
        leaves
    }

    /// Resolve a key, preferring its `ITDA_` environment variable over the
    /// file.
    ///
    /// Returns `Ok(None)` when neither layer has the key.
    pub fn get_with_env(&self, key: &str) -> Result<Option<Resolved>> {
        resolve(self, key, None, process_env)
    }

    /// Like [`Config::get_with_env`], with an explicit variable lookup.
    pub fn get_with_env_in<F>(&self, key: &str, lookup: F) -> Result<Option<Resolved>>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve(self, key, None, lookup)
    }

    /// Resolve a key through a vendor variable, then its `ITDA_` variable,
    /// then the file.
    pub fn get_with_vendor_env(&self, key: &str, vendor_env: &str) -> Result<Option<Resolved>> {
        resolve(self, key, Some(vendor_env), process_env)
    }

    /// Like [`Config::get_with_vendor_env`], with an explicit variable lookup.
    pub fn get_with_vendor_env_in<F>(
        &self,
        key: &str,
        vendor_env: &str,
        lookup: F,
    ) -> Result<Option<Resolved>>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve(self, key, Some(vendor_env), lookup)
    }
}

/// Encode a table as a TOML document.
pub fn encode_table(table: &Table) -> Result<String> {
    toml::to_string(&table_to_toml(table.clone()))
        .map_err(|error| Error::ConfigSerialize { source: error })
}

/// Collect leaves below `table`, prefixing keys with `prefix`.
fn flatten_into<'a>(table: &'a Table, prefix: &str, leaves: &mut Vec<(String, &'a Value)>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(inner) if !inner.is_empty() => flatten_into(inner, &path, leaves),
            _ => leaves.push((path, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::Config;
    use crate::{
        config::value::{Table, Value},
        error::Error,
    };

    #[test]
    fn new_config_is_empty() {
        let config = Config::new();
        assert!(config.is_empty());
        assert!(config.to_map().is_empty());
    }

    #[test]
    fn loads_valid_toml() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[common]\ndefault_market = \"kr\"\n").expect("write config");

        let config = Config::load_from(&path).expect("load");
        let value = config.get("common.default_market").expect("get");
        assert_eq!(value, &Value::from("kr"));
    }

    #[test]
    fn missing_file_loads_empty_config() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("config.toml");

        let config = Config::load_from(&path).expect("missing file is fine");
        assert!(config.is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[invalid\n").expect("write config");

        let error = Config::load_from(&path).expect_err("parse should fail");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("dir").join("config.toml");

        let mut config = Config::new();
        config.set("common.default_market", "kr").expect("set");
        config.set("common.api_keys.tiingo", "test-key").expect("set");
        config.set("limits.retries", 3).expect("set");
        config.set("limits.ratio", 0.25).expect("set");
        config.set("flags.verbose", true).expect("set");
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.get("common.api_keys.tiingo").expect("get"),
            &Value::from("test-key")
        );
        assert_eq!(loaded.get("limits.ratio").expect("get"), &Value::Float(0.25));
    }

    #[test]
    fn preserves_arrays_and_datetimes_from_hand_edited_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[skills]\nenabled = [\"a\", \"b\"]\nsynced = 1979-05-27T07:32:00Z\n",
        )
        .expect("write config");

        let config = Config::load_from(&path).expect("load");
        config.save_to(&path).expect("save");
        let reloaded = Config::load_from(&path).expect("reload");

        assert_eq!(reloaded, config);
        assert_eq!(
            reloaded.get("skills.enabled").expect("get"),
            &Value::Array(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(reloaded.get("skills.synced").expect("get").type_name(), "datetime");
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut config = Config::new();
        config.set("key", "value").expect("set");
        config.set("a.b.c", "deep").expect("set");
        assert_eq!(config.get("key").expect("get"), &Value::from("value"));
        assert_eq!(config.get("a.b.c").expect("get"), &Value::from("deep"));
        assert!(!config.is_empty());
    }

    #[test]
    fn intermediate_tables_are_real_tables() {
        let mut config = Config::new();
        config.set("x.y.z", 42).expect("set");

        let mut expected = Table::new();
        expected.insert("z".to_string(), Value::Integer(42));
        assert_eq!(config.get("x.y").expect("get"), &Value::Table(expected));
    }

    #[test]
    fn get_missing_key_fails() {
        let config = Config::new();
        let error = config.get("nonexistent").expect_err("missing");
        assert!(matches!(error, Error::KeyNotFound { .. }));
    }

    #[test]
    fn get_rejects_invalid_keys() {
        let config = Config::new();
        for key in ["", "   ", "a..b"] {
            let error = config.get(key).expect_err("invalid");
            assert!(matches!(error, Error::InvalidKey { .. }));
        }
    }

    #[test]
    fn vendor_resolution_reports_key_errors() {
        let mut config = Config::new();
        config.set("common", "flat").expect("set");
        let vendor = "JINDO_TEST_UNSET_VENDOR_VARIABLE";

        let error = config
            .get_with_vendor_env(" ", vendor)
            .expect_err("invalid key");
        assert!(matches!(error, Error::InvalidKey { .. }));

        let error = config
            .get_with_vendor_env("common.market.region", vendor)
            .expect_err("not a map");
        assert!(matches!(error, Error::NotAMap { key } if key == "common"));
    }

    #[test]
    fn delete_keeps_siblings() {
        let mut config = Config::new();
        config.set("a.b", "val").expect("set");
        config.set("a.c", "keep").expect("set");

        config.delete("a.b").expect("delete");

        let error = config.get("a.b").expect_err("deleted");
        assert!(matches!(error, Error::KeyNotFound { .. }));
        assert_eq!(config.get("a.c").expect("get"), &Value::from("keep"));
    }

    #[test]
    fn delete_missing_key_fails() {
        let mut config = Config::new();
        let error = config.delete("key").expect_err("missing");
        assert!(matches!(error, Error::KeyNotFound { .. }));
    }

    #[test]
    fn to_map_exposes_root() {
        let mut config = Config::new();
        config.set("key", "value").expect("set");
        assert_eq!(config.to_map()["key"], Value::from("value"));
    }

    #[test]
    fn to_toml_writes_sections() {
        let mut config = Config::new();
        config.set("common.market", "kr").expect("set");

        let encoded = config.to_toml().expect("encode");
        assert!(encoded.contains("[common]"));
        assert!(encoded.contains("market = \"kr\""));
    }

    #[test]
    fn flatten_lists_leaves_in_order() {
        let mut config = Config::new();
        config.set("b.two", 2).expect("set");
        config.set("a", "first").expect("set");
        config.set("b.one", 1).expect("set");
        config.set("empty", Table::new()).expect("set");

        let keys = config
            .flatten()
            .into_iter()
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "b.one", "b.two", "empty"]);
    }
}

//! Environment overrides layered over the persisted config.

use std::{env, fmt};

use crate::{
    config::{Config, value::Value},
    error::Result,
};

/// Prefix for environment variables derived from dot-paths.
pub const ENV_PREFIX: &str = "ITDA_";

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// A caller-named vendor variable such as `TIINGO_API_KEY`.
    VendorEnv(String),
    /// The `ITDA_` variable derived from the dot-path.
    Env(String),
    /// The persisted config file.
    File,
}

/// A value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The resolved value. Environment layers always yield strings.
    pub value: Value,
    /// The layer that supplied the value.
    pub source: ValueSource,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VendorEnv(name) | Self::Env(name) => write!(f, "environment ({name})"),
            Self::File => f.write_str("config file"),
        }
    }
}

/// Derive the environment variable name for a dot-path.
///
/// Dots become underscores, the result is uppercased and prefixed with
/// `ITDA_`. Hyphens are kept: `skills.quant-data.format` maps to
/// `ITDA_SKILLS_QUANT-DATA_FORMAT`.
pub fn to_env_key(path: &str) -> String {
    format!("{ENV_PREFIX}{}", path.replace('.', "_").to_uppercase())
}

/// Look a variable up in the process environment.
///
/// Present-but-empty counts as set; non-Unicode values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    env::var_os(name).and_then(|value| value.into_string().ok())
}

/// Resolve `key` through the vendor variable (if any), the derived
/// variable, and finally the config file.
///
/// A key missing from every layer yields `Ok(None)`. Malformed keys and
/// traversals through scalars are errors.
pub(crate) fn resolve<F>(
    config: &Config,
    key: &str,
    vendor_env: Option<&str>,
    lookup: F,
) -> Result<Option<Resolved>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = vendor_env
        && let Some(value) = lookup(name)
    {
        return Ok(Some(Resolved {
            value: Value::String(value),
            source: ValueSource::VendorEnv(name.to_string()),
        }));
    }

    let env_key = to_env_key(key.trim());
    if let Some(value) = lookup(&env_key) {
        return Ok(Some(Resolved {
            value: Value::String(value),
            source: ValueSource::Env(env_key),
        }));
    }

    match config.get(key) {
        Ok(value) => Ok(Some(Resolved {
            value: value.clone(),
            source: ValueSource::File,
        })),
        Err(error) if error.is_key_not_found() => Ok(None),
        Err(error) => Err(error),
    }
}

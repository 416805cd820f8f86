//! Implementation of the `jindo config` subcommands.

use std::{env, fs, path::Path, process::Command};

use inquire::{Confirm, error::InquireError};
use serde_json::Value as JsonValue;

use crate::{
    commands::ColorChoice,
    config::{
        Config, encode_table,
        overrides::Resolved,
        value::{Value, parse_value, table_to_json},
    },
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette,
    paths::{config_path, display_path},
};

/// Contents written by `config init` and before the first `config edit`.
const CONFIG_TEMPLATE: &str = "\
# itda-skills configuration
#
# Keys use dot notation on the command line:
#   jindo config set common.api_keys.tiingo <KEY>
#
# Any key can be overridden with an ITDA_ environment variable, e.g.
#   ITDA_COMMON_API_KEYS_TIINGO=<KEY>
";

/// Fallback editor when neither `EDITOR` nor `VISUAL` is set.
const DEFAULT_EDITOR: &str = "vi";

/// Execute `config init`.
pub async fn init(force: bool) -> Result<()> {
    let path = config_path()?;
    if path.is_file() && !force {
        let prompt = format!(
            "Config already exists at {}. Replace it with an empty one?",
            display_path(&path)
        );
        if !confirm(&prompt)? {
            println!("Kept existing config at {}", display_path(&path));
            return Ok(());
        }
    }

    write_template(&path)?;
    println!("Created config at {}", display_path(&path));
    Ok(())
}

/// Execute `config get`.
pub async fn get(
    verbose: bool,
    key: String,
    vendor_env: Option<String>,
    show_source: bool,
) -> Result<()> {
    let diagnostics = Diagnostics::new(verbose);
    let config = Config::load()?;
    let resolved = resolve_key(&config, &key, vendor_env.as_deref())?;

    if show_source {
        println!("{} (from {})", render_value(&resolved.value)?, resolved.source);
    } else {
        diagnostics.detail(format!("{} resolved from {}", key.trim(), resolved.source));
        println!("{}", render_value(&resolved.value)?);
    }
    Ok(())
}

/// Execute `config set`.
pub async fn set(key: String, raw: String) -> Result<()> {
    let path = config_path()?;
    let value = set_at(&path, &key, &raw)?;
    println!("Set {} = {} ({})", key.trim(), value.literal(), value.type_name());
    Ok(())
}

/// Execute `config unset`.
pub async fn unset(key: String) -> Result<()> {
    let path = config_path()?;
    unset_at(&path, &key)?;
    println!("Removed {}", key.trim());
    Ok(())
}

/// Execute `config list`.
pub async fn list(color: ColorChoice, json: bool) -> Result<()> {
    let config = Config::load()?;

    if json {
        let object = JsonValue::Object(table_to_json(config.to_map()));
        let rendered = serde_json::to_string_pretty(&object)
            .map_err(|error| Error::JsonSerialize { source: error })?;
        println!("{rendered}");
        return Ok(());
    }

    if config.is_empty() {
        println!("No configuration set. Use `jindo config set <key> <value>` to add one.");
        return Ok(());
    }

    for line in list_lines(&config, color.enabled()) {
        println!("{line}");
    }
    Ok(())
}

/// Execute `config path`.
pub async fn path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

/// Execute `config edit`.
pub async fn edit(verbose: bool) -> Result<()> {
    let diagnostics = Diagnostics::new(verbose);
    let path = config_path()?;
    if !path.is_file() {
        write_template(&path)?;
        diagnostics.detail(format!("created {}", display_path(&path)));
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
    run_editor(&editor, &path)?;

    // Surface syntax errors now rather than on the next read.
    Config::load_from(&path)?;
    Ok(())
}

/// Load the config at `path`, set `key` to the coerced `raw`, and save.
fn set_at(path: &Path, key: &str, raw: &str) -> Result<Value> {
    let mut config = Config::load_from(path)?;
    let value = parse_value(raw);
    config.set(key, value.clone())?;
    config.save_to(path)?;
    Ok(value)
}

/// Load the config at `path`, delete `key`, and save.
fn unset_at(path: &Path, key: &str) -> Result<()> {
    let mut config = Config::load_from(path)?;
    config.delete(key)?;
    config.save_to(path)
}

/// Resolve a key through the environment layers, failing when absent.
fn resolve_key(config: &Config, key: &str, vendor_env: Option<&str>) -> Result<Resolved> {
    let resolved = match vendor_env {
        Some(name) => config.get_with_vendor_env(key, name)?,
        None => config.get_with_env(key)?,
    };
    resolved.ok_or_else(|| Error::KeyNotFound {
        key: key.trim().to_string(),
    })
}

/// Render a resolved value for `config get`; tables print as TOML.
fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::Table(table) => Ok(encode_table(table)?.trim_end().to_string()),
        other => Ok(other.to_string()),
    }
}

/// Format every leaf as `key = literal`.
fn list_lines(config: &Config, use_color: bool) -> Vec<String> {
    config
        .flatten()
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{} = {}",
                palette::fmt_config_key(&key, use_color),
                value.literal()
            )
        })
        .collect()
}

/// Write the commented template, creating parent directories.
fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| Error::ConfigWrite {
            path: parent.to_path_buf(),
            source: error,
        })?;
    }
    fs::write(path, CONFIG_TEMPLATE).map_err(|error| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: error,
    })
}

/// Launch `editor` on `path`, splitting the editor command shell-style.
fn run_editor(editor: &str, path: &Path) -> Result<()> {
    let words = shell_words::split(editor).map_err(|error| Error::EditorFailed {
        editor: editor.to_string(),
        message: error.to_string(),
    })?;
    let Some((program, args)) = words.split_first() else {
        return Err(Error::EditorFailed {
            editor: editor.to_string(),
            message: "empty editor command".to_string(),
        });
    };

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .map_err(|error| Error::EditorFailed {
            editor: editor.to_string(),
            message: error.to_string(),
        })?;

    if !status.success() {
        return Err(Error::EditorStatus {
            editor: editor.to_string(),
            status,
        });
    }
    Ok(())
}

/// Prompt for confirmation.
fn confirm(message: &str) -> Result<bool> {
    match Confirm::new(message).with_default(false).prompt() {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Err(Error::PromptCanceled)
        }
        Err(error) => Err(Error::PromptFailed {
            message: error.to_string(),
        }),
    }
}

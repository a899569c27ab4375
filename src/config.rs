use crate::error::{Result, ToolError};
use crate::types::config::ToolConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "sarif-issue.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".sarif-issue/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/sarif-issue/config.toml";

/// Loads global, repo and local layers (later wins), then applies `overrides`
/// built from command-line flags on top.
pub fn load_config(root: &Path, explicit: Option<&Path>, overrides: Value) -> Result<ToolConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref(), overrides)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
    overrides: Value,
) -> Result<ToolConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }

    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ToolError::ConfigNotFound(path.display().to_string()));
            }
            merge_file_if_exists(&mut merged, path)?;
        }
        None => merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?,
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;
    merge_toml(&mut merged, overrides);

    let cfg: ToolConfig = merged.try_into()?;
    Ok(cfg)
}

/// Builds a nested override table from `section.key` pairs, skipping unset values.
pub fn overrides<I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'static str, &'static str, Option<Value>)>,
{
    let mut root = Map::new();
    for (section, key, value) in entries {
        let Some(value) = value else { continue };
        let table = root
            .entry(section)
            .or_insert(Value::Table(Map::new()));
        if let Value::Table(table) = table {
            table.insert(key.to_string(), value);
        }
    }
    Value::Table(root)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "loading config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ToolError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

use crate::error::{FitQuizError, Result};
use crate::types::settings::Settings;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_SETTINGS_FILE: &str = "fitquiz.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".fitquiz/local.toml";
pub const DEFAULT_GLOBAL_SETTINGS_FILE: &str = ".config/fitquiz/config.toml";

/// Loads layered settings for a working directory: global, project, then local.
pub fn load_settings(root: &Path) -> Result<Settings> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_SETTINGS_FILE));
    load_settings_with_global(root, global.as_deref())
}

pub(crate) fn load_settings_with_global(root: &Path, global_path: Option<&Path>) -> Result<Settings> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_SETTINGS_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let settings: Settings = merged
        .try_into()
        .map_err(|e: toml::de::Error| FitQuizError::SettingsParse(e.to_string()))?;
    settings.validate()?;
    tracing::debug!(schema = %settings.schema_path(), "settings resolved");
    Ok(settings)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| FitQuizError::SettingsParse(format!("{}: {}", path.display(), e)))
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

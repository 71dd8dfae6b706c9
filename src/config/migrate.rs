use super::Config;
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Keys of [`Config::KEYS`] absent from the YAML text.
/// Text that is not a YAML mapping is reported as missing every key.
pub fn missing_keys(content: &str) -> Vec<&'static str> {
    let map = match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => m,
        _ => Mapping::new(),
    };

    Config::KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect()
}

/// Read the config file at `path` and report its missing keys.
pub fn check_file(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    Ok(missing_keys(&content))
}

/// Add every missing key with its default value, keeping the values already
/// present. Returns the keys that were added; the file is only rewritten when
/// something changed.
pub fn fill_missing_keys(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let missing = missing_keys(&content);

    if missing.is_empty() {
        info("Configuration file is up to date.");
        return Ok(missing);
    }

    let mut map = match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => m,
        _ => Mapping::new(),
    };

    let defaults = serde_yaml::to_value(Config::default()).map_err(io::Error::other)?;
    let defaults = defaults
        .as_mapping()
        .ok_or_else(|| io::Error::other("default configuration is not a mapping"))?;

    for key in &missing {
        let k = Value::String(key.to_string());
        if let Some(v) = defaults.get(&k) {
            map.insert(k, v.clone());
        }
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map)).map_err(|e| {
        io::Error::other(format!("Failed to serialize YAML for {:?}: {}", path, e))
    })?;
    fs::write(path, serialized)?;

    success(format!(
        "Configuration migrated: added {}",
        missing.join(", ")
    ));

    Ok(missing)
}

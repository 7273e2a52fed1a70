//! Configuration management for the demo driver.

use filedb_engine::StoreOptions;
use std::env;
use std::path::PathBuf;

/// Default location of the store file.
pub const DEFAULT_PATH: &str = "data/data.json";

/// Driver configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store file path
    pub path: PathBuf,
    /// Write via temp file and rename
    pub atomic_writes: bool,
    /// Lock the file for every operation
    pub exclusive: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = lookup("FILEDB_PATH")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string())
            .into();

        let atomic_writes = parse_flag("FILEDB_ATOMIC_WRITES", lookup("FILEDB_ATOMIC_WRITES"))?;
        let exclusive = parse_flag("FILEDB_EXCLUSIVE", lookup("FILEDB_EXCLUSIVE"))?;

        Ok(Self {
            path,
            atomic_writes,
            exclusive,
        })
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new()
            .atomic_writes(self.atomic_writes)
            .exclusive(self.exclusive)
    }
}

fn parse_flag(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(ConfigError::InvalidFlag {
            name,
            value: v.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name} value: {value:?} (expected true or false)")]
    InvalidFlag { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.path, PathBuf::from(DEFAULT_PATH));
        assert!(!config.atomic_writes);
        assert!(!config.exclusive);
        assert_eq!(config.store_options(), StoreOptions::default());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("FILEDB_PATH", "/tmp/users.json"),
            ("FILEDB_ATOMIC_WRITES", "TRUE"),
            ("FILEDB_EXCLUSIVE", "1"),
        ])
        .unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/users.json"));
        assert_eq!(config.store_options(), StoreOptions::hardened());
    }

    #[test]
    fn empty_path_falls_back() {
        let config = load(&[("FILEDB_PATH", "")]).unwrap();
        assert_eq!(config.path, PathBuf::from(DEFAULT_PATH));
    }

    #[test]
    fn invalid_flag() {
        let err = load(&[("FILEDB_EXCLUSIVE", "yes please")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { name: "FILEDB_EXCLUSIVE", .. }));
        assert_eq!(
            err.to_string(),
            "Invalid FILEDB_EXCLUSIVE value: \"yes please\" (expected true or false)"
        );
    }
}

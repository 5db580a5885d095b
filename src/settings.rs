//! Settings loaded from TOML
//!
//! Read from ~/.config/textris/settings.toml (or platform equivalent). The
//! file is optional and never written; every key falls back to its default.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Game settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Command keys
    pub keys: KeyBindings,
    /// Log output
    pub logging: LoggingSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_cw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_ccw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub new_piece: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub place: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub choose_next: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub debug: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level for this crate's log lines: "error" through "trace"
    pub level: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate_cw: vec!["r".to_string()],
            rotate_ccw: vec!["R".to_string()],
            new_piece: vec!["n".to_string()],
            soft_drop: vec!["s".to_string()],
            hard_drop: vec!["S".to_string()],
            move_left: vec!["a".to_string()],
            move_right: vec!["d".to_string()],
            place: vec!["p".to_string()],
            choose_next: vec!["c".to_string()],
            debug: vec!["?".to_string()],
            quit: vec!["q".to_string()],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Why a settings file was ignored
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "textris", "textris").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load settings from `path`; Ok(None) if there is no such file
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&contents)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load settings from the platform config directory.
    /// Ok(None) when there is no config directory or no settings file.
    pub fn load() -> Result<Option<(Self, PathBuf)>, SettingsError> {
        let Some(path) = Self::settings_path() else {
            return Ok(None);
        };

        Ok(Self::load_from(&path)?.map(|settings| (settings, path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.keys.rotate_cw, vec!["r"]);
        assert_eq!(settings.keys.hard_drop, vec!["S"]);
        assert_eq!(settings.keys.debug, vec!["?"]);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_single_key_and_key_list() {
        let settings = Settings::parse(
            r#"
            [keys]
            move_left = "h"
            move_right = ["l", "d"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.move_left, vec!["h"]);
        assert_eq!(settings.keys.move_right, vec!["l", "d"]);
        // Untouched keys keep their defaults
        assert_eq!(settings.keys.quit, vec!["q"]);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Settings::parse("[keys]\nquit = 5\n").is_err());
        assert!(Settings::parse("[keys").is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("textris-no-such-dir/settings.toml");
        assert!(matches!(Settings::load_from(&path), Ok(None)));
    }
}

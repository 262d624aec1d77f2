use crate::folder::FolderOrdering;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// User preferences, persisted as TOML.
///
/// Keys are read one at a time: a missing or mistyped key takes its default
/// without affecting the others, and unknown keys are ignored, so old and
/// new config files both load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Emphasize the pre-selected item in the switcher.
    pub highlight_current_item: bool,

    /// Identifier of a [`FolderOrdering`]; anything else keeps listing order.
    pub folder_ordering: String,

    /// Let previous/next reach the first and last line of the document.
    pub include_document_boundaries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_current_item: true,
            folder_ordering: FolderOrdering::ByNameAscending.to_string(),
            include_document_boundaries: false,
        }
    }
}

/// Keys accepted by [`Settings::apply`], in display order.
pub const SETTING_KEYS: [&str; 3] = [
    "highlight-current-item",
    "folder-ordering",
    "include-document-boundaries",
];

#[derive(Debug)]
pub enum SettingsError {
    NoConfigDir,
    Io(io::Error),
    Serialize(toml::ser::Error),
    UnknownKey(String),
    InvalidValue { key: String, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "could not determine config directory"),
            SettingsError::Io(e) => write!(f, "cannot write settings: {}", e),
            SettingsError::Serialize(e) => write!(f, "cannot serialize settings: {}", e),
            SettingsError::UnknownKey(key) => write!(
                f,
                "unknown setting '{}' (expected one of: {})",
                key,
                SETTING_KEYS.join(", ")
            ),
            SettingsError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for '{}'", value, key)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

impl Settings {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/headway/config.toml
    /// - Linux: ~/.config/headway/config.toml
    /// - Windows: %APPDATA%/headway/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("headway").join("config.toml"))
    }

    /// Load settings from the default location, or defaults if absent.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. Never fails: unreadable or malformed files
    /// give the defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::debug!("no settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match contents.parse::<toml::Table>() {
            Ok(table) => Self::from_table(&table),
            Err(e) => {
                log::warn!("ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Build settings from a parsed TOML table, key by key.
    ///
    /// Booleans also accept the strings [`Settings::apply`] does. A
    /// non-string ordering is kept as its TOML text, which no ordering
    /// recognises, so folders keep their listing order.
    pub fn from_table(table: &toml::Table) -> Self {
        use toml::Value;

        let mut settings = Self::default();
        for (key, value) in table {
            let flag = match value {
                Value::Boolean(b) => Some(*b),
                Value::String(s) => parse_bool(s),
                _ => None,
            };
            match key.as_str() {
                "highlight-current-item" => match flag {
                    Some(b) => settings.highlight_current_item = b,
                    None => log::warn!("ignoring invalid value {} for {}", value, key),
                },
                "include-document-boundaries" => match flag {
                    Some(b) => settings.include_document_boundaries = b,
                    None => log::warn!("ignoring invalid value {} for {}", value, key),
                },
                "folder-ordering" => {
                    settings.folder_ordering = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                }
                _ => log::debug!("ignoring unknown setting {}", key),
            }
        }
        settings
    }

    /// Atomically replace `path` with these settings.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let contents = toml::to_string_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;

        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// The folder ordering to apply, or `None` (listing order) when the
    /// stored identifier is not recognised.
    pub fn ordering(&self) -> Option<FolderOrdering> {
        let ordering = FolderOrdering::from_identifier(&self.folder_ordering);
        if ordering.is_none() {
            log::warn!(
                "unknown folder ordering '{}', keeping listing order",
                self.folder_ordering
            );
        }
        ordering
    }

    /// Change one setting by key, as the settings UI does.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "highlight-current-item" => {
                self.highlight_current_item = parse_bool(value).ok_or_else(invalid)?;
            }
            "include-document-boundaries" => {
                self.include_document_boundaries = parse_bool(value).ok_or_else(invalid)?;
            }
            "folder-ordering" => {
                let ordering = FolderOrdering::from_identifier(value).ok_or_else(invalid)?;
                self.folder_ordering = ordering.to_string();
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Change one setting and persist immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.set_in(&path, key, value)
    }

    /// Change one setting and persist it to `path`. Nothing is written when
    /// the change is rejected.
    pub fn set_in(&mut self, path: &Path, key: &str, value: &str) -> Result<(), SettingsError> {
        self.apply(key, value)?;
        self.save_to(path)
    }

    /// `(key, value)` pairs in [`SETTING_KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (SETTING_KEYS[0], self.highlight_current_item.to_string()),
            (SETTING_KEYS[1], self.folder_ordering.clone()),
            (SETTING_KEYS[2], self.include_document_boundaries.to_string()),
        ]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.highlight_current_item);
        assert_eq!(settings.folder_ordering, "ByNameAscending");
        assert!(!settings.include_document_boundaries);
        assert_eq!(settings.ordering(), Some(FolderOrdering::ByNameAscending));
    }

    fn parse(contents: &str) -> Settings {
        Settings::from_table(&contents.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn test_missing_keys_fall_back_and_unknown_keys_ignored() {
        let settings = parse("include-document-boundaries = true\nfavourite-colour = \"teal\"\n");
        assert!(settings.include_document_boundaries);
        assert!(settings.highlight_current_item);
        assert_eq!(settings.folder_ordering, "ByNameAscending");
    }

    #[test]
    fn test_malformed_ordering_means_identity() {
        let settings = parse("folder-ordering = \"ByVibes\"\n");
        assert_eq!(settings.ordering(), None);
    }

    #[test]
    fn test_one_mistyped_value_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "include-document-boundaries = true\nhighlight-current-item = false\nfolder-ordering = 3\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.include_document_boundaries);
        assert!(!settings.highlight_current_item);
        assert_eq!(settings.folder_ordering, "3");
        assert_eq!(settings.ordering(), None);
    }

    #[test]
    fn test_mistyped_flags_fall_back_individually() {
        let settings = parse("highlight-current-item = 7\ninclude-document-boundaries = \"yes\"\n");
        assert!(settings.highlight_current_item);
        assert!(settings.include_document_boundaries);
        assert_eq!(settings.ordering(), Some(FolderOrdering::ByNameAscending));
    }

    #[test]
    fn test_set_in_persists_each_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headway").join("config.toml");

        let mut settings = Settings::default();
        settings
            .set_in(&path, "folder-ordering", "ByModificationDateAscending")
            .unwrap();
        assert_eq!(
            Settings::load_from(&path).ordering(),
            Some(FolderOrdering::ByModificationDateAscending)
        );

        settings.set_in(&path, "include-document-boundaries", "on").unwrap();
        let loaded = Settings::load_from(&path);
        assert!(loaded.include_document_boundaries);
        assert_eq!(loaded, settings);

        assert!(settings.set_in(&path, "folder-ordering", "Sideways").is_err());
        assert_eq!(Settings::load_from(&path), loaded);
    }

    #[test]
    fn test_load_missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("absent.toml")), Settings::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "highlight-current-item = [[[").unwrap();
        assert_eq!(Settings::load_from(&broken), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.apply("folder-ordering", "ByCreationDateDescending").unwrap();
        settings.apply("highlight-current-item", "off").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.ordering(), Some(FolderOrdering::ByCreationDateDescending));
        assert!(!loaded.highlight_current_item);
    }

    #[test]
    fn test_apply_rejects_bad_input_without_touching_others() {
        let mut settings = Settings::default();
        settings.apply("include-document-boundaries", "yes").unwrap();

        assert!(matches!(
            settings.apply("folder-ordering", "Sideways"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.apply("highlight-current-item", "maybe"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.apply("theme", "dark"),
            Err(SettingsError::UnknownKey(_))
        ));

        assert!(settings.include_document_boundaries);
        assert!(settings.highlight_current_item);
        assert_eq!(settings.folder_ordering, "ByNameAscending");
    }

    #[test]
    fn test_entries_follow_key_order() {
        let keys: Vec<&str> = Settings::default().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, SETTING_KEYS.to_vec());
    }
}

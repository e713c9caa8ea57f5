//! Reading and writing `~/.geohex/config.ini`.
//!
//! A missing file is not an error: every setting falls back to the values in
//! [`super::defaults`]. The section layout lives in [`super::settings`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use super::TessellationConfig;
use crate::rule::PitchClassRule;

/// Errors raised while loading or saving the INI file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but is not valid INI.
    #[error("Config file is not valid INI: {0}")]
    Parse(#[from] ini::Error),

    /// The file could not be written.
    #[error("Cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// A key holds a value of the wrong kind or range.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The directory holding the file could not be created.
    #[error("Cannot create {}: {source}", .path.display())]
    Directory { path: PathBuf, source: io::Error },
}

impl ConfigFile {
    /// Read `~/.geohex/config.ini`, or the defaults when it is absent.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Read the INI file at `path`, or the defaults when it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        match path.try_exists() {
            Ok(true) => super::parser::parse_ini(&Ini::load_from_file(path)?),
            _ => Ok(Self::default()),
        }
    }

    /// Write to `~/.geohex/config.ini`.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Write a commented INI file to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigFileError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, super::writer::to_config_string(self)).map_err(|source| {
            ConfigFileError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Write the default file unless one is already present; returns its path.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Engine configuration from the `[tessellation]` section.
    pub fn tessellation_config(&self) -> TessellationConfig {
        TessellationConfig::new()
            .with_cell_size_m(self.tessellation.cell_size)
            .with_region_tolerance_deg(self.tessellation.region_tolerance)
            .with_lookup_tolerance_m(self.tessellation.lookup_tolerance)
    }

    /// Pitch-class rule from the `[rule]` section.
    pub fn pitch_rule(&self) -> PitchClassRule {
        PitchClassRule::new(self.rule.west, self.rule.south_east, self.rule.south_west)
    }
}

/// `~/.geohex`, or `./.geohex` when no home directory is known.
pub fn config_directory() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".geohex")
}

/// `~/.geohex/config.ini`.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_constants() {
        let defaults = ConfigFile::default();

        assert_eq!(defaults.tessellation.cell_size, DEFAULT_CELL_SIZE_M);
        assert_eq!(defaults.rule.west, DEFAULT_RULE_WEST);
        assert!(defaults.logging.file.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(loaded, ConfigFile::default());
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "plain file").unwrap();

        let err = ConfigFile::default()
            .save_to(&blocker.join("config.ini"))
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::Directory { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut edited = ConfigFile::default();
        edited.tessellation.cell_size = 12_345.5;
        edited.rule.south_west = -2;
        edited.logging.file = dir.path().join("run.log");
        edited.save_to(&path).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), edited);
    }

    #[test]
    fn test_saved_file_is_commented() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        ConfigFile::default().save_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[tessellation]"));
        assert!(content.contains("[rule]"));
        assert!(content.contains("[logging]"));
        assert!(content.lines().any(|l| l.starts_with(';')));
    }

    #[test]
    fn test_tessellation_config_from_file() {
        let mut file = ConfigFile::default();
        file.tessellation.cell_size = 2_000.0;
        file.tessellation.lookup_tolerance = 0.25;

        let engine = file.tessellation_config();
        assert_eq!(engine.cell_size_m(), 2_000.0);
        assert_eq!(engine.lookup_tolerance_m(), 0.25);
        assert_eq!(engine.region_tolerance_deg(), DEFAULT_REGION_TOLERANCE_DEG);
    }

    #[test]
    fn test_pitch_rule_from_file() {
        let rule = ConfigFile::default().pitch_rule();
        assert_eq!(rule.west(), DEFAULT_RULE_WEST);
        assert_eq!(rule.south_east(), DEFAULT_RULE_SOUTH_EAST);
        assert_eq!(rule.south_west(), DEFAULT_RULE_SOUTH_WEST);
    }

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".geohex"));
        assert!(config_file_path().ends_with("config.ini"));
    }
}

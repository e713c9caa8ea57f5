//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tessellation] section
    if let Some(section) = ini.section(Some("tessellation")) {
        if let Some(v) = section.get("cell_size") {
            config.tessellation.cell_size = parse_f64("tessellation", "cell_size", v)?;
            if config.tessellation.cell_size <= 0.0 {
                return Err(invalid(
                    "tessellation",
                    "cell_size",
                    v,
                    "must be greater than zero (metres)",
                ));
            }
        }
        if let Some(v) = section.get("region_tolerance") {
            config.tessellation.region_tolerance = parse_f64("tessellation", "region_tolerance", v)?;
            if config.tessellation.region_tolerance < 0.0 {
                return Err(invalid(
                    "tessellation",
                    "region_tolerance",
                    v,
                    "must not be negative (degrees)",
                ));
            }
        }
        if let Some(v) = section.get("lookup_tolerance") {
            config.tessellation.lookup_tolerance = parse_f64("tessellation", "lookup_tolerance", v)?;
            if config.tessellation.lookup_tolerance < 0.0 {
                return Err(invalid(
                    "tessellation",
                    "lookup_tolerance",
                    v,
                    "must not be negative (metres)",
                ));
            }
        }
    }

    // [rule] section
    if let Some(section) = ini.section(Some("rule")) {
        if let Some(v) = section.get("west") {
            config.rule.west = parse_i32("rule", "west", v)?;
        }
        if let Some(v) = section.get("south_east") {
            config.rule.south_east = parse_i32("rule", "south_east", v)?;
        }
        if let Some(v) = section.get("south_west") {
            config.rule.south_west = parse_i32("rule", "south_west", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a finite floating point value.
fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(section, key, value, "expected a finite number")),
    }
}

/// Parse a semitone offset.
fn parse_i32(section: &str, key: &str, value: &str) -> Result<i32, ConfigFileError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(section, key, value, "expected a whole number of semitones"))
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = load(
            r#"
[tessellation]
cell_size = 25000
"#,
        )
        .unwrap();

        assert_eq!(config.tessellation.cell_size, 25_000.0);
        assert_eq!(config.tessellation.lookup_tolerance, DEFAULT_LOOKUP_TOLERANCE_M);
        assert_eq!(config.rule.west, DEFAULT_RULE_WEST);
    }

    #[test]
    fn test_rule_section() {
        let config = load(
            r#"
[rule]
west = 1
south_east = 2
south_west = -3
"#,
        )
        .unwrap();

        assert_eq!(config.rule.west, 1);
        assert_eq!(config.rule.south_east, 2);
        assert_eq!(config.rule.south_west, -3);
    }

    #[test]
    fn test_invalid_cell_size() {
        let err = load(
            r#"
[tessellation]
cell_size = big
"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("tessellation.cell_size"));
        assert!(msg.contains("finite number"));
    }

    #[test]
    fn test_non_positive_cell_size() {
        let err = load(
            r#"
[tessellation]
cell_size = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "cell_size"));
    }

    #[test]
    fn test_negative_tolerance() {
        let err = load(
            r#"
[tessellation]
lookup_tolerance = -1
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_invalid_rule_offset() {
        let err = load(
            r#"
[rule]
west = 1.5
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rule.west"));
    }

    #[test]
    fn test_logging_file_with_tilde() {
        let config = load(
            r#"
[logging]
file = ~/logs/geohex.log
"#,
        )
        .unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.logging.file, home.join("logs/geohex.log"));
        }
    }

    #[test]
    fn test_empty_logging_file_keeps_default() {
        let config = load("[logging]\nfile =\n").unwrap();
        assert!(config.logging.file.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/log/x.log"), PathBuf::from("/var/log/x.log"));
    }
}

//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tessellation geometry and tolerances
    pub tessellation: TessellationSettings,
    /// Pitch-class propagation offsets
    pub rule: RuleSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Tessellation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationSettings {
    /// Hexagon outer-circle radius in metres
    pub cell_size: f64,
    /// Region containment tolerance in degrees
    pub region_tolerance: f64,
    /// Neighbor lookup tolerance in metres
    pub lookup_tolerance: f64,
}

/// Semitone offsets of the pitch-class rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSettings {
    /// Semitones added moving east from the west neighbor
    pub west: i32,
    /// Semitones added moving north-west from the south-east neighbor
    pub south_east: i32,
    /// Semitones added moving north-east from the south-west neighbor
    pub south_west: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;

// =============================================================================
// Tessellation
// =============================================================================

/// Default hexagon outer-circle radius (50 km).
pub const DEFAULT_CELL_SIZE_M: f64 = 50_000.0;

/// Default slack on the region containment test, in degrees.
pub const DEFAULT_REGION_TOLERANCE_DEG: f64 = 1e-9;

/// Default half-size of the neighbor lookup box, in metres.
pub const DEFAULT_LOOKUP_TOLERANCE_M: f64 = 1.0;

// =============================================================================
// Rule
// =============================================================================

/// A fifth along each row.
pub const DEFAULT_RULE_WEST: i32 = 7;

/// A major third up the north-west diagonal.
pub const DEFAULT_RULE_SOUTH_EAST: i32 = 4;

/// A minor third up the north-east diagonal.
pub const DEFAULT_RULE_SOUTH_WEST: i32 = 3;

// =============================================================================
// Logging
// =============================================================================

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "geohex.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tessellation: TessellationSettings {
                cell_size: DEFAULT_CELL_SIZE_M,
                region_tolerance: DEFAULT_REGION_TOLERANCE_DEG,
                lookup_tolerance: DEFAULT_LOOKUP_TOLERANCE_M,
            },
            rule: RuleSettings {
                west: DEFAULT_RULE_WEST,
                south_east: DEFAULT_RULE_SOUTH_EAST,
                south_west: DEFAULT_RULE_SOUTH_WEST,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}

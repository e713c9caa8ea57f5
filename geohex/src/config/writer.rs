//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[tessellation]
; Outer-circle radius of each hexagon, in metres
cell_size = {}
; Slack on the region containment test, in degrees
region_tolerance = {}
; Half-size of the box used to find a neighbor across zones, in metres
lookup_tolerance = {}

[rule]
; Semitones added from the west, south-east and south-west neighbor.
; The opposite directions subtract the same offsets.
west = {}
south_east = {}
south_west = {}

[logging]
; Log file path (truncated at every start)
file = {}
"#,
        config.tessellation.cell_size,
        config.tessellation.region_tolerance,
        config.tessellation.lookup_tolerance,
        config.rule.west,
        config.rule.south_east,
        config.rule.south_west,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

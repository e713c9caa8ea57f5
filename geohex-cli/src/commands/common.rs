//! Common types and utilities shared across CLI commands.
//!
//! Command-line flags take precedence over the config file.

use clap::Args;
use geohex::config::{ConfigFile, TessellationConfig};
use geohex::coord::{parse_bounds, GeoBounds};
use geohex::projection::UtmProjectionService;
use geohex::rule::PitchClassRule;
use geohex::tessellation::TessellationGenerator;

use crate::error::CliError;

/// Region and engine options shared by `generate` and `locate`.
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Region as MIN_LON,MIN_LAT,MAX_LON,MAX_LAT in degrees
    #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
    pub bbox: GeoBounds,

    /// Hexagon size (outer radius) in metres
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Semitones added stepping east
    #[arg(long, allow_hyphen_values = true)]
    pub west: Option<i32>,

    /// Semitones added stepping north-west
    #[arg(long, allow_hyphen_values = true)]
    pub south_east: Option<i32>,

    /// Semitones added stepping north-east
    #[arg(long, allow_hyphen_values = true)]
    pub south_west: Option<i32>,
}

/// Resolve engine settings from CLI and config.
pub fn resolve_tessellation(cell_size: Option<f64>, config: &ConfigFile) -> TessellationConfig {
    let base = config.tessellation_config();
    match cell_size {
        Some(size) => base.with_cell_size_m(size),
        None => base,
    }
}

/// Resolve rule offsets from CLI and config.
pub fn resolve_rule(args: &GridArgs, config: &ConfigFile) -> PitchClassRule {
    PitchClassRule::new(
        args.west.unwrap_or(config.rule.west),
        args.south_east.unwrap_or(config.rule.south_east),
        args.south_west.unwrap_or(config.rule.south_west),
    )
}

/// Build a generator for `args` over real UTM zones.
pub fn build_generator(
    args: &GridArgs,
    config: &ConfigFile,
) -> Result<TessellationGenerator<PitchClassRule, UtmProjectionService>, CliError> {
    let generator = TessellationGenerator::new(
        resolve_tessellation(args.cell_size, config),
        args.bbox,
        resolve_rule(args, config),
        UtmProjectionService::new(),
    )?;
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geohex::config::{DEFAULT_CELL_SIZE_M, DEFAULT_RULE_SOUTH_EAST, DEFAULT_RULE_WEST};

    fn args() -> GridArgs {
        GridArgs {
            bbox: GeoBounds::new(1.0, 40.0, 2.0, 41.0).unwrap(),
            cell_size: None,
            west: None,
            south_east: None,
            south_west: Some(-5),
        }
    }

    #[test]
    fn test_cell_size_falls_back_to_config() {
        let config = ConfigFile::default();
        assert_eq!(
            resolve_tessellation(None, &config).cell_size_m(),
            DEFAULT_CELL_SIZE_M
        );
        assert_eq!(
            resolve_tessellation(Some(1_500.0), &config).cell_size_m(),
            1_500.0
        );
    }

    #[test]
    fn test_rule_flags_override_config() {
        let rule = resolve_rule(&args(), &ConfigFile::default());
        assert_eq!(rule.west(), DEFAULT_RULE_WEST);
        assert_eq!(rule.south_east(), DEFAULT_RULE_SOUTH_EAST);
        assert_eq!(rule.south_west(), -5);
    }

    #[test]
    fn test_invalid_cell_size_rejected() {
        let mut args = args();
        args.cell_size = Some(-1.0);
        let result = build_generator(&args, &ConfigFile::default());
        assert!(matches!(result, Err(CliError::Tessellation(_))));
    }
}

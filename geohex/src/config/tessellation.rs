//! Tessellation engine configuration.

use super::defaults::{DEFAULT_CELL_SIZE_M, DEFAULT_LOOKUP_TOLERANCE_M, DEFAULT_REGION_TOLERANCE_DEG};
use crate::tessellation::TessellationError;

/// Parameters of a tessellation run.
///
/// # Example
///
/// ```
/// use geohex::config::TessellationConfig;
///
/// let config = TessellationConfig::default();
/// assert_eq!(config.cell_size_m(), 50_000.0);
///
/// let config = TessellationConfig::new()
///     .with_cell_size_m(10_000.0)
///     .with_lookup_tolerance_m(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// Outer-circle radius of each hexagon in metres
    cell_size_m: f64,
    /// Slack in degrees applied to the region containment test
    region_tolerance_deg: f64,
    /// Half-size in metres of the box used for neighbor lookups
    lookup_tolerance_m: f64,
}

impl TessellationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hexagon outer-circle radius in metres.
    ///
    /// Default: 50 000 m.
    pub fn with_cell_size_m(mut self, size: f64) -> Self {
        self.cell_size_m = size;
        self
    }

    /// Set the tolerance of the region containment test in degrees.
    ///
    /// Cell centres this far outside the region still count as inside.
    pub fn with_region_tolerance_deg(mut self, tolerance: f64) -> Self {
        self.region_tolerance_deg = tolerance;
        self
    }

    /// Set the half-size of the neighbor lookup box in metres.
    pub fn with_lookup_tolerance_m(mut self, tolerance: f64) -> Self {
        self.lookup_tolerance_m = tolerance;
        self
    }

    pub fn cell_size_m(&self) -> f64 {
        self.cell_size_m
    }

    pub fn region_tolerance_deg(&self) -> f64 {
        self.region_tolerance_deg
    }

    pub fn lookup_tolerance_m(&self) -> f64 {
        self.lookup_tolerance_m
    }

    /// Check that the configuration can drive a tessellation.
    pub fn validate(&self) -> Result<(), TessellationError> {
        if !self.cell_size_m.is_finite() || self.cell_size_m <= 0.0 {
            return Err(TessellationError::InvalidConfig(format!(
                "cell size must be a positive number of metres, got {}",
                self.cell_size_m
            )));
        }
        if !self.region_tolerance_deg.is_finite() || self.region_tolerance_deg < 0.0 {
            return Err(TessellationError::InvalidConfig(format!(
                "region tolerance must be zero or positive, got {}",
                self.region_tolerance_deg
            )));
        }
        if !self.lookup_tolerance_m.is_finite() || self.lookup_tolerance_m < 0.0 {
            return Err(TessellationError::InvalidConfig(format!(
                "lookup tolerance must be zero or positive, got {}",
                self.lookup_tolerance_m
            )));
        }
        Ok(())
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            cell_size_m: DEFAULT_CELL_SIZE_M,
            region_tolerance_deg: DEFAULT_REGION_TOLERANCE_DEG,
            lookup_tolerance_m: DEFAULT_LOOKUP_TOLERANCE_M,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TessellationConfig::default();
        assert_eq!(config.cell_size_m(), DEFAULT_CELL_SIZE_M);
        assert_eq!(config.region_tolerance_deg(), DEFAULT_REGION_TOLERANCE_DEG);
        assert_eq!(config.lookup_tolerance_m(), DEFAULT_LOOKUP_TOLERANCE_M);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(TessellationConfig::new(), TessellationConfig::default());
    }

    #[test]
    fn test_with_cell_size() {
        let config = TessellationConfig::new().with_cell_size_m(1234.5);
        assert_eq!(config.cell_size_m(), 1234.5);
        assert_eq!(config.lookup_tolerance_m(), DEFAULT_LOOKUP_TOLERANCE_M); // Unchanged
    }

    #[test]
    fn test_builder_chain() {
        let config = TessellationConfig::new()
            .with_cell_size_m(500.0)
            .with_region_tolerance_deg(1e-6)
            .with_lookup_tolerance_m(2.0);

        assert_eq!(config.cell_size_m(), 500.0);
        assert_eq!(config.region_tolerance_deg(), 1e-6);
        assert_eq!(config.lookup_tolerance_m(), 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_cell_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = TessellationConfig::new().with_cell_size_m(size).validate();
            assert!(
                matches!(result, Err(TessellationError::InvalidConfig(_))),
                "size {} accepted",
                size
            );
        }
    }

    #[test]
    fn test_validate_rejects_negative_tolerances() {
        let config = TessellationConfig::new().with_region_tolerance_deg(-1e-9);
        assert!(config.validate().is_err());

        let config = TessellationConfig::new().with_lookup_tolerance_m(f64::NAN);
        assert!(config.validate().is_err());

        let config = TessellationConfig::new()
            .with_region_tolerance_deg(0.0)
            .with_lookup_tolerance_m(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_copy_semantics() {
        let config1 = TessellationConfig::new().with_cell_size_m(60.0);
        let config2 = config1; // Copy, not move
        assert_eq!(config1.cell_size_m(), config2.cell_size_m());
    }
}

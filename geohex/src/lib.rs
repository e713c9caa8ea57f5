//! geohex - Lazy hexagonal tessellation of geographic regions
//!
//! This library lays pointy-top hexagons of a fixed physical size over a
//! bounding box, computing the geometry in local UTM zones and stitching
//! the zones together so rows stay aligned across zone seams. Every cell
//! carries a value derived from one neighbor by a pluggable rule; the
//! reference rule assigns musical pitch classes.
//!
//! # Quick Start
//!
//! ```
//! use geohex::config::TessellationConfig;
//! use geohex::coord::GeoBounds;
//! use geohex::projection::UtmProjectionService;
//! use geohex::rule::PitchClassRule;
//! use geohex::tessellation::TessellationGenerator;
//!
//! let region = GeoBounds::new(1.0, 40.0, 3.0, 42.0).unwrap();
//! let generator = TessellationGenerator::new(
//!     TessellationConfig::default(),
//!     region,
//!     PitchClassRule::new(7, 4, 3),
//!     UtmProjectionService::new(),
//! )
//! .unwrap();
//!
//! for cell in generator {
//!     let cell = cell.unwrap();
//!     println!("{} {}", cell.centroid, cell.value);
//! }
//! ```

pub mod config;
pub mod coord;
pub mod export;
pub mod geo_index;
pub mod logging;
pub mod projection;
pub mod rule;
pub mod tessellation;

/// Version of the geohex library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

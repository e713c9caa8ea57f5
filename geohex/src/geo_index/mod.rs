//! Point lookup over a realized tessellation.
//!
//! The generator streams cells once and forgets them. Consumers that need
//! to ask "which cell contains this point?" materialize the stream into a
//! [`CellIndex`], an R-tree over each cell's geographic bounding box with an
//! exact point-in-polygon test on the candidates.
//!
//! # Architecture
//!
//! ```text
//! CellIndex
//! ├── cells: Vec<Cell<V>>        (generation order)
//! └── tree:  RTree<CellEntry>    (geographic bbox → position in `cells`)
//! ```
//!
//! Hexagons of neighboring projection zones may overlap slightly along a
//! seam. A point in such an overlap resolves to the cell generated first.
//!
//! # Usage
//!
//! ```
//! use geohex::config::TessellationConfig;
//! use geohex::coord::{GeoBounds, GeoPoint};
//! use geohex::geo_index::CellIndex;
//! use geohex::projection::UtmProjectionService;
//! use geohex::rule::PitchClassRule;
//! use geohex::tessellation::TessellationGenerator;
//!
//! let region = GeoBounds::new(1.0, 40.0, 2.0, 41.0).unwrap();
//! let generator = TessellationGenerator::new(
//!     TessellationConfig::new().with_cell_size_m(20_000.0),
//!     region,
//!     PitchClassRule::new(7, 4, 3),
//!     UtmProjectionService::new(),
//! )
//! .unwrap();
//!
//! let index = CellIndex::build(generator).unwrap();
//! let cell = index.locate(GeoPoint::new(1.5, 40.5)).unwrap();
//! assert!(cell.polygon.contains(GeoPoint::new(1.5, 40.5)));
//! ```

mod index;

pub use index::CellIndex;

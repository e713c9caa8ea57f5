//! The lazy tessellation generator.
//!
//! Cells are produced row by row from the south-west corner of the region.
//! Within a row each cell is one hexagon width east of the previous one and
//! takes its value from it through [`PropagationRule::from_west`]. A new row
//! starts three quarters of a hexagon height north of the previous row's
//! leading cell, alternately indented east and west by half a width, and
//! takes its value from that leading cell through the matching diagonal.
//!
//! When a position leaves the planar domain of the active projection the
//! generator resolves the zone at that position. A zone that was already
//! used on the previous row is re-entered on its own lattice and the new
//! cell's value is looked up from that zone's index.
//!
//! Planar rows run along lines of constant northing, which are not
//! parallels. A row start that lands just west of the region is moved east
//! by whole widths until it is inside, then seeded from its neighbor in the
//! row below. Within a row the first centre outside the region ends it, so
//! where the first row dips south of the region's southern edge it stays
//! short and the rows above it cover the region.

use std::collections::HashMap;
use std::iter::FusedIterator;

use tracing::{debug, info, trace};

use super::hexagon::{GeoPolygon, HexMetrics};
use super::zone::{Zone, ZoneIndex};
use super::{Cell, TessellationError};
use crate::config::TessellationConfig;
use crate::coord::{GeoBounds, GeoPoint, PlanarBounds, PlanarPoint};
use crate::projection::{PlanarProjection, ProjectionService, ZoneId};
use crate::rule::PropagationRule;

/// The neighbor a pending cell takes its value from.
#[derive(Debug, Clone)]
enum Seed<V> {
    /// First cell of the tessellation
    Initial,
    West(V),
    SouthWest(V),
    SouthEast(V),
}

/// A centre accepted for the next cell, not yet built.
struct Pending<V> {
    position: PlanarPoint,
    centroid: GeoPoint,
    seed: Seed<V>,
    row: u64,
    column: u64,
    indented: bool,
}

/// Outcome of placing a candidate centre inside the region.
struct Placement<V> {
    position: PlanarPoint,
    centroid: GeoPoint,
    /// Set when the value must come from a zone index lookup.
    seed: Option<Seed<V>>,
}

impl<V> Placement<V> {
    fn kept(position: PlanarPoint, centroid: GeoPoint) -> Self {
        Self {
            position,
            centroid,
            seed: None,
        }
    }

    fn into_pending(self, row: u64, column: u64, indented: bool, traversal: Seed<V>) -> Pending<V> {
        Pending {
            position: self.position,
            centroid: self.centroid,
            seed: self.seed.unwrap_or(traversal),
            row,
            column,
            indented,
        }
    }
}

/// An emitted cell as far as later cells need to know it.
#[derive(Clone)]
struct Placed<P, V> {
    position: PlanarPoint,
    projection: P,
    value: V,
}

/// The current row: its leading (westmost) cell and its latest cell.
struct Trail<P, V> {
    row: u64,
    column: u64,
    indented: bool,
    leading: Placed<P, V>,
    last: Placed<P, V>,
}

enum Step<V> {
    /// A cell is ready to be built and returned.
    Emit(Pending<V>),
    /// The next position has to be found first.
    Advance,
    /// Exhausted or failed.
    Done,
}

/// All mutable state of one generator run.
struct GeneratorState<P, V> {
    step: Step<V>,
    /// Projection of the zone the generator is currently placing cells in.
    active: P,
    zones: HashMap<ZoneId, Zone<V>>,
    trail: Option<Trail<P, V>>,
    emitted: u64,
}

impl<P: PlanarProjection, V: Clone> GeneratorState<P, V> {
    /// State of `projection`'s zone, created on first use.
    fn zone(&mut self, projection: &P, row: u64) -> &mut Zone<V> {
        self.zones
            .entry(projection.id())
            .or_insert_with(|| Zone::new(projection.domain(), row))
    }

    /// Drop zones no cell of `row` can border and retire the previous row
    /// of every other zone.
    fn begin_row(&mut self, row: u64) {
        self.zones.retain(|id, zone| {
            if zone.last_row() + 1 < row {
                debug!(zone = %id, last_row = zone.last_row(), row, "Dropping stale zone");
                false
            } else {
                zone.advance_row();
                true
            }
        });
    }
}

/// Lazily generates the cells of a hexagonal tessellation.
///
/// The generator is a single-use iterator. Each call to `next` does a
/// bounded amount of work, normally at most one projection resolution and
/// one neighbor lookup, before returning a cell. The first error is
/// returned once and ends the sequence.
///
/// # Example
///
/// ```
/// use geohex::config::TessellationConfig;
/// use geohex::coord::GeoBounds;
/// use geohex::projection::UtmProjectionService;
/// use geohex::rule::{PitchClass, PitchClassRule};
/// use geohex::tessellation::TessellationGenerator;
///
/// let region = GeoBounds::new(1.0, 40.0, 2.0, 41.0).unwrap();
/// let generator = TessellationGenerator::new(
///     TessellationConfig::new().with_cell_size_m(20_000.0),
///     region,
///     PitchClassRule::new(7, 4, 3),
///     UtmProjectionService::new(),
/// )
/// .unwrap();
///
/// let cells: Vec<_> = generator.collect::<Result<_, _>>().unwrap();
/// assert_eq!(cells[0].value, PitchClass::C);
/// assert_eq!(cells[1].value, PitchClass::G);
/// ```
pub struct TessellationGenerator<R, S>
where
    R: PropagationRule,
    S: ProjectionService,
{
    config: TessellationConfig,
    region: GeoBounds,
    rule: R,
    service: S,
    metrics: HexMetrics,
    state: GeneratorState<S::Projection, R::Value>,
}

impl<R, S> TessellationGenerator<R, S>
where
    R: PropagationRule,
    S: ProjectionService,
{
    /// Prepare a tessellation of `region`.
    ///
    /// Validates `config` and resolves the zone of the region's south-west
    /// corner, where the first cell is placed.
    pub fn new(
        config: TessellationConfig,
        region: GeoBounds,
        rule: R,
        service: S,
    ) -> Result<Self, TessellationError> {
        config.validate()?;

        let origin = region.south_west();
        let projection = service.resolve(origin)?;
        let position = projection.to_planar(origin)?;
        let metrics = HexMetrics::new(config.cell_size_m());

        info!(
            region = %region,
            cell_size_m = config.cell_size_m(),
            zone = %projection.id(),
            "Starting tessellation"
        );

        let state = GeneratorState {
            step: Step::Emit(Pending {
                position,
                centroid: origin,
                seed: Seed::Initial,
                row: 0,
                column: 0,
                indented: false,
            }),
            active: projection,
            zones: HashMap::new(),
            trail: None,
            emitted: 0,
        };

        Ok(Self {
            config,
            region,
            rule,
            service,
            metrics,
            state,
        })
    }

    /// Geometry of the generated hexagons.
    pub fn metrics(&self) -> HexMetrics {
        self.metrics
    }

    /// The region being tessellated.
    pub fn region(&self) -> GeoBounds {
        self.region
    }

    /// Number of cells returned so far.
    pub fn cells_emitted(&self) -> u64 {
        self.state.emitted
    }

    /// Number of zones whose state is currently retained.
    pub fn retained_zones(&self) -> usize {
        self.state.zones.len()
    }

    fn contains(&self, point: GeoPoint) -> bool {
        self.region.contains(point, self.config.region_tolerance_deg())
    }

    /// Build the pending cell, record it and return it.
    fn emit(&mut self, pending: Pending<R::Value>) -> Result<Cell<R::Value>, TessellationError> {
        let Pending {
            position,
            centroid,
            seed,
            row,
            column,
            indented,
        } = pending;

        let value = match seed {
            Seed::Initial => self.rule.initial_value(),
            Seed::West(v) => self.rule.from_west(&v),
            Seed::SouthWest(v) => self.rule.from_south_west(&v),
            Seed::SouthEast(v) => self.rule.from_south_east(&v),
        };

        let projection = self.state.active.clone();
        let ring = self
            .metrics
            .vertices(position)
            .iter()
            .map(|vertex| projection.to_geo(*vertex))
            .collect::<Result<Vec<_>, _>>()?;

        let bounds = self.metrics.bounds(position);
        self.state
            .zone(&projection, row)
            .record(position, bounds, row, value.clone());

        let zone = projection.id();
        let placed = Placed {
            position,
            projection,
            value: value.clone(),
        };
        if column == 0 {
            trace!(row, zone = %zone, x = position.x, y = position.y, "Row started");
            self.state.trail = Some(Trail {
                row,
                column,
                indented,
                leading: placed.clone(),
                last: placed,
            });
        } else if let Some(trail) = self.state.trail.as_mut() {
            trail.column = column;
            trail.last = placed;
        }
        self.state.emitted += 1;

        Ok(Cell {
            polygon: GeoPolygon::new(ring),
            value,
            zone,
            row,
            column,
            center: position,
            centroid,
        })
    }

    /// Find the next cell: one step east, else the start of the next row.
    fn advance(&mut self) -> Result<Option<Pending<R::Value>>, TessellationError> {
        let Some(trail) = self.state.trail.as_ref() else {
            return Ok(None);
        };
        let (row, column, indented) = (trail.row, trail.column, trail.indented);
        let east = trail.last.position.offset(self.metrics.width(), 0.0);
        let west_value = trail.last.value.clone();
        let leading = trail.leading.clone();

        if let Some(placement) = self.place(east, row)? {
            return Ok(Some(placement.into_pending(
                row,
                column + 1,
                indented,
                Seed::West(west_value),
            )));
        }

        let next_row = row + 1;
        self.state.begin_row(next_row);
        self.state.active = leading.projection;

        let (dx, seed) = if indented {
            (-self.metrics.half_width(), Seed::SouthEast(leading.value))
        } else {
            (self.metrics.half_width(), Seed::SouthWest(leading.value))
        };
        let candidate = leading.position.offset(dx, self.metrics.row_spacing());

        if let Some(placement) = self.place(candidate, next_row)? {
            return Ok(Some(placement.into_pending(next_row, 0, !indented, seed)));
        }
        Ok(self
            .shift_row_start(candidate, next_row)?
            .map(|placement| placement.into_pending(next_row, 0, !indented, seed)))
    }

    /// Walk a row start that fell west of the region east along its row, one
    /// width at a time, until a centre lies inside.
    ///
    /// Planar rows do not follow parallels, so a row start can drift just
    /// past the western edge. The cell found keeps the row's lattice parity
    /// and takes its value from its south-west or south-east neighbor.
    fn shift_row_start(
        &mut self,
        mut candidate: PlanarPoint,
        row: u64,
    ) -> Result<Option<Placement<R::Value>>, TessellationError> {
        let width = self.metrics.width();
        let mut steps = 0u32;

        loop {
            let centroid = self.state.active.to_geo(candidate)?;
            if !self.west_of_region(centroid) {
                return Ok(None);
            }
            candidate = candidate.offset(width, 0.0);
            steps += 1;

            let Some(mut placement) = self.place(candidate, row)? else {
                continue;
            };
            if placement.seed.is_none() {
                let active = self.state.active.clone();
                let index = self.state.zone(&active, row).index();
                let seed = neighbor_seed(
                    index,
                    placement.position,
                    width,
                    self.metrics.row_spacing(),
                    self.config.lookup_tolerance_m(),
                )
                .ok_or(TessellationError::NeighborLookup {
                    zone: active.id(),
                    row,
                    x: placement.position.x,
                    y: placement.position.y,
                })?;
                placement.seed = Some(seed);
            }
            debug!(row, steps, "Shifted row start east into region");
            return Ok(Some(placement));
        }
    }

    /// Outside the region only because it lies west of it.
    fn west_of_region(&self, point: GeoPoint) -> bool {
        let tolerance = self.config.region_tolerance_deg();
        point.lon < self.region.min_lon - tolerance
            && point.lat >= self.region.min_lat - tolerance
            && point.lat <= self.region.max_lat + tolerance
    }

    /// Accept `candidate` (planar, active zone) for `row` if it lies in the
    /// region, switching zones when it leaves the active zone's domain.
    fn place(
        &mut self,
        candidate: PlanarPoint,
        row: u64,
    ) -> Result<Option<Placement<R::Value>>, TessellationError> {
        let active = self.state.active.clone();
        let centroid = active.to_geo(candidate)?;
        if !self.contains(centroid) {
            return Ok(None);
        }
        if self.state.zone(&active, row).domain().contains(candidate) {
            return Ok(Some(Placement::kept(candidate, centroid)));
        }

        let projection = self.service.resolve(centroid)?;
        if projection.id() == active.id() {
            return Ok(Some(Placement::kept(candidate, centroid)));
        }

        let position = projection.to_planar(centroid)?;
        let width = self.metrics.width();
        let row_spacing = self.metrics.row_spacing();
        let tolerance = self.config.lookup_tolerance_m();

        let anchor = self.state.zone(&projection, row).anchor();
        let placement = match anchor {
            None => {
                debug!(from = %active.id(), to = %projection.id(), row, "Entering new zone");
                Placement {
                    position,
                    centroid,
                    seed: None,
                }
            }
            Some(anchor) => {
                let aligned = anchor.align(position, row, width, row_spacing);
                let aligned_centroid = projection.to_geo(aligned)?;
                if !self.contains(aligned_centroid) {
                    return Ok(None);
                }
                let index = self.state.zone(&projection, row).index();
                let seed = neighbor_seed(index, aligned, width, row_spacing, tolerance)
                    .ok_or(TessellationError::NeighborLookup {
                        zone: projection.id(),
                        row,
                        x: aligned.x,
                        y: aligned.y,
                    })?;
                debug!(
                    from = %active.id(),
                    to = %projection.id(),
                    row,
                    anchor_row = anchor.row,
                    x = aligned.x,
                    y = aligned.y,
                    "Re-anchored to zone lattice"
                );
                Placement {
                    position: aligned,
                    centroid: aligned_centroid,
                    seed: Some(seed),
                }
            }
        };

        self.state.active = projection;
        Ok(Some(placement))
    }
}

/// Value of the south-west neighbor of `position`, else of the south-east
/// neighbor.
fn neighbor_seed<V: Clone>(
    index: &ZoneIndex<V>,
    position: PlanarPoint,
    width: f64,
    row_spacing: f64,
    tolerance: f64,
) -> Option<Seed<V>> {
    let south_west = position.offset(-width / 2.0, -row_spacing);
    if let Some(value) = index.query(PlanarBounds::around(south_west, tolerance)) {
        return Some(Seed::SouthWest(value));
    }
    let south_east = position.offset(width / 2.0, -row_spacing);
    index
        .query(PlanarBounds::around(south_east, tolerance))
        .map(Seed::SouthEast)
}

impl<R, S> Iterator for TessellationGenerator<R, S>
where
    R: PropagationRule,
    S: ProjectionService,
{
    type Item = Result<Cell<R::Value>, TessellationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state.step, Step::Done) {
                Step::Done => return None,
                Step::Advance => match self.advance() {
                    Ok(Some(pending)) => self.state.step = Step::Emit(pending),
                    Ok(None) => {
                        info!(cells = self.state.emitted, "Tessellation complete");
                        return None;
                    }
                    Err(e) => {
                        debug!(error = %e, "Tessellation aborted");
                        return Some(Err(e));
                    }
                },
                Step::Emit(pending) => {
                    return Some(match self.emit(pending) {
                        Ok(cell) => {
                            self.state.step = Step::Advance;
                            Ok(cell)
                        }
                        Err(e) => {
                            debug!(error = %e, "Tessellation aborted");
                            Err(e)
                        }
                    });
                }
            }
        }
    }
}

impl<R, S> FusedIterator for TessellationGenerator<R, S>
where
    R: PropagationRule,
    S: ProjectionService,
{
}

//! Functional zone placement.
//!
//! A zone request ([`ZoneSpec`]) is resolved by a [`ZonePolicy`]:
//! - [`RandomizedSearch`]: bounded random sampling of interior walkway cells, with
//!   optional random cluster growth for multi-cell zones.
//! - [`FirstFitScan`]: deterministic scan from the bottom-right corner, used for
//!   shape-based layouts where walkway is scarce.
//!
//! Failure to place is never an error: the caller records the zone as omitted.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand::seq::SliceRandom;

use storeplan_core::{CellType, LayoutError, LayoutResult, Position, ValueObject};

use crate::connectivity::is_walkway_connected;
use crate::grid::Grid;

/// Attempts made by [`RandomizedSearch`] before giving up on a zone.
pub const DEFAULT_ATTEMPT_BUDGET: usize = 1000;

/// Walkway neighbors an anchor cell needs unless the request says otherwise.
pub const DEFAULT_MIN_WALKWAY_NEIGHBORS: usize = 3;

/// A placement request for one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSpec {
    label: CellType,
    avoid_types: HashSet<CellType>,
    size: usize,
    connected: bool,
    min_walkway_neighbors: usize,
}

impl ZoneSpec {
    /// Request a zone of `size` cells labelled `label`.
    pub fn new(label: CellType, size: usize) -> LayoutResult<Self> {
        if size == 0 {
            return Err(LayoutError::validation(format!(
                "zone {label} must have size >= 1"
            )));
        }
        Ok(Self {
            label,
            avoid_types: HashSet::new(),
            size,
            connected: false,
            min_walkway_neighbors: DEFAULT_MIN_WALKWAY_NEIGHBORS,
        })
    }

    /// Single-cell zone.
    pub fn single(label: CellType) -> Self {
        Self {
            label,
            avoid_types: HashSet::new(),
            size: 1,
            connected: false,
            min_walkway_neighbors: DEFAULT_MIN_WALKWAY_NEIGHBORS,
        }
    }

    /// Cell types that must not border any cell of this zone.
    pub fn avoiding(mut self, types: impl IntoIterator<Item = CellType>) -> Self {
        self.avoid_types.extend(types);
        self
    }

    /// Require the zone's cells to form one 4-connected cluster.
    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn with_min_walkway_neighbors(mut self, min: usize) -> Self {
        self.min_walkway_neighbors = min;
        self
    }

    pub fn label(&self) -> &CellType {
        &self.label
    }

    pub fn avoid_types(&self) -> &HashSet<CellType> {
        &self.avoid_types
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn min_walkway_neighbors(&self) -> usize {
        self.min_walkway_neighbors
    }

    /// Whether placement must grow a multi-cell cluster.
    fn needs_cluster(&self) -> bool {
        self.connected && self.size > 1
    }

    fn touches_avoided(&self, grid: &Grid, pos: Position) -> bool {
        let (neighbors, count) = grid.neighbors4(pos);
        neighbors[..count]
            .iter()
            .any(|n| self.avoid_types.contains(grid.get(*n)))
    }
}

impl ValueObject for ZoneSpec {}

/// Strategy that decides where a zone goes.
///
/// On success the zone's cells are already written to `grid` and returned; on
/// failure `grid` is left untouched.
pub trait ZonePolicy {
    fn place(&mut self, grid: &mut Grid, spec: &ZoneSpec) -> Option<Vec<Position>>;
}

/// Bounded randomized search over interior walkway cells.
pub struct RandomizedSearch<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    attempt_budget: usize,
    verify_connectivity: bool,
}

impl<'r, R: Rng + ?Sized> RandomizedSearch<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            verify_connectivity: false,
        }
    }

    pub fn with_attempt_budget(mut self, attempt_budget: usize) -> Self {
        self.attempt_budget = attempt_budget;
        self
    }

    /// Reject commits that split a previously connected walkway network.
    ///
    /// Off by default: without it a placed zone may fragment the walkway.
    pub fn with_connectivity_check(mut self, verify: bool) -> Self {
        self.verify_connectivity = verify;
        self
    }

    fn anchor_ok(grid: &Grid, pos: Position, spec: &ZoneSpec) -> bool {
        grid.get(pos).is_walkway()
            && grid.count_adjacent(pos, &CellType::Walkway) >= spec.min_walkway_neighbors
            && !spec.touches_avoided(grid, pos)
    }

    fn grow_cluster(&mut self, grid: &Grid, anchor: Position, spec: &ZoneSpec) -> Option<Vec<Position>> {
        let mut cluster = vec![anchor];
        let mut members: HashSet<Position> = HashSet::from([anchor]);

        while cluster.len() < spec.size {
            let mut candidates: Vec<Position> = Vec::new();
            for &member in &cluster {
                let (neighbors, count) = grid.neighbors4(member);
                for &n in &neighbors[..count] {
                    if members.contains(&n) || candidates.contains(&n) {
                        continue;
                    }
                    // Cluster cells need all four neighbors on the floor.
                    if grid.get(n).is_walkway()
                        && grid.is_interior(n)
                        && !spec.touches_avoided(grid, n)
                    {
                        candidates.push(n);
                    }
                }
            }

            let &next = candidates.choose(&mut *self.rng)?;
            members.insert(next);
            cluster.push(next);
        }

        Some(cluster)
    }
}

impl<R: Rng + ?Sized> ZonePolicy for RandomizedSearch<'_, R> {
    fn place(&mut self, grid: &mut Grid, spec: &ZoneSpec) -> Option<Vec<Position>> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows < 3 || cols < 3 {
            tracing::debug!(zone = %spec.label, rows, cols, "grid has no interior; zone skipped");
            return None;
        }

        let was_connected = self.verify_connectivity && is_walkway_connected(grid);

        for attempt in 1..=self.attempt_budget {
            let anchor = Position::new(
                self.rng.gen_range(1..=cols - 2),
                self.rng.gen_range(1..=rows - 2),
            );
            if !Self::anchor_ok(grid, anchor, spec) {
                continue;
            }

            let cells = if spec.needs_cluster() {
                match self.grow_cluster(grid, anchor, spec) {
                    Some(cells) => cells,
                    None => continue,
                }
            } else {
                vec![anchor]
            };

            commit(grid, &cells, &spec.label);
            if was_connected && !is_walkway_connected(grid) {
                revert(grid, &cells);
                continue;
            }

            tracing::debug!(zone = %spec.label, attempt, cells = cells.len(), "zone placed");
            return Some(cells);
        }

        tracing::debug!(zone = %spec.label, budget = self.attempt_budget, "attempt budget exhausted");
        None
    }
}

/// Place `spec` with a default [`RandomizedSearch`]. Returns whether it was placed.
pub fn place_zone<R: Rng + ?Sized>(grid: &mut Grid, spec: &ZoneSpec, rng: &mut R) -> bool {
    RandomizedSearch::new(rng).place(grid, spec).is_some()
}

/// Deterministic first-fit placement.
///
/// Scans rows bottom to top and columns right to left; the first open cell
/// (aisle or walkway) with enough walkway neighbors and no avoided neighbor
/// anchors the zone. Clusters grow breadth-first over open cells.
#[derive(Debug, Default, Copy, Clone)]
pub struct FirstFitScan;

impl FirstFitScan {
    fn is_open(cell_type: &CellType) -> bool {
        matches!(cell_type, CellType::Aisle | CellType::Walkway)
    }

    fn anchor_ok(grid: &Grid, pos: Position, spec: &ZoneSpec) -> bool {
        Self::is_open(grid.get(pos))
            && grid.count_adjacent(pos, &CellType::Walkway) >= spec.min_walkway_neighbors
            && !spec.touches_avoided(grid, pos)
    }

    fn grow_cluster(grid: &Grid, anchor: Position, spec: &ZoneSpec) -> Option<Vec<Position>> {
        let mut cluster = Vec::with_capacity(spec.size);
        let mut seen: HashSet<Position> = HashSet::from([anchor]);
        let mut queue = VecDeque::from([anchor]);

        while let Some(pos) = queue.pop_front() {
            cluster.push(pos);
            if cluster.len() == spec.size {
                return Some(cluster);
            }
            let (neighbors, count) = grid.neighbors4(pos);
            for &n in &neighbors[..count] {
                if seen.insert(n) && Self::is_open(grid.get(n)) && !spec.touches_avoided(grid, n) {
                    queue.push_back(n);
                }
            }
        }

        None
    }
}

impl ZonePolicy for FirstFitScan {
    fn place(&mut self, grid: &mut Grid, spec: &ZoneSpec) -> Option<Vec<Position>> {
        for y in (0..grid.rows()).rev() {
            for x in (0..grid.cols()).rev() {
                let anchor = Position::new(x, y);
                if !Self::anchor_ok(grid, anchor, spec) {
                    continue;
                }
                let cells = if spec.needs_cluster() {
                    match Self::grow_cluster(grid, anchor, spec) {
                        Some(cells) => cells,
                        None => continue,
                    }
                } else {
                    vec![anchor]
                };
                commit(grid, &cells, &spec.label);
                tracing::debug!(zone = %spec.label, %anchor, "zone placed by scan");
                return Some(cells);
            }
        }
        None
    }
}

fn commit(grid: &mut Grid, cells: &[Position], label: &CellType) {
    for &pos in cells {
        grid.set(pos, label.clone());
    }
}

fn revert(grid: &mut Grid, cells: &[Position]) {
    for &pos in cells {
        grid.set(pos, CellType::Walkway);
    }
}

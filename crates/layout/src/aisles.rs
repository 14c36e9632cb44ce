//! Greedy walkway-to-aisle conversion.
//!
//! Shelving is carved out of the walkway one cell at a time. Each conversion is
//! followed by a connectivity check and rolled back if it split the walkway
//! network, so a connected network stays connected.

use std::collections::HashSet;

use storeplan_core::{CellType, Position};

use crate::connectivity::is_walkway_connected;
use crate::grid::Grid;

/// Outcome of one conversion pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AisleReport {
    /// Candidates that became aisle.
    pub converted: usize,
    /// Candidates restored to walkway because they broke connectivity.
    pub reverted: usize,
}

/// Convert a sparse set of interior walkway cells to aisle.
///
/// One walkway per interior row and per interior column is reserved and never
/// converted. Candidates are taken column by column; picking (x, y) blocks
/// (x, y + 1) so shelves never stack vertically within a pass.
pub fn convert_walkways_to_aisles(grid: &mut Grid) -> AisleReport {
    let mut report = AisleReport::default();
    if grid.rows() < 3 || grid.cols() < 3 {
        return report;
    }

    let reserved = reserve_walkways(grid);
    let candidates = select_candidates(grid, &reserved);

    for pos in candidates {
        grid.set(pos, CellType::Aisle);
        if is_walkway_connected(grid) {
            report.converted += 1;
        } else {
            grid.set(pos, CellType::Walkway);
            report.reverted += 1;
        }
    }

    tracing::debug!(
        converted = report.converted,
        reverted = report.reverted,
        reserved = reserved.len(),
        "aisle conversion finished"
    );
    report
}

fn interior(grid: &Grid) -> (std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>) {
    (1..=grid.cols() - 2, 1..=grid.rows() - 2)
}

/// First walkway seen per interior row and per interior column (row-major scan).
fn reserve_walkways(grid: &Grid) -> HashSet<Position> {
    let (xs, ys) = interior(grid);
    let mut row_taken = vec![false; grid.rows()];
    let mut col_taken = vec![false; grid.cols()];
    let mut reserved = HashSet::new();

    for y in ys {
        for x in xs.clone() {
            let pos = Position::new(x, y);
            if !grid.get(pos).is_walkway() {
                continue;
            }
            if !row_taken[y] {
                row_taken[y] = true;
                reserved.insert(pos);
            }
            if !col_taken[x] {
                col_taken[x] = true;
                reserved.insert(pos);
            }
        }
    }

    reserved
}

/// Column-major interior scan for convertible walkway cells.
fn select_candidates(grid: &Grid, reserved: &HashSet<Position>) -> Vec<Position> {
    let (xs, ys) = interior(grid);
    let mut blocked: HashSet<Position> = HashSet::new();
    let mut candidates = Vec::new();

    for x in xs {
        for y in ys.clone() {
            let pos = Position::new(x, y);
            if blocked.contains(&pos) || reserved.contains(&pos) || !grid.get(pos).is_walkway() {
                continue;
            }
            if grid.count_adjacent(pos, &CellType::Walkway) >= 1 {
                candidates.push(pos);
                blocked.insert(Position::new(x, y + 1));
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open_floor(rows: usize, cols: usize) -> Grid {
        Grid::new(rows, cols, CellType::Walkway).unwrap()
    }

    fn interior_rows_and_cols_keep_walkway(grid: &Grid) -> bool {
        let rows_ok = (1..grid.rows() - 1)
            .all(|y| (0..grid.cols()).any(|x| grid.get(Position::new(x, y)).is_walkway()));
        let cols_ok = (1..grid.cols() - 1)
            .all(|x| (0..grid.rows()).any(|y| grid.get(Position::new(x, y)).is_walkway()));
        rows_ok && cols_ok
    }

    #[test]
    fn small_grids_are_left_alone() {
        let mut grid = open_floor(2, 5);
        let report = convert_walkways_to_aisles(&mut grid);
        assert_eq!(report, AisleReport::default());
        assert_eq!(grid.count(&CellType::Aisle), 0);
    }

    #[test]
    fn open_floor_gets_shelving_and_stays_connected() {
        let mut grid = open_floor(7, 7);
        let report = convert_walkways_to_aisles(&mut grid);
        assert!(report.converted > 0);
        assert_eq!(grid.count(&CellType::Aisle), report.converted);
        assert!(is_walkway_connected(&grid));
        assert!(interior_rows_and_cols_keep_walkway(&grid));
    }

    #[test]
    fn outer_ring_is_never_converted() {
        let mut grid = open_floor(6, 8);
        convert_walkways_to_aisles(&mut grid);
        for pos in grid.positions().filter(|p| !grid.is_interior(*p)) {
            assert!(grid.get(pos).is_walkway(), "border cell {pos} was converted");
        }
    }

    #[test]
    fn no_two_new_aisles_stack_vertically() {
        let mut grid = open_floor(8, 8);
        convert_walkways_to_aisles(&mut grid);
        for pos in grid.positions_of(&CellType::Aisle) {
            let below = Position::new(pos.x, pos.y + 1);
            assert!(!grid.in_bounds(below) || grid.get(below) != &CellType::Aisle);
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        let mut a = open_floor(9, 6);
        let mut b = open_floor(9, 6);
        convert_walkways_to_aisles(&mut a);
        convert_walkways_to_aisles(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn rollback_keeps_corridor_intact() {
        // A single-width ring: removing any non-reserved cell from it would still
        // leave a path, but removing two would not.
        let mut grid = Grid::new(5, 5, CellType::Aisle).unwrap();
        for i in 0..5 {
            grid.set(Position::new(i, 0), CellType::Walkway);
            grid.set(Position::new(i, 4), CellType::Walkway);
            grid.set(Position::new(0, i), CellType::Walkway);
            grid.set(Position::new(4, i), CellType::Walkway);
        }
        grid.set(Position::new(2, 2), CellType::Walkway);
        grid.set(Position::new(2, 1), CellType::Walkway);
        let before = grid.count(&CellType::Walkway);

        convert_walkways_to_aisles(&mut grid);
        assert!(is_walkway_connected(&grid));
        assert!(grid.count(&CellType::Walkway) <= before);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a connected walkway network remains connected after conversion.
        #[test]
        fn conversion_preserves_connectivity(
            rows in 1usize..9,
            cols in 1usize..9,
            bits in prop::collection::vec(any::<bool>(), 64)
        ) {
            let mut grid = open_floor(rows, cols);
            for (i, pos) in grid.positions().collect::<Vec<_>>().into_iter().enumerate() {
                if !bits[i % bits.len()] {
                    grid.set(pos, CellType::Aisle);
                }
            }
            let connected_before = is_walkway_connected(&grid);

            convert_walkways_to_aisles(&mut grid);

            if connected_before {
                prop_assert!(is_walkway_connected(&grid));
            }
        }

        /// Property: interior rows/columns that had walkway still have walkway.
        #[test]
        fn reserved_walkways_survive(rows in 3usize..10, cols in 3usize..10) {
            let mut grid = open_floor(rows, cols);
            convert_walkways_to_aisles(&mut grid);
            prop_assert!(interior_rows_and_cols_keep_walkway(&grid));
        }
    }
}

//! Entrance and checkout placement.

use storeplan_core::{CellType, Position};

use crate::grid::Grid;

/// Cashiers placed by default in either flow.
pub const DEFAULT_CASHIERS: usize = 2;

/// Row-major positions of every door.
pub fn find_doors(grid: &Grid) -> Vec<Position> {
    grid.positions_of(&CellType::Door).collect()
}

/// Walkway cells next to a door whose own neighbors are only door, walkway or
/// cashier. Returned in encounter order (doors row-major, then left, right, up,
/// down); a spot shared by two doors appears twice.
pub fn find_cashier_spots(grid: &Grid, doors: &[Position]) -> Vec<Position> {
    let mut spots = Vec::new();
    for &door in doors {
        let (neighbors, count) = grid.neighbors4(door);
        for &spot in &neighbors[..count] {
            if !grid.get(spot).is_walkway() {
                continue;
            }
            let (around, n) = grid.neighbors4(spot);
            let clear = around[..n].iter().all(|p| {
                matches!(
                    grid.get(*p),
                    CellType::Door | CellType::Walkway | CellType::Cashier
                )
            });
            if clear {
                spots.push(spot);
            }
        }
    }
    spots
}

/// Turn up to `max` distinct spots next to the existing doors into cashiers.
///
/// Spots are evaluated before any conversion, so the result is deterministic.
pub fn place_cashiers_near_doors(grid: &mut Grid, max: usize) -> Vec<Position> {
    let doors = find_doors(grid);
    let spots = find_cashier_spots(grid, &doors);

    let mut placed: Vec<Position> = Vec::with_capacity(max);
    for spot in spots {
        if placed.len() >= max {
            break;
        }
        if placed.contains(&spot) {
            continue;
        }
        grid.set(spot, CellType::Cashier);
        placed.push(spot);
    }

    tracing::debug!(doors = doors.len(), cashiers = placed.len(), "cashiers placed near doors");
    placed
}

/// Put the entrance in the top-left corner.
pub fn place_entrance(grid: &mut Grid) -> Position {
    let door = Position::new(0, 0);
    grid.set(door, CellType::Door);
    door
}

/// Checkout lane along the bottom row.
///
/// Cashier `i` goes to column `min(i, cols - 1)` of the last row and the cell
/// above it is forced to walkway so the lane stays reachable. Narrow grids
/// reuse the last column, so positions may repeat. On a single-row grid the
/// lane shares row 0 with the entrance and overwrites the door at (0, 0).
pub fn place_checkout_lane(grid: &mut Grid, n: usize) -> Vec<Position> {
    let row = grid.rows() - 1;
    let mut positions = Vec::with_capacity(n);
    for i in 0..n {
        let pos = Position::new(i.min(grid.cols() - 1), row);
        grid.set(pos, CellType::Cashier);
        if row > 0 {
            grid.set(Position::new(pos.x, row - 1), CellType::Walkway);
        }
        positions.push(pos);
    }
    positions
}

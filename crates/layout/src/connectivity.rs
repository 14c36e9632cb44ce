//! Walkway connectivity.
//!
//! The walkway network is the graph of `Walkway` cells under 4-adjacency. Every
//! layout stage that removes walkway must leave it as a single component.

use std::collections::VecDeque;

use storeplan_core::{CellType, Position};

use crate::grid::Grid;

/// True when all walkway cells form one connected component.
///
/// A grid with no walkway at all is trivially connected. Cost is
/// O(rows * cols) per call.
pub fn is_walkway_connected(grid: &Grid) -> bool {
    let total = grid.count(&CellType::Walkway);
    let Some(start) = grid.positions_of(&CellType::Walkway).next() else {
        return true;
    };
    reachable_walkways(grid, start) == total
}

/// Number of walkway cells reachable from `start` (inclusive).
///
/// Returns 0 if `start` is not a walkway.
pub fn reachable_walkways(grid: &Grid, start: Position) -> usize {
    if !grid.in_bounds(start) || !grid.get(start).is_walkway() {
        return 0;
    }

    let w = grid.cols();
    let mut visited = vec![false; grid.rows() * w];
    let mut queue: VecDeque<Position> = VecDeque::new();

    visited[start.y * w + start.x] = true;
    queue.push_back(start);
    let mut seen = 1;

    while let Some(pos) = queue.pop_front() {
        let (neighbors, count) = grid.neighbors4(pos);
        for &n in &neighbors[..count] {
            let idx = n.y * w + n.x;
            if visited[idx] || !grid.get(n).is_walkway() {
                continue;
            }
            visited[idx] = true;
            seen += 1;
            queue.push_back(n);
        }
    }

    seen
}

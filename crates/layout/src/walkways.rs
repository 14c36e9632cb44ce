//! Walkway repair: make sure rows and columns keep a way through.
//!
//! Structural cells (doors, cashiers, zones) are never overwritten.

use rand::Rng;
use rand::seq::SliceRandom;

use storeplan_core::{CellType, Position};

use crate::grid::Grid;

fn row_has_walkway(grid: &Grid, y: usize) -> bool {
    grid.row(y).iter().any(CellType::is_walkway)
}

fn col_has_walkway(grid: &Grid, x: usize) -> bool {
    (0..grid.rows()).any(|y| grid.get(Position::new(x, y)).is_walkway())
}

/// For every interior row (then column) with no walkway anywhere, open a random
/// non-structural interior cell of that row (column). Returns the opened cells.
pub fn reserve_walkways_random<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Vec<Position> {
    let mut opened = Vec::new();
    if grid.rows() < 3 || grid.cols() < 3 {
        return opened;
    }
    let (max_x, max_y) = (grid.cols() - 2, grid.rows() - 2);

    for y in 1..=max_y {
        if row_has_walkway(grid, y) {
            continue;
        }
        let eligible: Vec<Position> = (1..=max_x)
            .map(|x| Position::new(x, y))
            .filter(|p| !grid.get(*p).is_structural())
            .collect();
        if let Some(&pos) = eligible.choose(rng) {
            grid.set(pos, CellType::Walkway);
            opened.push(pos);
        }
    }

    for x in 1..=max_x {
        if col_has_walkway(grid, x) {
            continue;
        }
        let eligible: Vec<Position> = (1..=max_y)
            .map(|y| Position::new(x, y))
            .filter(|p| !grid.get(*p).is_structural())
            .collect();
        if let Some(&pos) = eligible.choose(rng) {
            grid.set(pos, CellType::Walkway);
            opened.push(pos);
        }
    }

    if !opened.is_empty() {
        tracing::debug!(opened = opened.len(), "opened walkway in blocked rows/columns");
    }
    opened
}

/// For every row with no walkway, open its first aisle cell (left to right);
/// then for every column with none, its first aisle cell (top to bottom).
pub fn reserve_walkways_first_fit(grid: &mut Grid) -> Vec<Position> {
    let mut opened = Vec::new();

    for y in 0..grid.rows() {
        if row_has_walkway(grid, y) {
            continue;
        }
        if let Some(x) = grid.row(y).iter().position(|c| *c == CellType::Aisle) {
            let pos = Position::new(x, y);
            grid.set(pos, CellType::Walkway);
            opened.push(pos);
        }
    }

    for x in 0..grid.cols() {
        if col_has_walkway(grid, x) {
            continue;
        }
        let first_aisle = (0..grid.rows())
            .map(|y| Position::new(x, y))
            .find(|p| grid.get(*p) == &CellType::Aisle);
        if let Some(pos) = first_aisle {
            grid.set(pos, CellType::Walkway);
            opened.push(pos);
        }
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_repair_opens_each_blocked_interior_line() {
        let mut grid = Grid::new(5, 5, CellType::Aisle).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let opened = reserve_walkways_random(&mut grid, &mut rng);

        assert!(!opened.is_empty());
        for y in 1..4 {
            assert!(row_has_walkway(&grid, y));
        }
        for x in 1..4 {
            assert!(col_has_walkway(&grid, x));
        }
        assert!(opened.iter().all(|p| grid.is_interior(*p)));
    }

    #[test]
    fn random_repair_skips_lines_that_already_have_walkway() {
        let mut grid = Grid::new(4, 4, CellType::Walkway).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(reserve_walkways_random(&mut grid, &mut rng).is_empty());
    }

    #[test]
    fn random_repair_never_overwrites_structural_cells() {
        let mut grid = Grid::new(3, 3, CellType::Aisle).unwrap();
        grid.set(Position::new(1, 1), CellType::Butcher);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(reserve_walkways_random(&mut grid, &mut rng).is_empty());
        assert_eq!(grid.get(Position::new(1, 1)), &CellType::Butcher);
    }

    #[test]
    fn first_fit_repair_opens_first_aisle() {
        let mut grid = Grid::new(2, 3, CellType::Aisle).unwrap();
        grid.set(Position::new(0, 0), CellType::Door);
        let opened = reserve_walkways_first_fit(&mut grid);

        // Row 0 opens (1, 0); row 1 opens (0, 1); column 2 still needs one.
        assert_eq!(
            opened,
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(2, 0)]
        );
        assert_eq!(grid.get(Position::new(0, 0)), &CellType::Door);
    }
}

//! The floor grid: a fixed-size, row-major array of cell types.

use serde::{Deserialize, Serialize};

use storeplan_core::{Cell, CellType, LayoutError, LayoutResult, Position};

/// Largest grid accepted, in cells.
pub const MAX_CELLS: usize = 1_000_000;

/// Mutable 2D cell array plus its metric cell size.
///
/// Cells are stored as types only; coordinates are implied by the index
/// (`y * cols + x`), so a cell can never disagree with its array position.
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridWire", into = "GridWire")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: f64,
    cells: Vec<CellType>,
}

impl Grid {
    /// Create a `rows x cols` grid with every cell set to `fill` and a cell size of 1.
    pub fn new(rows: usize, cols: usize, fill: CellType) -> LayoutResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::validation(format!(
                "grid dimensions must be at least 1x1 (got {rows}x{cols})"
            )));
        }
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cell_size: 1.0,
            cells: vec![fill; len],
        })
    }

    /// Build a grid from rows of cell types (outer = rows, inner = columns).
    pub fn from_type_rows(type_rows: Vec<Vec<CellType>>) -> LayoutResult<Self> {
        let rows = type_rows.len();
        let cols = type_rows.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(LayoutError::validation("grid cannot be empty"));
        }
        checked_len(rows, cols)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for (y, row) in type_rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::validation(format!(
                    "row {y} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            rows,
            cols,
            cell_size: 1.0,
            cells,
        })
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> LayoutResult<Self> {
        validate_cell_size(cell_size)?;
        self.cell_size = cell_size;
        Ok(self)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.y * self.cols + pos.x
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// True when `pos` is off the outermost ring (all four neighbors exist).
    #[inline]
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x + 1 < self.cols && pos.y + 1 < self.rows
    }

    /// Cell type at `pos`. Panics if `pos` is out of bounds.
    #[inline]
    pub fn get(&self, pos: Position) -> &CellType {
        &self.cells[self.index(pos)]
    }

    /// Overwrite the cell type at `pos`. Panics if `pos` is out of bounds.
    #[inline]
    pub fn set(&mut self, pos: Position, cell_type: CellType) {
        let idx = self.index(pos);
        self.cells[idx] = cell_type;
    }

    /// Returns up to 4 cardinal neighbors (left, right, up, down) and the count of
    /// valid entries. Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, pos: Position) -> ([Position; 4], usize) {
        let Position { x, y } = pos;
        let mut result = [Position::new(0, 0); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = Position::new(x - 1, y);
            count += 1;
        }
        if x + 1 < self.cols {
            result[count] = Position::new(x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = Position::new(x, y - 1);
            count += 1;
        }
        if y + 1 < self.rows {
            result[count] = Position::new(x, y + 1);
            count += 1;
        }
        (result, count)
    }

    /// Number of in-bounds 4-neighbors of `pos` whose type equals `cell_type`.
    pub fn count_adjacent(&self, pos: Position, cell_type: &CellType) -> usize {
        let (neighbors, count) = self.neighbors4(pos);
        neighbors[..count]
            .iter()
            .filter(|n| self.get(**n) == cell_type)
            .count()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols;
        (0..self.cells.len()).map(move |i| Position::new(i % cols, i / cols))
    }

    /// Row-major positions of every cell of the given type.
    pub fn positions_of<'a>(&'a self, cell_type: &'a CellType) -> impl Iterator<Item = Position> + 'a {
        self.positions().filter(move |p| self.get(*p) == cell_type)
    }

    pub fn count(&self, cell_type: &CellType) -> usize {
        self.cells.iter().filter(|c| *c == cell_type).count()
    }

    /// Row-major cells with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.positions()
            .map(|p| Cell::new(self.get(p).clone(), p.x, p.y))
    }

    /// Cell types of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[CellType] {
        let start = y * self.cols;
        &self.cells[start..start + self.cols]
    }
}

fn checked_len(rows: usize, cols: usize) -> LayoutResult<usize> {
    match rows.checked_mul(cols) {
        Some(len) if len <= MAX_CELLS => Ok(len),
        _ => Err(LayoutError::validation(format!(
            "grid of {rows}x{cols} exceeds the {MAX_CELLS} cell limit"
        ))),
    }
}

fn validate_cell_size(cell_size: f64) -> LayoutResult<()> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(LayoutError::validation(format!(
            "cell_size must be a finite positive number (got {cell_size})"
        )));
    }
    Ok(())
}

/// Wire shape of a grid: `{grid: [[{type, x, y}]], rows, cols, cell_size}`.
///
/// `rows`, `cols` and `cell_size` may be omitted on input; they are derived from
/// `grid` (cell size defaults to 1) and validated against it when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWire {
    pub grid: Vec<Vec<Cell>>,
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub cell_size: Option<f64>,
}

impl TryFrom<GridWire> for Grid {
    type Error = LayoutError;

    fn try_from(wire: GridWire) -> Result<Self, Self::Error> {
        let mut type_rows = Vec::with_capacity(wire.grid.len());
        for (y, row) in wire.grid.into_iter().enumerate() {
            let mut types = Vec::with_capacity(row.len());
            for (x, cell) in row.into_iter().enumerate() {
                if cell.x != x || cell.y != y {
                    return Err(LayoutError::validation(format!(
                        "cell at row {y}, column {x} reports coordinates ({}, {})",
                        cell.x, cell.y
                    )));
                }
                types.push(cell.cell_type);
            }
            type_rows.push(types);
        }

        let grid = Grid::from_type_rows(type_rows)?;

        if let Some(rows) = wire.rows {
            if rows != grid.rows {
                return Err(LayoutError::validation(format!(
                    "rows is {rows} but grid has {} rows",
                    grid.rows
                )));
            }
        }
        if let Some(cols) = wire.cols {
            if cols != grid.cols {
                return Err(LayoutError::validation(format!(
                    "cols is {cols} but grid has {} columns",
                    grid.cols
                )));
            }
        }

        match wire.cell_size {
            Some(cell_size) => grid.with_cell_size(cell_size),
            None => Ok(grid),
        }
    }
}

impl From<Grid> for GridWire {
    fn from(grid: Grid) -> Self {
        let rows = (0..grid.rows)
            .map(|y| {
                grid.row(y)
                    .iter()
                    .enumerate()
                    .map(|(x, ty)| Cell::new(ty.clone(), x, y))
                    .collect()
            })
            .collect();
        Self {
            grid: rows,
            rows: Some(grid.rows),
            cols: Some(grid.cols),
            cell_size: Some(grid.cell_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_dimensions() {
        assert!(Grid::new(0, 3, CellType::Walkway).is_err());
        assert!(Grid::new(3, 0, CellType::Walkway).is_err());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert!(Grid::new(1001, 1000, CellType::Walkway).is_err());
        assert!(Grid::new(usize::MAX, 2, CellType::Walkway).is_err());
        assert!(Grid::new(1000, 1000, CellType::Walkway).is_ok());
    }

    #[test]
    fn neighbors_are_bounded_at_corners() {
        let grid = Grid::new(3, 3, CellType::Walkway).unwrap();
        let (_, corner) = grid.neighbors4(Position::new(0, 0));
        let (_, center) = grid.neighbors4(Position::new(1, 1));
        let (_, edge) = grid.neighbors4(Position::new(2, 1));
        assert_eq!(corner, 2);
        assert_eq!(center, 4);
        assert_eq!(edge, 3);
    }

    #[test]
    fn interior_excludes_outer_ring() {
        let grid = Grid::new(4, 5, CellType::Walkway).unwrap();
        assert!(grid.is_interior(Position::new(1, 1)));
        assert!(grid.is_interior(Position::new(3, 2)));
        assert!(!grid.is_interior(Position::new(4, 2)));
        assert!(!grid.is_interior(Position::new(2, 0)));
        assert!(!grid.is_interior(Position::new(2, 3)));
    }

    #[test]
    fn wire_round_trip_preserves_coordinates() {
        let mut grid = Grid::new(2, 3, CellType::Walkway).unwrap();
        grid.set(Position::new(2, 1), CellType::Aisle);

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["rows"], json!(2));
        assert_eq!(json["cols"], json!(3));
        assert_eq!(json["grid"][1][2], json!({"type": "Aisle", "x": 2, "y": 1}));

        let back: Grid = serde_json::from_value(json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn wire_derives_missing_metadata() {
        let json = json!({
            "grid": [
                [{"type": "Door", "x": 0, "y": 0}, {"type": "Walkway", "x": 1, "y": 0}]
            ]
        });
        let grid: Grid = serde_json::from_value(json).unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.cell_size(), 1.0);
    }

    #[test]
    fn wire_rejects_mismatched_coordinates() {
        let json = json!({
            "grid": [
                [{"type": "Door", "x": 0, "y": 0}, {"type": "Walkway", "x": 0, "y": 0}]
            ]
        });
        let err = serde_json::from_value::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("reports coordinates"));
    }

    #[test]
    fn wire_rejects_ragged_rows_and_bad_metadata() {
        let ragged = json!({
            "grid": [
                [{"type": "Walkway", "x": 0, "y": 0}, {"type": "Walkway", "x": 1, "y": 0}],
                [{"type": "Walkway", "x": 0, "y": 1}]
            ]
        });
        assert!(serde_json::from_value::<Grid>(ragged).is_err());

        let bad_rows = json!({
            "grid": [[{"type": "Walkway", "x": 0, "y": 0}]],
            "rows": 4
        });
        assert!(serde_json::from_value::<Grid>(bad_rows).is_err());

        let bad_size = json!({
            "grid": [[{"type": "Walkway", "x": 0, "y": 0}]],
            "cell_size": 0.0
        });
        assert!(serde_json::from_value::<Grid>(bad_size).is_err());
    }
}

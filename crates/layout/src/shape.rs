//! Base grid initializers.
//!
//! Two families produce the same [`Grid`] type:
//! - [`MetricTemplate`]: store dimensions in meters divided into square cells,
//!   all walkway with an entrance in the top-left corner.
//! - [`ShapeTemplate`]: a cell-count grid pre-filled from a floor shape.

use serde::{Deserialize, Serialize};

use storeplan_core::{CellType, LayoutError, LayoutResult, Position};

use crate::grid::{Grid, MAX_CELLS};

/// Anything that can produce a fresh base grid.
pub trait GridInitializer {
    fn initialize(&self) -> LayoutResult<Grid>;
}

/// Floor shape descriptor for [`ShapeTemplate`].
///
/// Unknown shape names fall back to [`StoreShape::Default`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoreShape {
    Rectangle,
    LShape,
    Default,
}

impl From<String> for StoreShape {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rectangle" => StoreShape::Rectangle,
            "L-shape" => StoreShape::LShape,
            _ => StoreShape::Default,
        }
    }
}

impl From<StoreShape> for String {
    fn from(value: StoreShape) -> Self {
        value.to_string()
    }
}

impl core::fmt::Display for StoreShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            StoreShape::Rectangle => "rectangle",
            StoreShape::LShape => "L-shape",
            StoreShape::Default => "default",
        })
    }
}

/// Metric template: `floor(height / cell_size)` rows by `floor(width / cell_size)`
/// columns of walkway, with a door at (0, 0).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MetricTemplate {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
}

impl MetricTemplate {
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }
}

impl GridInitializer for MetricTemplate {
    fn initialize(&self) -> LayoutResult<Grid> {
        generate_template(self.width, self.height, self.cell_size)
    }
}

/// Shape template measured in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub shape: StoreShape,
    pub width: usize,
    pub height: usize,
}

impl ShapeTemplate {
    pub fn new(shape: StoreShape, width: usize, height: usize) -> Self {
        Self {
            shape,
            width,
            height,
        }
    }
}

impl GridInitializer for ShapeTemplate {
    fn initialize(&self) -> LayoutResult<Grid> {
        shape_grid(self.shape, self.width, self.height)
    }
}

/// Generate the metric walkway template.
pub fn generate_template(width: f64, height: f64, cell_size: f64) -> LayoutResult<Grid> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(LayoutError::validation(format!(
            "cell_size must be a finite positive number (got {cell_size})"
        )));
    }
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(LayoutError::validation(format!(
            "width and height must be finite non-negative numbers (got {width} x {height})"
        )));
    }

    let rows = (height / cell_size).floor();
    let cols = (width / cell_size).floor();
    if rows < 1.0 || cols < 1.0 {
        return Err(LayoutError::validation(format!(
            "store of {width} x {height} with cell_size {cell_size} yields no cells"
        )));
    }
    if rows * cols > MAX_CELLS as f64 {
        return Err(LayoutError::validation(format!(
            "store of {width} x {height} with cell_size {cell_size} exceeds the {MAX_CELLS} cell limit"
        )));
    }

    let mut grid =
        Grid::new(rows as usize, cols as usize, CellType::Walkway)?.with_cell_size(cell_size)?;
    grid.set(Position::new(0, 0), CellType::Door);

    tracing::debug!(rows = grid.rows(), cols = grid.cols(), cell_size, "generated layout template");
    Ok(grid)
}

/// Pre-fill a `height x width` cell grid from a floor shape.
pub fn shape_grid(shape: StoreShape, width: usize, height: usize) -> LayoutResult<Grid> {
    if width == 0 || height == 0 {
        return Err(LayoutError::validation(format!(
            "width and height must be at least 1 (got {width} x {height})"
        )));
    }

    let grid = match shape {
        StoreShape::Rectangle => rectangle(width, height)?,
        StoreShape::LShape => l_shape(width, height)?,
        StoreShape::Default => Grid::new(height, width, CellType::Aisle)?,
    };

    tracing::debug!(%shape, rows = grid.rows(), cols = grid.cols(), "generated shape grid");
    Ok(grid)
}

/// Even rows are shelving, odd rows are walkway.
fn rectangle(width: usize, height: usize) -> LayoutResult<Grid> {
    let mut grid = Grid::new(height, width, CellType::Walkway)?;
    for y in (0..height).step_by(2) {
        for x in 0..width {
            grid.set(Position::new(x, y), CellType::Aisle);
        }
    }
    Ok(grid)
}

/// Shelving in the top-left quadrant plus a full shelving row along the bottom.
fn l_shape(width: usize, height: usize) -> LayoutResult<Grid> {
    let mut grid = Grid::new(height, width, CellType::Walkway)?;
    for y in 0..height {
        if y < height / 2 || y == height - 1 {
            for x in 0..width / 2 {
                grid.set(Position::new(x, y), CellType::Aisle);
            }
        }
    }
    for x in 0..width {
        grid.set(Position::new(x, height - 1), CellType::Aisle);
    }
    Ok(grid)
}

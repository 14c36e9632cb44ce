use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use storeplan_ai::{CategoryCoordinates, RankedPair};
use storeplan_core::{CellType, LayoutResult, Position};
use storeplan_layout::{Grid, GridWire, Section, SectionFlags, ShapeLayout, StoreShape};

// -------------------------
// Request DTOs
// -------------------------

/// One operation, selected by the `"op"` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    GenerateTemplate(TemplateRequest),
    OptimizeLayout(GridWire),
    GenerateShapeLayout(ShapeLayoutRequest),
    ArrangeProducts(ArrangeProductsRequest),
    AssignCategories(AssignCategoriesRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRequest {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
}

fn default_cell_size() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeLayoutRequest {
    #[serde(default = "default_shape")]
    pub shape: StoreShape,
    #[serde(default = "default_side")]
    pub width: usize,
    #[serde(default = "default_side")]
    pub height: usize,
    #[serde(flatten)]
    pub sections: SectionFlags,
}

fn default_shape() -> StoreShape {
    StoreShape::Rectangle
}

fn default_side() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrangeProductsRequest {
    pub layout: LayoutInput,
    #[serde(default)]
    pub ranked_pairs: Vec<RankedPair>,
    #[serde(default)]
    pub max_pairs: Option<usize>,
}

/// Grid wire fields plus the category coordinates to apply.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignCategoriesRequest {
    #[serde(flatten)]
    pub grid: GridWire,
    pub coordinates: CategoryCoordinates,
}

/// A layout sent either as a grid document or as a plain matrix of type names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LayoutInput {
    Matrix(Vec<Vec<CellType>>),
    Wire(GridWire),
}

impl LayoutInput {
    pub fn into_grid(self) -> LayoutResult<Grid> {
        match self {
            LayoutInput::Matrix(rows) => Grid::from_type_rows(rows),
            LayoutInput::Wire(wire) => Grid::try_from(wire),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Shape flow result with the layout as a matrix of type names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeLayoutResponse {
    pub layout: Vec<Vec<CellType>>,
    pub door_position: Option<Position>,
    pub cashier_positions: Vec<Position>,
    pub positions: BTreeMap<Section, Option<Position>>,
}

impl From<ShapeLayout> for ShapeLayoutResponse {
    fn from(shape: ShapeLayout) -> Self {
        let layout = (0..shape.layout.rows())
            .map(|y| shape.layout.row(y).to_vec())
            .collect();
        Self {
            layout,
            door_position: shape.position(Section::Door),
            cashier_positions: shape.cashier_positions,
            positions: shape.positions,
        }
    }
}

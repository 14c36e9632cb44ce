//! Cell vocabulary.

use serde::{Deserialize, Serialize};

use crate::position::Position;

const CATEGORY_PREFIX: &str = "Aisle - ";

/// Type tag of a floor cell.
///
/// The wire form is an open string: the known vocabulary maps onto dedicated
/// variants, `"Aisle - <category>"` becomes [`CellType::CategorizedAisle`], and
/// anything else is preserved verbatim as [`CellType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellType {
    Walkway,
    Door,
    Cashier,
    Aisle,
    Butcher,
    Spices,
    FruitsVeg,
    StaffRoom,
    /// An aisle that has been assigned a product category.
    CategorizedAisle(String),
    Other(String),
}

impl CellType {
    pub fn as_str(&self) -> &str {
        match self {
            CellType::Walkway => "Walkway",
            CellType::Door => "Door",
            CellType::Cashier => "Cashier",
            CellType::Aisle => "Aisle",
            CellType::Butcher => "Butcher",
            CellType::Spices => "Spices",
            CellType::FruitsVeg => "FruitsVeg",
            CellType::StaffRoom => "StaffRoom",
            CellType::CategorizedAisle(_) => "Aisle",
            CellType::Other(tag) => tag,
        }
    }

    pub fn is_walkway(&self) -> bool {
        matches!(self, CellType::Walkway)
    }

    /// Functional zones placed by the zone placer.
    pub fn is_zone(&self) -> bool {
        matches!(
            self,
            CellType::Butcher | CellType::Spices | CellType::FruitsVeg | CellType::StaffRoom
        )
    }

    /// Cells that walkway repair must never overwrite.
    pub fn is_structural(&self) -> bool {
        matches!(self, CellType::Door | CellType::Cashier) || self.is_zone()
    }
}

impl core::fmt::Display for CellType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellType::CategorizedAisle(category) => write!(f, "{CATEGORY_PREFIX}{category}"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl From<String> for CellType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Walkway" => CellType::Walkway,
            "Door" => CellType::Door,
            "Cashier" => CellType::Cashier,
            "Aisle" => CellType::Aisle,
            "Butcher" => CellType::Butcher,
            "Spices" => CellType::Spices,
            "FruitsVeg" => CellType::FruitsVeg,
            "StaffRoom" => CellType::StaffRoom,
            _ => match value.strip_prefix(CATEGORY_PREFIX) {
                Some(category) => CellType::CategorizedAisle(category.to_string()),
                None => CellType::Other(value),
            },
        }
    }
}

impl From<&str> for CellType {
    fn from(value: &str) -> Self {
        CellType::from(value.to_string())
    }
}

impl From<CellType> for String {
    fn from(value: CellType) -> Self {
        match value {
            CellType::Other(tag) => tag,
            other => other.to_string(),
        }
    }
}

/// A cell as it appears on the wire: its type plus its array coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(cell_type: CellType, x: usize, y: usize) -> Self {
        Self { cell_type, x, y }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

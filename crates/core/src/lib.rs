//! `storeplan-core`: floor-plan building blocks.
//!
//! This crate contains **pure domain** primitives (no layout algorithms, no IO).

pub mod cell;
pub mod error;
pub mod position;
pub mod value_object;

pub use cell::{Cell, CellType};
pub use error::{LayoutError, LayoutResult};
pub use position::Position;
pub use value_object::ValueObject;

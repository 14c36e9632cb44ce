//! `storeplan-layout`: retail floor layout generation.
//!
//! Deterministic given a seed: every randomized stage takes its RNG as a
//! parameter. No IO, no HTTP, no storage.

pub mod aisles;
pub mod config;
pub mod connectivity;
pub mod doors;
pub mod grid;
pub mod pipeline;
pub mod shape;
pub mod walkways;
pub mod zones;

pub use aisles::{AisleReport, convert_walkways_to_aisles};
pub use config::LayoutConfig;
pub use connectivity::{is_walkway_connected, reachable_walkways};
pub use doors::{place_cashiers_near_doors, place_checkout_lane, place_entrance};
pub use grid::{Grid, GridWire};
pub use pipeline::{
    LayoutPipeline, OptimizationReport, Section, SectionFlags, ShapeLayout, ZonePlacement,
};
pub use shape::{
    GridInitializer, MetricTemplate, ShapeTemplate, StoreShape, generate_template, shape_grid,
};
pub use zones::{FirstFitScan, RandomizedSearch, ZonePolicy, ZoneSpec, place_zone};

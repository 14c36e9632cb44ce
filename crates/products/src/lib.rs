//! Product placement on an optimized layout.
//!
//! Consumes rankings and coordinates computed elsewhere (see `storeplan-ai`)
//! and maps them onto shelf cells. Pure and deterministic (no IO, no HTTP,
//! no storage).

pub mod arrangement;
pub mod categories;

pub use arrangement::{DEFAULT_MAX_PAIRS, ProductPlacement, arrange_products, arrange_with_ranker};
pub use categories::{assign_categories, assign_with_embedder};

//! `storeplan-ai`
//!
//! **Responsibility:** boundary to the ranking and embedding systems.
//!
//! This crate does **not** compute anything model-like:
//! - Product pair rankings and category coordinates are produced elsewhere.
//! - The layout side consumes them through [`ProductPairRanker`] and
//!   [`CategoryEmbedder`].
//! - Static providers wrap pre-resolved data after validating it.

pub mod ranking;
pub mod result;

pub use ranking::{
    CategoryCoordinates, CategoryEmbedder, ProductPairRanker, RankedPair, StaticCategoryEmbedding,
    StaticPairRanking,
};
pub use result::{AiError, AiResult};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::result::{AiError, AiResult};

/// A product pair with its co-purchase (or similarity) score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPair {
    pub id1: String,
    pub id2: String,
    pub score: f64,
}

impl RankedPair {
    pub fn new(id1: impl Into<String>, id2: impl Into<String>, score: f64) -> Self {
        Self {
            id1: id1.into(),
            id2: id2.into(),
            score,
        }
    }
}

/// 2D coordinates per category, as produced by an external embedding.
pub type CategoryCoordinates = BTreeMap<String, [f64; 2]>;

/// Source of ranked product pairs.
///
/// Implementations return at most `n` pairs, best score first.
pub trait ProductPairRanker {
    fn top_pairs(&self, n: usize) -> AiResult<Vec<RankedPair>>;
}

/// Source of 2D category coordinates.
pub trait CategoryEmbedder {
    fn category_coordinates(&self) -> AiResult<CategoryCoordinates>;
}

/// Pairs ranked ahead of time and handed over as data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticPairRanking {
    pairs: Vec<RankedPair>,
}

impl StaticPairRanking {
    /// Sorts by descending score; equal scores keep their input order.
    pub fn new(mut pairs: Vec<RankedPair>) -> AiResult<Self> {
        if let Some(bad) = pairs.iter().find(|p| !p.score.is_finite()) {
            return Err(AiError::invalid_input(format!(
                "pair ({}, {}) has non-finite score {}",
                bad.id1, bad.id2, bad.score
            )));
        }
        pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl ProductPairRanker for StaticPairRanking {
    fn top_pairs(&self, n: usize) -> AiResult<Vec<RankedPair>> {
        Ok(self.pairs.iter().take(n).cloned().collect())
    }
}

/// Category coordinates computed ahead of time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticCategoryEmbedding {
    coordinates: CategoryCoordinates,
}

impl StaticCategoryEmbedding {
    pub fn new(coordinates: CategoryCoordinates) -> AiResult<Self> {
        for (category, [x, y]) in &coordinates {
            if !(x.is_finite() && y.is_finite()) {
                return Err(AiError::invalid_input(format!(
                    "category {category:?} has non-finite coordinates [{x}, {y}]"
                )));
            }
        }
        Ok(Self { coordinates })
    }
}

impl CategoryEmbedder for StaticCategoryEmbedding {
    fn category_coordinates(&self) -> AiResult<CategoryCoordinates> {
        Ok(self.coordinates.clone())
    }
}

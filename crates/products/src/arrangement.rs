use serde::{Deserialize, Serialize};

use storeplan_ai::{AiResult, ProductPairRanker, RankedPair};
use storeplan_core::{CellType, Position};
use storeplan_layout::Grid;

/// Pairs placed per request unless the caller asks otherwise.
pub const DEFAULT_MAX_PAIRS: usize = 20;

/// Two products assigned to a pair of neighboring shelf cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPlacement {
    pub item1: String,
    pub item2: String,
    pub score: f64,
    pub pos1: Position,
    pub pos2: Position,
}

/// Assign ranked pairs to consecutive shelf cells.
///
/// Plain `Aisle` cells are taken in row-major order and paired
/// (0 with 1, 2 with 3, ...). Pair `i` goes to slot `i`. Output stops at the
/// shorter of the slots and the pairs, and at `max_pairs`. Categorized aisles
/// are not free shelving and are skipped.
pub fn arrange_products(grid: &Grid, ranked_pairs: &[RankedPair], max_pairs: usize) -> Vec<ProductPlacement> {
    let shelves: Vec<Position> = grid.positions_of(&CellType::Aisle).collect();

    shelves
        .chunks_exact(2)
        .zip(ranked_pairs.iter().take(max_pairs))
        .map(|(slot, pair)| ProductPlacement {
            item1: pair.id1.clone(),
            item2: pair.id2.clone(),
            score: pair.score,
            pos1: slot[0],
            pos2: slot[1],
        })
        .collect()
}

/// [`arrange_products`] over the top `max_pairs` pairs from `ranker`.
pub fn arrange_with_ranker<P>(grid: &Grid, ranker: &P, max_pairs: usize) -> AiResult<Vec<ProductPlacement>>
where
    P: ProductPairRanker + ?Sized,
{
    let pairs = ranker.top_pairs(max_pairs)?;
    let placements = arrange_products(grid, &pairs, max_pairs);
    tracing::debug!(
        requested = max_pairs,
        ranked = pairs.len(),
        placed = placements.len(),
        "products arranged"
    );
    Ok(placements)
}

use storeplan_ai::{AiResult, CategoryCoordinates, CategoryEmbedder};
use storeplan_core::{CellType, Position};
use storeplan_layout::Grid;

/// Label plain aisle cells with categories, nearest-to-origin first.
///
/// Shelf cells are taken in (y, x) order and categories in (y, x) order of
/// their coordinates, ties broken by name. The two sequences are zipped and
/// each matched cell becomes `Aisle - <category>`. Returns the number of
/// cells labelled.
pub fn assign_categories(grid: &mut Grid, coordinates: &CategoryCoordinates) -> usize {
    // `positions_of` is row-major, which is already (y, x) order.
    let shelves: Vec<Position> = grid.positions_of(&CellType::Aisle).collect();

    let mut ordered: Vec<(&String, &[f64; 2])> = coordinates.iter().collect();
    ordered.sort_by(|(name_a, a), (name_b, b)| {
        a[1].total_cmp(&b[1])
            .then_with(|| a[0].total_cmp(&b[0]))
            .then_with(|| name_a.cmp(name_b))
    });

    let mut assigned = 0;
    for (pos, (category, _)) in shelves.into_iter().zip(ordered) {
        grid.set(pos, CellType::CategorizedAisle(category.clone()));
        assigned += 1;
    }
    assigned
}

/// [`assign_categories`] with coordinates from `embedder`.
pub fn assign_with_embedder<E>(grid: &mut Grid, embedder: &E) -> AiResult<usize>
where
    E: CategoryEmbedder + ?Sized,
{
    let coordinates = embedder.category_coordinates()?;
    let assigned = assign_categories(grid, &coordinates);
    tracing::debug!(categories = coordinates.len(), assigned, "categories assigned to aisles");
    Ok(assigned)
}

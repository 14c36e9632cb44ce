//! Whole-pipeline properties over generated store sizes.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use storeplan_core::{CellType, Position};
use storeplan_layout::{
    Grid, LayoutConfig, LayoutPipeline, Section, SectionFlags, StoreShape,
    convert_walkways_to_aisles, generate_template, is_walkway_connected,
};

fn random_floor(rows: usize, cols: usize, seed: u64) -> Grid {
    use rand::Rng;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols, CellType::Walkway).unwrap();
    for y in 0..rows {
        for x in 0..cols {
            if rng.gen_bool(0.25) {
                grid.set(Position::new(x, y), CellType::Aisle);
            }
        }
    }
    grid
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    /// Template dimensions follow floor(width / cell_size) and floor(height / cell_size).
    #[test]
    fn template_dimensions_follow_cell_size(
        width in 1.0f64..60.0,
        height in 1.0f64..60.0,
        cell_size in 0.5f64..3.0,
    ) {
        match generate_template(width, height, cell_size) {
            Ok(grid) => {
                prop_assert_eq!(grid.cols(), (width / cell_size).floor() as usize);
                prop_assert_eq!(grid.rows(), (height / cell_size).floor() as usize);
                prop_assert_eq!(grid.get(Position::new(0, 0)), &CellType::Door);
                prop_assert_eq!(grid.count(&CellType::Door), 1);
            }
            // Only a store smaller than one cell may be rejected.
            Err(_) => prop_assert!(width < cell_size || height < cell_size),
        }
    }

    /// Aisle conversion never disconnects an already connected floor.
    #[test]
    fn aisles_preserve_connected_floor(rows in 3usize..14, cols in 3usize..14, seed in any::<u64>()) {
        let mut grid = random_floor(rows, cols, seed);
        prop_assume!(is_walkway_connected(&grid));
        convert_walkways_to_aisles(&mut grid);
        prop_assert!(is_walkway_connected(&grid));
    }

    /// Identical seeds give identical grids and reports.
    #[test]
    fn optimize_is_deterministic_per_seed(side in 3usize..16, seed in any::<u64>()) {
        let pipeline = LayoutPipeline::new(LayoutConfig::default().with_seed(seed).with_zone_attempts(200));
        let template = generate_template(side as f64, side as f64, 1.0).unwrap();

        let mut a = template.clone();
        let mut b = template;
        let ra = pipeline.optimize(&mut a);
        let rb = pipeline.optimize(&mut b);

        prop_assert_eq!(a, b);
        prop_assert_eq!(ra, rb);
    }

    /// Optimization keeps the grid size, the door, and accounts for every zone.
    #[test]
    fn optimize_keeps_shape_and_door(rows in 2usize..14, cols in 2usize..14, seed in any::<u64>()) {
        let pipeline = LayoutPipeline::new(LayoutConfig::default().with_seed(seed).with_zone_attempts(200));
        let mut grid = generate_template(cols as f64, rows as f64, 1.0).unwrap();
        let report = pipeline.optimize(&mut grid);

        prop_assert_eq!((grid.rows(), grid.cols()), (rows, cols));
        prop_assert_eq!(grid.get(Position::new(0, 0)), &CellType::Door);
        prop_assert_eq!(report.zones.len() + report.omitted.len(), 3);
    }

    /// The shape flow always reports all five sections and never drops the door.
    #[test]
    fn shape_layout_reports_all_sections(
        width in 1usize..12,
        height in 1usize..12,
        shape in prop_oneof![
            Just(StoreShape::Rectangle),
            Just(StoreShape::LShape),
            Just(StoreShape::Default),
        ],
    ) {
        let pipeline = LayoutPipeline::new(LayoutConfig::default().with_seed(0));
        let layout = pipeline
            .generate_shape_layout(shape, width, height, SectionFlags::default())
            .unwrap();

        prop_assert_eq!(layout.positions.len(), 5);
        prop_assert_eq!(layout.position(Section::Door), Some(Position::new(0, 0)));
        prop_assert_eq!(layout.cashier_positions.len(), 2);
        prop_assert_eq!((layout.layout.rows(), layout.layout.cols()), (height, width));
    }
}

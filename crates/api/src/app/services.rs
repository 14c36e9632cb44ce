use serde::Serialize;
use serde_json::{Value, json};

use storeplan_ai::{CategoryEmbedder, ProductPairRanker, RankedPair, StaticCategoryEmbedding};
use storeplan_layout::{Grid, LayoutPipeline};
use storeplan_products::{ProductPlacement, arrange_products, arrange_with_ranker, assign_with_embedder};

use crate::app::dto::{Request, ShapeLayoutRequest, ShapeLayoutResponse, TemplateRequest};
use crate::app::errors::ApiError;
use crate::config::ServiceConfig;

/// The operation surface: one method per operation plus a JSON dispatcher.
///
/// Stateless across calls; every call works on its own grid.
#[derive(Debug, Clone)]
pub struct LayoutService {
    pipeline: LayoutPipeline,
    max_product_pairs: usize,
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl LayoutService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            pipeline: LayoutPipeline::new(config.layout),
            max_product_pairs: config.max_product_pairs,
        }
    }

    pub fn generate_template(&self, req: &TemplateRequest) -> Result<Grid, ApiError> {
        Ok(self
            .pipeline
            .generate_template(req.width, req.height, req.cell_size)?)
    }

    pub fn optimize_layout(&self, mut grid: Grid) -> Result<Grid, ApiError> {
        let report = self.pipeline.optimize(&mut grid);
        if !report.omitted.is_empty() {
            tracing::info!(omitted = ?report.omitted, "optimized layout is missing zones");
        }
        Ok(grid)
    }

    pub fn generate_shape_layout(&self, req: &ShapeLayoutRequest) -> Result<ShapeLayoutResponse, ApiError> {
        let layout = self
            .pipeline
            .generate_shape_layout(req.shape, req.width, req.height, req.sections)?;
        Ok(layout.into())
    }

    /// Pairs from `ranker` onto the layout's plain aisle cells.
    ///
    /// `max_pairs` falls back to the configured bound.
    pub fn arrange_products<P>(
        &self,
        layout: &Grid,
        ranker: &P,
        max_pairs: Option<usize>,
    ) -> Result<Vec<ProductPlacement>, ApiError>
    where
        P: ProductPairRanker + ?Sized,
    {
        let max_pairs = max_pairs.unwrap_or(self.max_product_pairs);
        Ok(arrange_with_ranker(layout, ranker, max_pairs)?)
    }

    /// Pairs onto the layout's plain aisle cells in the order given.
    ///
    /// The caller's ranking is trusted as is: no re-sorting, no filtering.
    pub fn arrange_ranked_pairs(
        &self,
        layout: &Grid,
        ranked_pairs: &[RankedPair],
        max_pairs: Option<usize>,
    ) -> Vec<ProductPlacement> {
        arrange_products(layout, ranked_pairs, max_pairs.unwrap_or(self.max_product_pairs))
    }

    pub fn assign_categories<E>(&self, mut grid: Grid, embedder: &E) -> Result<Grid, ApiError>
    where
        E: CategoryEmbedder + ?Sized,
    {
        assign_with_embedder(&mut grid, embedder)?;
        Ok(grid)
    }

    /// Decode a request document, run it, and encode the result.
    ///
    /// Failures become `{"error": message}`; this never panics on bad input.
    pub fn handle(&self, request: Value) -> Value {
        let outcome = serde_json::from_value::<Request>(request)
            .map_err(|e| ApiError::Malformed(e.to_string()))
            .and_then(|req| self.dispatch(req));

        match outcome {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(code = err.code(), "request failed: {err}");
                err.to_json()
            }
        }
    }

    /// [`handle`](Self::handle) over raw request text.
    pub fn handle_str(&self, input: &str) -> Value {
        match serde_json::from_str::<Value>(input) {
            Ok(request) => self.handle(request),
            Err(e) => {
                let err = ApiError::Malformed(e.to_string());
                tracing::warn!(code = err.code(), "request failed: {err}");
                err.to_json()
            }
        }
    }

    fn dispatch(&self, request: Request) -> Result<Value, ApiError> {
        match request {
            Request::GenerateTemplate(req) => encode(&self.generate_template(&req)?),
            Request::OptimizeLayout(wire) => {
                let grid = Grid::try_from(wire)?;
                encode(&self.optimize_layout(grid)?)
            }
            Request::GenerateShapeLayout(req) => encode(&self.generate_shape_layout(&req)?),
            Request::ArrangeProducts(req) => {
                let layout = req.layout.into_grid()?;
                let placements = self.arrange_ranked_pairs(&layout, &req.ranked_pairs, req.max_pairs);
                Ok(json!({ "product_arrangement": encode(&placements)? }))
            }
            Request::AssignCategories(req) => {
                let grid = Grid::try_from(req.grid)?;
                let embedding = StaticCategoryEmbedding::new(req.coordinates)?;
                encode(&self.assign_categories(grid, &embedding)?)
            }
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

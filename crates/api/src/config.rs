//! Service configuration from the environment.

use storeplan_layout::LayoutConfig;
use storeplan_products::DEFAULT_MAX_PAIRS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub layout: LayoutConfig,
    /// Upper bound on product pairs placed when a request does not say.
    pub max_product_pairs: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            max_product_pairs: DEFAULT_MAX_PAIRS,
        }
    }
}

impl ServiceConfig {
    /// [`LayoutConfig::from_env`] plus `STOREPLAN_MAX_PRODUCT_PAIRS`.
    pub fn from_env() -> Self {
        let max_product_pairs = match std::env::var("STOREPLAN_MAX_PRODUCT_PAIRS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("STOREPLAN_MAX_PRODUCT_PAIRS={raw:?} is not valid; using default");
                DEFAULT_MAX_PAIRS
            }),
            Err(_) => DEFAULT_MAX_PAIRS,
        };
        Self {
            layout: LayoutConfig::from_env(),
            max_product_pairs,
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_max_product_pairs(mut self, max_product_pairs: usize) -> Self {
        self.max_product_pairs = max_product_pairs;
        self
    }
}

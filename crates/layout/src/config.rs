//! Pipeline configuration.

use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::doors::DEFAULT_CASHIERS;
use crate::zones::DEFAULT_ATTEMPT_BUDGET;

/// Tunables for the layout pipeline.
///
/// `from_env` overrides the defaults from `STOREPLAN_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Seed for the pipeline RNG. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Attempts per zone for the randomized search.
    pub zone_attempts: usize,
    /// Reject zone placements that split the walkway network.
    pub verify_zone_connectivity: bool,
    /// Cashiers placed by either flow.
    pub cashiers: usize,
    /// Size range (inclusive) for the produce cluster; never empty.
    produce_size: RangeInclusive<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: None,
            zone_attempts: DEFAULT_ATTEMPT_BUDGET,
            verify_zone_connectivity: false,
            cashiers: DEFAULT_CASHIERS,
            produce_size: 2..=8,
        }
    }
}

impl LayoutConfig {
    /// Defaults overridden by `STOREPLAN_SEED`, `STOREPLAN_ZONE_ATTEMPTS`,
    /// `STOREPLAN_VERIFY_ZONE_CONNECTIVITY` and `STOREPLAN_CASHIERS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed: env_parse::<u64>("STOREPLAN_SEED").or(defaults.seed),
            zone_attempts: env_parse("STOREPLAN_ZONE_ATTEMPTS").unwrap_or(defaults.zone_attempts),
            verify_zone_connectivity: env_parse("STOREPLAN_VERIFY_ZONE_CONNECTIVITY")
                .unwrap_or(defaults.verify_zone_connectivity),
            cashiers: env_parse("STOREPLAN_CASHIERS").unwrap_or(defaults.cashiers),
            produce_size: defaults.produce_size,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_zone_attempts(mut self, zone_attempts: usize) -> Self {
        self.zone_attempts = zone_attempts;
        self
    }

    pub fn with_zone_connectivity_check(mut self, verify: bool) -> Self {
        self.verify_zone_connectivity = verify;
        self
    }

    pub fn with_cashiers(mut self, cashiers: usize) -> Self {
        self.cashiers = cashiers;
        self
    }

    /// Produce cluster size range; an empty range is normalized to a single size.
    pub fn with_produce_size(mut self, produce_size: RangeInclusive<usize>) -> Self {
        let (lo, hi) = (*produce_size.start(), *produce_size.end());
        let lo = lo.max(1);
        self.produce_size = lo..=hi.max(lo);
        self
    }

    pub fn produce_size(&self) -> RangeInclusive<usize> {
        self.produce_size.clone()
    }

    /// RNG for one pipeline run.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("{key}={raw:?} is not valid; using default");
            None
        }
    }
}

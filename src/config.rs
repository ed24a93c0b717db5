//! Layout configuration.
//!
//! Carried by every [`ComponentContext`](crate::engine::ComponentContext) so
//! resolvers, measure callbacks and caches see the same settings.

/// How strictly a cached nested tree's specs must match a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecCompatibility {
    /// Only identical specs reuse a cached tree.
    Exact,
    /// Specs compatible under their modes (given the cached measured size)
    /// reuse a cached tree.
    #[default]
    Compatible,
}

/// Settings for a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Reuse the previous pass's measurements for unchanged mount specs.
    pub reuse_measurements: bool,
    /// Match predicate for the nested tree cache.
    pub spec_compatibility: SpecCompatibility,
    /// Snap solved layouts to whole units.
    pub round_layout: bool,
    /// Free nodes kept by a [`ComponentsPool`](crate::engine::ComponentsPool).
    pub pool_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reuse_measurements: true,
            spec_compatibility: SpecCompatibility::Compatible,
            round_layout: true,
            pool_capacity: 256,
        }
    }
}

impl LayoutConfig {
    pub fn with_reuse_measurements(mut self, reuse: bool) -> Self {
        self.reuse_measurements = reuse;
        self
    }

    pub fn with_spec_compatibility(mut self, compatibility: SpecCompatibility) -> Self {
        self.spec_compatibility = compatibility;
        self
    }

    pub fn with_round_layout(mut self, round: bool) -> Self {
        self.round_layout = round;
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }
}

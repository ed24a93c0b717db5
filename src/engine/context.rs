//! ComponentContext - Ambient state handed to every lifecycle hook.
//!
//! Carries the node pool, the layout configuration and, when resolving a
//! nested tree, the width/height specs the tree is being sized for.

use std::fmt;
use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::layout::LifecycleResolver;
use crate::types::SizeSpec;

use super::component::Component;
use super::layout_node::LayoutNode;
use super::node_pool::NodePool;

/// Context for resolving and measuring components.
#[derive(Clone)]
pub struct ComponentContext {
    pool: Arc<dyn NodePool>,
    config: LayoutConfig,
    width_spec: Option<SizeSpec>,
    height_spec: Option<SizeSpec>,
}

impl ComponentContext {
    pub fn new(pool: Arc<dyn NodePool>) -> Self {
        Self::with_config(pool, LayoutConfig::default())
    }

    pub fn with_config(pool: Arc<dyn NodePool>, config: LayoutConfig) -> Self {
        Self {
            pool,
            config,
            width_spec: None,
            height_spec: None,
        }
    }

    pub fn pool(&self) -> &Arc<dyn NodePool> {
        &self.pool
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Size specs
    // -------------------------------------------------------------------------

    pub fn width_spec(&self) -> Option<SizeSpec> {
        self.width_spec
    }

    pub fn height_spec(&self) -> Option<SizeSpec> {
        self.height_spec
    }

    pub fn set_width_spec(&mut self, spec: SizeSpec) {
        self.width_spec = Some(spec);
    }

    pub fn set_height_spec(&mut self, spec: SizeSpec) {
        self.height_spec = Some(spec);
    }

    /// True once both dimensions carry a spec.
    pub fn has_size_specs(&self) -> bool {
        self.width_spec.is_some() && self.height_spec.is_some()
    }

    /// Copy of this context sized for a nested tree.
    pub fn with_size_specs(&self, width_spec: SizeSpec, height_spec: SizeSpec) -> Self {
        Self {
            width_spec: Some(width_spec),
            height_spec: Some(height_spec),
            ..self.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Helpers for lifecycle hooks
    // -------------------------------------------------------------------------

    /// Blank node from the pool, for containers built in `on_create_layout`.
    pub fn new_node(&self) -> LayoutNode {
        self.pool.acquire()
    }

    /// Resolve a child component (never as a nested tree root).
    pub fn resolve_child(&self, component: &Component) -> LayoutNode {
        LifecycleResolver::new(self.pool.clone()).resolve(self, component, false)
    }
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentContext")
            .field("config", &self.config)
            .field("width_spec", &self.width_spec)
            .field("height_spec", &self.height_spec)
            .finish_non_exhaustive()
    }
}

//! LayoutState - One root's layout across successive passes.
//!
//! Each `calculate` call resolves the root component, adopts the previous
//! pass's measurements where components are unchanged, runs the engine pass
//! and snapshots the result for next time.

use std::sync::Arc;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::engine::{
    Component, ComponentContext, ComponentsPool, DiffNode, LayoutNode, NodePool, apply_diff,
};
use crate::error::LayoutError;
use crate::types::SizeSpec;

use super::nested_tree::NestedTreeCache;
use super::resolver::LifecycleResolver;
use super::taffy_bridge;

pub struct LayoutState {
    context: ComponentContext,
    nested: NestedTreeCache,
    previous_diff: Option<Arc<DiffNode>>,
    passes: usize,
}

impl LayoutState {
    pub fn new(pool: Arc<dyn NodePool>, config: LayoutConfig) -> Self {
        Self {
            context: ComponentContext::with_config(pool, config),
            nested: NestedTreeCache::new(),
            previous_diff: None,
            passes: 0,
        }
    }

    /// State with its own pool sized from `config.pool_capacity`.
    pub fn with_config(config: LayoutConfig) -> Self {
        let pool = Arc::new(ComponentsPool::new(config.pool_capacity));
        Self::new(pool, config)
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn previous_diff(&self) -> Option<&Arc<DiffNode>> {
        self.previous_diff.as_ref()
    }

    /// Completed passes.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Nested tree resolutions performed so far (cache misses).
    pub fn nested_resolutions(&self) -> usize {
        self.nested.resolutions()
    }

    /// Resolve and lay out `component` under the given root specs.
    pub fn calculate(
        &mut self,
        component: &Component,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> Result<LayoutNode, LayoutError> {
        let root_context = self.context.with_size_specs(width_spec, height_spec);
        let mut root = LifecycleResolver::new(self.context.pool().clone()).resolve(
            &root_context,
            component,
            true,
        );

        if let Some(diff) = &self.previous_diff {
            apply_diff(&mut root, diff);
        }

        let result = taffy_bridge::calculate(
            &mut root,
            &root_context,
            width_spec,
            height_spec,
            &mut self.nested,
        );
        self.nested.clear(&self.context);

        if let Err(err) = result {
            debug!(component = %component.id(), error = %err, "layout pass failed");
            self.context.pool().release(root);
            return Err(err);
        }

        self.previous_diff = Some(Arc::new(DiffNode::from_layout(&root)));
        self.passes += 1;
        Ok(root)
    }

    /// Return a finished tree to the pool.
    pub fn release(&self, node: LayoutNode) {
        self.context.pool().release(node);
    }

    /// Forget the previous pass's measurements.
    pub fn reset_diff(&mut self) {
        self.previous_diff = None;
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(ComponentsPool::global(), LayoutConfig::default())
    }
}

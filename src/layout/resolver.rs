//! LifecycleResolver - Turns a component into a layout node.
//!
//! For each component the resolver picks one of three strategies:
//!
//! | can_measure | mount type | nested | strategy                                    |
//! |-------------|------------|--------|---------------------------------------------|
//! | false       | any        | any    | eager `on_create_layout*`, then `on_prepare` |
//! | true        | drawable/view | any | measure function, then `on_prepare`         |
//! | true        | none       | true   | eager `on_create_layout_with_size_spec`     |
//! | true        | none       | false  | measure function only (nested tree holder)  |
//!
//! A measure function is registered if and only if `can_measure()` is true
//! and the layout was deferred.

use std::sync::Arc;

use taffy::Rect;
use tracing::trace;

use crate::engine::{Component, ComponentContext, LayoutNode, Lifecycle, NodePool};
use crate::types::SizeSpec;

/// Resolution strategy for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Create the child layout now.
    Eager { with_size_spec: bool },
    /// Mount spec: the engine measures it through the callback.
    MeasureMountSpec,
    /// Layout spec: the callback resolves a nested tree once specs are known.
    DeferNestedTree,
}

impl ResolveStrategy {
    /// Pick the strategy for a lifecycle.
    pub fn select(lifecycle: &dyn Lifecycle, resolve_nested_tree: bool, has_size_specs: bool) -> Self {
        if !lifecycle.can_measure() {
            return ResolveStrategy::Eager {
                with_size_spec: resolve_nested_tree && has_size_specs,
            };
        }
        if lifecycle.mount_type().is_mount_spec() {
            ResolveStrategy::MeasureMountSpec
        } else if resolve_nested_tree {
            ResolveStrategy::Eager {
                with_size_spec: true,
            }
        } else {
            ResolveStrategy::DeferNestedTree
        }
    }

    pub fn sets_measure_function(self) -> bool {
        !matches!(self, ResolveStrategy::Eager { .. })
    }

    pub fn calls_prepare(self) -> bool {
        !matches!(self, ResolveStrategy::DeferNestedTree)
    }
}

/// Resolves components into layout nodes drawn from a pool.
pub struct LifecycleResolver {
    pool: Arc<dyn NodePool>,
}

impl LifecycleResolver {
    pub fn new(pool: Arc<dyn NodePool>) -> Self {
        Self { pool }
    }

    /// Resolve `component` into a layout node.
    ///
    /// `resolve_nested_tree` permits eager size-aware creation at this call
    /// site; the specs come from `context`.
    pub fn resolve(
        &self,
        context: &ComponentContext,
        component: &Component,
        resolve_nested_tree: bool,
    ) -> LayoutNode {
        let lifecycle = component.lifecycle();
        let mut node = self.pool.acquire();
        let strategy =
            ResolveStrategy::select(lifecycle.as_ref(), resolve_nested_tree, context.has_size_specs());

        trace!(
            component = %component.id(),
            kind = component.name(),
            ?strategy,
            "resolving component"
        );

        match strategy {
            ResolveStrategy::Eager { with_size_spec } => {
                let created = if with_size_spec {
                    let width_spec = context.width_spec().unwrap_or(SizeSpec::UNSPECIFIED);
                    let height_spec = context.height_spec().unwrap_or(SizeSpec::UNSPECIFIED);
                    lifecycle.on_create_layout_with_size_spec(context, width_spec, height_spec, component)
                } else {
                    lifecycle.on_create_layout(context, component)
                };

                // A created layout becomes the node; an empty one leaves the
                // blank node in place.
                if let Some(layout) = created {
                    self.pool.release(std::mem::replace(&mut node, layout));
                }
            }
            ResolveStrategy::MeasureMountSpec => node.set_measure_function(),
            ResolveStrategy::DeferNestedTree => {
                node.set_measure_function();
                node.mark_nested_tree_holder();
            }
        }

        node.append_component(component.clone());
        if let Some(style) = component.style() {
            node.set_style(style.clone());
        }
        if strategy == ResolveStrategy::DeferNestedTree {
            // The nested tree root applies the insets; the holder keeps the
            // outer box (size, margin, flex).
            let style = node.style_mut();
            style.padding = Rect::zero();
            style.border = Rect::zero();
        }

        if strategy.calls_prepare() {
            lifecycle.on_prepare(context, component);
        }

        node
    }
}

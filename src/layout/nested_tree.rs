//! Nested Tree Cache - Sub-trees resolved during measurement.
//!
//! A measurable layout spec defers its layout until the engine asks for its
//! size. At that point the holder's component is resolved with the engine's
//! specs, laid out on its own, and cached under the holder's [`NodeKey`].
//! When the outer pass commits, the holder asks again with its final exact
//! size; a compatible cached tree is moved into the holder instead of being
//! resolved a second time.

use std::collections::HashMap;

use taffy::Rect;
use tracing::{debug, trace};

use crate::config::SpecCompatibility;
use crate::engine::{ComponentContext, LayoutNode, NodeKey};
use crate::error::LayoutError;
use crate::types::{SizeSpec, SizeSpecMode};

use super::resolver::LifecycleResolver;
use super::taffy_bridge;

/// Tolerance when comparing an exact spec against a measured size.
const SIZE_DELTA: f32 = 0.5;

/// Resolves (and hands over) the nested tree of a holder node.
pub trait NestedTreeResolver {
    /// Nested tree of `holder` sized to the given specs.
    fn resolve_nested_tree(
        &mut self,
        context: &ComponentContext,
        holder: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> Result<&LayoutNode, LayoutError>;

    /// Move the nested tree for `holder`'s final size into `holder`.
    fn commit_nested_tree(
        &mut self,
        context: &ComponentContext,
        holder: &mut LayoutNode,
    ) -> Result<(), LayoutError>;
}

// =============================================================================
// Spec compatibility
// =============================================================================

/// Can a result measured under `old_spec` (yielding `old_measured`) stand in
/// for a measurement under `new_spec`?
pub fn is_spec_compatible(old_spec: SizeSpec, new_spec: SizeSpec, old_measured: f32) -> bool {
    use SizeSpecMode::{AtMost, Exactly, Unspecified};

    if old_spec == new_spec {
        return true;
    }
    match (old_spec.mode(), new_spec.mode()) {
        // The new exact size is what we measured anyway.
        (_, Exactly) => (new_spec.size() - old_measured).abs() < SIZE_DELTA,
        // Unbounded result still fits under the new bound.
        (Unspecified, AtMost) => new_spec.size() >= old_measured,
        // Tighter bound that the old result still satisfies.
        (AtMost, AtMost) => old_spec.size() > new_spec.size() && old_measured <= new_spec.size(),
        _ => false,
    }
}

// =============================================================================
// NestedTreeCache
// =============================================================================

struct CachedTree {
    width_spec: SizeSpec,
    height_spec: SizeSpec,
    tree: LayoutNode,
}

impl CachedTree {
    fn matches(&self, width_spec: SizeSpec, height_spec: SizeSpec, rule: SpecCompatibility) -> bool {
        match rule {
            SpecCompatibility::Exact => {
                self.width_spec == width_spec && self.height_spec == height_spec
            }
            SpecCompatibility::Compatible => {
                is_spec_compatible(self.width_spec, width_spec, self.tree.width())
                    && is_spec_compatible(self.height_spec, height_spec, self.tree.height())
            }
        }
    }
}

/// Cache of nested trees keyed by holder identity.
#[derive(Default)]
pub struct NestedTreeCache {
    entries: HashMap<NodeKey, CachedTree>,
    resolutions: usize,
}

impl NestedTreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, holder: NodeKey) -> bool {
        self.entries.contains_key(&holder)
    }

    /// Total full resolutions performed (cache misses).
    pub fn resolutions(&self) -> usize {
        self.resolutions
    }

    /// Release every cached tree back to the context's pool.
    pub fn clear(&mut self, context: &ComponentContext) {
        for (_, entry) in self.entries.drain() {
            context.pool().release(entry.tree);
        }
    }
}

impl NestedTreeResolver for NestedTreeCache {
    fn resolve_nested_tree(
        &mut self,
        context: &ComponentContext,
        holder: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> Result<&LayoutNode, LayoutError> {
        let key = holder.key();
        let rule = context.config().spec_compatibility;

        let hit = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.matches(width_spec, height_spec, rule));
        if hit {
            trace!(holder = %key, %width_spec, %height_spec, "nested tree cache hit");
            return Ok(&self.entries[&key].tree);
        }

        let component = holder
            .root_component()
            .ok_or(LayoutError::MissingComponent { node: key })?;

        debug!(
            holder = %key,
            kind = component.name(),
            %width_spec,
            %height_spec,
            "resolving nested tree"
        );

        let nested_context = context.with_size_specs(width_spec, height_spec);
        let mut tree = LifecycleResolver::new(context.pool().clone()).resolve(
            &nested_context,
            component,
            true,
        );
        // Margins belong to the holder's box in the outer tree.
        tree.style_mut().margin = Rect::zero();

        // Re-entrant: deeper holders in this tree go through the same cache.
        if let Err(err) =
            taffy_bridge::calculate(&mut tree, &nested_context, width_spec, height_spec, &mut *self)
        {
            context.pool().release(tree);
            return Err(err);
        }
        self.resolutions += 1;

        let entry = CachedTree {
            width_spec,
            height_spec,
            tree,
        };
        if let Some(stale) = self.entries.insert(key, entry) {
            context.pool().release(stale.tree);
        }
        Ok(&self.entries[&key].tree)
    }

    fn commit_nested_tree(
        &mut self,
        context: &ComponentContext,
        holder: &mut LayoutNode,
    ) -> Result<(), LayoutError> {
        let width_spec = SizeSpec::exactly(holder.width());
        let height_spec = SizeSpec::exactly(holder.height());
        self.resolve_nested_tree(context, holder, width_spec, height_spec)?;

        if let Some(entry) = self.entries.remove(&holder.key()) {
            if let Some(previous) = holder.take_nested_tree() {
                context.pool().release(previous);
            }
            holder.set_nested_tree(entry.tree);
        }
        Ok(())
    }
}

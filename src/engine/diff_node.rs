//! DiffNode - Measurement snapshot of the previous layout pass.
//!
//! After each pass the solved tree is condensed into a DiffNode tree. On the
//! next pass the snapshot is zipped onto the new tree; a node adopts its
//! counterpart only when their components are equivalent, and the measure
//! callback may then return the previous size without calling `on_measure`.

use std::sync::Arc;

use tracing::trace;

use crate::types::{MeasuredSize, SizeSpec};

use super::component::Component;
use super::layout_node::LayoutNode;

/// Previous-pass measurement of one node.
#[derive(Debug, Clone, Default)]
pub struct DiffNode {
    component: Option<Component>,
    last_width_spec: Option<SizeSpec>,
    last_height_spec: Option<SizeSpec>,
    last_measured_size: Option<MeasuredSize>,
    children: Vec<Arc<DiffNode>>,
}

impl DiffNode {
    /// Snapshot a solved tree.
    ///
    /// Nested trees are not recorded; a holder's nested tree is rebuilt from
    /// its specs.
    pub fn from_layout(node: &LayoutNode) -> Self {
        Self {
            component: node.root_component().cloned(),
            last_width_spec: node.last_width_spec(),
            last_height_spec: node.last_height_spec(),
            last_measured_size: node.last_measured_size(),
            children: node
                .children()
                .iter()
                .map(|child| Arc::new(Self::from_layout(child)))
                .collect(),
        }
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref()
    }

    pub fn children(&self) -> &[Arc<DiffNode>] {
        &self.children
    }

    pub fn last_width_spec(&self) -> Option<SizeSpec> {
        self.last_width_spec
    }

    pub fn last_height_spec(&self) -> Option<SizeSpec> {
        self.last_height_spec
    }

    /// Last measured width, or `-1.0` when the node was never measured.
    pub fn last_measured_width(&self) -> f32 {
        self.last_measured_size.map_or(-1.0, |size| size.width)
    }

    /// Last measured height, or `-1.0` when the node was never measured.
    pub fn last_measured_height(&self) -> f32 {
        self.last_measured_size.map_or(-1.0, |size| size.height)
    }

    /// The previous size, if it was measured under exactly these specs.
    pub fn reusable_size(&self, width_spec: SizeSpec, height_spec: SizeSpec) -> Option<MeasuredSize> {
        if self.last_width_spec != Some(width_spec) || self.last_height_spec != Some(height_spec) {
            return None;
        }
        self.last_measured_size
            .filter(|size| size.width >= 0.0 && size.height >= 0.0)
    }
}

/// Attach `diff` (and its descendants, position by position) to `node`.
///
/// A node only adopts a snapshot whose component is equivalent to its own
/// root component.
pub fn apply_diff(node: &mut LayoutNode, diff: &Arc<DiffNode>) {
    let equivalent = match (node.root_component(), diff.component()) {
        (Some(current), Some(previous)) => current.is_equivalent_to(previous),
        _ => false,
    };
    if equivalent {
        trace!(node = %node.key(), "adopting previous measurement");
        node.set_diff_node(diff.clone());
    }

    for (child, child_diff) in node.children_mut().iter_mut().zip(diff.children()) {
        apply_diff(child, child_diff);
    }
}

//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Mirrors a [`LayoutNode`] tree into a `TaffyTree`, runs flexbox layout with
//! our measure callback, and writes the solved boxes back into the nodes.
//!
//! # Pass
//!
//! ```text
//! LayoutNode tree ──mirror──▶ TaffyTree<NodeKey>
//!                                 │ compute_layout_with_measure
//!                                 ▼
//!                  MeasurementBridge (on_measure / nested trees)
//!                                 │
//! LayoutNode tree ◀──write back───┘ then commit nested trees
//! ```
//!
//! Measurable nodes become context-carrying leaves; their [`NodeKey`] is the
//! context Taffy hands back to the measure callback.

use std::collections::HashMap;

use taffy::{AvailableSpace, Dimension, NodeId, Size, Style, TaffyTree};
use tracing::{debug, warn};

use crate::engine::{ComponentContext, LayoutNode, NodeKey};
use crate::error::LayoutError;
use crate::types::{SizeSpec, SizeSpecMode};

use super::measure::{MeasureRecord, MeasurementBridge};
use super::nested_tree::NestedTreeResolver;

// =============================================================================
// TREE MIRRORING
// =============================================================================

/// Mirror `node` (and its subtree) into the Taffy tree.
fn build_node(tree: &mut TaffyTree<NodeKey>, node: &mut LayoutNode) -> Result<NodeId, LayoutError> {
    let id = if node.has_measure_function() {
        if node.child_count() > 0 {
            warn!(node = %node.key(), "measurable node has children; they are not laid out");
        }
        tree.new_leaf_with_context(node.style().clone(), node.key())?
    } else {
        let children = node
            .children_mut()
            .iter_mut()
            .map(|child| build_node(tree, child))
            .collect::<Result<Vec<_>, _>>()?;
        tree.new_with_children(node.style().clone(), &children)?
    };

    node.set_engine_node(id);
    Ok(id)
}

/// Collect every measurable node by key for the measure callback.
fn index_measurable<'a>(node: &'a LayoutNode, index: &mut HashMap<NodeKey, &'a LayoutNode>) {
    if node.has_measure_function() {
        index.insert(node.key(), node);
        return;
    }
    for child in node.children() {
        index_measurable(child, index);
    }
}

/// Apply the pass's root specs to the root style.
fn constrain_root(style: &mut Style, width_spec: SizeSpec, height_spec: SizeSpec) {
    match width_spec.mode() {
        SizeSpecMode::Exactly => style.size.width = Dimension::Length(width_spec.size()),
        SizeSpecMode::AtMost => style.max_size.width = Dimension::Length(width_spec.size()),
        SizeSpecMode::Unspecified => {}
    }
    match height_spec.mode() {
        SizeSpecMode::Exactly => style.size.height = Dimension::Length(height_spec.size()),
        SizeSpecMode::AtMost => style.max_size.height = Dimension::Length(height_spec.size()),
        SizeSpecMode::Unspecified => {}
    }
}

// =============================================================================
// RESULT EXTRACTION
// =============================================================================

fn write_back(
    tree: &TaffyTree<NodeKey>,
    node: &mut LayoutNode,
    records: &HashMap<NodeKey, MeasureRecord>,
) -> Result<(), LayoutError> {
    if let Some(id) = node.engine_node() {
        let layout = tree.layout(id)?;
        node.set_layout(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        );
    }
    if let Some(record) = records.get(&node.key()) {
        node.record_measurement(record.width_spec, record.height_spec, record.size);
    }

    for child in node.children_mut() {
        write_back(tree, child, records)?;
    }
    Ok(())
}

fn commit_holders<R: NestedTreeResolver + ?Sized>(
    node: &mut LayoutNode,
    context: &ComponentContext,
    nested: &mut R,
) -> Result<(), LayoutError> {
    if node.is_nested_tree_holder() {
        nested.commit_nested_tree(context, node)?;
    }
    for child in node.children_mut() {
        commit_holders(child, context, nested)?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `root` under the given specs.
///
/// On success every node carries its solved box (relative to its parent),
/// measured nodes carry their last specs and size, and nested tree holders
/// own their committed nested tree. The first measurement error aborts the
/// pass.
pub fn calculate<R: NestedTreeResolver + ?Sized>(
    root: &mut LayoutNode,
    context: &ComponentContext,
    width_spec: SizeSpec,
    height_spec: SizeSpec,
    nested: &mut R,
) -> Result<(), LayoutError> {
    debug!(root = %root.key(), %width_spec, %height_spec, "layout pass start");

    let mut tree: TaffyTree<NodeKey> = TaffyTree::new();
    if !context.config().round_layout {
        tree.disable_rounding();
    }

    let root_id = build_node(&mut tree, root)?;
    let mut root_style = root.style().clone();
    constrain_root(&mut root_style, width_spec, height_spec);
    tree.set_style(root_id, root_style)?;

    let available = Size {
        width: width_spec.to_available_space(),
        height: height_spec.to_available_space(),
    };

    let records = {
        let mut index = HashMap::new();
        index_measurable(root, &mut index);

        let mut bridge = MeasurementBridge::new(context, &mut *nested);
        let mut failure: Option<LayoutError> = None;

        let result = tree.compute_layout_with_measure(
            root_id,
            available,
            |known_dimensions: Size<Option<f32>>,
             available_space: Size<AvailableSpace>,
             _node_id: NodeId,
             node_context: Option<&mut NodeKey>,
             _style: &Style| {
                if failure.is_some() {
                    return Size::ZERO;
                }
                let Some(node) = node_context.and_then(|key| index.get(&*key).copied()) else {
                    return Size::ZERO;
                };

                let width_spec = SizeSpec::from_engine(known_dimensions.width, available_space.width);
                let height_spec =
                    SizeSpec::from_engine(known_dimensions.height, available_space.height);

                match bridge.measure(node, width_spec, height_spec) {
                    Ok(size) => size.into(),
                    Err(err) => {
                        failure = Some(err);
                        Size::ZERO
                    }
                }
            },
        );

        if let Some(err) = failure {
            return Err(err);
        }
        result?;
        bridge.into_records()
    };

    write_back(&tree, root, &records)?;
    commit_holders(root, context, nested)?;

    debug!(
        root = %root.key(),
        width = root.width(),
        height = root.height(),
        measured = records.len(),
        "layout pass end"
    );
    Ok(())
}

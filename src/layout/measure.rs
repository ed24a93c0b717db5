//! MeasurementBridge - The measure callback seen by the layout engine.
//!
//! Taffy calls back into the bridge whenever it needs the size of a node that
//! registered a measure function. The bridge looks up the node's component
//! and answers according to its kind:
//!
//! - mount spec: `on_measure`, or the previous pass's size when the diff
//!   node recorded the same specs
//! - layout spec: the size of the nested tree resolved for these specs
//!
//! Every answer is recorded so the engine pass can write it back onto the
//! node afterwards.

use std::collections::HashMap;

use tracing::trace;

use crate::engine::{ComponentContext, LayoutNode, NodeKey};
use crate::error::LayoutError;
use crate::types::{MeasureOutput, MeasuredSize, SizeSpec};

use super::nested_tree::NestedTreeResolver;

/// One recorded measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRecord {
    pub width_spec: SizeSpec,
    pub height_spec: SizeSpec,
    pub size: MeasuredSize,
}

/// Measure callback for one engine pass.
pub struct MeasurementBridge<'a, R: NestedTreeResolver + ?Sized> {
    context: &'a ComponentContext,
    nested: &'a mut R,
    records: HashMap<NodeKey, MeasureRecord>,
}

impl<'a, R: NestedTreeResolver + ?Sized> MeasurementBridge<'a, R> {
    pub fn new(context: &'a ComponentContext, nested: &'a mut R) -> Self {
        Self {
            context,
            nested,
            records: HashMap::new(),
        }
    }

    /// Measure `node` under the given specs.
    pub fn measure(
        &mut self,
        node: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> Result<MeasuredSize, LayoutError> {
        let component = node
            .root_component()
            .ok_or(LayoutError::MissingComponent { node: node.key() })?;
        let lifecycle = component.lifecycle();

        if !lifecycle.can_measure() {
            return Err(LayoutError::NotMeasurable {
                component: lifecycle.name(),
            });
        }

        let size = if lifecycle.mount_type().is_mount_spec() {
            let reused = if self.context.config().reuse_measurements {
                node.diff_node()
                    .and_then(|diff| diff.reusable_size(width_spec, height_spec))
            } else {
                None
            };

            match reused {
                Some(size) => {
                    trace!(node = %node.key(), %width_spec, %height_spec, "reusing diff measurement");
                    size
                }
                None => {
                    let mut output = MeasureOutput::default();
                    lifecycle.on_measure(
                        self.context,
                        node,
                        width_spec,
                        height_spec,
                        &mut output,
                        component,
                    )?;
                    output.size().ok_or(LayoutError::MeasureOutputNotSet {
                        component: lifecycle.name(),
                    })?
                }
            }
        } else {
            let tree = self
                .nested
                .resolve_nested_tree(self.context, node, width_spec, height_spec)?;
            MeasuredSize::new(tree.width(), tree.height())
        };

        self.records.insert(
            node.key(),
            MeasureRecord {
                width_spec,
                height_spec,
                size,
            },
        );
        Ok(size)
    }

    /// Last measurement recorded for a node.
    pub fn record(&self, node: NodeKey) -> Option<&MeasureRecord> {
        self.records.get(&node)
    }

    /// Hand over every recorded measurement.
    pub fn into_records(self) -> HashMap<NodeKey, MeasureRecord> {
        self.records
    }
}

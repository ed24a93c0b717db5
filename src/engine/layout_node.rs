//! LayoutNode - Mutable intermediate layout tree node.
//!
//! A node owns its children (and, for nested-tree holders, the committed
//! nested tree). It remembers which Taffy node it was mirrored to, the specs
//! and size of its last measurement, and the previous pass's [`DiffNode`].
//!
//! Nodes come from a [`NodePool`](super::NodePool); each acquire hands out a
//! fresh [`NodeKey`], which is the identity the nested tree cache keys on.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use taffy::{NodeId, Style};

use crate::layout::{ComputedLayout, LayoutBox};
use crate::types::{MeasuredSize, SizeSpec};

use super::component::Component;
use super::diff_node::DiffNode;

// =============================================================================
// Identity
// =============================================================================

static NEXT_NODE_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one acquired layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_KEY.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

bitflags! {
    /// Per-node resolution flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// The engine must call the measure callback for this node.
        const HAS_MEASURE_FUNCTION = 1 << 0;
        /// Layout deferred to a nested tree sized during measurement.
        const NESTED_TREE_HOLDER = 1 << 1;
    }
}

// =============================================================================
// LayoutNode
// =============================================================================

/// One node of the intermediate layout tree.
#[derive(Debug)]
pub struct LayoutNode {
    key: NodeKey,
    flags: NodeFlags,
    style: Style,
    components: Vec<Component>,
    children: Vec<LayoutNode>,
    nested_tree: Option<Box<LayoutNode>>,
    engine_node: Option<NodeId>,
    diff_node: Option<Arc<DiffNode>>,
    last_width_spec: Option<SizeSpec>,
    last_height_spec: Option<SizeSpec>,
    last_measured_size: Option<MeasuredSize>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl LayoutNode {
    pub(crate) fn new(key: NodeKey) -> Self {
        Self {
            key,
            flags: NodeFlags::empty(),
            style: Style::default(),
            components: Vec::new(),
            children: Vec::new(),
            nested_tree: None,
            engine_node: None,
            diff_node: None,
            last_width_spec: None,
            last_height_spec: None,
            last_measured_size: None,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Wipe all state and take on a new identity.
    ///
    /// Children and the nested tree must already have been taken.
    pub(crate) fn reset(&mut self, key: NodeKey) {
        debug_assert!(self.children.is_empty() && self.nested_tree.is_none());
        *self = Self::new(key);
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    pub fn append_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Components in append order (innermost first).
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The first component appended: the one that owns this node's measure
    /// function, if it has one.
    pub fn root_component(&self) -> Option<&Component> {
        self.components.first()
    }

    /// The last component appended (outermost wrapper).
    pub fn tail_component(&self) -> Option<&Component> {
        self.components.last()
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    pub fn add_child(&mut self, child: LayoutNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [LayoutNode] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn take_children(&mut self) -> Vec<LayoutNode> {
        std::mem::take(&mut self.children)
    }

    // -------------------------------------------------------------------------
    // Measurement
    // -------------------------------------------------------------------------

    /// Register the measure callback for this node.
    pub fn set_measure_function(&mut self) {
        self.flags.insert(NodeFlags::HAS_MEASURE_FUNCTION);
    }

    pub fn has_measure_function(&self) -> bool {
        self.flags.contains(NodeFlags::HAS_MEASURE_FUNCTION)
    }

    pub(crate) fn mark_nested_tree_holder(&mut self) {
        self.flags.insert(NodeFlags::NESTED_TREE_HOLDER);
    }

    pub fn is_nested_tree_holder(&self) -> bool {
        self.flags.contains(NodeFlags::NESTED_TREE_HOLDER)
    }

    pub fn last_width_spec(&self) -> Option<SizeSpec> {
        self.last_width_spec
    }

    pub fn last_height_spec(&self) -> Option<SizeSpec> {
        self.last_height_spec
    }

    pub fn last_measured_size(&self) -> Option<MeasuredSize> {
        self.last_measured_size
    }

    pub(crate) fn record_measurement(
        &mut self,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
        size: MeasuredSize,
    ) {
        self.last_width_spec = Some(width_spec);
        self.last_height_spec = Some(height_spec);
        self.last_measured_size = Some(size);
    }

    pub fn diff_node(&self) -> Option<&Arc<DiffNode>> {
        self.diff_node.as_ref()
    }

    pub fn set_diff_node(&mut self, diff_node: Arc<DiffNode>) {
        self.diff_node = Some(diff_node);
    }

    // -------------------------------------------------------------------------
    // Engine relation
    // -------------------------------------------------------------------------

    /// The Taffy node this node was mirrored to in the last engine pass.
    pub fn engine_node(&self) -> Option<NodeId> {
        self.engine_node
    }

    pub(crate) fn set_engine_node(&mut self, engine_node: NodeId) {
        self.engine_node = Some(engine_node);
    }

    // -------------------------------------------------------------------------
    // Nested tree
    // -------------------------------------------------------------------------

    /// The nested tree committed to this holder after the engine pass.
    pub fn nested_tree(&self) -> Option<&LayoutNode> {
        self.nested_tree.as_deref()
    }

    pub fn set_nested_tree(&mut self, tree: LayoutNode) {
        self.nested_tree = Some(Box::new(tree));
    }

    pub fn take_nested_tree(&mut self) -> Option<LayoutNode> {
        self.nested_tree.take().map(|tree| *tree)
    }

    // -------------------------------------------------------------------------
    // Solved layout
    // -------------------------------------------------------------------------

    /// Store a solved layout (position relative to the parent).
    ///
    /// Written by the engine pass; custom nested tree resolvers may call it
    /// on trees they build themselves.
    pub fn set_layout(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Flatten the solved tree into absolute boxes, depth first.
    pub fn computed_layout(&self) -> ComputedLayout {
        let mut layout = ComputedLayout::default();
        self.collect_boxes(0.0, 0.0, 0, &mut layout.boxes);
        layout
    }

    fn collect_boxes(&self, origin_x: f32, origin_y: f32, depth: usize, out: &mut Vec<LayoutBox>) {
        let x = origin_x + self.x;
        let y = origin_y + self.y;
        out.push(LayoutBox {
            node: self.key,
            component: self.tail_component().map(Component::id),
            name: self.tail_component().map(Component::name),
            x,
            y,
            width: self.width,
            height: self.height,
            depth,
        });

        // A committed nested tree is laid out inside the holder's box.
        if let Some(nested) = &self.nested_tree {
            nested.collect_boxes(x, y, depth + 1, out);
        }
        for child in &self.children {
            child.collect_boxes(x, y, depth + 1, out);
        }
    }
}

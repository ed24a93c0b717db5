//! Responsive Primitive - Layout chosen from the width it is given.
//!
//! A measurable layout spec. Inside a parent it cannot build its children
//! until the engine knows how wide it may be, so it becomes a nested tree
//! holder: the measure callback resolves it with the engine's specs and the
//! committed tree lands in the holder after the pass.
//!
//! At or above the `breakpoint` prop the children sit in a row; below it,
//! or with no width bound at all, they stack in a column.

use std::sync::{Arc, OnceLock};

use taffy::FlexDirection;
use tracing::trace;

use crate::engine::{Component, ComponentContext, LayoutNode, Lifecycle};
use crate::types::{SizeSpec, SizeSpecMode};

pub const BREAKPOINT_PROP: &str = "breakpoint";

pub struct Responsive;

impl Responsive {
    /// Direction for a width spec given the breakpoint.
    pub fn direction_for(width_spec: SizeSpec, breakpoint: f32) -> FlexDirection {
        match width_spec.mode() {
            SizeSpecMode::Unspecified => FlexDirection::Column,
            _ if width_spec.size() >= breakpoint => FlexDirection::Row,
            _ => FlexDirection::Column,
        }
    }
}

impl Lifecycle for Responsive {
    fn name(&self) -> &'static str {
        "Responsive"
    }

    fn can_measure(&self) -> bool {
        true
    }

    fn on_create_layout_with_size_spec(
        &self,
        context: &ComponentContext,
        width_spec: SizeSpec,
        _height_spec: SizeSpec,
        component: &Component,
    ) -> Option<LayoutNode> {
        let breakpoint = component.float_prop(BREAKPOINT_PROP).unwrap_or(0.0);
        let direction = Self::direction_for(width_spec, breakpoint);
        trace!(%width_spec, breakpoint, ?direction, "responsive layout");

        let mut node = context.new_node();
        node.style_mut().flex_direction = direction;
        for child in component.children() {
            node.add_child(context.resolve_child(child));
        }
        Some(node)
    }
}

fn lifecycle() -> Arc<dyn Lifecycle> {
    static RESPONSIVE: OnceLock<Arc<dyn Lifecycle>> = OnceLock::new();
    RESPONSIVE.get_or_init(|| Arc::new(Responsive)).clone()
}

/// Row at or above `breakpoint` cells of width, column below.
///
/// The component carries no style: a style would replace the direction
/// chosen for the nested tree's root.
pub fn responsive(breakpoint: f32, children: impl IntoIterator<Item = Component>) -> Component {
    Component::builder(lifecycle())
        .prop(BREAKPOINT_PROP, breakpoint)
        .children(children)
        .build()
}

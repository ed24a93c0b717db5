//! Flex Box Primitives - Column and Row containers.
//!
//! Plain layout specs: they cannot be measured, so the resolver creates their
//! layout eagerly. Each child component is resolved through the context.

use std::sync::{Arc, OnceLock};

use taffy::{FlexDirection, Style};

use crate::engine::{Component, ComponentContext, LayoutNode, Lifecycle};

/// Container laying its children out along one axis.
pub struct FlexBox {
    direction: FlexDirection,
}

impl FlexBox {
    pub const fn new(direction: FlexDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> FlexDirection {
        self.direction
    }
}

impl Lifecycle for FlexBox {
    fn name(&self) -> &'static str {
        match self.direction {
            FlexDirection::Row | FlexDirection::RowReverse => "Row",
            FlexDirection::Column | FlexDirection::ColumnReverse => "Column",
        }
    }

    fn on_create_layout(&self, context: &ComponentContext, component: &Component) -> Option<LayoutNode> {
        let mut node = context.new_node();
        node.style_mut().flex_direction = self.direction;
        for child in component.children() {
            node.add_child(context.resolve_child(child));
        }
        Some(node)
    }
}

fn column_lifecycle() -> Arc<dyn Lifecycle> {
    static COLUMN: OnceLock<Arc<dyn Lifecycle>> = OnceLock::new();
    COLUMN
        .get_or_init(|| Arc::new(FlexBox::new(FlexDirection::Column)))
        .clone()
}

fn row_lifecycle() -> Arc<dyn Lifecycle> {
    static ROW: OnceLock<Arc<dyn Lifecycle>> = OnceLock::new();
    ROW.get_or_init(|| Arc::new(FlexBox::new(FlexDirection::Row)))
        .clone()
}

/// A component's style replaces the node style wholesale, so the direction
/// is baked into it.
fn build(
    lifecycle: Arc<dyn Lifecycle>,
    direction: FlexDirection,
    mut style: Style,
    children: impl IntoIterator<Item = Component>,
) -> Component {
    style.flex_direction = direction;
    Component::builder(lifecycle)
        .style(style)
        .children(children)
        .build()
}

/// Vertical container.
pub fn column(children: impl IntoIterator<Item = Component>) -> Component {
    column_with_style(Style::default(), children)
}

pub fn column_with_style(style: Style, children: impl IntoIterator<Item = Component>) -> Component {
    build(column_lifecycle(), FlexDirection::Column, style, children)
}

/// Horizontal container.
pub fn row(children: impl IntoIterator<Item = Component>) -> Component {
    row_with_style(Style::default(), children)
}

pub fn row_with_style(style: Style, children: impl IntoIterator<Item = Component>) -> Component {
    build(row_lifecycle(), FlexDirection::Row, style, children)
}

//! Layout output types.

use crate::engine::{ComponentId, NodeKey};

/// Solved box of one layout node, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub node: NodeKey,
    /// Outermost component on the node, if any.
    pub component: Option<ComponentId>,
    pub name: Option<&'static str>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the flattened root (nested trees count one level).
    pub depth: usize,
}

impl LayoutBox {
    /// Does the point fall inside this box?
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Flattened result of a layout pass, depth first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub boxes: Vec<LayoutBox>,
}

impl ComputedLayout {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes whose outermost component has the given name.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a LayoutBox> + 'a {
        self.boxes.iter().filter(move |b| b.name == Some(name))
    }

    pub fn get(&self, node: NodeKey) -> Option<&LayoutBox> {
        self.boxes.iter().find(|b| b.node == node)
    }

    /// Width and height of the root box.
    pub fn content_size(&self) -> (f32, f32) {
        self.boxes.first().map_or((0.0, 0.0), |b| (b.width, b.height))
    }
}

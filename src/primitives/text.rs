//! Text Primitive - Measured text leaf.
//!
//! A mount spec: the engine asks it for its size through `on_measure`. Width
//! is counted in terminal cells with `unicode-width`; lines wrap at the
//! available width.
//!
//! # Example
//!
//! ```ignore
//! use spark_lifecycle::primitives::{column, text};
//!
//! let root = column([text("Hello, World!"), text("second line")]);
//! ```

use std::sync::{Arc, OnceLock};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::engine::{Component, ComponentContext, LayoutNode, Lifecycle};
use crate::error::LayoutError;
use crate::types::{MeasureOutput, MountType, SizeSpec, SizeSpecMode};

/// Prop holding the text content.
pub const TEXT_PROP: &str = "text";

// =============================================================================
// Measurement
// =============================================================================

/// Display width of a string in terminal cells.
///
/// Multi-line strings report their widest line.
pub fn string_width(s: &str) -> usize {
    s.split('\n').map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Number of lines `text` occupies when wrapped at `available_width` cells.
///
/// 0 for empty text, at least 1 otherwise.
pub fn measure_text_height(text: &str, available_width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    if available_width == 0 {
        return 1;
    }

    let mut lines = 0usize;
    let mut current = 0usize;

    for c in text.chars() {
        if c == '\n' {
            lines = lines.saturating_add(1);
            current = 0;
            continue;
        }

        let width = c.width().unwrap_or(0);
        if current > 0 && current.saturating_add(width) > available_width {
            lines = lines.saturating_add(1);
            current = width;
        } else {
            current = current.saturating_add(width);
        }
    }

    // Trailing line
    if current > 0 || lines == 0 {
        lines = lines.saturating_add(1);
    }
    lines
}

// =============================================================================
// Lifecycle
// =============================================================================

pub struct Text;

impl Lifecycle for Text {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn can_measure(&self) -> bool {
        true
    }

    fn mount_type(&self) -> MountType {
        MountType::Drawable
    }

    fn on_measure(
        &self,
        _context: &ComponentContext,
        _layout: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
        size: &mut MeasureOutput,
        component: &Component,
    ) -> Result<(), LayoutError> {
        let content = component.text_prop(TEXT_PROP).unwrap_or_default();
        let natural = string_width(content);

        let width = width_spec.resolve_size(natural as f32);
        let wrap_at = match width_spec.mode() {
            SizeSpecMode::Unspecified => natural,
            _ => width.max(0.0).floor() as usize,
        };
        let height = height_spec.resolve_size(measure_text_height(content, wrap_at) as f32);

        size.set(width, height);
        Ok(())
    }
}

fn lifecycle() -> Arc<dyn Lifecycle> {
    static TEXT: OnceLock<Arc<dyn Lifecycle>> = OnceLock::new();
    TEXT.get_or_init(|| Arc::new(Text)).clone()
}

/// Create a text component.
pub fn text(content: impl Into<String>) -> Component {
    Component::builder(lifecycle())
        .prop(TEXT_PROP, content.into())
        .build()
}

/// Create a text component with an explicit flex style.
pub fn text_with_style(content: impl Into<String>, style: taffy::Style) -> Component {
    Component::builder(lifecycle())
        .prop(TEXT_PROP, content.into())
        .style(style)
        .build()
}

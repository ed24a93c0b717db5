//! Lifecycle - The behavior shared by every component of one kind.
//!
//! One `Lifecycle` instance serves many [`Component`]s. The resolver reads
//! `can_measure()` and `mount_type()` to pick a strategy and then calls the
//! `on_*` hooks; the measure callback calls `on_measure()`.

use crate::error::LayoutError;
use crate::types::{MeasureOutput, MountType, SizeSpec};

use super::component::Component;
use super::context::ComponentContext;
use super::layout_node::LayoutNode;

/// Flat capability contract implemented by each component kind.
///
/// Every hook has a default, so a kind only overrides what it uses:
///
/// - layout specs override `on_create_layout` (or the size-spec variant)
/// - mount specs override `mount_type`, `can_measure` and `on_measure`
pub trait Lifecycle: Send + Sync + 'static {
    /// Name used in logs and error messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether this kind supplies its own size through measurement.
    fn can_measure(&self) -> bool {
        false
    }

    fn mount_type(&self) -> MountType {
        MountType::None
    }

    /// Build the child layout. `None` means "nothing to append".
    fn on_create_layout(
        &self,
        _context: &ComponentContext,
        _component: &Component,
    ) -> Option<LayoutNode> {
        None
    }

    /// Build the child layout knowing the parent's constraints.
    fn on_create_layout_with_size_spec(
        &self,
        context: &ComponentContext,
        _width_spec: SizeSpec,
        _height_spec: SizeSpec,
        component: &Component,
    ) -> Option<LayoutNode> {
        self.on_create_layout(context, component)
    }

    /// Called once after a component's layout was created eagerly.
    fn on_prepare(&self, _context: &ComponentContext, _component: &Component) {}

    /// Measure a mount spec. Implementations must write both sides of `size`.
    fn on_measure(
        &self,
        _context: &ComponentContext,
        _layout: &LayoutNode,
        _width_spec: SizeSpec,
        _height_spec: SizeSpec,
        _size: &mut MeasureOutput,
        _component: &Component,
    ) -> Result<(), LayoutError> {
        Err(LayoutError::MeasureNotImplemented {
            component: self.name(),
        })
    }
}

//! Layout errors.
//!
//! Every variant except `Engine` is a broken component contract. They abort
//! the current layout pass and are never retried.

use thiserror::Error;

use crate::engine::NodeKey;

/// Errors raised while resolving or measuring a component tree.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A measure function fired for a component that declares itself
    /// non-measurable.
    #[error("measure function attached to `{component}`, but its can_measure() returns false")]
    NotMeasurable { component: &'static str },

    /// `can_measure()` returned true but `on_measure()` kept the default body.
    #[error("`{component}` must override on_measure() when can_measure() returns true")]
    MeasureNotImplemented { component: &'static str },

    /// A mount spec returned from `on_measure()` without writing both sides.
    #[error("MeasureOutput not set: `{component}` must set a width and a height in on_measure()")]
    MeasureOutputNotSet { component: &'static str },

    /// A measurable node had no component appended to it.
    #[error("layout node {node} has a measure function but no component")]
    MissingComponent { node: NodeKey },

    /// The flex-box engine rejected an operation.
    #[error("layout engine error: {0}")]
    Engine(#[from] taffy::TaffyError),
}

impl LayoutError {
    /// True for the contract violations a component author can cause.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, LayoutError::Engine(_))
    }
}

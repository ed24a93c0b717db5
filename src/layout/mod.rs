//! Layout Module - Component resolution and flexbox layout.
//!
//! # Architecture
//!
//! ```text
//! Component ──LifecycleResolver──▶ LayoutNode tree
//!                                      │
//!                         taffy_bridge::calculate
//!                                      │ measure callback
//!                                      ▼
//!                              MeasurementBridge
//!                            ┌─────────┴─────────┐
//!                      mount spec           layout spec
//!                     on_measure()       NestedTreeCache
//!                                      (re-enters calculate)
//! ```
//!
//! [`LayoutState`] drives whole passes: it resolves the root, applies the
//! previous pass's diff, runs the engine and snapshots the result.
//!
//! # Example
//!
//! ```ignore
//! use spark_lifecycle::layout::LayoutState;
//! use spark_lifecycle::primitives::{column, text};
//! use spark_lifecycle::SizeSpec;
//!
//! let mut state = LayoutState::default();
//! let root = column([text("hello"), text("world")]);
//! let tree = state.calculate(&root, SizeSpec::exactly(80.0), SizeSpec::exactly(24.0))?;
//! let layout = tree.computed_layout();
//! ```

mod layout_state;
mod measure;
mod nested_tree;
mod resolver;
mod taffy_bridge;
mod types;

pub use layout_state::LayoutState;
pub use measure::{MeasureRecord, MeasurementBridge};
pub use nested_tree::{NestedTreeCache, NestedTreeResolver, is_spec_compatible};
pub use resolver::{LifecycleResolver, ResolveStrategy};
pub use taffy_bridge::calculate;
pub use types::*;

//! # spark-lifecycle
//!
//! Component lifecycle and layout resolution on top of Taffy.
//!
//! ## Architecture
//!
//! Components are immutable descriptions whose behavior lives in a shared
//! [`Lifecycle`]. A layout pass turns a component tree into a mutable
//! [`LayoutNode`] tree and hands it to Taffy:
//!
//! ```text
//! Component tree → LifecycleResolver → LayoutNode tree → taffy → solved boxes
//!                                           ▲                │
//!                                           └─ measure ──────┘
//!                                  (on_measure / nested trees)
//! ```
//!
//! Each component is resolved one of three ways:
//! - eager: its layout is created on the spot (`can_measure() == false`)
//! - mount spec: a leaf measured through `on_measure`
//! - nested tree: a measurable layout spec whose tree is built once the
//!   engine knows its size specs
//!
//! ## Modules
//!
//! - [`types`] - Size specs, mount types, measure output
//! - [`engine`] - Components, lifecycles, layout nodes, diff nodes, node pool
//! - [`layout`] - Resolver, measurement bridge, nested tree cache, taffy pass
//! - [`primitives`] - Column, Row, Text, Responsive
//! - [`config`] - Layout settings
//! - [`error`] - `LayoutError`

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod types;

pub use types::*;

pub use config::{LayoutConfig, SpecCompatibility};
pub use error::LayoutError;

pub use engine::{
    Component, ComponentBuilder, ComponentContext, ComponentId, ComponentsPool, DiffNode,
    LayoutNode, Lifecycle, NodeFlags, NodeKey, NodePool, PropValue, Props, apply_diff,
};

pub use layout::{
    ComputedLayout, LayoutBox, LayoutState, LifecycleResolver, MeasurementBridge,
    NestedTreeCache, NestedTreeResolver, ResolveStrategy, is_spec_compatible,
};

pub use primitives::{column, responsive, row, text};

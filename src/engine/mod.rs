//! Engine - Components, lifecycles and the layout node tree.
//!
//! The engine holds the data the resolver works on:
//! - Component: identity-bearing, immutable description of a UI unit
//! - Lifecycle: behavior shared by every component of one kind
//! - ComponentContext: pool, config and nested-tree size specs
//! - LayoutNode: intermediate tree node with a measurement cache
//! - DiffNode: previous pass's measurement snapshot
//! - NodePool: thread-safe acquire/release of layout nodes
//!
//! # Ownership
//!
//! ```text
//! Component ──Arc──▶ Lifecycle (shared by all components of a kind)
//! LayoutNode ─owns─▶ children, nested tree
//!            ─ref──▶ Taffy NodeId (owned by the engine's tree)
//!            ─Arc──▶ DiffNode (previous pass)
//! ```

mod component;
mod context;
mod diff_node;
mod layout_node;
mod lifecycle;
mod node_pool;

pub use component::*;
pub use context::*;
pub use diff_node::*;
pub use layout_node::*;
pub use lifecycle::*;
pub use node_pool::*;

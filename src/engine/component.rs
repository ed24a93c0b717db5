//! Component - Immutable, identity-bearing description of a UI unit.
//!
//! A component pairs a shared [`Lifecycle`] with its own props, an optional
//! node style and, for containers, child components. Components are cheap to
//! clone: clones share identity.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use taffy::Style;

use super::lifecycle::Lifecycle;

// =============================================================================
// Identity
// =============================================================================

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique component identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

// =============================================================================
// Props
// =============================================================================

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Text(String),
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

/// Named props of a component.
pub type Props = BTreeMap<String, PropValue>;

// =============================================================================
// Component
// =============================================================================

struct ComponentInner {
    id: ComponentId,
    lifecycle: Arc<dyn Lifecycle>,
    props: Props,
    style: Option<Style>,
    children: Vec<Component>,
}

/// Handle to an immutable component.
#[derive(Clone)]
pub struct Component {
    inner: Arc<ComponentInner>,
}

impl Component {
    /// Start building a component of the given kind.
    pub fn builder(lifecycle: Arc<dyn Lifecycle>) -> ComponentBuilder {
        ComponentBuilder {
            lifecycle,
            props: Props::new(),
            style: None,
            children: Vec::new(),
        }
    }

    /// Shorthand for a component with no props, style or children.
    pub fn new(lifecycle: Arc<dyn Lifecycle>) -> Self {
        Self::builder(lifecycle).build()
    }

    pub fn id(&self) -> ComponentId {
        self.inner.id
    }

    pub fn lifecycle(&self) -> &Arc<dyn Lifecycle> {
        &self.inner.lifecycle
    }

    pub fn name(&self) -> &'static str {
        self.inner.lifecycle.name()
    }

    pub fn props(&self) -> &Props {
        &self.inner.props
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.inner.props.get(name)
    }

    pub fn text_prop(&self, name: &str) -> Option<&str> {
        match self.prop(name)? {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric prop as `f32`; ints are widened.
    pub fn float_prop(&self, name: &str) -> Option<f32> {
        match self.prop(name)? {
            PropValue::Float(value) => Some(*value),
            PropValue::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        self.inner.style.as_ref()
    }

    pub fn children(&self) -> &[Component] {
        &self.inner.children
    }

    /// Same kind, same props, same style and equivalent children.
    ///
    /// Identity implies equivalence; the converse does not hold.
    pub fn is_equivalent_to(&self, other: &Component) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        std::ptr::addr_eq(
            Arc::as_ptr(&self.inner.lifecycle),
            Arc::as_ptr(&other.inner.lifecycle),
        ) && self.inner.props == other.inner.props
            && self.inner.style == other.inner.style
            && self.inner.children.len() == other.inner.children.len()
            && self
                .inner
                .children
                .iter()
                .zip(&other.inner.children)
                .all(|(a, b)| a.is_equivalent_to(b))
    }
}

/// Identity equality.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("kind", &self.name())
            .field("props", &self.inner.props)
            .field("children", &self.inner.children.len())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder returned by [`Component::builder`].
pub struct ComponentBuilder {
    lifecycle: Arc<dyn Lifecycle>,
    props: Props,
    style: Option<Style>,
    children: Vec<Component>,
}

impl ComponentBuilder {
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Style applied to the node this component resolves to.
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Component {
        Component {
            inner: Arc::new(ComponentInner {
                id: ComponentId::next(),
                lifecycle: self.lifecycle,
                props: self.props,
                style: self.style,
                children: self.children,
            }),
        }
    }
}

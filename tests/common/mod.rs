//! Shared fakes for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use spark_lifecycle::{
    Component, ComponentContext, ComponentsPool, LayoutError, LayoutNode, Lifecycle, MeasureOutput,
    MountType, NestedTreeResolver, NodePool, SizeSpec,
};

/// One recorded lifecycle hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateLayout,
    CreateLayoutWithSizeSpec(SizeSpec, SizeSpec),
    Prepare,
    Measure(SizeSpec, SizeSpec),
}

/// Lifecycle that records every hook it receives.
pub struct Spy {
    can_measure: bool,
    mount_type: MountType,
    null_layout: bool,
    /// Size written by `on_measure`; `None` leaves the output untouched.
    measured: Option<(f32, f32)>,
    calls: Mutex<Vec<Call>>,
}

impl Spy {
    pub fn new(mount_spec: bool, can_measure: bool) -> Self {
        Self {
            can_measure,
            mount_type: if mount_spec {
                MountType::Drawable
            } else {
                MountType::None
            },
            null_layout: false,
            measured: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `on_create_layout*` returns nothing.
    pub fn with_null_layout(mut self) -> Self {
        self.null_layout = true;
        self
    }

    pub fn with_measured(mut self, width: f32, height: f32) -> Self {
        self.measured = Some((width, height));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| call(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn layout(&self, context: &ComponentContext) -> Option<LayoutNode> {
        (!self.null_layout).then(|| context.new_node())
    }
}

impl Lifecycle for Spy {
    fn name(&self) -> &'static str {
        "Spy"
    }

    fn can_measure(&self) -> bool {
        self.can_measure
    }

    fn mount_type(&self) -> MountType {
        self.mount_type
    }

    fn on_create_layout(&self, context: &ComponentContext, _component: &Component) -> Option<LayoutNode> {
        self.record(Call::CreateLayout);
        self.layout(context)
    }

    fn on_create_layout_with_size_spec(
        &self,
        context: &ComponentContext,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
        _component: &Component,
    ) -> Option<LayoutNode> {
        self.record(Call::CreateLayoutWithSizeSpec(width_spec, height_spec));
        self.layout(context)
    }

    fn on_prepare(&self, _context: &ComponentContext, _component: &Component) {
        self.record(Call::Prepare);
    }

    fn on_measure(
        &self,
        _context: &ComponentContext,
        _layout: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
        size: &mut MeasureOutput,
        _component: &Component,
    ) -> Result<(), LayoutError> {
        self.record(Call::Measure(width_spec, height_spec));
        if let Some((width, height)) = self.measured {
            size.width = Some(width);
            size.height = Some(height);
        }
        Ok(())
    }
}

/// Measurable mount spec that never overrides `on_measure`.
pub struct Unmeasured;

impl Lifecycle for Unmeasured {
    fn can_measure(&self) -> bool {
        true
    }

    fn mount_type(&self) -> MountType {
        MountType::Drawable
    }
}

/// Pool wrapper counting traffic.
pub struct CountingPool {
    inner: ComponentsPool,
    acquires: AtomicUsize,
    releases: AtomicUsize,
}

impl CountingPool {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: ComponentsPool::new(64),
            acquires: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        })
    }

    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::Relaxed)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }
}

impl NodePool for CountingPool {
    fn acquire(&self) -> LayoutNode {
        self.acquires.fetch_add(1, Ordering::Relaxed);
        self.inner.acquire()
    }

    fn release(&self, node: LayoutNode) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.inner.release(node);
    }
}

/// Nested tree resolver handing out one prepared tree, counting requests.
pub struct StubNested {
    pub tree: LayoutNode,
    pub requests: Vec<(SizeSpec, SizeSpec)>,
}

impl StubNested {
    pub fn sized(pool: &dyn NodePool, width: f32, height: f32) -> Self {
        let mut tree = pool.acquire();
        tree.set_layout(0.0, 0.0, width, height);
        Self {
            tree,
            requests: Vec::new(),
        }
    }
}

impl NestedTreeResolver for StubNested {
    fn resolve_nested_tree(
        &mut self,
        _context: &ComponentContext,
        _holder: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> Result<&LayoutNode, LayoutError> {
        self.requests.push((width_spec, height_spec));
        Ok(&self.tree)
    }

    fn commit_nested_tree(
        &mut self,
        _context: &ComponentContext,
        _holder: &mut LayoutNode,
    ) -> Result<(), LayoutError> {
        Ok(())
    }
}

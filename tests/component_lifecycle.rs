//! Resolution policy and measure callback behavior per component kind.

mod common;

use std::sync::Arc;

use common::{Call, CountingPool, Spy, StubNested, Unmeasured};
use spark_lifecycle::{
    Component, ComponentContext, LayoutError, LayoutNode, LifecycleResolver, MeasuredSize,
    MeasurementBridge, NestedTreeCache, NodePool, SizeSpec,
};

const A_WIDTH: f32 = 12.0;
const A_HEIGHT: f32 = 11.0;

fn nested_width_spec() -> SizeSpec {
    SizeSpec::exactly(400.0)
}

fn nested_height_spec() -> SizeSpec {
    SizeSpec::exactly(200.0)
}

fn context() -> (Arc<CountingPool>, ComponentContext) {
    let pool = CountingPool::new();
    let context = ComponentContext::new(pool.clone());
    (pool, context)
}

fn resolve(
    context: &ComponentContext,
    spy: &Arc<Spy>,
    resolve_nested_tree: bool,
) -> (Component, LayoutNode) {
    let component = Component::new(spy.clone());
    let node = LifecycleResolver::new(context.pool().clone()).resolve(
        context,
        &component,
        resolve_nested_tree,
    );
    (component, node)
}

/// A node wired to `component` the way the resolver leaves a measurable one.
fn measurable_node(context: &ComponentContext, component: &Component) -> LayoutNode {
    let mut node = context.new_node();
    node.set_measure_function();
    node.append_component(component.clone());
    node
}

fn measure_exactly_zero(
    context: &ComponentContext,
    node: &LayoutNode,
) -> Result<MeasuredSize, LayoutError> {
    let mut nested = NestedTreeCache::new();
    MeasurementBridge::new(context, &mut nested).measure(
        node,
        SizeSpec::exactly(0.0),
        SizeSpec::exactly(0.0),
    )
}

// =============================================================================
// Null layouts
// =============================================================================

#[test]
fn test_null_layout_layout_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, false).with_null_layout());

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_null_layout_layout_spec_can_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, true).with_null_layout());

    let (component, node) = resolve(&context, &spy, false);

    // Deferred to a nested tree: nothing runs until measurement.
    assert!(spy.calls().is_empty());
    assert_eq!(node.components(), &[component]);
    assert!(node.has_measure_function());
}

#[test]
fn test_null_layout_mount_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, false).with_null_layout());

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_null_layout_mount_spec_can_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, true).with_null_layout());

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(node.has_measure_function());
}

// =============================================================================
// Mount specs
// =============================================================================

#[test]
fn test_resolve_nested_tree_mount_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, false));

    let (component, node) = resolve(&context, &spy, true);

    // No specs on the context, so the plain hook runs.
    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_dont_resolve_nested_tree_mount_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, false));

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_resolve_nested_tree_mount_spec_can_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, true));

    let (component, node) = resolve(&context, &spy, true);

    assert_eq!(spy.calls(), vec![Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(node.has_measure_function());
}

#[test]
fn test_dont_resolve_nested_tree_mount_spec_can_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, true));

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(node.has_measure_function());
}

// =============================================================================
// Layout specs
// =============================================================================

#[test]
fn test_resolve_nested_tree_layout_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, false));

    let (component, node) = resolve(&context, &spy, true);

    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_dont_resolve_nested_tree_layout_spec_cannot_measure() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, false));

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(spy.calls(), vec![Call::CreateLayout, Call::Prepare]);
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());
}

#[test]
fn test_resolve_nested_tree_layout_spec_can_measure() {
    let (pool, mut context) = context();
    context.set_width_spec(nested_width_spec());
    context.set_height_spec(nested_height_spec());
    let spy = Arc::new(Spy::new(false, true));

    let (component, node) = resolve(&context, &spy, true);

    assert_eq!(
        spy.calls(),
        vec![
            Call::CreateLayoutWithSizeSpec(nested_width_spec(), nested_height_spec()),
            Call::Prepare,
        ]
    );
    assert_eq!(node.components(), &[component]);
    assert!(!node.has_measure_function());

    // The created layout replaced the acquired node, which went back.
    assert_eq!(pool.acquires(), 2);
    assert_eq!(pool.releases(), 1);
}

#[test]
fn test_dont_resolve_nested_tree_layout_spec_can_measure() {
    let (pool, context) = context();
    let spy = Arc::new(Spy::new(false, true));

    let (component, node) = resolve(&context, &spy, false);

    assert_eq!(pool.acquires(), 1);
    assert_eq!(spy.count(|c| matches!(c, Call::CreateLayout)), 0);
    assert_eq!(
        spy.count(|c| matches!(c, Call::CreateLayoutWithSizeSpec(..))),
        0
    );
    assert_eq!(spy.count(|c| matches!(c, Call::Prepare)), 0);
    assert_eq!(node.components(), &[component]);
    assert!(node.has_measure_function());
    assert!(node.is_nested_tree_holder());
}

#[test]
fn test_missing_specs_resolve_as_unspecified() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, true));

    resolve(&context, &spy, true);

    assert_eq!(
        spy.calls()[0],
        Call::CreateLayoutWithSizeSpec(SizeSpec::UNSPECIFIED, SizeSpec::UNSPECIFIED)
    );
}

// =============================================================================
// Measure callback
// =============================================================================

#[test]
fn test_on_measure_not_overridden() {
    let (_, context) = context();
    let component = Component::new(Arc::new(Unmeasured));
    let node = measurable_node(&context, &component);

    let err = measure_exactly_zero(&context, &node).unwrap_err();

    assert!(matches!(err, LayoutError::MeasureNotImplemented { .. }));
    assert!(err.to_string().contains("can_measure()"));
}

#[test]
fn test_measure_on_non_measurable_component() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, false));
    let component = Component::new(spy.clone());
    let node = measurable_node(&context, &component);

    let err = measure_exactly_zero(&context, &node).unwrap_err();

    assert!(matches!(err, LayoutError::NotMeasurable { .. }));
    assert!(err.to_string().contains("can_measure()"));
    assert!(spy.calls().is_empty());
}

#[test]
fn test_mount_spec_measure_output_not_set() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, true));
    let component = Component::new(spy.clone());
    let node = measurable_node(&context, &component);

    let err = measure_exactly_zero(&context, &node).unwrap_err();

    assert!(matches!(err, LayoutError::MeasureOutputNotSet { .. }));
    assert!(err.to_string().contains("MeasureOutput not set"));
}

#[test]
fn test_mount_spec_measure_output_set() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(true, true).with_measured(A_WIDTH, A_HEIGHT));
    let component = Component::new(spy.clone());
    let node = measurable_node(&context, &component);

    let size = measure_exactly_zero(&context, &node).unwrap();

    assert_eq!(size, MeasuredSize::new(A_WIDTH, A_HEIGHT));
    assert_eq!(
        spy.calls(),
        vec![Call::Measure(SizeSpec::exactly(0.0), SizeSpec::exactly(0.0))]
    );
}

#[test]
fn test_layout_spec_measure_resolves_nested_tree() {
    let (pool, context) = context();
    let spy = Arc::new(Spy::new(false, true));
    let component = Component::new(spy.clone());
    let node = measurable_node(&context, &component);
    let mut nested = StubNested::sized(&*pool, 20.0, 25.0);

    let size = MeasurementBridge::new(&context, &mut nested)
        .measure(&node, SizeSpec::exactly(0.0), SizeSpec::exactly(0.0))
        .unwrap();

    assert_eq!(size, MeasuredSize::new(20.0, 25.0));
    assert_eq!(
        nested.requests,
        vec![(SizeSpec::exactly(0.0), SizeSpec::exactly(0.0))]
    );
    // Layout specs never get on_measure.
    assert_eq!(spy.count(|c| matches!(c, Call::Measure(..))), 0);
}

#[test]
fn test_nested_tree_cached_by_holder() {
    let (_, context) = context();
    let spy = Arc::new(Spy::new(false, true));
    let (_, holder) = resolve(&context, &spy, false);
    let mut cache = NestedTreeCache::new();

    let first = cache
        .resolve_nested_tree_key(&context, &holder, SizeSpec::exactly(30.0), SizeSpec::exactly(10.0));
    let second = cache
        .resolve_nested_tree_key(&context, &holder, SizeSpec::exactly(30.0), SizeSpec::exactly(10.0));

    assert_eq!(first, second);
    assert_eq!(cache.resolutions(), 1);
    assert_eq!(
        spy.count(|c| matches!(c, Call::CreateLayoutWithSizeSpec(..))),
        1
    );

    // A different holder never shares the entry.
    let (_, other) = resolve(&context, &spy, false);
    cache.resolve_nested_tree_key(&context, &other, SizeSpec::exactly(30.0), SizeSpec::exactly(10.0));
    assert_eq!(cache.resolutions(), 2);
    assert_eq!(cache.len(), 2);

    cache.clear(&context);
    assert!(cache.is_empty());
}

/// Key of the cached tree, so two lookups can be compared after the borrow
/// ends.
trait ResolveKey {
    fn resolve_nested_tree_key(
        &mut self,
        context: &ComponentContext,
        holder: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> spark_lifecycle::NodeKey;
}

impl ResolveKey for NestedTreeCache {
    fn resolve_nested_tree_key(
        &mut self,
        context: &ComponentContext,
        holder: &LayoutNode,
        width_spec: SizeSpec,
        height_spec: SizeSpec,
    ) -> spark_lifecycle::NodeKey {
        use spark_lifecycle::NestedTreeResolver;
        self.resolve_nested_tree(context, holder, width_spec, height_spec)
            .unwrap()
            .key()
    }
}

#[test]
fn test_exact_compatibility_rule_misses_on_new_specs() {
    let pool = CountingPool::new();
    let config = spark_lifecycle::LayoutConfig::default()
        .with_spec_compatibility(spark_lifecycle::SpecCompatibility::Exact);
    let context = ComponentContext::with_config(pool.clone(), config);
    let spy = Arc::new(Spy::new(false, true));
    let (_, holder) = resolve(&context, &spy, false);
    let mut cache = NestedTreeCache::new();

    // The spy's tree is empty: 0 wide under any at-most bound.
    cache.resolve_nested_tree_key(&context, &holder, SizeSpec::at_most(30.0), SizeSpec::at_most(10.0));
    cache.resolve_nested_tree_key(&context, &holder, SizeSpec::at_most(20.0), SizeSpec::at_most(10.0));
    assert_eq!(cache.resolutions(), 2);

    let compatible = ComponentContext::new(pool.clone());
    cache.resolve_nested_tree_key(&compatible, &holder, SizeSpec::at_most(10.0), SizeSpec::at_most(5.0));
    assert_eq!(cache.resolutions(), 2);
    cache.clear(&context);
    pool.release(holder);
}

//! Node Pool - Acquire/release discipline for layout nodes.
//!
//! Layout passes create and discard whole trees; the pool keeps released
//! nodes around for reuse:
//! - Free list for O(1) reuse, bounded by a capacity
//! - Fresh [`NodeKey`] on every acquire (identity never survives a release)
//! - Recursive release of children and committed nested trees
//!
//! The pool is shared across threads, so the free list sits behind a mutex.
//! A node handed out by `acquire` is owned by the caller; nothing else can
//! touch it until it comes back through `release`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::layout_node::{LayoutNode, NodeKey};

/// Source of layout nodes.
pub trait NodePool: Send + Sync {
    /// Hand out a blank node with a fresh identity.
    fn acquire(&self) -> LayoutNode;

    /// Return a node (and everything it owns) for reuse.
    fn release(&self, node: LayoutNode);
}

// =============================================================================
// ComponentsPool
// =============================================================================

/// Default thread-safe pool.
pub struct ComponentsPool {
    free: Mutex<Vec<LayoutNode>>,
    capacity: usize,
    acquired: AtomicUsize,
    reused: AtomicUsize,
}

static GLOBAL_POOL: OnceLock<Arc<ComponentsPool>> = OnceLock::new();

impl ComponentsPool {
    /// Create a pool keeping at most `capacity` free nodes.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
            acquired: AtomicUsize::new(0),
            reused: AtomicUsize::new(0),
        }
    }

    /// The process-wide pool.
    pub fn global() -> Arc<ComponentsPool> {
        GLOBAL_POOL
            .get_or_init(|| Arc::new(ComponentsPool::new(256)))
            .clone()
    }

    /// Number of nodes waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free.lock().len()
    }

    /// Total acquires served.
    pub fn acquired_count(&self) -> usize {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Acquires served from the free list.
    pub fn reused_count(&self) -> usize {
        self.reused.load(Ordering::Relaxed)
    }

    /// Drop every free node.
    pub fn clear(&self) {
        self.free.lock().clear();
    }
}

impl Default for ComponentsPool {
    fn default() -> Self {
        Self::new(256)
    }
}

impl NodePool for ComponentsPool {
    fn acquire(&self) -> LayoutNode {
        self.acquired.fetch_add(1, Ordering::Relaxed);

        let recycled = self.free.lock().pop();
        match recycled {
            Some(mut node) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                node.reset(NodeKey::next());
                node
            }
            None => LayoutNode::new(NodeKey::next()),
        }
    }

    fn release(&self, mut node: LayoutNode) {
        // Children first, collected before touching the free list.
        let mut owned = node.take_children();
        owned.extend(node.take_nested_tree());
        for child in owned {
            self.release(child);
        }

        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(node);
        }
    }
}

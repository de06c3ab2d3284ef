//! Deferred reclamation: retired nodes are freed when the owning set drops.
//!
//! Destruction timing is deterministic, which makes this the strategy of
//! choice for tests and short-lived sets. Memory for removed nodes
//! accumulates until the set goes away, so it is not suited to long-running
//! processes with heavy churn.

use std::ops::Deref;
use std::sync::Mutex;

#[cfg(debug_assertions)]
use std::collections::HashSet;

use super::Reclaim;

/// Strategy that parks every retired node until it is dropped.
///
/// Retirement from multiple threads is serialized through a mutex; that lock
/// is on the reclamation path only, never on the search or traversal path.
/// Debug builds additionally track retired addresses and panic on a double
/// retirement, which would otherwise surface as a much less debuggable
/// double free.
pub struct DeferredReclaim {
    retired: Mutex<Vec<Retired>>,
    #[cfg(debug_assertions)]
    seen: Mutex<HashSet<usize>>,
}

struct Retired {
    ptr: *mut (),
    dealloc: unsafe fn(*mut ()),
}

// Retired holds a pointer to a node that is unreachable from any collection,
// so moving it across threads is sound; the mutex serializes access.
unsafe impl Send for Retired {}

impl DeferredReclaim {
    pub fn new() -> Self {
        DeferredReclaim {
            retired: Mutex::new(Vec::new()),
            #[cfg(debug_assertions)]
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Number of nodes waiting to be freed.
    pub fn pending(&self) -> usize {
        self.retired.lock().unwrap().len()
    }
}

impl Default for DeferredReclaim {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeferredReclaim {
    fn drop(&mut self) {
        let nodes = self.retired.get_mut().unwrap();
        for node in nodes.drain(..) {
            unsafe {
                (node.dealloc)(node.ptr);
            }
        }
    }
}

/// Reference handed out under [`DeferredReclaim`].
///
/// No guard state is needed: the referent stays allocated at least as long
/// as the set it came from, and the lifetime ties the reference to the set.
pub struct DeferredRef<'a, T> {
    data: &'a T,
}

impl<T> Deref for DeferredRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl Reclaim for DeferredReclaim {
    type GuardedRef<'a, T: 'a> = DeferredRef<'a, T>;

    type ReadGuard = ();

    fn pin() -> Self::ReadGuard {
        // Nothing is freed before the set drops, so reads need no pinning.
    }

    unsafe fn retire<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        #[cfg(debug_assertions)]
        {
            let addr = node as usize;
            let mut seen = self.seen.lock().unwrap();
            assert!(seen.insert(addr), "node {addr:#x} retired twice");
        }

        let node = Retired {
            ptr: node as *mut (),
            dealloc: unsafe {
                std::mem::transmute::<unsafe fn(*mut N), unsafe fn(*mut ())>(dealloc)
            },
        };
        self.retired.lock().unwrap().push(node);
    }

    unsafe fn make_ref<'a, T: 'a>(ptr: *const T) -> Self::GuardedRef<'a, T> {
        // Safety: caller guarantees ptr stays valid for 'a
        DeferredRef {
            data: unsafe { &*ptr },
        }
    }
}

//! Epoch-based reclamation using crossbeam-epoch.
//!
//! Removed nodes are handed to the global epoch collector and freed once
//! every thread has moved past the epoch in which they were retired. Unlike
//! [`DeferredReclaim`](strata_core::DeferredReclaim), memory is returned
//! while the set is still alive, which is what long-running processes need.

use std::ops::Deref;

use crossbeam_epoch::{self as epoch, Guard};
use strata_core::Reclaim;

/// Reclamation strategy backed by the global crossbeam-epoch collector.
///
/// Zero-sized: all state lives in the collector, so storing this inside a
/// collection costs nothing and imposes no extra `Send`/`Sync` constraints.
/// Read-side pinning is a cheap thread-local operation; retirement pins,
/// schedules the deallocation, and unpins immediately.
#[derive(Clone, Copy, Default)]
pub struct EpochReclaim;

/// A reference protected by a pinned epoch guard.
///
/// Bundles the guard with the borrow so the referent cannot be reclaimed
/// while the reference is alive; dropping the `EpochRef` unpins.
pub struct EpochRef<'a, T> {
    _guard: Guard,
    data: &'a T,
}

impl<T> Deref for EpochRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for EpochRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EpochRef({:?})", self.data)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for EpochRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl Reclaim for EpochReclaim {
    type GuardedRef<'a, T: 'a> = EpochRef<'a, T>;

    type ReadGuard = Guard;

    fn pin() -> Self::ReadGuard {
        epoch::pin()
    }

    unsafe fn retire<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        let guard = epoch::pin();
        // defer_unchecked: the node is already unreachable, so the closure
        // only needs to run after every current reader unpins
        unsafe {
            guard.defer_unchecked(move || {
                dealloc(node);
            });
        }
    }

    unsafe fn make_ref<'a, T: 'a>(ptr: *const T) -> Self::GuardedRef<'a, T> {
        let guard = epoch::pin();
        EpochRef {
            _guard: guard,
            data: unsafe { &*ptr },
        }
    }
}

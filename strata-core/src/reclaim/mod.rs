//! Memory reclamation strategies for lock-free structures.
//!
//! A removed node cannot be freed at the moment it is unlinked: concurrent
//! readers may still be traversing it. The [`Reclaim`] trait abstracts over
//! the policies that bridge that gap, so a collection can be written once and
//! parameterized by strategy:
//!
//! ```text
//! SkipSet<i32, EpochReclaim>      - production: epoch-based reclamation
//! SkipSet<i32, DeferredReclaim>   - testing: freed when the set drops
//! ```
//!
//! The epoch implementation lives in the `strata-crossbeam` crate so that this
//! crate carries the algorithms and the deterministic test strategy only.

mod deferred;

use std::ops::Deref;

pub use deferred::{DeferredReclaim, DeferredRef};

/// A memory reclamation strategy.
///
/// An instance of the strategy is stored inside each collection and receives
/// the nodes that collection retires. Read-side protection is requested per
/// operation via [`Reclaim::pin`], which is static: for epoch-based strategies
/// pinning is a property of the current thread, not of any one collection.
///
/// # Safety contract
///
/// Implementations must guarantee that
///
/// 1. a pointer passed to `retire` is not deallocated while any
///    [`Reclaim::ReadGuard`] obtained before the retirement is still alive,
///    and is deallocated exactly once afterwards;
/// 2. a [`Reclaim::GuardedRef`] keeps its referent valid for its lifetime.
pub trait Reclaim: Default + Send + Sync {
    /// A reference bundled with whatever protection it needs.
    ///
    /// Dereferences transparently to the value.
    type GuardedRef<'a, T: 'a>: Deref<Target = T>;

    /// Read-side protection held for the duration of an operation.
    ///
    /// For epoch strategies this is a real pinned guard. For the deferred
    /// strategy it is `()`, because nothing is freed before the set drops.
    type ReadGuard;

    /// Pin the current thread for a read or traversal.
    fn pin() -> Self::ReadGuard;

    /// Hand over an unlinked node for eventual deallocation.
    ///
    /// # Safety
    ///
    /// - `node` must no longer be reachable from the collection's roots.
    /// - `dealloc` must be the deallocation routine matching how `node` was
    ///   allocated, and `node` must not be retired twice.
    unsafe fn retire<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N));

    /// Wrap a raw pointer into a guarded reference.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live value that stays valid for `'a` under this
    /// strategy's rules (the caller typically holds a `ReadGuard` spanning
    /// the call).
    unsafe fn make_ref<'a, T: 'a>(ptr: *const T) -> Self::GuardedRef<'a, T>;
}

use std::ops::Deref;

/// Concurrent ordered-set API.
///
/// The operations below are safe to call from any number of threads on a
/// shared instance. Implementors decide how references handed out to callers
/// are kept valid, via the [`Entry`](OrderedSet::Entry) associated type:
///
/// ```text
/// User code
///    ↓ uses
/// OrderedSet (this trait)          ← safe, high-level API
///    ↓ implemented by
/// SkipSet<T, R: Reclaim>           ← lock-free skip list
///    ↓ parameterized by
/// DeferredReclaim / EpochReclaim   ← memory reclamation strategy
/// ```
///
/// # Ordering guarantees
///
/// Operations on the *same* element value are linearizable: a thread that
/// observes its own `insert` return `true` will observe `contains` return
/// `true` until a `remove` of that value completes. Operations on distinct
/// values are unordered relative to each other, except through iteration:
/// an iterator created after an `insert` returned `true` yields that element
/// in its sorted position (unless a racing `remove` took it out again).
pub trait OrderedSet<T: Ord> {
    /// A value reference protected by the implementor's reclamation strategy.
    type Entry<'a>: Deref<Target = T>
    where
        Self: 'a,
        T: 'a;

    /// Ascending, weakly consistent iterator.
    ///
    /// Yields owned values: a guarded borrow would have to keep the whole
    /// traversal pinned for as long as the caller holds any single item.
    type Iter<'a>: Iterator<Item = T>
    where
        Self: 'a,
        T: 'a;

    /// Insert a value. Returns `true` if the set changed, `false` if the
    /// value was already present.
    fn insert(&self, value: T) -> bool;

    /// Remove a value. Returns `true` if the value was present.
    ///
    /// Exactly one of any number of concurrent `remove` calls for the same
    /// value observes `true`.
    fn remove(&self, value: &T) -> bool;

    /// Remove a value and return it.
    fn take(&self, value: &T) -> Option<T>
    where
        T: Clone;

    /// Point membership query. Read-only: never blocks and never writes,
    /// regardless of concurrent mutation.
    fn contains(&self, value: &T) -> bool;

    /// Like [`contains`](OrderedSet::contains), but returns a guarded
    /// reference to the stored element.
    fn get(&self, value: &T) -> Option<Self::Entry<'_>>;

    /// Greatest element less than or equal to `bound`.
    fn floor(&self, bound: &T) -> Option<Self::Entry<'_>>;

    /// Least element greater than or equal to `bound`.
    fn ceiling(&self, bound: &T) -> Option<Self::Entry<'_>>;

    /// Least element of the set.
    fn first(&self) -> Option<Self::Entry<'_>>;

    /// Greatest element of the set.
    fn last(&self) -> Option<Self::Entry<'_>>;

    /// Best-effort element count.
    ///
    /// Maintained as a relaxed counter: under concurrent mutation the value
    /// may lag individual operations and is explicitly not linearizable.
    /// Use [`is_empty`](OrderedSet::is_empty) for an exact emptiness check.
    fn len(&self) -> usize;

    /// Whether the set holds no elements at the instant of observation.
    fn is_empty(&self) -> bool;

    /// Iterate all elements in ascending order.
    ///
    /// Weakly consistent: the traversal never fails under concurrent
    /// mutation, never yields an element twice, and yields a strictly
    /// increasing sequence; mutations racing with the traversal may or may
    /// not be reflected. Each call starts an independent cursor.
    fn iter(&self) -> Self::Iter<'_>;

    /// Iterate elements greater than or equal to `bound`, ascending.
    fn iter_from(&self, bound: &T) -> Self::Iter<'_>;

    /// Snapshot the current elements into a sorted `Vec`.
    fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

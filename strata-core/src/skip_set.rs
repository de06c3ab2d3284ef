use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use crate::marked::MarkedPtr;
use crate::ordered_set::OrderedSet;
use crate::reclaim::{DeferredReclaim, Reclaim};

const MAX_HEIGHT: usize = 16;

type NodePtr<T> = *mut Node<T>;

// =============================================================================
// STRUCTURE & PROTOCOLS
// =============================================================================
//
// Sorted ascending, multiple levels; every element lives at level 0, taller
// towers form express lanes:
//
// Level 3:  HEAD ─────────────────────────────────────► 30 ─────────────────► NULL
//             │                                          │
// Level 2:  HEAD ──────────► 10 ─────────────────────► 30 ─────────────────► NULL
//             │               │                          │
// Level 1:  HEAD ──────────► 10 ──────────► 20 ──────► 30 ─────────────────► NULL
//             │               │              │           │
// Level 0:  HEAD ──────────► 10 ──────────► 20 ──────► 30 ──────────► 40 ──► NULL
//
// The mark bit on node.next[level] says the NODE is logically deleted at that
// level. HEAD is never marked or removed.
//
// INSERT: search top-down recording the predecessor and successor at every
// level, then publish with one CAS on pred.next[0]. The level-0 link is the
// linearization point; upper levels are linked afterwards, bottom-up, and are
// abandoned if the node gets delete-marked in the meantime.
//
// REMOVE: two phases per level, applied from the top of the tower down.
//   Phase 1: mark node.next[level]   (logical delete at that level)
//   Phase 2: CAS pred.next[level] from node to node's successor (unlink)
// The level-0 mark is claimed by exactly one thread; that thread owns the
// node, performs the level-0 unlink, and retires the node to the reclaimer.
// A node whose tower is not yet fully linked is not removable: remove bails
// out and the caller observes the value as still present.
//
// RECOVERY: searches record predecessors per level on the way down. When a
// predecessor turns out to be marked, or a CAS against it fails because it
// was marked, the operation resumes from the recorded predecessor one level
// up instead of restarting at HEAD; HEAD is the fallback when every recorded
// predecessor above is stale.
//
// READS: contains/get/floor/ceiling/first/last and iteration use a separate
// read-only descent that steps over marked nodes without ever writing, so a
// point query cannot contend with anything.
// =============================================================================

// ============================================================================
// Node - tower node with inline forward pointers
// ============================================================================

/// A skip list node. Single allocation per node: the forward pointers are a
/// flexible array placed inline after the struct fields, sized by `height`.
///
/// `value` is `None` only for the head sentinel.
#[repr(C)]
struct Node<T> {
    value: Option<T>,
    height: usize,
    // Flexible array: next[0], next[1], ..., next[height - 1]
    tower: [AtomicPtr<Node<T>>; 0],
}

impl<T> Node<T> {
    fn layout(height: usize) -> Layout {
        Layout::new::<Self>()
            .extend(Layout::array::<AtomicPtr<Self>>(height).unwrap())
            .unwrap()
            .0
            .pad_to_align()
    }

    fn alloc(value: Option<T>, height: usize) -> NodePtr<T> {
        unsafe {
            let layout = Self::layout(height);
            let node = alloc(layout) as NodePtr<T>;
            if node.is_null() {
                handle_alloc_error(layout);
            }

            ptr::write(&raw mut (*node).value, value);
            ptr::write(&raw mut (*node).height, height);

            let tower = (*node).tower.as_ptr() as *mut AtomicPtr<Self>;
            for level in 0..height {
                ptr::write(tower.add(level), AtomicPtr::new(ptr::null_mut()));
            }

            node
        }
    }

    /// Free a node allocated by [`Node::alloc`].
    ///
    /// # Safety
    /// `node` must be unreachable from any set and must not be freed twice.
    unsafe fn dealloc(node: NodePtr<T>) {
        unsafe {
            let layout = Self::layout((*node).height);
            ptr::drop_in_place(&raw mut (*node).value);
            dealloc(node as *mut u8, layout);
        }
    }

    #[inline]
    fn is_head(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    fn value(&self) -> &T {
        self.value.as_ref().expect("head sentinel holds no value")
    }

    /// Take the value back out of a node that was never published.
    ///
    /// # Safety
    /// The node must never have been linked into a set, and this must be
    /// called at most once.
    unsafe fn take_value_unlinked(&mut self) -> T {
        self.value.take().expect("head sentinel holds no value")
    }

    #[inline]
    unsafe fn tower_slot(&self, level: usize) -> &AtomicPtr<Node<T>> {
        unsafe { &*self.tower.as_ptr().add(level) }
    }

    #[inline]
    fn next(&self, level: usize) -> NodePtr<T> {
        unsafe { self.tower_slot(level).load(Ordering::Acquire) }
    }

    #[inline]
    fn set_next(&self, level: usize, ptr: NodePtr<T>) {
        unsafe { self.tower_slot(level).store(ptr, Ordering::Release) }
    }

    #[inline]
    fn cas_next(
        &self,
        level: usize,
        expected: NodePtr<T>,
        new: NodePtr<T>,
    ) -> Result<NodePtr<T>, NodePtr<T>> {
        unsafe {
            self.tower_slot(level)
                .compare_exchange(expected, new, Ordering::Release, Ordering::Relaxed)
        }
    }

    #[inline]
    fn cas_next_weak(
        &self,
        level: usize,
        expected: NodePtr<T>,
        new: NodePtr<T>,
    ) -> Result<NodePtr<T>, NodePtr<T>> {
        unsafe {
            self.tower_slot(level).compare_exchange_weak(
                expected,
                new,
                Ordering::Release,
                Ordering::Relaxed,
            )
        }
    }
}

// ============================================================================
// Search results
// ============================================================================

struct SearchLevel<T> {
    pred: NodePtr<T>,
    curr: NodePtr<T>,
}

/// Predecessor and successor at every level for one search key.
struct Position<T> {
    preds: [NodePtr<T>; MAX_HEIGHT],
    succs: [NodePtr<T>; MAX_HEIGHT],
}

// ============================================================================
// SkipSet
// ============================================================================

/// Lock-free concurrent sorted set.
///
/// A probabilistic skip list: expected O(log n) search, insert and remove,
/// synchronized per pointer with CAS. There is no lock anywhere; operations
/// on disjoint regions of the key space never contend, and contending
/// operations retry against freshly read state rather than blocking.
///
/// The `R` parameter selects how removed nodes are reclaimed; see the
/// [`reclaim`](crate::reclaim) module. Use [`OrderedSet`] for the API:
///
/// ```ignore
/// use strata_core::{OrderedSet, SkipSet};
///
/// let set: SkipSet<i32> = SkipSet::new();
/// set.insert(5);
/// set.insert(3);
/// assert_eq!(set.to_vec(), vec![3, 5]);
/// ```
pub struct SkipSet<T, R: Reclaim = DeferredReclaim> {
    head: NodePtr<T>,
    len: AtomicUsize,
    reclaim: R,
}

impl<T: Ord, R: Reclaim> SkipSet<T, R> {
    /// Create an empty set.
    pub fn new() -> Self {
        SkipSet {
            head: Node::alloc(None, MAX_HEIGHT),
            len: AtomicUsize::new(0),
            reclaim: R::default(),
        }
    }

    /// Random tower height: one draw, counting trailing one bits, so level
    /// h is reached with probability 2^-(h-1). Clamped to MAX_HEIGHT.
    #[inline]
    fn random_height() -> usize {
        let bits = fastrand::u32(..);
        let extra = (!bits).trailing_zeros() as usize;
        (1 + extra).min(MAX_HEIGHT)
    }

    // =========================================================================
    // Mutation-path search (helps unlink marked nodes)
    // =========================================================================

    /// Pick a replacement predecessor for `level` from the predecessors
    /// recorded at higher levels, skipping any that have since been marked
    /// or are too short. Falls back to HEAD.
    #[inline]
    fn recover_pred(&self, level: usize, preds: &[NodePtr<T>]) -> NodePtr<T> {
        for &pred in preds.iter().skip(level + 1) {
            if pred.is_null() {
                continue;
            }
            if pred == self.head {
                return self.head;
            }
            unsafe {
                if !MarkedPtr::new((*pred).next(0)).is_marked() && (*pred).height > level {
                    return pred;
                }
            }
        }
        self.head
    }

    /// Walk one level: returns `pred` with `pred.value < value` and `curr`
    /// the first node at this level with `curr.value >= value` (or null).
    /// Marked nodes found on the way are unlinked in passing.
    fn search_level(
        &self,
        value: &T,
        level: usize,
        start: NodePtr<T>,
        preds: &[NodePtr<T>],
    ) -> SearchLevel<T> {
        let mut pred = start;

        unsafe {
            if MarkedPtr::new((*pred).next(level)).is_marked() {
                pred = self.recover_pred(level, preds);
            }

            let mut curr = MarkedPtr::new((*pred).next(level)).as_ptr();

            loop {
                if curr.is_null() {
                    return SearchLevel { pred, curr };
                }

                let next = MarkedPtr::new((*curr).next(level));

                if next.is_marked() {
                    // curr is deleted at this level: snip it out before moving on
                    if (*pred).cas_next(level, curr, next.as_ptr()).is_err() {
                        pred = self.recover_pred(level, preds);
                        curr = MarkedPtr::new((*pred).next(level)).as_ptr();
                        continue;
                    }
                    curr = next.as_ptr();
                    continue;
                }

                debug_assert!(!(*curr).is_head());

                if (*curr).value() < value {
                    pred = curr;
                    curr = next.as_ptr();
                } else {
                    return SearchLevel { pred, curr };
                }
            }
        }
    }

    /// Top-down search recording the predecessor/successor pair at every
    /// level. The predecessor found at each level seeds the next level down,
    /// which is what makes the whole descent O(log n).
    fn find_position(&self, value: &T) -> Position<T> {
        let mut preds: [NodePtr<T>; MAX_HEIGHT] = [ptr::null_mut(); MAX_HEIGHT];
        let mut succs: [NodePtr<T>; MAX_HEIGHT] = [ptr::null_mut(); MAX_HEIGHT];

        let mut pred = self.head;
        for level in (0..MAX_HEIGHT).rev() {
            let found = self.search_level(value, level, pred, &preds);
            pred = found.pred;
            preds[level] = found.pred;
            succs[level] = found.curr;
        }

        Position { preds, succs }
    }

    /// Link `node` at `level` (levels above 0). Gives up and returns false
    /// if the node got delete-marked, leaving the tower truncated; remove
    /// refuses to touch the node until the tower is complete, so the two
    /// operations cannot chase each other.
    unsafe fn link_level(
        &self,
        level: usize,
        pred: &mut NodePtr<T>,
        node: NodePtr<T>,
        value: &T,
        preds: &[NodePtr<T>],
    ) -> bool {
        unsafe {
            loop {
                if MarkedPtr::new((*node).next(0)).is_marked() {
                    return false;
                }

                // A marked predecessor can no longer accept links
                if *pred != self.head && MarkedPtr::new((**pred).next(0)).is_marked() {
                    *pred = self.recover_pred(level, preds);
                    continue;
                }

                let pred_next = MarkedPtr::new((**pred).next(level));
                let pred_next_ptr = pred_next.as_ptr();

                if pred_next.is_marked() {
                    *pred = self.recover_pred(level, preds);
                    continue;
                }

                // Concurrent insert of a smaller value: advance, but never
                // onto a node that is already being deleted
                if !pred_next_ptr.is_null()
                    && (*pred_next_ptr).height > level
                    && (*pred_next_ptr).value() < value
                {
                    if MarkedPtr::new((*pred_next_ptr).next(0)).is_marked() {
                        continue;
                    }
                    *pred = pred_next_ptr;
                    continue;
                }

                if pred_next_ptr == node {
                    return true;
                }

                (*node).set_next(level, pred_next_ptr);

                match (**pred).cas_next(level, pred_next_ptr, node) {
                    Ok(_) => return true,
                    Err(_) => continue,
                }
            }
        }
    }

    /// Set the mark on `node.next[level]`. Returns true if this call placed
    /// the mark, false if it was already there.
    unsafe fn mark_level(&self, node: NodePtr<T>, level: usize) -> bool {
        unsafe {
            loop {
                let next = (*node).next(level);
                let next_marked = MarkedPtr::new(next);

                if next_marked.is_marked() {
                    return false;
                }

                if (*node)
                    .cas_next_weak(level, next, next_marked.marked().as_raw())
                    .is_ok()
                {
                    return true;
                }
            }
        }
    }

    /// Physically unlink a marked `node` at `level`, retrying until the node
    /// is no longer reachable at this level (possibly because another thread
    /// unlinked it first).
    unsafe fn unlink_level(
        &self,
        level: usize,
        pred: &mut NodePtr<T>,
        node: NodePtr<T>,
        value: &T,
        preds: &[NodePtr<T>],
    ) {
        unsafe {
            loop {
                let pred_next = MarkedPtr::new((**pred).next(level));
                let pred_next_ptr = pred_next.as_ptr();

                if pred_next_ptr != node {
                    // Either already unlinked here, or something was inserted
                    // between pred and node; advance past smaller values only
                    if pred_next_ptr.is_null() || (*pred_next_ptr).value() >= value {
                        return;
                    }
                    *pred = pred_next_ptr;
                    continue;
                }

                if pred_next.is_marked() {
                    *pred = self.recover_pred(level, preds);
                    continue;
                }

                let succ = MarkedPtr::unmask((*node).next(level));

                match (**pred).cas_next(level, node, succ) {
                    Ok(_) => return,
                    Err(actual) => {
                        let actual_ptr = MarkedPtr::unmask(actual);
                        if actual_ptr == node {
                            // pred got marked under us
                            *pred = self.recover_pred(level, preds);
                            continue;
                        }
                        if actual_ptr == succ {
                            return;
                        }
                        if actual_ptr.is_null() || (*actual_ptr).value() >= value {
                            return;
                        }
                        *pred = actual_ptr;
                        continue;
                    }
                }
            }
        }
    }

    // =========================================================================
    // Core operations (caller must hold R::pin() for the duration)
    // =========================================================================

    fn insert_inner(&self, value: T) -> bool {
        let height = Self::random_height();
        let mut value = value;

        loop {
            let pos = self.find_position(&value);

            let succ = pos.succs[0];
            if !succ.is_null() {
                unsafe {
                    if (*succ).value() == &value {
                        return false;
                    }
                }
            }

            let node = Node::alloc(Some(value), height);

            unsafe {
                for (level, &succ) in pos.succs.iter().enumerate().take(height) {
                    (*node).set_next(level, succ);
                }

                // Publish at level 0; this is where the element becomes a member
                if (*pos.preds[0]).cas_next(0, pos.succs[0], node).is_err() {
                    value = (*node).take_value_unlinked();
                    Node::dealloc(node);
                    continue;
                }

                self.len.fetch_add(1, Ordering::Relaxed);

                let node_value = (*node).value();
                for level in 1..height {
                    let mut pred = pos.preds[level];
                    if !self.link_level(level, &mut pred, node, node_value, &pos.preds) {
                        break;
                    }
                }

                return true;
            }
        }
    }

    /// Remove `value`, returning the unlinked node if this call won the
    /// level-0 mark. The caller is responsible for retiring the node.
    fn remove_inner(&self, value: &T) -> Option<NodePtr<T>> {
        let pos = self.find_position(value);

        let node = pos.succs[0];
        if node.is_null() {
            return None;
        }

        unsafe {
            if (*node).value() != value {
                return None;
            }

            let height = (*node).height;

            // Tower still being linked: treat as not yet removable. Insert
            // links bottom-up, so the top level settles last.
            if height > 1 && pos.succs[height - 1] != node {
                return None;
            }

            let node_value = (*node).value();

            // Upper levels first; any thread may help here
            for level in (1..height).rev() {
                self.mark_level(node, level);
                let mut pred = pos.preds[level];
                self.unlink_level(level, &mut pred, node, node_value, &pos.preds);
            }

            // The level-0 mark decides ownership: exactly one remover wins
            if !self.mark_level(node, 0) {
                return None;
            }

            let mut pred = pos.preds[0];
            self.unlink_level(0, &mut pred, node, node_value, &pos.preds);

            self.len.fetch_sub(1, Ordering::Relaxed);

            Some(node)
        }
    }

    // =========================================================================
    // Read-only paths
    // =========================================================================

    /// Locate `value` without writing anything. Marked nodes are stepped
    /// over; the membership verdict is taken at level 0.
    fn seek(&self, value: &T) -> Option<NodePtr<T>> {
        unsafe {
            let mut pred = self.head;

            for level in (0..MAX_HEIGHT).rev() {
                let mut curr = MarkedPtr::new((*pred).next(level)).as_ptr();

                loop {
                    if curr.is_null() {
                        break;
                    }
                    let next = MarkedPtr::new((*curr).next(level));
                    if next.is_marked() {
                        curr = next.as_ptr();
                        continue;
                    }
                    if (*curr).value() < value {
                        pred = curr;
                        curr = next.as_ptr();
                        continue;
                    }
                    break;
                }

                if level == 0 {
                    if !curr.is_null() && (*curr).value() == value {
                        return Some(curr);
                    }
                }
            }

            None
        }
    }

    /// Last node with value <= bound, or None if every element is greater.
    fn seek_floor(&self, bound: &T) -> Option<NodePtr<T>> {
        unsafe {
            let mut pred = self.head;

            for level in (0..MAX_HEIGHT).rev() {
                let mut curr = MarkedPtr::new((*pred).next(level)).as_ptr();

                while !curr.is_null() {
                    let next = MarkedPtr::new((*curr).next(level));
                    if next.is_marked() {
                        curr = next.as_ptr();
                        continue;
                    }
                    if (*curr).value() <= bound {
                        pred = curr;
                        curr = next.as_ptr();
                    } else {
                        break;
                    }
                }
            }

            (pred != self.head).then_some(pred)
        }
    }

    /// First node with value >= bound, or None if every element is smaller.
    fn seek_ceiling(&self, bound: &T) -> Option<NodePtr<T>> {
        unsafe {
            let mut pred = self.head;
            let mut found = ptr::null_mut();

            for level in (0..MAX_HEIGHT).rev() {
                let mut curr = MarkedPtr::new((*pred).next(level)).as_ptr();

                loop {
                    if curr.is_null() {
                        break;
                    }
                    let next = MarkedPtr::new((*curr).next(level));
                    if next.is_marked() {
                        curr = next.as_ptr();
                        continue;
                    }
                    if (*curr).value() < bound {
                        pred = curr;
                        curr = next.as_ptr();
                        continue;
                    }
                    break;
                }

                if level == 0 {
                    found = curr;
                }
            }

            (!found.is_null()).then_some(found)
        }
    }

    /// Rightmost live node, or None when empty.
    fn seek_last(&self) -> Option<NodePtr<T>> {
        unsafe {
            let mut pred = self.head;

            for level in (0..MAX_HEIGHT).rev() {
                let mut curr = MarkedPtr::new((*pred).next(level)).as_ptr();

                while !curr.is_null() {
                    let next = MarkedPtr::new((*curr).next(level));
                    if !next.is_marked() {
                        pred = curr;
                    }
                    curr = next.as_ptr();
                }
            }

            (pred != self.head).then_some(pred)
        }
    }

    /// First live node at level 0.
    fn first_node(&self) -> Option<NodePtr<T>> {
        unsafe {
            let mut curr = MarkedPtr::unmask((*self.head).next(0));

            while !curr.is_null() {
                let next = MarkedPtr::new((*curr).next(0));
                if !next.is_marked() {
                    return Some(curr);
                }
                curr = next.as_ptr();
            }

            None
        }
    }

    /// Next live node after `node` at level 0. Works from a node that has
    /// itself been removed: its forward pointer still leads back into the
    /// list, which is what keeps in-flight iterators on track.
    fn next_node(&self, node: NodePtr<T>) -> Option<NodePtr<T>> {
        unsafe {
            let mut curr = MarkedPtr::unmask((*node).next(0));

            while !curr.is_null() {
                let next = MarkedPtr::new((*curr).next(0));
                if !next.is_marked() {
                    return Some(curr);
                }
                curr = next.as_ptr();
            }

            None
        }
    }

    unsafe fn entry_at<'a>(&'a self, node: NodePtr<T>) -> R::GuardedRef<'a, T> {
        unsafe { R::make_ref((*node).value() as *const T) }
    }
}

impl<T: Ord, R: Reclaim> Default for SkipSet<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, R: Reclaim> FromIterator<T> for SkipSet<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let set = SkipSet::new();
        for value in iter {
            let _guard = R::pin();
            set.insert_inner(value);
        }
        set
    }
}

impl<T: Ord, R: Reclaim> Extend<T> for SkipSet<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _guard = R::pin();
            self.insert_inner(value);
        }
    }
}

impl<T, R: Reclaim> Drop for SkipSet<T, R> {
    fn drop(&mut self) {
        // Exclusive access: walk level 0 and free every still-linked node.
        // Nodes retired earlier are owned by the reclaimer, not by this walk.
        unsafe {
            let mut curr = MarkedPtr::unmask((*self.head).next(0));

            while !curr.is_null() {
                let next = MarkedPtr::new((*curr).next(0)).as_ptr();
                Node::dealloc(curr);
                curr = next;
            }

            Node::dealloc(self.head);
        }
    }
}

unsafe impl<T: Send, R: Reclaim> Send for SkipSet<T, R> {}
unsafe impl<T: Send + Sync, R: Reclaim> Sync for SkipSet<T, R> {}

// ============================================================================
// OrderedSet implementation
// ============================================================================

impl<T, R> OrderedSet<T> for SkipSet<T, R>
where
    T: Ord + Clone,
    R: Reclaim,
{
    type Entry<'a>
        = R::GuardedRef<'a, T>
    where
        Self: 'a,
        T: 'a;

    type Iter<'a>
        = Iter<'a, T, R>
    where
        Self: 'a,
        T: 'a;

    fn insert(&self, value: T) -> bool {
        // Pin before touching any node: the search traverses memory that a
        // concurrent remove may have already retired.
        let _guard = R::pin();
        self.insert_inner(value)
    }

    fn remove(&self, value: &T) -> bool {
        let _guard = R::pin();
        if let Some(node) = self.remove_inner(value) {
            unsafe {
                self.reclaim.retire(node, Node::dealloc);
            }
            true
        } else {
            false
        }
    }

    fn take(&self, value: &T) -> Option<T>
    where
        T: Clone,
    {
        let _guard = R::pin();
        let node = self.remove_inner(value)?;
        // Clone rather than move: readers that found the node before the
        // mark may still be holding references into it.
        let taken = unsafe { (*node).value().clone() };
        unsafe {
            self.reclaim.retire(node, Node::dealloc);
        }
        Some(taken)
    }

    fn contains(&self, value: &T) -> bool {
        let _guard = R::pin();
        self.seek(value).is_some()
    }

    fn get(&self, value: &T) -> Option<Self::Entry<'_>> {
        let _guard = R::pin();
        let node = self.seek(value)?;
        unsafe { Some(self.entry_at(node)) }
    }

    fn floor(&self, bound: &T) -> Option<Self::Entry<'_>> {
        let _guard = R::pin();
        let node = self.seek_floor(bound)?;
        unsafe { Some(self.entry_at(node)) }
    }

    fn ceiling(&self, bound: &T) -> Option<Self::Entry<'_>> {
        let _guard = R::pin();
        let node = self.seek_ceiling(bound)?;
        unsafe { Some(self.entry_at(node)) }
    }

    fn first(&self) -> Option<Self::Entry<'_>> {
        let _guard = R::pin();
        let node = self.first_node()?;
        unsafe { Some(self.entry_at(node)) }
    }

    fn last(&self) -> Option<Self::Entry<'_>> {
        let _guard = R::pin();
        let node = self.seek_last()?;
        unsafe { Some(self.entry_at(node)) }
    }

    fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    fn is_empty(&self) -> bool {
        let _guard = R::pin();
        self.first_node().is_none()
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter::all(self)
    }

    fn iter_from(&self, bound: &T) -> Self::Iter<'_> {
        Iter::from_bound(self, bound)
    }
}

// ============================================================================
// Iterator
// ============================================================================

/// Ascending, weakly consistent iterator over a [`SkipSet`].
///
/// Holds the reclaimer's read guard for its whole lifetime, so every node the
/// cursor can reach stays allocated; it holds no lock and never prevents
/// writers from making progress. Values are yielded as clones.
pub struct Iter<'a, T, R: Reclaim> {
    _guard: R::ReadGuard,
    set: &'a SkipSet<T, R>,
    node: Option<NodePtr<T>>,
}

impl<'a, T: Ord, R: Reclaim> Iter<'a, T, R> {
    fn all(set: &'a SkipSet<T, R>) -> Self {
        // Guard first, then read: the first node must not be reclaimed
        // between the two steps
        let guard = R::pin();
        let node = set.first_node();
        Iter {
            _guard: guard,
            set,
            node,
        }
    }

    fn from_bound(set: &'a SkipSet<T, R>, bound: &T) -> Self {
        let guard = R::pin();
        let node = set.seek_ceiling(bound);
        Iter {
            _guard: guard,
            set,
            node,
        }
    }
}

impl<T: Ord + Clone, R: Reclaim> Iterator for Iter<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = self.set.next_node(node);
        unsafe { Some((*node).value().clone()) }
    }
}

// ============================================================================
// Tests
// ============================================================================

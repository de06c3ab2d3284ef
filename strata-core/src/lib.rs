//! Concurrent ordered-set engine.
//!
//! The centerpiece is [`SkipSet`], a lock-free probabilistic skip list:
//! sorted, duplicate-free, safe for any number of concurrent readers and
//! writers, with weakly consistent ascending iteration. The public surface is
//! the [`OrderedSet`] trait; memory reclamation is pluggable through the
//! [`reclaim`] module (`strata-crossbeam` provides the epoch-based strategy
//! for production use).

pub mod harness;
pub mod ordered_set;
pub mod reclaim;
pub mod skip_set;

pub(crate) mod marked;

pub use ordered_set::OrderedSet;
pub use reclaim::{DeferredReclaim, DeferredRef, Reclaim};
pub use skip_set::{Iter, SkipSet};

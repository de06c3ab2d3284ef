//! Crossbeam-based reclamation for strata collections.
//!
//! Provides [`EpochReclaim`], the production implementation of the
//! [`Reclaim`](strata_core::Reclaim) trait, backed by crossbeam-epoch.
//!
//! # Usage
//!
//! ```ignore
//! use strata_core::OrderedSet;
//! use strata_crossbeam::EpochSkipSet;
//!
//! let set: EpochSkipSet<i32> = EpochSkipSet::new();
//! set.insert(42);
//! ```

pub mod epoch_reclaim;

pub use epoch_reclaim::{EpochReclaim, EpochRef};

/// A [`strata_core::SkipSet`] with epoch-based memory reclamation.
pub type EpochSkipSet<T> = strata_core::SkipSet<T, EpochReclaim>;

use rstest::rstest;
use serial_test::serial;
use strata_core::harness::core_ops::*;
use strata_core::harness::stress::*;
use strata_core::{DeferredReclaim, OrderedSet, Reclaim, SkipSet};
use strata_crossbeam::{EpochReclaim, EpochSkipSet};

// Type-level parametrization over reclamation strategy
trait ReclaimCase {
    type Strategy: Reclaim + 'static;
}

struct UseDeferred;
struct UseEpoch;

impl ReclaimCase for UseDeferred {
    type Strategy = DeferredReclaim;
}

impl ReclaimCase for UseEpoch {
    type Strategy = EpochReclaim;
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn basic_operations<C: ReclaimCase>(#[case] _strategy: C) {
    test_basic_operations(&SkipSet::<i32, C::Strategy>::new());
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn round_trip<C: ReclaimCase>(#[case] _strategy: C) {
    test_round_trip(&SkipSet::<i32, C::Strategy>::new());
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn removal_sequence<C: ReclaimCase>(#[case] _strategy: C) {
    test_removal_sequence(&SkipSet::<i32, C::Strategy>::new());
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn navigation<C: ReclaimCase>(#[case] _strategy: C) {
    test_navigation(&SkipSet::<i32, C::Strategy>::new());
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn concurrent_inserts<C: ReclaimCase>(#[case] _strategy: C) {
    test_concurrent_inserts::<SkipSet<i32, C::Strategy>>();
}

#[rstest]
#[case::deferred(UseDeferred)]
#[case::epoch(UseEpoch)]
fn concurrent_mixed_operations<C: ReclaimCase>(#[case] _strategy: C) {
    test_concurrent_mixed_operations::<SkipSet<i32, C::Strategy>>();
}

// ----------------------------------------------------------------------------
// Stress suites against the epoch-backed set
// ----------------------------------------------------------------------------

#[test]
#[serial(epoch_stress)]
fn epoch_read_your_writes() {
    test_read_your_writes::<EpochSkipSet<i32>>();
}

#[test]
#[serial(epoch_stress)]
fn epoch_concurrent_remove_single_winner() {
    test_concurrent_remove_single_winner::<EpochSkipSet<i32>>();
}

#[test]
#[serial(epoch_stress)]
fn epoch_high_contention_mixed() {
    test_high_contention_mixed::<EpochSkipSet<i32>>();
}

#[test]
#[serial(epoch_stress)]
fn epoch_rapid_reinsert() {
    test_rapid_reinsert::<EpochSkipSet<i32>>();
}

#[test]
#[serial(epoch_stress)]
fn epoch_iteration_under_mutation() {
    test_iteration_under_mutation::<EpochSkipSet<i32>>();
}

#[test]
#[serial(epoch_stress)]
fn epoch_partitioned_replay() {
    test_partitioned_replay::<EpochSkipSet<i32>>();
}

// ----------------------------------------------------------------------------
// Reclamation behavior specific to the epoch strategy
// ----------------------------------------------------------------------------

#[test]
#[serial(epoch_stress)]
fn reclamation_cycling() {
    // Insert and remove far more nodes than would fit in memory if every
    // retired node were held for the lifetime of the set. Correctness of the
    // answers is what we assert; memory is the collector's problem.
    let set: EpochSkipSet<i32> = EpochSkipSet::new();

    for round in 0..20 {
        for i in 0..1000 {
            assert!(set.insert(i), "round {round}: insert {i}");
        }
        for i in (0..1000).step_by(2) {
            assert!(set.remove(&i));
        }
        for i in (0..1000).step_by(2) {
            assert!(!set.contains(&i));
        }
        for i in (1..1000).step_by(2) {
            assert!(set.contains(&i));
            assert!(set.remove(&i));
        }
        assert!(set.is_empty());
    }
}

#[test]
fn guarded_ref_usable_after_lookup() {
    let set: EpochSkipSet<i32> = EpochSkipSet::new();
    set.insert(5);
    set.insert(10);

    if let Some(entry) = set.get(&10) {
        assert_eq!(*entry, 10);
        let doubled = *entry * 2;
        assert_eq!(doubled, 20);
    } else {
        panic!("value 10 should be present");
    }
}

#[test]
fn to_vec_matches_iter() {
    let set: EpochSkipSet<i32> = [10, 5, 15, 3, 7].into_iter().collect();
    assert_eq!(set.to_vec(), vec![3, 5, 7, 10, 15]);
    assert_eq!(set.iter().collect::<Vec<_>>(), set.to_vec());
    assert_eq!(set.iter_from(&6).collect::<Vec<_>>(), vec![7, 10, 15]);
}

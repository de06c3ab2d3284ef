use rstest::rstest;
use strata_core::harness::core_ops::*;
use strata_core::{OrderedSet, SkipSet};

type TestSet = SkipSet<i32>;

#[test]
fn basic_operations() {
    test_basic_operations(&TestSet::new());
}

#[test]
fn duplicate_rejection() {
    test_duplicate_rejection(&TestSet::new());
}

#[test]
fn round_trip() {
    test_round_trip(&TestSet::new());
}

#[test]
fn removal_sequence() {
    test_removal_sequence(&TestSet::new());
}

#[test]
fn membership_consistency() {
    test_membership_consistency(&TestSet::new());
}

#[test]
fn sorted_iteration() {
    test_sorted_iteration(&TestSet::new());
}

#[test]
fn navigation() {
    test_navigation(&TestSet::new());
}

#[test]
fn len_reporting() {
    test_len_reporting(&TestSet::new());
}

#[test]
fn concurrent_inserts() {
    test_concurrent_inserts::<TestSet>();
}

#[test]
fn concurrent_mixed_operations() {
    test_concurrent_mixed_operations::<TestSet>();
}

// ----------------------------------------------------------------------------
// Shapes the generic suites do not cover
// ----------------------------------------------------------------------------

#[rstest]
#[case::tiny(3)]
#[case::small(64)]
#[case::larger_than_tower(5000)]
fn round_trip_at_size(#[case] n: i32) {
    let set = TestSet::new();
    // descending insert order is the worst case for a skip list's lanes
    for value in (0..n).rev() {
        assert!(set.insert(value));
    }
    let observed = set.to_vec();
    assert_eq!(observed.len(), n as usize);
    assert!(observed.windows(2).all(|w| w[0] + 1 == w[1]));
}

#[rstest]
#[case::empty(&[], None, None)]
#[case::single(&[5], Some(5), Some(5))]
#[case::pair(&[5, 9], Some(5), Some(9))]
fn first_and_last(#[case] values: &[i32], #[case] first: Option<i32>, #[case] last: Option<i32>) {
    let set: TestSet = values.iter().copied().collect();
    assert_eq!(set.first().map(|e| *e), first);
    assert_eq!(set.last().map(|e| *e), last);
}

#[test]
fn string_elements() {
    let set: SkipSet<String> = ["pear", "apple", "orange"]
        .into_iter()
        .map(String::from)
        .collect();

    assert_eq!(set.to_vec(), vec!["apple", "orange", "pear"]);
    assert!(set.contains(&"apple".to_owned()));
    assert!(set.remove(&"orange".to_owned()));
    assert_eq!(set.to_vec(), vec!["apple", "pear"]);
}

#[test]
fn iter_reflects_insert_completed_before_creation() {
    let set = TestSet::new();
    for i in 0..100 {
        set.insert(i);

        // an iterator created after the insert returned must see the value
        let observed: Vec<i32> = set.iter().collect();
        assert_eq!(observed.len() as i32, i + 1);
        assert_eq!(observed[i as usize], i);
    }
}

#[test]
fn guarded_refs_outlive_removal() {
    // With deferred reclamation the entry stays readable even after the
    // element is removed from the set, until the set itself goes away.
    let set = TestSet::new();
    set.insert(11);

    let entry = set.get(&11).unwrap();
    assert!(set.remove(&11));
    assert_eq!(*entry, 11);
    assert!(!set.contains(&11));
}

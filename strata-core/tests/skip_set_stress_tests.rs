use serial_test::serial;
use strata_core::SkipSet;
use strata_core::harness::stress::*;

type TestSet = SkipSet<i32>;

#[test]
#[serial(stress)]
fn concurrent_remove_single_winner() {
    test_concurrent_remove_single_winner::<TestSet>();
}

#[test]
#[serial(stress)]
fn read_your_writes() {
    test_read_your_writes::<TestSet>();
}

#[test]
#[serial(stress)]
fn find_during_modifications() {
    test_find_during_modifications::<TestSet>();
}

#[test]
#[serial(stress)]
fn publication_ordering() {
    test_publication_ordering::<TestSet>();
}

#[test]
#[serial(stress)]
fn extreme_contention_single_key() {
    test_extreme_contention_single_key::<TestSet>();
}

#[test]
#[serial(stress)]
fn high_contention_mixed() {
    test_high_contention_mixed::<TestSet>();
}

#[test]
#[serial(stress)]
fn progress_guarantee() {
    test_progress_guarantee::<TestSet>();
}

#[test]
#[serial(stress)]
fn rapid_reinsert() {
    test_rapid_reinsert::<TestSet>();
}

#[test]
#[serial(stress)]
fn iteration_under_mutation() {
    test_iteration_under_mutation::<TestSet>();
}

#[test]
#[serial(stress)]
fn partitioned_replay() {
    test_partitioned_replay::<TestSet>();
}

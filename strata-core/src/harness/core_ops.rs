//! Single-threaded and lightly concurrent correctness suites.

use std::sync::Arc;
use std::thread;

use crate::ordered_set::OrderedSet;

/// Insert, contains, duplicate rejection, remove.
pub fn test_basic_operations<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    assert!(set.insert(5));
    assert!(set.insert(10));
    assert!(set.insert(3));
    assert!(set.insert(7));
    assert!(set.insert(1));

    assert!(!set.insert(5));
    assert!(!set.insert(10));

    assert!(set.contains(&1));
    assert!(set.contains(&3));
    assert!(set.contains(&5));
    assert!(set.contains(&7));
    assert!(set.contains(&10));
    assert!(!set.contains(&2));
    assert!(!set.contains(&99));

    assert!(set.remove(&3));
    assert!(!set.contains(&3));
    assert!(!set.remove(&3));

    assert!(set.contains(&1));
    assert!(set.contains(&5));
    assert!(set.contains(&7));
    assert!(set.contains(&10));
}

/// A second insert of a present value reports no change and leaves a single
/// copy behind.
pub fn test_duplicate_rejection<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    assert!(set.insert(42));
    assert!(!set.insert(42));
    assert!(!set.insert(42));

    let copies = set.iter().filter(|v| *v == 42).count();
    assert_eq!(copies, 1);

    assert!(set.remove(&42));
    assert!(set.insert(42));
    assert_eq!(set.iter().filter(|v| *v == 42).count(), 1);
}

/// Inserting N distinct values yields exactly those values, ascending.
pub fn test_round_trip<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    for value in [5, 3, 8, 1] {
        assert!(set.insert(value));
    }
    assert_eq!(set.to_vec(), vec![1, 3, 5, 8]);
}

/// Removal takes exactly the requested element out of iteration order.
pub fn test_removal_sequence<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    for value in [1, 2, 3] {
        assert!(set.insert(value));
    }
    assert!(set.remove(&2));
    assert_eq!(set.to_vec(), vec![1, 3]);
    assert!(!set.remove(&2));
    assert_eq!(set.to_vec(), vec![1, 3]);
}

/// contains reflects the latest completed insert/remove on a single thread.
pub fn test_membership_consistency<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    for round in 0..100 {
        let key = round % 7;
        if set.contains(&key) {
            assert!(set.remove(&key));
            assert!(!set.contains(&key));
        } else {
            assert!(set.insert(key));
            assert!(set.contains(&key));
        }
    }
}

/// Pseudo-random insert order, sorted and duplicate-free iteration out.
pub fn test_sorted_iteration<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let mut inserted = Vec::new();
    for _ in 0..500 {
        let value = rng.i32(0..10_000);
        if set.insert(value) {
            inserted.push(value);
        }
    }
    inserted.sort_unstable();

    let observed = set.to_vec();
    assert_eq!(observed, inserted);
    assert!(observed.windows(2).all(|w| w[0] < w[1]));
}

/// floor/ceiling/first/last/iter_from against a known layout.
pub fn test_navigation<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    for value in [10, 20, 30, 40, 50] {
        set.insert(value);
    }

    assert_eq!(set.first().map(|e| *e), Some(10));
    assert_eq!(set.last().map(|e| *e), Some(50));

    assert_eq!(set.floor(&35).map(|e| *e), Some(30));
    assert_eq!(set.floor(&30).map(|e| *e), Some(30));
    assert_eq!(set.floor(&9).map(|e| *e), None);
    assert_eq!(set.floor(&99).map(|e| *e), Some(50));

    assert_eq!(set.ceiling(&35).map(|e| *e), Some(40));
    assert_eq!(set.ceiling(&40).map(|e| *e), Some(40));
    assert_eq!(set.ceiling(&51).map(|e| *e), None);
    assert_eq!(set.ceiling(&-3).map(|e| *e), Some(10));

    assert_eq!(set.iter_from(&25).collect::<Vec<_>>(), vec![30, 40, 50]);
    assert_eq!(
        set.iter_from(&10).collect::<Vec<_>>(),
        vec![10, 20, 30, 40, 50]
    );
    assert!(set.iter_from(&51).next().is_none());

    set.remove(&30);
    assert_eq!(set.floor(&35).map(|e| *e), Some(20));
    assert_eq!(set.ceiling(&25).map(|e| *e), Some(40));
}

/// Approximate size bookkeeping in the absence of concurrency.
pub fn test_len_reporting<S>(set: &S)
where
    S: OrderedSet<i32>,
{
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);

    for i in 0..200 {
        set.insert(i);
    }
    assert_eq!(set.len(), 200);
    assert!(!set.is_empty());

    for i in (0..200).step_by(2) {
        set.remove(&i);
    }
    assert_eq!(set.len(), 100);

    for i in 0..200 {
        set.remove(&i);
    }
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

/// Disjoint concurrent inserts all land.
pub fn test_concurrent_inserts<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 4;
    let items_per_thread = 1000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..items_per_thread {
                    let key = thread_id * items_per_thread + i;
                    assert!(set.insert(key));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for key in 0..(num_threads * items_per_thread) {
        assert!(set.contains(&key), "missing key {key}");
    }

    let snapshot = set.to_vec();
    assert_eq!(snapshot.len(), (num_threads * items_per_thread) as usize);
    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
}

/// Random interleaved operations on overlapping keys; the structure must
/// stay sorted and duplicate-free throughout.
pub fn test_concurrent_mixed_operations<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 6;
    let num_operations = 2000;

    for i in 0..50 {
        set.insert(i * 3);
    }

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..num_operations {
                    let key = (thread_id * num_operations + i) % 500;

                    match i % 5 {
                        0 => {
                            set.insert(key);
                        }
                        1 => {
                            set.remove(&key);
                        }
                        2 => {
                            set.contains(&key);
                        }
                        3 => {
                            let _ = set.get(&key);
                        }
                        4 => {
                            let _ = set.take(&key);
                        }
                        _ => unreachable!(),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = set.to_vec();
    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
}

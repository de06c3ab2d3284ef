//! Contention, progress and iteration-under-mutation suites.
//!
//! These run many threads for noticeable wall-clock time; drive them from
//! `#[serial]` integration tests so they do not fight each other for cores.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use crate::ordered_set::OrderedSet;

/// Exactly one of many concurrent removers of the same value succeeds.
pub fn test_concurrent_remove_single_winner<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 32;
    let test_value = 42;

    set.insert(test_value);

    let winners = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let set = Arc::clone(&set);
            let winners = Arc::clone(&winners);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if set.remove(&test_value) {
                    winners.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(winners.load(Ordering::Relaxed), 1);
    assert!(!set.contains(&test_value));
}

/// Each thread works on its own keys and must observe its own completed
/// operations immediately.
pub fn test_read_your_writes<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let num_ops = 5000;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..num_ops {
                    let key = (t * num_ops + i) as i32;

                    assert!(set.insert(key), "failed to insert unique key {key}");
                    assert!(set.contains(&key), "key {key} not visible after insert");
                    assert!(set.remove(&key), "failed to remove own key {key}");
                    assert!(!set.contains(&key), "key {key} visible after remove");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(set.is_empty());
}

/// Point queries keep answering while writers churn the surrounding keys.
pub fn test_find_during_modifications<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let stop = Arc::new(AtomicBool::new(false));
    let hits = Arc::new(AtomicUsize::new(0));
    let misses = Arc::new(AtomicUsize::new(0));

    // Evens are permanent residents
    for i in 0..1000 {
        set.insert(i * 2);
    }

    let mut handles = vec![];

    for t in 0..4i32 {
        let set = Arc::clone(&set);
        let stop = Arc::clone(&stop);
        handles.push(thread::spawn(move || {
            let mut i = 0;
            while !stop.load(Ordering::Relaxed) {
                let val = 10_000 + t * 10_000 + i;
                if i % 2 == 0 {
                    set.insert(val);
                } else {
                    set.remove(&val);
                }
                i += 1;
            }
        }));
    }

    for _ in 0..8 {
        let set = Arc::clone(&set);
        let stop = Arc::clone(&stop);
        let hits = Arc::clone(&hits);
        let misses = Arc::clone(&misses);
        handles.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                for i in 0..2000 {
                    if set.contains(&i) {
                        hits.fetch_add(1, Ordering::Relaxed);
                    } else {
                        misses.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }

    thread::sleep(Duration::from_secs(2));
    stop.store(true, Ordering::Relaxed);

    for handle in handles {
        handle.join().unwrap();
    }

    // The permanent evens alone guarantee a sizeable hit count
    assert!(hits.load(Ordering::Relaxed) > 0);
    for i in 0..1000 {
        assert!(set.contains(&(i * 2)), "permanent key {} lost", i * 2);
    }
}

/// Insertion publishes writes made before it: a consumer that sees the
/// element also sees the flag stored before the insert.
pub fn test_publication_ordering<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    for _ in 0..100 {
        let set = Arc::new(S::default());
        let payload = Arc::new(AtomicUsize::new(0));

        let producer = {
            let set = Arc::clone(&set);
            let payload = Arc::clone(&payload);
            thread::spawn(move || {
                payload.store(42, Ordering::Relaxed);
                set.insert(7);
            })
        };

        let consumer = {
            let set = Arc::clone(&set);
            let payload = Arc::clone(&payload);
            thread::spawn(move || {
                while !set.contains(&7) {
                    thread::yield_now();
                }
                assert_eq!(payload.load(Ordering::Relaxed), 42);
            })
        };

        producer.join().unwrap();
        consumer.join().unwrap();
    }
}

/// Every thread hammers one key; the run must terminate with inserts and
/// removes balanced, which fails if ownership of a removal is ever split.
pub fn test_extreme_contention_single_key<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 16;
    let ops_per_thread = 2000;
    let the_key = 42;

    let inserts = Arc::new(AtomicUsize::new(0));
    let removes = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let set = Arc::clone(&set);
            let inserts = Arc::clone(&inserts);
            let removes = Arc::clone(&removes);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ops_per_thread {
                    if set.insert(the_key) {
                        inserts.fetch_add(1, Ordering::Relaxed);
                        if set.remove(&the_key) {
                            removes.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total_inserts = inserts.load(Ordering::Relaxed);
    let total_removes = removes.load(Ordering::Relaxed);
    assert_eq!(total_inserts, total_removes);
    assert!(!set.contains(&the_key));
}

/// Mixed random workload on a small shared key space; afterwards the set
/// must still be sorted and duplicate-free.
pub fn test_high_contention_mixed<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 16;
    let duration = Duration::from_secs(2);
    let stop = Arc::new(AtomicBool::new(false));
    let ops = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            let stop = Arc::clone(&stop);
            let ops = Arc::clone(&ops);
            thread::spawn(move || {
                let start = Instant::now();
                let mut i = 0i32;

                while !stop.load(Ordering::Relaxed) {
                    let key = (i * 31 + t as i32) % 1000;

                    match i % 4 {
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
                        _ => unreachable!(),
                    }

                    ops.fetch_add(1, Ordering::Relaxed);
                    i += 1;

                    if start.elapsed() > duration {
                        stop.store(true, Ordering::Relaxed);
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
    assert!(ops.load(Ordering::Relaxed) > 0);
}

/// No global stall: with every thread spinning on its own keys, all of them
/// keep completing operations.
pub fn test_progress_guarantee<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = thread::available_parallelism()
        .map(|n| n.get().min(8))
        .unwrap_or(4);

    let counters: Vec<_> = (0..num_threads)
        .map(|_| Arc::new(AtomicUsize::new(0)))
        .collect();
    let stop = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            let counter = Arc::clone(&counters[t]);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut i = 0i32;
                while !stop.load(Ordering::Relaxed) {
                    let key = (t as i32) * 1_000_000 + i;

                    if set.insert(key) {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                    if set.remove(&key) {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }

                    i += 1;
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_secs(2));
    stop.store(true, Ordering::Relaxed);

    for handle in handles {
        handle.join().unwrap();
    }

    for (t, counter) in counters.iter().enumerate() {
        assert!(
            counter.load(Ordering::Relaxed) > 0,
            "thread {t} made no progress"
        );
    }
}

/// Rapid remove/reinsert of the same values from many threads; recycled
/// positions must not resurrect stale links.
pub fn test_rapid_reinsert<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 16;
    let iterations = 5000;
    let key_range = 10;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..iterations {
                    let key = (t + i) % key_range;
                    set.insert(key);
                    set.remove(&key);
                    set.insert(key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = set.to_vec();
    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
    assert!(snapshot.iter().all(|v| (0..key_range).contains(v)));
}

/// Iterators running against live mutators: strictly increasing output,
/// never a crash, and elements that are never removed always show up.
pub fn test_iteration_under_mutation<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let stop = Arc::new(AtomicBool::new(false));

    // Multiples of 10 stay put for the whole run
    let permanent: Vec<i32> = (0..100).map(|i| i * 10).collect();
    for &key in &permanent {
        set.insert(key);
    }

    let mut handles = vec![];

    // Mutators churn everything that is not a multiple of 10
    for t in 0..4u64 {
        let set = Arc::clone(&set);
        let stop = Arc::clone(&stop);
        handles.push(thread::spawn(move || {
            let mut rng = fastrand::Rng::with_seed(0xc0ffee + t);
            while !stop.load(Ordering::Relaxed) {
                let key = rng.i32(0..1000);
                if key % 10 == 0 {
                    continue;
                }
                if rng.bool() {
                    set.insert(key);
                } else {
                    set.remove(&key);
                }
            }
        }));
    }

    for _ in 0..4 {
        let set = Arc::clone(&set);
        let stop = Arc::clone(&stop);
        let permanent = permanent.clone();
        handles.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let observed = set.to_vec();
                assert!(
                    observed.windows(2).all(|w| w[0] < w[1]),
                    "iteration went non-monotonic"
                );
                let observed: HashSet<i32> = observed.into_iter().collect();
                for &key in &permanent {
                    assert!(observed.contains(&key), "iteration lost stable key {key}");
                }
            }
        }));
    }

    thread::sleep(Duration::from_secs(2));
    stop.store(true, Ordering::Relaxed);

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Threads own disjoint key partitions and record every operation result;
/// the final contents must equal each thread's sequential replay.
pub fn test_partitioned_replay<S>()
where
    S: OrderedSet<i32> + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 8u64;
    let keys_per_thread = 1000i32;
    let ops_per_thread = 20_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                let base = (t as i32) * keys_per_thread;
                let mut rng = fastrand::Rng::with_seed(0xfeed + t);
                let mut replay = HashSet::new();

                for _ in 0..ops_per_thread {
                    let key = base + rng.i32(0..keys_per_thread);
                    if rng.bool() {
                        assert_eq!(set.insert(key), replay.insert(key));
                    } else {
                        assert_eq!(set.remove(&key), replay.remove(&key));
                    }
                }

                replay
            })
        })
        .collect();

    let mut expected = HashSet::new();
    for handle in handles {
        expected.extend(handle.join().unwrap());
    }

    let observed: Vec<i32> = set.to_vec();
    assert!(observed.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(observed.len(), expected.len());
    for key in &observed {
        assert!(expected.contains(key));
    }
}

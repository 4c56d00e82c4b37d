use sortbench_core::sync::SpinLock;
use std::sync::Arc;
use std::thread;

/// Tests that try_lock fails while a guard is live and succeeds after it drops.
#[test]
fn test_try_lock_while_held() {
    let lock = SpinLock::new(5u32);

    let mut guard = lock.lock();
    *guard += 1;
    assert!(lock.try_lock().is_none());
    drop(guard);

    let guard = lock.try_lock().expect("lock is free");
    assert_eq!(*guard, 6);
    assert!(lock.try_lock().is_none());
}

/// Tests that lock serializes increments from several threads.
#[test]
fn test_lock_across_threads() {
    let lock = Arc::new(SpinLock::new(0u32));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                for _ in 0..1000 {
                    *lock.lock() += 1;
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(*lock.lock(), 4000);
}

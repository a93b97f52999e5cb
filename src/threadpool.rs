//! The thread-pool oracle used by every parallel search strategy: a fixed
//! worker count and a single dynamic fan-out primitive. Work items are handed
//! out one at a time through a channel (`schedule(dynamic, 1)`-equivalent)
//! rather than pre-partitioned into equal chunks, so a worker that finishes
//! an expensive subtree early picks up the next available item instead of
//! sitting idle.

use crossbeam_channel::unbounded;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ThreadPool {
    thread_count: AtomicUsize,
}

impl ThreadPool {
    #[must_use]
    pub fn new(thread_count: usize) -> Self {
        ThreadPool {
            thread_count: AtomicUsize::new(thread_count.max(1)),
        }
    }

    pub fn set_thread_count(&self, n: usize) {
        self.thread_count.store(n.max(1), Ordering::SeqCst);
    }

    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.thread_count.load(Ordering::SeqCst)
    }

    /// Runs `body(private, index)` once for every `index` in `0..len`,
    /// distributing indices dynamically across `thread_count()` workers.
    /// `make_private` is called once per dispatched item and must hand each
    /// worker an owned copy of whatever private per-fork state the body
    /// needs (a board position, a move arena) — never a shared `&mut`.
    pub fn parallel_for_dynamic<T, Priv, Body>(&self, len: usize, make_private: Priv, body: Body)
    where
        T: Send,
        Priv: Fn() -> T + Sync,
        Body: Fn(T, usize) + Send + Sync,
    {
        if len == 0 {
            return;
        }
        let workers = self.thread_count().min(len).max(1);
        let (tx, rx) = unbounded::<usize>();
        for i in 0..len {
            tx.send(i).expect("receiver outlives this scope");
        }
        drop(tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let rx = rx.clone();
                let make_private = &make_private;
                let body = &body;
                scope.spawn(move || {
                    for i in rx.iter() {
                        let private = make_private();
                        body(private, i);
                    }
                });
            }
        });
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        ThreadPool::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI64;

    #[test]
    fn visits_every_index_exactly_once() {
        let pool = ThreadPool::new(4);
        let seen: Vec<AtomicI64> = (0..37).map(|_| AtomicI64::new(0)).collect();
        pool.parallel_for_dynamic(37, || (), |(), i| {
            seen[i].fetch_add(1, Ordering::Relaxed);
        });
        for counter in &seen {
            assert_eq!(counter.load(Ordering::Relaxed), 1);
        }
    }

    #[test]
    fn single_worker_is_equivalent_to_serial() {
        let pool = ThreadPool::new(1);
        let total = std::sync::atomic::AtomicI64::new(0);
        pool.parallel_for_dynamic(10, || (), |(), i| {
            total.fetch_add(i as i64, Ordering::Relaxed);
        });
        assert_eq!(total.load(Ordering::Relaxed), 45);
    }

    #[test]
    fn zero_length_is_a_no_op() {
        let pool = ThreadPool::new(4);
        pool.parallel_for_dynamic(0, || (), |(), _i: usize| panic!("should not run"));
    }
}

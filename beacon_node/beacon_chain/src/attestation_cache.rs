//! Single-flight coordination for `AttestationData` production (spec §4.C): at most one producer
//! per `(slot, committee_index)` fingerprint, with later callers served the in-flight producer's
//! result or a previously cached one.

use crate::metrics;
use crate::Error;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use types::{AttestationData, AttestationDataRequest};

const INITIAL_BACKOFF: Duration = Duration::from_nanos(10);
const BACKOFF_MULTIPLIER: f64 = 1.1;
const MAX_BACKOFF: Duration = Duration::from_millis(100);

/// A cheap, cloneable cancellation handle, the direct analogue of a `context.Context` for this
/// narrow purpose: no deadline or value propagation, just a flag a caller can flip from another
/// thread to abort an in-progress `Get` poll.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct Inner {
    /// Completed entries in insertion order; the front is evicted first once `capacity` is
    /// exceeded.
    entries: Vec<(String, AttestationData)>,
    in_progress: HashSet<String>,
}

/// FIFO-bounded `(request, response)` cache plus an in-progress set, guarded by a single
/// read/write lock exactly as described in the spec: readers hold the read side only across the
/// dictionary lookup, and sleeps happen outside any lock.
pub struct AttestationCache {
    inner: RwLock<Inner>,
    capacity: usize,
}

impl AttestationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                in_progress: HashSet::new(),
            }),
            capacity,
        }
    }

    /// Backoff-bounded poll: while `req`'s fingerprint is in-progress, release the read lock and
    /// sleep with exponentially increasing (capped) delay, checking cancellation on every
    /// iteration. Once the fingerprint is no longer in-progress, returns the cached response (a
    /// hit) or `None` (a miss).
    pub fn get(
        &self,
        req: &AttestationDataRequest,
        cancel: &CancelToken,
    ) -> Result<Option<AttestationData>, Error> {
        let key = req.cache_key();
        let mut delay = INITIAL_BACKOFF;

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            {
                let inner = self.inner.read();
                if !inner.in_progress.contains(&key) {
                    let hit = inner
                        .entries
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|(_, v)| *v);

                    if hit.is_some() {
                        metrics::inc_counter(&metrics::ATTESTATION_CACHE_HIT_COUNT);
                    } else {
                        metrics::inc_counter(&metrics::ATTESTATION_CACHE_MISS_COUNT);
                    }

                    return Ok(hit);
                }
            }

            std::thread::sleep(delay);
            delay = std::cmp::min(delay.mul_f64(BACKOFF_MULTIPLIER), MAX_BACKOFF);
        }
    }

    /// Atomically inserts `req`'s fingerprint into the in-progress set. Fails with
    /// `AlreadyInProgress` if another producer is already building it.
    pub fn mark_in_progress(&self, req: &AttestationDataRequest) -> Result<(), Error> {
        let mut inner = self.inner.write();
        if !inner.in_progress.insert(req.cache_key()) {
            return Err(Error::AlreadyInProgress);
        }
        Ok(())
    }

    /// Removes `req`'s fingerprint from the in-progress set. Idempotent: a failed producer must
    /// still call this before returning, so waiters observe a miss rather than blocking forever.
    pub fn mark_not_in_progress(&self, req: &AttestationDataRequest) {
        self.inner.write().in_progress.remove(&req.cache_key());
    }

    /// Inserts `(req, data)` iff absent, then trims the FIFO to `capacity` by evicting the oldest
    /// entries.
    pub fn put(&self, req: &AttestationDataRequest, data: AttestationData) {
        let key = req.cache_key();
        let mut inner = self.inner.write();

        if inner.entries.iter().any(|(k, _)| *k == key) {
            return;
        }

        inner.entries.push((key, data));
        while inner.entries.len() > self.capacity {
            inner.entries.remove(0);
        }

        metrics::set_gauge(&metrics::ATTESTATION_CACHE_SIZE, inner.entries.len() as i64);
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Checkpoint, Hash256, Slot};

    fn data(slot: u64) -> AttestationData {
        AttestationData {
            slot: Slot::new(slot),
            index: 0,
            beacon_block_root: Hash256::zero(),
            source: Checkpoint::default(),
            target: Checkpoint::default(),
        }
    }

    fn req(slot: u64) -> AttestationDataRequest {
        AttestationDataRequest {
            slot: Slot::new(slot),
            committee_index: 0,
        }
    }

    #[test]
    fn miss_then_hit_after_put() {
        let cache = AttestationCache::new(4);
        let cancel = CancelToken::new();

        assert_eq!(cache.get(&req(1), &cancel).unwrap(), None);
        cache.put(&req(1), data(1));
        assert_eq!(cache.get(&req(1), &cancel).unwrap(), Some(data(1)));
    }

    #[test]
    fn fifo_eviction_drops_oldest_entry() {
        let cache = AttestationCache::new(2);
        cache.put(&req(1), data(1));
        cache.put(&req(2), data(2));
        cache.put(&req(3), data(3));

        assert_eq!(cache.len(), 2);
        let cancel = CancelToken::new();
        assert_eq!(cache.get(&req(1), &cancel).unwrap(), None);
        assert_eq!(cache.get(&req(2), &cancel).unwrap(), Some(data(2)));
        assert_eq!(cache.get(&req(3), &cancel).unwrap(), Some(data(3)));
    }

    #[test]
    fn mark_in_progress_is_exclusive_and_idempotent_to_clear() {
        let cache = AttestationCache::new(4);
        let r = req(5);

        cache.mark_in_progress(&r).unwrap();
        assert_eq!(cache.mark_in_progress(&r), Err(Error::AlreadyInProgress));

        cache.mark_not_in_progress(&r);
        cache.mark_not_in_progress(&r); // idempotent
        cache.mark_in_progress(&r).unwrap();
    }

    #[test]
    fn put_is_add_if_not_present() {
        let cache = AttestationCache::new(4);
        cache.put(&req(1), data(1));
        cache.put(&req(1), data(99)); // ignored, entry already present
        let cancel = CancelToken::new();
        assert_eq!(cache.get(&req(1), &cancel).unwrap(), Some(data(1)));
    }

    #[test]
    fn waiter_observes_completion_once_producer_clears_in_progress() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let cache = StdArc::new(AttestationCache::new(4));
        let r = req(7);
        cache.mark_in_progress(&r).unwrap();

        let producer_cache = cache.clone();
        let producer_req = r;
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            producer_cache.put(&producer_req, data(7));
            producer_cache.mark_not_in_progress(&producer_req);
        });

        let cancel = CancelToken::new();
        let result = cache.get(&r, &cancel).unwrap();
        handle.join().unwrap();

        assert_eq!(result, Some(data(7)));
    }

    #[test]
    fn cancellation_is_observed_during_poll() {
        let cache = AttestationCache::new(4);
        let r = req(9);
        cache.mark_in_progress(&r).unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();

        assert_eq!(cache.get(&r, &cancel), Err(Error::Cancelled));
    }

    #[test]
    fn fifo_eviction_holds_for_130_distinct_puts_at_capacity_128() {
        let cache = AttestationCache::new(128);
        for i in 0..130u64 {
            cache.put(&req(i), data(i));
        }
        assert_eq!(cache.len(), 128);

        let cancel = CancelToken::new();
        // The two oldest entries (slots 0 and 1) were evicted to make room.
        assert_eq!(cache.get(&req(0), &cancel).unwrap(), None);
        assert_eq!(cache.get(&req(1), &cancel).unwrap(), None);
        // The 130th (slot 129) is the most recently inserted and must still be present.
        assert_eq!(cache.get(&req(129), &cancel).unwrap(), Some(data(129)));
    }

    #[test]
    fn concurrent_getters_observe_exactly_one_successful_mark_in_progress() {
        use std::sync::atomic::AtomicUsize;
        use std::sync::Arc as StdArc;
        use std::thread;

        let cache = StdArc::new(AttestationCache::new(4));
        let r = req(42);
        let successes = StdArc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let cache = cache.clone();
                let successes = successes.clone();
                let r = r;
                thread::spawn(move || {
                    if cache.mark_in_progress(&r).is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }
}

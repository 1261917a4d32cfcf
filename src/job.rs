//! Primitives shared between workers: the job queue, the cancellation
//! token and the single-slot result sink.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::block::BlockId;
use crate::types::ActivationBytes;

/// Closed queue of unclaimed block ids.
///
/// All ids are loaded up front; nothing is added afterwards. Each id is
/// handed to exactly one caller of [`JobQueue::claim`].
#[derive(Debug)]
pub struct JobQueue {
    pending: Mutex<VecDeque<BlockId>>,
}

impl JobQueue {
    pub fn new(blocks: impl IntoIterator<Item = BlockId>) -> Self {
        Self {
            pending: Mutex::new(blocks.into_iter().collect()),
        }
    }

    /// Claim the next block and run `on_claim` before releasing the queue.
    /// Returns `None` once the queue is empty.
    ///
    /// A [`JobQueue::drain`] that returns after this call therefore also
    /// happens after `on_claim`.
    pub fn claim(&self, on_claim: impl FnOnce(BlockId)) -> Option<BlockId> {
        let mut pending = self.lock();
        let block = pending.pop_front()?;
        on_claim(block);
        Some(block)
    }

    /// Discard every unclaimed block and return how many there were.
    pub fn drain(&self) -> usize {
        let mut pending = self.lock();
        let n = pending.len();
        pending.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<BlockId>> {
        // The queue holds plain ids, so a poisoned lock is still consistent.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write-once stop flag observed by every worker between blocks.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns `true` only for the call that set it.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Holds the first accepted match. Later offers are ignored.
#[derive(Debug, Default)]
pub struct ResultSink {
    slot: OnceLock<ActivationBytes>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a match without blocking. Returns `true` if it was accepted.
    pub fn offer(&self, found: ActivationBytes) -> bool {
        self.slot.set(found).is_ok()
    }

    pub fn get(&self) -> Option<ActivationBytes> {
        self.slot.get().copied()
    }

    pub fn into_inner(self) -> Option<ActivationBytes> {
        self.slot.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn queue_delivers_each_block_once() {
        let queue = JobQueue::new(BlockId::range(BlockId(0), BlockId::MAX));
        let claimed = Mutex::new(Vec::new());
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    while let Some(b) = queue.claim(|_| {}) {
                        claimed.lock().unwrap().push(b);
                    }
                });
            }
        });
        let claimed = claimed.into_inner().unwrap();
        assert_eq!(claimed.len(), 256);
        let unique: HashSet<_> = claimed.into_iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn drain_empties_queue() {
        let queue = JobQueue::new(BlockId::range(BlockId(250), BlockId::MAX));
        assert_eq!(queue.claim(|_| {}), Some(BlockId(250)));
        assert_eq!(queue.drain(), 5);
        assert!(queue.is_empty());
        assert_eq!(queue.claim(|_| {}), None);
    }

    #[test]
    fn claim_runs_callback_only_for_claimed_block() {
        let queue = JobQueue::new([BlockId(1)]);
        let mut seen = Vec::new();
        assert_eq!(queue.claim(|b| seen.push(b)), Some(BlockId(1)));
        assert_eq!(queue.claim(|b| seen.push(b)), None);
        assert_eq!(seen, vec![BlockId(1)]);
    }

    #[test]
    fn cancel_is_write_once() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }

    #[test]
    fn sink_keeps_first_offer() {
        let sink = ResultSink::new();
        assert!(sink.offer(ActivationBytes([1, 2, 3, 4])));
        assert!(!sink.offer(ActivationBytes([5, 6, 7, 8])));
        assert_eq!(sink.into_inner(), Some(ActivationBytes([1, 2, 3, 4])));
    }

    #[test]
    fn sink_concurrent_offers_accept_exactly_one() {
        let sink = ResultSink::new();
        let accepted = std::sync::atomic::AtomicUsize::new(0);
        std::thread::scope(|s| {
            for i in 0..16u8 {
                let sink = &sink;
                let accepted = &accepted;
                s.spawn(move || {
                    if sink.offer(ActivationBytes([i, 0, 0, 0])) {
                        accepted.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });
        assert_eq!(accepted.into_inner(), 1);
        assert!(sink.get().is_some());
    }
}

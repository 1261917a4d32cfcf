use tracing::{debug, info};

use crate::block::BlockId;
use crate::checksum::Derive;
use crate::job::{CancellationToken, JobQueue, ResultSink};
use crate::progress::{SearchObserver, PROGRESS_BATCH};
use crate::types::{ActivationBytes, Checksum};

/// Everything a worker borrows from the scheduler.
pub struct WorkerContext<'a, D: Derive + ?Sized, O: SearchObserver + ?Sized> {
    pub target: Checksum,
    pub deriver: &'a D,
    pub jobs: &'a JobQueue,
    pub cancel: &'a CancellationToken,
    pub sink: &'a ResultSink,
    pub observer: &'a O,
}

/// How a worker's job loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// This worker's match was accepted.
    Found(ActivationBytes),
    /// Stopped because another worker matched.
    Cancelled,
    /// The queue ran dry.
    Exhausted,
}

/// Pull blocks until the queue is empty or cancellation is observed.
///
/// Cancellation is only checked between blocks; a block that has started
/// is searched to the end or to a match.
pub fn run_worker<D, O>(id: usize, ctx: &WorkerContext<'_, D, O>) -> WorkerExit
where
    D: Derive + ?Sized,
    O: SearchObserver + ?Sized,
{
    let exit = loop {
        if ctx.cancel.is_cancelled() {
            break WorkerExit::Cancelled;
        }
        let Some(block) = ctx
            .jobs
            .claim(|block| ctx.observer.block_started(id, block))
        else {
            break WorkerExit::Exhausted;
        };
        debug!(worker = id, block = block.0, "claimed block");

        let Some(found) = search_block(id, block, ctx) else {
            ctx.observer.block_finished(id, block);
            debug!(worker = id, block = block.0, "block exhausted");
            continue;
        };

        if ctx.sink.offer(found) {
            // Drain before cancelling so no claim can land after the flag is set.
            let drained = ctx.jobs.drain();
            ctx.cancel.cancel();
            info!(worker = id, %found, drained, "match found, cancelling search");
            ctx.observer.found(id, found);
            break WorkerExit::Found(found);
        }
        // Another worker already published; a second preimage is not reported.
        break WorkerExit::Cancelled;
    };
    ctx.observer.worker_exited(id);
    exit
}

/// Hash every candidate of `block` against the target.
pub fn search_block<D, O>(
    id: usize,
    block: BlockId,
    ctx: &WorkerContext<'_, D, O>,
) -> Option<ActivationBytes>
where
    D: Derive + ?Sized,
    O: SearchObserver + ?Sized,
{
    let mut candidates = block.candidates();
    while let Some(candidate) = candidates.next() {
        if ctx.deriver.derive(candidate) == ctx.target {
            ctx.observer.advanced(id, block, candidates.searched());
            return Some(candidate);
        }
        let searched = candidates.searched();
        if searched % PROGRESS_BATCH == 0 {
            ctx.observer.advanced(id, block, searched);
        }
    }
    None
}

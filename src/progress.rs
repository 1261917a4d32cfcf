use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::block::BlockId;
use crate::types::ActivationBytes;

/// Candidates hashed between two `advanced` notifications.
pub const PROGRESS_BATCH: u32 = 1 << 16;

/// Receives progress events from search workers.
///
/// Called from worker threads; implementations must be cheap.
pub trait SearchObserver: Send + Sync {
    /// Worker claimed `block` and is about to enumerate it.
    fn block_started(&self, _worker: usize, _block: BlockId) {}

    /// `searched` candidates of `block` have been hashed so far.
    fn advanced(&self, _worker: usize, _block: BlockId, _searched: u32) {}

    /// Worker enumerated all of `block` without a match.
    fn block_finished(&self, _worker: usize, _block: BlockId) {}

    /// Worker matched `found`. Reported only for the accepted result.
    fn found(&self, _worker: usize, _found: ActivationBytes) {}

    /// Worker left its job loop.
    fn worker_exited(&self, _worker: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// One terminal progress bar per worker.
pub struct ProgressBars {
    multi: MultiProgress,
    bars: Vec<WorkerBar>,
}

struct WorkerBar {
    bar: ProgressBar,
    // Bar position when the current block started.
    base: AtomicU64,
}

impl ProgressBars {
    /// `per_worker` sizes each bar; workers may overrun it when blocks
    /// don't divide evenly.
    pub fn new(workers: usize, per_worker: u64, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let multi = MultiProgress::with_draw_target(target);
        let style = ProgressStyle::with_template(
            "{prefix}[{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

        let bars = (0..workers)
            .map(|_| {
                let bar = multi.add(ProgressBar::new(per_worker));
                bar.set_style(style.clone());
                WorkerBar {
                    bar,
                    base: AtomicU64::new(0),
                }
            })
            .collect();
        Self { multi, bars }
    }

    /// Whether the bars are actually drawn to a terminal.
    pub fn is_visible(&self) -> bool {
        !self.multi.is_hidden()
    }

    /// Finish any bars whose worker never reported exit.
    pub fn finish(&self) {
        for w in &self.bars {
            if !w.bar.is_finished() {
                w.bar.finish();
            }
        }
    }
}

impl SearchObserver for ProgressBars {
    fn block_started(&self, worker: usize, block: BlockId) {
        if let Some(w) = self.bars.get(worker) {
            w.base.store(w.bar.position(), Ordering::Relaxed);
            w.bar
                .set_prefix(format!("Block {:3} | {} ", block.0, block.span_label()));
        }
    }

    fn advanced(&self, worker: usize, _block: BlockId, searched: u32) {
        if let Some(w) = self.bars.get(worker) {
            w.bar
                .set_position(w.base.load(Ordering::Relaxed) + searched as u64);
        }
    }

    fn found(&self, worker: usize, found: ActivationBytes) {
        if let Some(w) = self.bars.get(worker) {
            w.bar.set_message(format!("found {found}"));
        }
    }

    fn worker_exited(&self, worker: usize) {
        if let Some(w) = self.bars.get(worker) {
            w.bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_tracks_cumulative_position_across_blocks() {
        let bars = ProgressBars::new(2, 1 << 25, false);
        bars.block_started(1, BlockId(3));
        bars.advanced(1, BlockId(3), 1 << 24);
        bars.block_started(1, BlockId(4));
        bars.advanced(1, BlockId(4), 10);
        assert_eq!(bars.bars[1].bar.position(), (1 << 24) + 10);
        assert_eq!(bars.bars[0].bar.position(), 0);
    }

    #[test]
    fn unknown_worker_is_ignored() {
        let bars = ProgressBars::new(1, 100, false);
        bars.block_started(5, BlockId(0));
        bars.advanced(5, BlockId(0), 1);
        bars.worker_exited(5);
        bars.finish();
        assert!(bars.bars[0].bar.is_finished());
        assert!(!bars.is_visible());
    }
}

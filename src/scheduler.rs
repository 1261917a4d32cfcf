//! Fans the block range out to a fixed pool of worker threads and collects
//! the single result.

use std::thread;

use serde::Serialize;
use tracing::{error, info};

use crate::checksum::{ChecksumDeriver, Derive};
use crate::config::{FixedKey, SearchConfig};
use crate::error::SearchError;
use crate::job::{CancellationToken, JobQueue, ResultSink};
use crate::progress::{NoopObserver, SearchObserver};
use crate::types::{ActivationBytes, Checksum};
use crate::worker::{run_worker, WorkerContext};

/// Outcome of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "activation_bytes", rename_all = "snake_case")]
pub enum SearchResult {
    Found(ActivationBytes),
    NotFound,
}

impl SearchResult {
    pub fn found(self) -> Option<ActivationBytes> {
        match self {
            SearchResult::Found(ab) => Some(ab),
            SearchResult::NotFound => None,
        }
    }
}

/// Runs searches with a given deriver and progress observer.
pub struct Scheduler<'a, D: Derive + ?Sized, O: SearchObserver + ?Sized> {
    deriver: &'a D,
    observer: &'a O,
}

impl<'a, D, O> Scheduler<'a, D, O>
where
    D: Derive + ?Sized,
    O: SearchObserver + ?Sized,
{
    pub fn new(deriver: &'a D, observer: &'a O) -> Self {
        Self { deriver, observer }
    }

    /// Search `config`'s block range for a preimage of `target`.
    ///
    /// Blocks until every worker has exited. A worker that cannot be
    /// spawned aborts the whole search.
    pub fn run(&self, target: Checksum, config: &SearchConfig) -> Result<SearchResult, SearchError> {
        config.validate()?;

        let jobs = JobQueue::new(config.blocks());
        let cancel = CancellationToken::new();
        let sink = ResultSink::new();
        let ctx = WorkerContext {
            target,
            deriver: self.deriver,
            jobs: &jobs,
            cancel: &cancel,
            sink: &sink,
            observer: self.observer,
        };

        info!(
            %target,
            start = config.start_block.0,
            end = config.end_block.0,
            workers = config.workers,
            "starting search"
        );

        let outcome = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(config.workers);
            let mut spawn_error = None;

            for id in 0..config.workers {
                let ctx = &ctx;
                let spawned = thread::Builder::new()
                    .name(format!("acbf-worker-{id}"))
                    .spawn_scoped(scope, move || run_worker(id, ctx));
                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(source) => {
                        let drained = jobs.drain();
                        cancel.cancel();
                        error!(worker = id, %source, drained, "failed to spawn worker");
                        spawn_error = Some(SearchError::Spawn { worker: id, source });
                        break;
                    }
                }
            }

            let mut panicked = None;
            for (id, handle) in handles {
                if handle.join().is_err() {
                    panicked.get_or_insert(id);
                }
            }

            match (spawn_error, panicked) {
                (Some(err), _) => Err(err),
                (None, Some(id)) => Err(SearchError::WorkerPanicked(id)),
                (None, None) => Ok(()),
            }
        });

        // No-op after a match; marks exhaustion otherwise.
        cancel.cancel();
        outcome?;

        let result = match sink.into_inner() {
            Some(found) => SearchResult::Found(found),
            None => SearchResult::NotFound,
        };
        info!(?result, "search finished");
        Ok(result)
    }
}

/// Search with the Audible key and no progress reporting.
pub fn search(target: Checksum, config: &SearchConfig) -> Result<SearchResult, SearchError> {
    let deriver = ChecksumDeriver::new(FixedKey::AUDIBLE);
    Scheduler::new(&deriver, &NoopObserver).run(target, config)
}

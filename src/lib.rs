//! Recover Audible activation bytes from a file checksum.
//!
//! The 4-byte keyspace is split into 256 blocks by leading byte. A pool of
//! worker threads claims blocks from a shared queue and hashes every
//! candidate until one reproduces the target checksum, at which point the
//! remaining work is cancelled.

pub mod block;
pub mod checksum;
pub mod config;
pub mod cpu;
pub mod error;
pub mod io_utils;
pub mod job;
pub mod progress;
pub mod scheduler;
pub mod types;
pub mod worker;

pub use block::{BlockCandidates, BlockId, CANDIDATES_PER_BLOCK};
pub use checksum::{derive_checksum, ChecksumDeriver, Derive};
pub use config::{available_workers, FixedKey, SearchConfig};
pub use cpu::CpuSummary;
pub use error::SearchError;
pub use job::{CancellationToken, JobQueue, ResultSink};
pub use progress::{NoopObserver, ProgressBars, SearchObserver, PROGRESS_BATCH};
pub use scheduler::{search, Scheduler, SearchResult};
pub use types::{ActivationBytes, Checksum, CHECKSUM_LEN};
pub use worker::{run_worker, WorkerContext, WorkerExit};

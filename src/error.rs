use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Checksum text that is not exactly 40 hex digits.
    #[error("invalid checksum: {0}")]
    InvalidChecksum(String),

    /// Search configuration that cannot be run.
    #[error("config error: {0}")]
    Config(String),

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked before it could finish.
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

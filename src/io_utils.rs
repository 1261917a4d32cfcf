use std::fmt;

use crate::error::SearchError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.msg, f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Convert a search error into a CLI error with a hint.
pub fn search_cli_error(context: &str, err: SearchError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a search error variant.
pub fn cli_hint(err: &SearchError) -> String {
    use SearchError::*;
    match err {
        InvalidChecksum(msg) => {
            format!("{msg}. Pass the 40 hex digit checksum from ffprobe's \"file checksum\" line.")
        }
        Config(msg) => format!("{msg}. Check --start, --end and --cores."),
        Spawn { worker, source } => {
            format!("could not start worker {worker} ({source}). Try fewer --cores.")
        }
        WorkerPanicked(id) => format!("worker {id} panicked. This is a bug."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_keeps_context_and_source() {
        let err = search_cli_error("parsing checksum", SearchError::InvalidChecksum("too short".into()));
        assert!(err.msg.starts_with("parsing checksum: too short."));
        assert!(std::error::Error::source(&err).is_some());
    }
}

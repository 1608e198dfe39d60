use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The child process could not be started at all (binary missing,
    /// permission denied, ...).
    #[error("failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran but exited with a non-zero status. Carries the combined
    /// output so callers can surface diagnostics.
    #[error("{program} exited with status {}", code.map_or_else(|| "unknown (killed by signal?)".to_string(), |c| c.to_string()))]
    Failed {
        program: String,
        code: Option<i32>,
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProcessError>;

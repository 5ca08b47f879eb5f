use thiserror::Error;

/// Failures of the external proposal publisher process.
#[derive(Error, Debug)]
pub enum PublisherError {
    /// The publisher executable could not be started.
    #[error("Failed to spawn publisher '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The publisher did not finish within the configured timeout.
    #[error("Publisher timed out after {0} seconds")]
    Timeout(u64),

    /// The publisher exited with a non-zero status.
    #[error("Publisher exited with status {code:?}: {stderr}")]
    ExitStatus { code: Option<i32>, stderr: String },

    /// The publisher succeeded but its output did not contain a ledger id.
    #[error("Publisher output did not contain a ledger id: {0}")]
    MissingLedgerId(String),
}

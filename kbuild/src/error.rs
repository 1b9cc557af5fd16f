//! Typed failures for external tool invocations.

use std::process::ExitStatus;
use thiserror::Error;

/// One external invocation that did not succeed.
#[derive(Debug, Error)]
pub enum StepError {
    /// The program could not be started at all.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{program}` failed with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Failures collected over a whole build pipeline.
#[derive(Debug, Error)]
#[error("{} build step(s) failed", .failures.len())]
pub struct BuildError {
    pub failures: Vec<StepError>,
}

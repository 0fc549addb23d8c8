use thiserror::Error;

/// Submission failures surfaced to the workflow engine.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The invoking user's identity could not be read from the
    /// environment. Job names embed it, so this is a configuration
    /// error, not something to paper over.
    #[error("LOGNAME is not set; cannot derive a job name")]
    MissingLogname,
    /// The scheduler accepted the command but its reply carried no
    /// parsable task id. Registering a garbage key would leave an
    /// entry that can never be polled to completion.
    #[error("scheduler reply has no parsable task id (stdout: {stdout:?})")]
    MalformedReply { stdout: String },
    /// A single submission attempt failed; retried by the submitter
    /// until the attempt budget runs out.
    #[error("submission command failed: {reason}")]
    CommandFailed { reason: String },
    /// The retry budget is spent.
    #[error("could not submit batch task for node {node} after {attempts} attempts: {last_error}")]
    Exhausted {
        node: String,
        attempts: u32,
        last_error: String,
    },
}

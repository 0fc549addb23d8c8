use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use qbatch_core::SubmitError;

/// Scheduler-family seam.
///
/// Each implementation owns its own command construction and the
/// marker strings it scrapes out of status text, so the fragile
/// parsing stays in one place per scheduler. Only the PBS/Torque
/// variant ships; an SGE-like client would slot in behind the same
/// trait.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// One submission attempt. Returns the scheduler-assigned task id.
    ///
    /// `SubmitError::CommandFailed` marks attempts the caller may
    /// retry; any other error is final for this node.
    async fn submit_job(
        &self,
        script: &Path,
        args: &[String],
        job_name: &str,
    ) -> Result<String, SubmitError>;

    /// Whether the scheduler still considers the job not-yet-finished.
    ///
    /// Scheduler-reported outcomes (including "never heard of that
    /// job") are answers, not errors; an `Err` here means the status
    /// tool itself could not be consulted.
    async fn is_pending(&self, task_id: &str) -> Result<bool>;
}

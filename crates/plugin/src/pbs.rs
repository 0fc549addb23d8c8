use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use qbatch_core::{PluginConfig, SubmitError};
use tracing::{debug, warn};

use crate::executor::{CommandOutput, CommandRunner};
use crate::quiet;
use crate::scheduler::Scheduler;

// Marker strings qstat emits for jobs past their lifetime.
const FINISHED_STDERR: &str = "Job has finished";
const COMPLETE_STDOUT: &str = "job_state = C";
const UNKNOWN_STDERR: &str = "Unknown Job Id";

/// PBS/Torque client: submits through `qsub`, classifies through
/// `qstat -f` output.
#[derive(Debug, Clone)]
pub struct PbsScheduler<R> {
    runner: R,
    qsub_bin: String,
    qstat_bin: String,
}

impl<R> PbsScheduler<R> {
    pub fn new(runner: R, cfg: &PluginConfig) -> Self {
        Self {
            runner,
            qsub_bin: cfg.qsub_bin.clone(),
            qstat_bin: cfg.qstat_bin.clone(),
        }
    }
}

#[async_trait]
impl<R: CommandRunner> Scheduler for PbsScheduler<R> {
    async fn submit_job(
        &self,
        script: &Path,
        args: &[String],
        job_name: &str,
    ) -> Result<String, SubmitError> {
        let mut argv: Vec<String> = args.to_vec();
        argv.push("-N".to_string());
        argv.push(job_name.to_string());
        argv.push(script.display().to_string());

        let out = match self.runner.run(&self.qsub_bin, &argv).await {
            Ok(out) => out,
            Err(e) => {
                let reason = format!("{e:#}");
                log_attempt_failure(&self.qsub_bin, &reason);
                return Err(SubmitError::CommandFailed { reason });
            }
        };

        if !out.success() {
            let reason = format!(
                "{} exited with {}: {}",
                self.qsub_bin,
                out.exit_code,
                out.stderr.trim()
            );
            log_attempt_failure(&self.qsub_bin, &reason);
            return Err(SubmitError::CommandFailed { reason });
        }

        parse_task_id(&out.stdout).ok_or(SubmitError::MalformedReply { stdout: out.stdout })
    }

    async fn is_pending(&self, task_id: &str) -> Result<bool> {
        let argv = vec!["-f".to_string(), task_id.to_string()];
        let out = self.runner.run(&self.qstat_bin, &argv).await?;
        let pending = classify_pending(&out);
        debug!("qstat for task {task_id}: pending={pending}");
        Ok(pending)
    }
}

// Demoted to debug while a retrying submitter holds the quiet guard,
// full warning when a caller submits without one.
fn log_attempt_failure(bin: &str, reason: &str) {
    if quiet::attempts_quiet() {
        debug!("{bin} submission attempt failed: {reason}");
    } else {
        warn!("{bin} submission attempt failed: {reason}");
    }
}

/// Task ids come back as `taskid.servername`; everything before the
/// first `.` is the id.
fn parse_task_id(stdout: &str) -> Option<String> {
    let id = stdout.trim().split('.').next().unwrap_or("").to_string();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

fn classify_pending(out: &CommandOutput) -> bool {
    if out.stderr.contains(FINISHED_STDERR) || out.stdout.contains(COMPLETE_STDOUT) {
        return false;
    }
    // PBS keeps no durable record of old jobs, so "unknown" has to
    // mean the job left the queue after finishing. Known gap: a
    // transient scheduler outage answering "unknown" is
    // indistinguishable from completion and will be reported as
    // finished.
    !out.stderr.contains(UNKNOWN_STDERR)
}

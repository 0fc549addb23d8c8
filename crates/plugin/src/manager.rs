use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use qbatch_core::{NodeSpec, PendingTasks, PluginConfig, SubmitError};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::scheduler::Scheduler;
use crate::submit::submit_node;

/// Drives the submit/poll lifecycle for a set of in-flight jobs.
///
/// The registry it owns is the single source of truth for "still
/// pending". The surrounding engine decides cadence; each `poll_once`
/// call is one pass over the registry.
pub struct BatchManager<S> {
    scheduler: S,
    cfg: PluginConfig,
    pending: Arc<PendingTasks>,
}

impl<S: Scheduler> BatchManager<S> {
    pub fn new(scheduler: S, cfg: PluginConfig, pending: Arc<PendingTasks>) -> Self {
        Self {
            scheduler,
            cfg,
            pending,
        }
    }

    pub fn pending(&self) -> &PendingTasks {
        &self.pending
    }

    pub async fn submit(&self, node: &NodeSpec, script: &Path) -> Result<String, SubmitError> {
        submit_node(&self.scheduler, &self.cfg, node, script, &self.pending).await
    }

    /// Polls every registered task once and removes those the
    /// scheduler reports finished. Returns the completed
    /// `(task id, output dir)` pairs so the engine can collect results
    /// from the output directories. A poll failure for one task keeps
    /// it pending and never aborts the pass.
    pub async fn poll_once(&self) -> Vec<(String, PathBuf)> {
        let mut finished = Vec::new();
        for (task_id, output_dir) in self.pending.snapshot() {
            match self.scheduler.is_pending(&task_id).await {
                Ok(true) => {}
                Ok(false) => {
                    if self.pending.remove(&task_id).is_some() {
                        debug!("pbs task {task_id} finished; results in {}", output_dir.display());
                        finished.push((task_id, output_dir));
                    }
                }
                Err(e) => {
                    warn!("status poll for task {task_id} failed, keeping it pending: {e:#}");
                }
            }
        }
        finished
    }

    /// Loops `poll_once` until the registry drains, sleeping
    /// `interval` between passes. Jobs the scheduler never finishes
    /// are polled indefinitely; that cut-off belongs to the caller.
    pub async fn wait_all(&self, interval: Duration) -> Vec<(String, PathBuf)> {
        let mut finished = self.poll_once().await;
        while !self.pending.is_empty() {
            sleep(interval).await;
            finished.extend(self.poll_once().await);
        }
        finished
    }
}

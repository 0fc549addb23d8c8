use std::path::Path;
use std::time::Duration;

use qbatch_core::{build_job_name, effective_qsub_args, NodeSpec, PendingTasks, PluginConfig, SubmitError};
use tokio::time::sleep;
use tracing::debug;

use crate::quiet::QuietAttempts;
use crate::scheduler::Scheduler;

/// Submits one node's launch script and registers the returned task id.
///
/// Retries transient submission failures up to `cfg.max_tries` total
/// attempts, sleeping `cfg.retry_timeout_secs` between them. The
/// scheduler's stdout reply is authoritative once a command runs to
/// completion: an unparsable reply fails immediately rather than
/// registering a key that could never be polled off the registry.
pub async fn submit_node<S: Scheduler>(
    scheduler: &S,
    cfg: &PluginConfig,
    node: &NodeSpec,
    script: &Path,
    pending: &PendingTasks,
) -> Result<String, SubmitError> {
    let user = std::env::var("LOGNAME").map_err(|_| SubmitError::MissingLogname)?;

    let script_dir = script.parent().unwrap_or_else(|| Path::new("."));
    let args = effective_qsub_args(&cfg.qsub_args, node, script_dir);
    let job_name = build_job_name(&user, &node.hierarchy, &node.id, cfg.max_jobname_len);

    let _quiet = QuietAttempts::engage();

    // A zero attempt budget from a hand-edited config would fail the
    // node without ever calling qsub; one attempt is the floor.
    let max_tries = cfg.max_tries.max(1);

    let mut attempt = 1u32;
    let task_id = loop {
        match scheduler.submit_job(script, &args, &job_name).await {
            Ok(id) => break id,
            Err(SubmitError::CommandFailed { reason }) => {
                if attempt >= max_tries {
                    return Err(SubmitError::Exhausted {
                        node: node.id.clone(),
                        attempts: attempt,
                        last_error: reason,
                    });
                }
                debug!("submission attempt {attempt} for node {} failed: {reason}", node.id);
                attempt += 1;
                sleep(Duration::from_secs(cfg.retry_timeout_secs)).await;
            }
            Err(e) => return Err(e),
        }
    };

    pending.insert(task_id.clone(), node.output_dir.clone());
    debug!("submitted pbs task {task_id} for node {}", node.id);
    Ok(task_id)
}

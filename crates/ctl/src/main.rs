use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qbatch_core::{NodeSpec, PendingTasks, PluginConfig};
use qbatch_plugin::{BatchManager, PbsScheduler, ProcessRunner, Scheduler};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "qbatchctl", version, about = "Submit and track PBS/Torque batch jobs")]
struct Cli {
    /// Plugin configuration file (TOML). Missing file means defaults.
    #[arg(long, default_value = "qbatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Submit one launch script and print the scheduler task id.
    Submit {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        output_dir: PathBuf,
        #[arg(long)]
        node_id: String,
        /// Dotted hierarchy above the node, e.g. "wf.branch".
        #[arg(long)]
        hierarchy: Option<String>,
        /// Extra qsub arguments for this submission only.
        #[arg(long)]
        qsub_args: Option<String>,
        /// Replace the configured qsub arguments instead of appending.
        #[arg(long)]
        overwrite: bool,
    },
    /// Query whether a task is still pending.
    Status { task_id: String },
    /// Submit one or more scripts and poll until all of them finish.
    Run {
        #[arg(long = "script")]
        scripts: Vec<PathBuf>,
        #[arg(long = "output-dir")]
        output_dirs: Vec<PathBuf>,
        #[arg(long = "node-id")]
        node_ids: Vec<String>,
        #[arg(long, default_value_t = 5)]
        poll_interval_seconds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = if cli.config.exists() {
        PluginConfig::load_from(&cli.config)?
    } else {
        PluginConfig::default()
    };

    let scheduler = PbsScheduler::new(ProcessRunner, &cfg);

    match cli.cmd {
        Cmd::Submit {
            script,
            output_dir,
            node_id,
            hierarchy,
            qsub_args,
            overwrite,
        } => {
            let pending = Arc::new(PendingTasks::new());
            let manager = BatchManager::new(scheduler, cfg, pending);
            let node = node_spec(node_id, output_dir, hierarchy, qsub_args, overwrite);
            let task_id = manager
                .submit(&node, &script)
                .await
                .with_context(|| format!("submitting {}", script.display()))?;
            println!("{task_id}");
        }
        Cmd::Status { task_id } => {
            let pending = scheduler.is_pending(&task_id).await?;
            println!("{}", if pending { "pending" } else { "finished" });
        }
        Cmd::Run {
            scripts,
            output_dirs,
            node_ids,
            poll_interval_seconds,
        } => {
            if scripts.len() != output_dirs.len() || scripts.len() != node_ids.len() {
                bail!("--script, --output-dir and --node-id must be given the same number of times");
            }
            if scripts.is_empty() {
                bail!("nothing to run");
            }

            let pending = Arc::new(PendingTasks::new());
            let manager = BatchManager::new(scheduler, cfg, pending);

            for ((script, output_dir), node_id) in
                scripts.iter().zip(output_dirs).zip(node_ids)
            {
                let node = node_spec(node_id, output_dir, None, None, false);
                let task_id = manager
                    .submit(&node, script)
                    .await
                    .with_context(|| format!("submitting {}", script.display()))?;
                info!("submitted {} as task {task_id}", script.display());
            }

            let finished = manager
                .wait_all(Duration::from_secs(poll_interval_seconds))
                .await;
            for (task_id, output_dir) in finished {
                println!("{task_id}\t{}", output_dir.display());
            }
        }
    }

    Ok(())
}

fn node_spec(
    node_id: String,
    output_dir: PathBuf,
    hierarchy: Option<String>,
    qsub_args: Option<String>,
    overwrite: bool,
) -> NodeSpec {
    let mut node = NodeSpec::new(node_id, output_dir);
    if let Some(h) = hierarchy {
        node.hierarchy = h.split('.').map(str::to_string).collect();
    }
    node.qsub_args = qsub_args;
    node.overwrite = overwrite;
    node
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One unit of work handed over by the workflow engine.
///
/// The engine generates the launch script before calling into this
/// plugin; the node only carries what submission and tracking need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NodeSpec {
    /// Leaf identifier, stable within the workflow.
    pub id: String,
    /// Hierarchy segments from workflow root down to the node's parent.
    /// May be empty for top-level nodes.
    #[serde(default)]
    pub hierarchy: Vec<String>,
    /// Directory the job writes its results into. The engine inspects
    /// this directory once the job is reported finished.
    pub output_dir: PathBuf,
    /// Extra `qsub` arguments for this node only.
    #[serde(default)]
    pub qsub_args: Option<String>,
    /// When set, `qsub_args` replaces the plugin-wide arguments instead
    /// of being appended to them.
    #[serde(default)]
    pub overwrite: bool,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            hierarchy: Vec::new(),
            output_dir: output_dir.into(),
            qsub_args: None,
            overwrite: false,
        }
    }
}

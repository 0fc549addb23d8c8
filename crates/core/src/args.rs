use std::path::Path;

use crate::model::NodeSpec;

/// Resolves the effective `qsub` argument list for one node.
///
/// Precedence: plugin-wide arguments, then node arguments (replacing
/// everything when the node sets `overwrite`, appended otherwise).
/// `-o` and `-e` are guaranteed present exactly once, defaulting to
/// `default_dir` (the script's parent directory) when the caller gave
/// neither.
pub fn effective_qsub_args(global: &str, node: &NodeSpec, default_dir: &Path) -> Vec<String> {
    let mut args: Vec<String> = global.split_whitespace().map(str::to_string).collect();

    if let Some(extra) = &node.qsub_args {
        let extra = extra.split_whitespace().map(str::to_string);
        if node.overwrite {
            args = extra.collect();
        } else {
            args.extend(extra);
        }
    }

    if !args.iter().any(|a| a == "-o") {
        args.push("-o".to_string());
        args.push(default_dir.display().to_string());
    }
    if !args.iter().any(|a| a == "-e") {
        args.push("-e".to_string());
        args.push(default_dir.display().to_string());
    }

    args
}

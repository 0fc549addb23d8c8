/// Builds the scheduler-visible job name for a node.
///
/// The dotted name `user.<hierarchy...>.leaf` is split on `.`,
/// reversed, rejoined and truncated to `max_len` characters. PBS
/// truncates long names from the right, so reversing first keeps the
/// most specific (leaf) part of the name inside the truncated prefix
/// at the cost of the coarse user/workflow prefix. Collisions between
/// nodes that differ only in the truncated tail are possible; the
/// caller owns uniqueness.
pub fn build_job_name(user: &str, hierarchy: &[String], leaf_id: &str, max_len: usize) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(hierarchy.len() + 2);
    parts.push(user);
    parts.extend(hierarchy.iter().map(String::as_str));
    parts.push(leaf_id);
    let joined = parts.join(".");

    let mut items: Vec<&str> = joined.split('.').collect();
    items.reverse();
    let reversed = items.join(".");

    reversed.chars().take(max_len).collect()
}

//! Indented text dump of a merge tree.

use core::fmt::Write;

use super::node::ClusterNode;

/// Render `root` as indented text, one node per line.
///
/// Pre-order (node, left, right), two spaces of indentation per tree level.
/// Internal nodes print as `-`; leaves print as their label, or their row
/// index when `labels` is `None` or has no entry for that row.
///
/// ```text
/// -
///   -
///     alpha
///     beta
///   gamma
/// ```
pub fn format_tree<L: AsRef<str>>(root: &ClusterNode, labels: Option<&[L]>) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&ClusterNode, usize)> = vec![(root, 0)];

    while let Some((node, level)) = stack.pop() {
        for _ in 0..level {
            out.push_str("  ");
        }
        match (node.children(), node.leaf_index()) {
            (Some((l, r)), _) => {
                out.push('-');
                stack.push((r, level + 1));
                stack.push((l, level + 1));
            }
            (None, Some(index)) => match labels.and_then(|ls| ls.get(index)) {
                Some(label) => out.push_str(label.as_ref()),
                None => {
                    let _ = write!(out, "{index}");
                }
            },
            (None, None) => {
                let _ = write!(out, "{}", node.id());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClusterNode {
        let ab = ClusterNode::merge(
            -1,
            ClusterNode::leaf(0, vec![0.0]),
            ClusterNode::leaf(1, vec![0.0]),
            0.1,
        );
        ClusterNode::merge(-2, ab, ClusterNode::leaf(2, vec![1.0]), 0.4)
    }

    #[test]
    fn labelled_dump() {
        let labels = ["alpha", "beta", "gamma"];
        let text = format_tree(&sample(), Some(&labels[..]));
        assert_eq!(text, "-\n  -\n    alpha\n    beta\n  gamma\n");
    }

    #[test]
    fn unlabelled_dump_uses_row_indices() {
        let text = format_tree::<&str>(&sample(), None);
        assert_eq!(text, "-\n  -\n    0\n    1\n  2\n");
    }

    #[test]
    fn short_label_list_falls_back_to_index() {
        let labels = vec!["alpha".to_string()];
        let text = format_tree(&sample(), Some(labels.as_slice()));
        assert!(text.ends_with("    alpha\n    1\n  2\n"));
    }
}

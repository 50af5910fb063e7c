//! Structural checks for merge trees.
//!
//! A tree produced by [`crate::HierarchicalClustering`] always passes. The
//! checks exist for trees assembled by hand (tests, deserialized results) and
//! for metrics plugged in from outside, which may return negative or `NaN`
//! distances.
//!
//! ```rust
//! use clade::hierarchy::{validate_cluster_tree, ClusterNode};
//!
//! let root = ClusterNode::merge(
//!     -1,
//!     ClusterNode::leaf(0, vec![0.0]),
//!     ClusterNode::leaf(1, vec![2.0]),
//!     2.0,
//! );
//! let report = validate_cluster_tree(&root, 2);
//! assert!(report.is_clean(), "{report}");
//! ```

use std::collections::HashSet;
use std::fmt;

use super::node::{ClusterId, ClusterNode};

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Something unusual but not necessarily wrong.
    Warning,
    /// The tree violates a structural invariant.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single problem found in a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Node involved, if any.
    pub node_id: Option<ClusterId>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            node_id: None,
        }
    }

    /// Attach the offending node.
    pub fn with_node(mut self, id: ClusterId) -> Self {
        self.node_id = Some(id);
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(id) = self.node_id {
            write!(f, " (node {id})")?;
        }
        Ok(())
    }
}

/// Everything [`validate_cluster_tree`] found.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, message: impl Into<String>, node: Option<ClusterId>) {
        let mut issue = ValidationIssue::new(severity, message);
        issue.node_id = node;
        self.issues.push(issue);
    }

    /// No errors (warnings allowed).
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// No issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues at or above `min_severity`.
    pub fn issues_at_level(&self, min_severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity >= min_severity)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "Validation passed: no issues found");
        }
        let errors = self.issues_at_level(Severity::Error).count();
        let warnings = self.issues.len() - errors;
        writeln!(f, "Validation report: {errors} errors, {warnings} warnings")?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// Check that `root` is a well-formed merge tree over `n_items` rows.
///
/// Errors:
/// - leaf ids are not a permutation of `0..n_items`
/// - internal ids are not exactly `-1..=-(n_items-1)`, or repeat
/// - a child was created after its parent (child id more negative)
/// - a node's vector length differs from the root's
/// - an internal vector is not the mean of its children
///
/// Warnings: negative or non-finite merge distances.
pub fn validate_cluster_tree(root: &ClusterNode, n_items: usize) -> ValidationReport {
    let mut report = ValidationReport::new();
    let dim = root.vector().len();
    let mut leaves: HashSet<usize> = HashSet::with_capacity(n_items);
    let mut internal: HashSet<ClusterId> = HashSet::with_capacity(n_items.saturating_sub(1));

    for node in root {
        let id = node.id();
        if node.vector().len() != dim {
            report.push(
                Severity::Error,
                format!("vector has {} components, root has {dim}", node.vector().len()),
                Some(id),
            );
        }

        let Some((l, r)) = node.children() else {
            match usize::try_from(id) {
                Ok(index) if index < n_items => {
                    if !leaves.insert(index) {
                        report.push(Severity::Error, "duplicate leaf id", Some(id));
                    }
                }
                _ => report.push(
                    Severity::Error,
                    format!("leaf id outside 0..{n_items}"),
                    Some(id),
                ),
            }
            continue;
        };

        if id >= 0 {
            report.push(Severity::Error, "internal node with non-negative id", Some(id));
        } else if !internal.insert(id) {
            report.push(Severity::Error, "duplicate internal id", Some(id));
        }

        for child in [l, r] {
            if !child.is_leaf() && child.id() <= id {
                report.push(
                    Severity::Error,
                    format!("child {} created after its parent", child.id()),
                    Some(id),
                );
            }
        }

        if l.vector().len() == r.vector().len() && node.vector().len() == l.vector().len() {
            let drift = node
                .vector()
                .iter()
                .zip(l.vector().iter().zip(r.vector()))
                .any(|(m, (a, b))| (m - (a + b) / 2.0).abs() > 1e-9 * (1.0 + m.abs()));
            if drift {
                report.push(Severity::Error, "vector is not the mean of its children", Some(id));
            }
        }

        let d = node.merge_distance();
        if !d.is_finite() {
            report.push(Severity::Warning, format!("non-finite merge distance {d}"), Some(id));
        } else if d < 0.0 {
            report.push(Severity::Warning, format!("negative merge distance {d}"), Some(id));
        }
    }

    if leaves.len() != n_items {
        report.push(
            Severity::Error,
            format!("found {} distinct leaves, expected {n_items}", leaves.len()),
            None,
        );
    }
    let expected_internal = n_items.saturating_sub(1);
    let contiguous = (1..=expected_internal as ClusterId).all(|k| internal.contains(&-k));
    if internal.len() != expected_internal || !contiguous {
        report.push(
            Severity::Error,
            format!(
                "internal ids are not -1..=-{expected_internal} ({} found)",
                internal.len()
            ),
            None,
        );
    }

    report
}

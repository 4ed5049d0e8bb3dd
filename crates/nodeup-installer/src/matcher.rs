//! Version selection against a merged constraint

use nodeup_core::{NodeVersion, VersionConstraint};

/// Check a single version against the constraint
pub fn is_version_matching(version: &NodeVersion, constraint: &VersionConstraint) -> bool {
    constraint.matches(version)
}

/// Highest candidate satisfying the constraint
pub fn find_best_matching_version(
    candidates: &[NodeVersion],
    constraint: &VersionConstraint,
) -> Option<NodeVersion> {
    candidates
        .iter()
        .filter(|version| is_version_matching(version, constraint))
        .max()
        .copied()
}

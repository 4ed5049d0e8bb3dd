//! Owner lookup and constraint merging across packages

use nodeup_core::{Result, VersionConstraint};
use tracing::debug;

use crate::package::Package;

/// Namespace the installer package registers under PSR-4
pub const OWNER_NAMESPACE: &str = "Mouf\\NodeJsInstaller\\NodeJs";

/// Result of looking up the package that owns a namespace
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Owner<'a> {
    Found(&'a Package),
    NotFound,
}

impl<'a> Owner<'a> {
    pub fn package(&self) -> Option<&'a Package> {
        match self {
            Owner::Found(package) => Some(package),
            Owner::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Owner::Found(_))
    }
}

/// Find the first package whose PSR-4 prefixes cover `namespace`
///
/// A prefix covers a namespace when the namespace equals the prefix stripped
/// of its trailing backslashes, or continues it past a `\` boundary. Empty
/// fallback prefixes are ignored.
pub fn find_owner<'a, I>(packages: I, namespace: &str) -> Owner<'a>
where
    I: IntoIterator<Item = &'a Package>,
{
    packages
        .into_iter()
        .find(|package| owns_namespace(package, namespace))
        .map_or(Owner::NotFound, Owner::Found)
}

fn owns_namespace(package: &Package, namespace: &str) -> bool {
    package.psr4_prefixes().any(|prefix| {
        let prefix = prefix.trim_end_matches('\\');
        !prefix.is_empty()
            && namespace
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('\\'))
    })
}

/// Intersect the Node.js constraints declared by every package
///
/// Packages without a constraint add no restriction; with no declarations
/// at all the result accepts any version.
pub fn merged_constraint<'a, I>(packages: I) -> Result<VersionConstraint>
where
    I: IntoIterator<Item = &'a Package>,
{
    let mut merged = VersionConstraint::any();

    for package in packages {
        if let Some(declared) = package.node_constraint() {
            debug!("{} requires Node.js {}", package.name, declared);
            merged = merged.and(VersionConstraint::parse(declared)?);
        }
    }

    Ok(merged)
}

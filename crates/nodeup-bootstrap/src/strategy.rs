//! Whether the bootstrap should run at all

use nodeup_manifest::{find_owner, Package, OWNER_NAMESPACE};
use tracing::debug;

/// Dispatch only runs when the installer package itself is installed
pub fn should_allow<'a, I>(packages: I) -> bool
where
    I: IntoIterator<Item = &'a Package>,
{
    let allowed = find_owner(packages, OWNER_NAMESPACE).is_found();
    if !allowed {
        debug!("No package owns {}; skipping", OWNER_NAMESPACE);
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_with_owner() {
        let packages = vec![
            Package::new("acme/app"),
            Package::new("mouf/nodejs-installer").with_psr4("Mouf\\NodeJsInstaller\\", "src/"),
        ];
        assert!(should_allow(&packages));
    }

    #[test]
    fn test_denied_without_owner() {
        let packages = vec![Package::new("acme/app").with_psr4("Acme\\", "src/")];
        assert!(!should_allow(&packages));
    }
}
